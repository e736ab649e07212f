use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::{DestinationAPI, MapAPI};
use crate::entities::{MapView, RouteSummary};
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct SummaryView {
    #[serde(flatten)]
    summary: RouteSummary,
    distance_km: String,
    time_minutes: String,
    fuel_litres: String,
}

impl From<RouteSummary> for SummaryView {
    fn from(summary: RouteSummary) -> Self {
        Self {
            distance_km: summary.distance_text(),
            time_minutes: summary.time_text(),
            fuel_litres: summary.fuel_text(),
            summary,
        }
    }
}

pub async fn view(Extension(api): Extension<DynAPI>) -> Json<MapView> {
    api.map_view().await.into()
}

pub async fn summary(Extension(api): Extension<DynAPI>) -> Json<Option<SummaryView>> {
    api.route_summary().await.map(SummaryView::from).into()
}

/// The planner page as plain text: the ranked list, then the route summary.
pub async fn page(Extension(api): Extension<DynAPI>) -> String {
    let mut page = api.listing().await.to_string();

    if let Some(summary) = api.route_summary().await {
        page.push('\n');
        for line in summary.lines() {
            page.push_str(&line);
            page.push('\n');
        }
    }

    page
}

#[test]
fn page_lists_destinations_then_summary() {
    use crate::engine::mock::{engine_with, MockGeocoder, MockRouter};
    use crate::store::MemoryStore;
    use std::sync::Arc;
    use tokio_test::block_on;

    let geocoder = Arc::new(MockGeocoder::with_places(&[
        ("Delhi", 28.6, 77.2),
        ("Mumbai", 19.0, 72.8),
    ]));
    let router = Arc::new(MockRouter::returning(150_000.0, 5400.0));
    let engine = block_on(engine_with(
        geocoder,
        router,
        Arc::new(MemoryStore::default()),
    ))
    .unwrap();
    let api: DynAPI = Arc::new(engine);

    assert_eq!(block_on(page(Extension(api.clone()))), "");

    block_on(api.add_destination("Delhi".into())).unwrap();
    block_on(api.add_destination("Mumbai".into())).unwrap();

    assert_eq!(
        block_on(page(Extension(api.clone()))),
        "1. Delhi [up] [down]\n2. Mumbai [up] [down]\n\n\
         🛣 Distance: 150.00 km\n⏱ Time: 90 minutes\n⛽ Fuel: 10.00 litres\n"
    );

    let Json(figures) = block_on(summary(Extension(api.clone())));
    assert_eq!(figures.unwrap().fuel_litres, "10.00");

    let Json(map) = block_on(view(Extension(api)));
    assert_eq!(map.zoom, 5);
    assert_eq!(map.markers.len(), 2);
}
