use super::Engine;

use async_trait::async_trait;

use crate::{
    api::MapAPI,
    entities::{MapView, RouteSummary},
};

#[async_trait]
impl MapAPI for Engine {
    async fn map_view(&self) -> MapView {
        self.session.lock().await.map.clone()
    }

    async fn route_summary(&self) -> Option<RouteSummary> {
        self.session.lock().await.summary
    }
}

#[test]
fn no_route_below_two_destinations() {
    use super::mock::{engine_with, MockGeocoder, MockRouter};
    use crate::api::DestinationAPI;
    use crate::store::{KeyValueStore, MemoryStore, DESTINATIONS_KEY};
    use std::sync::Arc;
    use tokio_test::block_on;

    let store = Arc::new(MemoryStore::default());
    block_on(store.set(
        DESTINATIONS_KEY,
        r#"[{"id": 1, "name": "Delhi", "lat": 28.6, "lon": 77.2}]"#.into(),
    ))
    .unwrap();

    let geocoder = Arc::new(MockGeocoder::with_places(&[("Mumbai", 19.0, 72.8)]));
    let router = Arc::new(MockRouter::returning(150_000.0, 5400.0));
    let engine = block_on(engine_with(geocoder, router.clone(), store)).unwrap();

    assert!(router.requests().is_empty());
    assert_eq!(block_on(engine.route_summary()), None);
    assert_eq!(block_on(engine.map_view()).markers.len(), 1);
    assert_eq!(block_on(engine.map_view()).route, None);

    block_on(engine.add_destination("Mumbai".into())).unwrap();
    let summary = block_on(engine.route_summary()).unwrap();
    assert_eq!(summary.distance_text(), "150.00");
    assert!(block_on(engine.map_view()).route.is_some());
    assert_eq!(router.requests().len(), 1);
}

#[test]
fn failed_route_keeps_previous_summary() {
    use super::mock::{engine_with, MockGeocoder, MockRouter};
    use crate::api::DestinationAPI;
    use crate::store::MemoryStore;
    use std::sync::Arc;
    use tokio_test::block_on;

    let geocoder = Arc::new(MockGeocoder::with_places(&[
        ("Delhi", 28.6, 77.2),
        ("Mumbai", 19.0, 72.8),
        ("Jaipur", 26.9, 75.8),
    ]));
    let router = Arc::new(MockRouter::returning(150_000.0, 5400.0));
    let engine = block_on(engine_with(
        geocoder,
        router.clone(),
        Arc::new(MemoryStore::default()),
    ))
    .unwrap();

    block_on(engine.add_destination("Delhi".into())).unwrap();
    block_on(engine.add_destination("Mumbai".into())).unwrap();
    let before = block_on(engine.route_summary());

    router.set_totals(None);
    let added = block_on(engine.add_destination("Jaipur".into())).unwrap();

    assert!(added.is_some());
    assert_eq!(block_on(engine.list_destinations()).len(), 3);
    assert_eq!(block_on(engine.route_summary()), before);
    assert_eq!(block_on(engine.map_view()).route.unwrap().waypoints.len(), 3);
}
