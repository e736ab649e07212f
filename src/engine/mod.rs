mod destination_api;
mod map_api;
#[cfg(test)]
pub(crate) mod mock;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    api::API,
    config::Config,
    entities::{Destination, Listing, MapView, Marker, RouteOverlay, RouteSummary},
    error::{corrupt_store_error, Error},
    external::{Geocoder, NominatimGeocoder, OsrmRouter, Router},
    store::{FileStore, KeyValueStore, DESTINATIONS_KEY},
};

/// Everything derived from or owned by one planning session.
#[derive(Debug, Default)]
struct Session {
    destinations: Vec<Destination>,
    listing: Listing,
    map: MapView,
    summary: Option<RouteSummary>,
}

/// The destination list manager. Operations hold the session lock until
/// their re-render (including the route request) has finished, so
/// overlapping calls run one after another.
pub struct Engine {
    session: Mutex<Session>,
    geocoder: Arc<dyn Geocoder>,
    router: Arc<dyn Router>,
    store: Arc<dyn KeyValueStore>,
    km_per_litre: f64,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn new(
        geocoder: Arc<dyn Geocoder>,
        router: Arc<dyn Router>,
        store: Arc<dyn KeyValueStore>,
        km_per_litre: f64,
    ) -> Result<Self, Error> {
        let destinations: Vec<Destination> = match store.get(DESTINATIONS_KEY).await? {
            Some(raw) => serde_json::from_str(&raw).map_err(corrupt_store_error)?,
            None => vec![],
        };

        tracing::info!("loaded {} destinations", destinations.len());

        let engine = Self {
            session: Mutex::new(Session {
                destinations,
                ..Default::default()
            }),
            geocoder,
            router,
            store,
            km_per_litre,
        };

        {
            let mut session = engine.session.lock().await;
            engine.render(&mut session).await;
        }

        Ok(engine)
    }

    pub async fn from_config(config: &Config) -> Result<Self, Error> {
        let geocoder = NominatimGeocoder::new(
            config.nominatim_api_base.clone(),
            config.nominatim_user_agent.clone(),
        );
        let router = OsrmRouter::new(config.osrm_api_base.clone(), config.osrm_profile.clone());
        let store = FileStore::new(&config.store_path);

        Self::new(
            Arc::new(geocoder),
            Arc::new(router),
            Arc::new(store),
            config.km_per_litre,
        )
        .await
    }
}

impl Engine {
    /// Writes `destinations` to the store and only then makes it the
    /// session's list, followed by a full re-render of list, markers and
    /// route, in that order. A failed write leaves the session untouched.
    #[tracing::instrument(skip_all)]
    async fn persist_and_render(
        &self,
        session: &mut Session,
        destinations: Vec<Destination>,
    ) -> Result<(), Error> {
        let snapshot = serde_json::to_string(&destinations)?;
        self.store.set(DESTINATIONS_KEY, snapshot).await?;

        session.destinations = destinations;
        self.render(session).await;

        Ok(())
    }

    async fn render(&self, session: &mut Session) {
        render_listing(session);
        render_markers(session);
        self.render_route(session).await;
    }

    /// With fewer than two destinations no route is requested and the last
    /// summary is left as it was.
    #[tracing::instrument(skip_all)]
    async fn render_route(&self, session: &mut Session) {
        session.map.clear_route();

        if session.destinations.len() < 2 {
            return;
        }

        let waypoints = session
            .destinations
            .iter()
            .map(Destination::coordinates)
            .collect();
        let overlay = RouteOverlay::new(waypoints);

        let result = self.router.route(&overlay.waypoints, &overlay.options).await;
        session.map.set_route(overlay);

        match result {
            Ok(totals) => {
                session.summary = Some(RouteSummary::new(
                    totals.distance,
                    totals.duration,
                    self.km_per_litre,
                ));
            }
            Err(err) => tracing::warn!("route request failed, keeping last summary: {}", err),
        }
    }
}

fn render_listing(session: &mut Session) {
    session.listing = Listing::render(&session.destinations);
}

fn render_markers(session: &mut Session) {
    session.map.clear_markers();

    for destination in &session.destinations {
        session.map.add_marker(Marker::from(destination));
    }
}

impl API for Engine {}

#[test]
fn new_engine_starts_empty_without_store_entry() {
    use self::mock::{engine_with, MockGeocoder, MockRouter};
    use crate::store::MemoryStore;
    use tokio_test::block_on;

    let router = Arc::new(MockRouter::default());
    let engine = block_on(engine_with(
        Arc::new(MockGeocoder::default()),
        router.clone(),
        Arc::new(MemoryStore::default()),
    ))
    .unwrap();

    let session = block_on(engine.session.lock());
    assert!(session.destinations.is_empty());
    assert!(session.map.markers.is_empty());
    assert_eq!(router.requests().len(), 0);
}

#[test]
fn new_engine_renders_persisted_destinations() {
    use self::mock::{engine_with, MockGeocoder, MockRouter};
    use crate::store::MemoryStore;
    use tokio_test::block_on;

    let store = Arc::new(MemoryStore::default());
    block_on(store.set(
        DESTINATIONS_KEY,
        r#"[
            {"id": 1, "name": "Delhi", "lat": "28.6", "lon": "77.2"},
            {"id": 2, "name": "Mumbai", "lat": 19.0, "lon": 72.8}
        ]"#
        .into(),
    ))
    .unwrap();

    let router = Arc::new(MockRouter::returning(150_000.0, 7200.0));
    let engine = block_on(engine_with(
        Arc::new(MockGeocoder::default()),
        router.clone(),
        store,
    ))
    .unwrap();

    let session = block_on(engine.session.lock());
    assert_eq!(session.listing.rows.len(), 2);
    assert_eq!(session.map.markers[1].label, "Mumbai");
    assert_eq!(router.requests().len(), 1);
    assert_eq!(session.summary.unwrap().fuel_text(), "10.00");
}

#[test]
fn new_engine_refuses_malformed_store() {
    use self::mock::{engine_with, MockGeocoder, MockRouter};
    use crate::store::MemoryStore;
    use tokio_test::block_on;

    let store = Arc::new(MemoryStore::default());
    block_on(store.set(DESTINATIONS_KEY, r#"[{"name": "Delhi"}]"#.into())).unwrap();

    let result = block_on(engine_with(
        Arc::new(MockGeocoder::default()),
        Arc::new(MockRouter::default()),
        store,
    ));

    assert_eq!(result.err().map(|err| err.code), Some(6));
}
