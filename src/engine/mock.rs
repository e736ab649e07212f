use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::Engine;
use crate::{
    entities::{Coordinates, RouteOptions, DEFAULT_KM_PER_LITRE},
    error::{storage_error, upstream_error, Error},
    external::{Geocoder, RouteTotals, Router},
    store::{KeyValueStore, MemoryStore},
};

/// Answers from a fixed table. Every lookup yields to the runtime once
/// before answering and records how many lookups were in flight at a time.
#[derive(Debug, Default)]
pub struct MockGeocoder {
    places: HashMap<String, Coordinates>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockGeocoder {
    pub fn with_places(places: &[(&str, f64, f64)]) -> Self {
        Self {
            places: places
                .iter()
                .map(|&(name, lat, lon)| (name.to_string(), Coordinates::new(lat, lon)))
                .collect(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);

        tokio::task::yield_now().await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(self.places.get(query).copied())
    }
}

/// Records every waypoint list it is asked to route. Fails when no totals
/// are configured.
#[derive(Debug, Default)]
pub struct MockRouter {
    totals: Mutex<Option<RouteTotals>>,
    requests: Mutex<Vec<Vec<Coordinates>>>,
}

impl MockRouter {
    pub fn returning(distance: f64, duration: f64) -> Self {
        let router = Self::default();
        router.set_totals(Some(RouteTotals { distance, duration }));
        router
    }

    pub fn set_totals(&self, totals: Option<RouteTotals>) {
        *self.totals.lock().unwrap() = totals;
    }

    pub fn requests(&self) -> Vec<Vec<Coordinates>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Router for MockRouter {
    async fn route(
        &self,
        waypoints: &[Coordinates],
        options: &RouteOptions,
    ) -> Result<RouteTotals, Error> {
        assert_eq!(options, &RouteOptions::default());

        self.requests.lock().unwrap().push(waypoints.to_vec());
        let totals = *self.totals.lock().unwrap();
        totals.ok_or_else(upstream_error)
    }
}

/// Counts successful writes; refuses writes while `failing` is set.
#[derive(Debug, Default)]
pub struct CountingStore {
    inner: MemoryStore,
    writes: AtomicUsize,
    failing: AtomicBool,
}

impl CountingStore {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for CountingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), Error> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(storage_error("write refused"));
        }

        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value).await
    }
}

pub async fn engine_with(
    geocoder: Arc<MockGeocoder>,
    router: Arc<MockRouter>,
    store: Arc<dyn KeyValueStore>,
) -> Result<Engine, Error> {
    Engine::new(geocoder, router, store, DEFAULT_KM_PER_LITRE).await
}
