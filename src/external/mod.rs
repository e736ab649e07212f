pub mod nominatim;
pub mod osrm;

use async_trait::async_trait;

use crate::{
    entities::{Coordinates, RouteOptions},
    error::Error,
};

pub use nominatim::NominatimGeocoder;
pub use osrm::OsrmRouter;

/// Resolves free text to the coordinates of the first match.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>, Error>;
}

/// Total distance (meters) and time (seconds) of the first candidate route.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouteTotals {
    pub distance: f64,
    pub duration: f64,
}

#[async_trait]
pub trait Router: Send + Sync {
    async fn route(
        &self,
        waypoints: &[Coordinates],
        options: &RouteOptions,
    ) -> Result<RouteTotals, Error>;
}
