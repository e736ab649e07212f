use async_trait::async_trait;

use crate::command::Command;
use crate::entities::{Destination, Listing, MapView, RouteSummary};
use crate::error::Error;

#[async_trait]
pub trait DestinationAPI {
    /// Geocodes `place_name` and appends it. Blank input is ignored with
    /// `Ok(None)`.
    async fn add_destination(&self, place_name: String) -> Result<Option<Destination>, Error>;
    async fn move_up(&self, index: usize) -> Result<(), Error>;
    async fn move_down(&self, index: usize) -> Result<(), Error>;
    async fn dispatch(&self, command: Command) -> Result<(), Error>;
    async fn list_destinations(&self) -> Vec<Destination>;
    async fn listing(&self) -> Listing;
}

#[async_trait]
pub trait MapAPI {
    async fn map_view(&self) -> MapView;
    async fn route_summary(&self) -> Option<RouteSummary>;
}

pub trait API: DestinationAPI + MapAPI {}
