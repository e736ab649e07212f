use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, Destination, RouteOverlay};

pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: 20.5937,
    lon: 78.9629,
};
pub const DEFAULT_ZOOM: u8 = 5;
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_ATTRIBUTION: &str = "© OpenStreetMap";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: Coordinates,
    pub label: String,
}

impl From<&Destination> for Marker {
    fn from(destination: &Destination) -> Self {
        Self {
            position: destination.coordinates(),
            label: destination.name.clone(),
        }
    }
}

/// What the map widget shows: the fixed viewport and tile source plus the
/// markers and route overlay derived from the destination list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
    pub markers: Vec<Marker>,
    pub route: Option<RouteOverlay>,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            tile_url: DEFAULT_TILE_URL.into(),
            attribution: DEFAULT_ATTRIBUTION.into(),
            markers: vec![],
            route: None,
        }
    }
}

impl MapView {
    pub fn clear_markers(&mut self) {
        self.markers.clear();
    }

    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub fn clear_route(&mut self) {
        self.route = None;
    }

    pub fn set_route(&mut self, overlay: RouteOverlay) {
        self.route = Some(overlay);
    }
}
