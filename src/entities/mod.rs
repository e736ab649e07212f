mod destination;
mod listing;
mod location;
mod map;
mod route;

pub use destination::Destination;
pub use listing::{Listing, ListingRow};
pub use location::Coordinates;
pub use map::{MapView, Marker};
pub use route::{RouteOptions, RouteOverlay, RouteSummary, DEFAULT_KM_PER_LITRE};
