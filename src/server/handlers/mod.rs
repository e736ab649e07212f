pub mod destinations;
pub mod map;
