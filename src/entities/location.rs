use geo_types::Point;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(deserialize_with = "degrees")]
    pub lat: f64,
    #[serde(deserialize_with = "degrees")]
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<Coordinates> for Point<f64> {
    fn from(coordinates: Coordinates) -> Self {
        Point::new(coordinates.lon, coordinates.lat)
    }
}

/// Decimal degrees arrive either as JSON numbers or as numeric strings
/// (Nominatim returns strings).
pub(crate) fn degrees<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Degrees {
        Number(f64),
        Text(String),
    }

    match Degrees::deserialize(deserializer)? {
        Degrees::Number(value) => Ok(value),
        Degrees::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[test]
fn coordinates_accept_numbers_and_strings() {
    let from_numbers: Coordinates = serde_json::from_str(r#"{"lat": 28.6, "lon": 77.2}"#).unwrap();
    let from_strings: Coordinates =
        serde_json::from_str(r#"{"lat": "28.6", "lon": "77.2"}"#).unwrap();

    assert_eq!(from_numbers, Coordinates::new(28.6, 77.2));
    assert_eq!(from_strings, from_numbers);
}

#[test]
fn coordinates_reject_non_numeric_strings() {
    let result: Result<Coordinates, _> = serde_json::from_str(r#"{"lat": "north", "lon": 1}"#);
    assert!(result.is_err());
}

#[test]
fn point_uses_lon_as_x() {
    let point: Point<f64> = Coordinates::new(19.0, 72.8).into();
    assert_eq!(point.x(), 72.8);
    assert_eq!(point.y(), 19.0);
}
