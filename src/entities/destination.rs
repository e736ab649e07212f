use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::entities::location::{degrees, Coordinates};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: i64,
    pub name: String,
    #[serde(deserialize_with = "degrees")]
    pub lat: f64,
    #[serde(deserialize_with = "degrees")]
    pub lon: f64,
}

impl Destination {
    /// Creates a destination stamped with the current time in milliseconds.
    /// The id is bumped past `latest_id` so ids stay unique within a list.
    pub fn new(name: String, coordinates: Coordinates, latest_id: Option<i64>) -> Self {
        let now = Utc::now().timestamp_millis();
        let id = match latest_id {
            Some(latest) if latest >= now => latest.saturating_add(1),
            _ => now,
        };

        Self {
            id,
            name,
            lat: coordinates.lat,
            lon: coordinates.lon,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

#[test]
fn new_destination_ids_stay_unique() {
    let coordinates = Coordinates::new(28.6, 77.2);
    let first = Destination::new("Delhi".into(), coordinates, None);
    let second = Destination::new("Delhi".into(), coordinates, Some(first.id));
    let future = Destination::new("Delhi".into(), coordinates, Some(i64::MAX - 1));
    let saturated = Destination::new("Delhi".into(), coordinates, Some(i64::MAX));

    assert!(second.id > first.id);
    assert_eq!(future.id, i64::MAX);
    assert_eq!(saturated.id, i64::MAX);
}

#[test]
fn destination_snapshot_accepts_string_degrees() {
    let raw = r#"[{"id": 1700000000000, "name": "Delhi", "lat": "28.6", "lon": "77.2"}]"#;
    let destinations: Vec<Destination> = serde_json::from_str(raw).unwrap();

    assert_eq!(destinations[0].coordinates(), Coordinates::new(28.6, 77.2));

    let written = serde_json::to_value(&destinations[0]).unwrap();
    assert_eq!(written["lat"], serde_json::json!(28.6));
}
