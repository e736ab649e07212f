use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

pub const DEFAULT_KM_PER_LITRE: f64 = 15.0;

/// Options handed to the routing surface alongside the waypoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteOptions {
    pub add_waypoints: bool,
    pub draggable_waypoints: bool,
    pub show_itinerary: bool,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            add_waypoints: false,
            draggable_waypoints: false,
            show_itinerary: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteOverlay {
    pub waypoints: Vec<Coordinates>,
    pub options: RouteOptions,
}

impl RouteOverlay {
    pub fn new(waypoints: Vec<Coordinates>) -> Self {
        Self {
            waypoints,
            options: RouteOptions::default(),
        }
    }
}

/// Totals of the first candidate route, in meters and seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub total_distance: f64,
    pub total_time: f64,
    pub km_per_litre: f64,
}

impl RouteSummary {
    pub fn new(total_distance: f64, total_time: f64, km_per_litre: f64) -> Self {
        Self {
            total_distance,
            total_time,
            km_per_litre,
        }
    }

    pub fn distance_km(&self) -> f64 {
        self.total_distance / 1000.0
    }

    pub fn time_minutes(&self) -> f64 {
        self.total_time / 60.0
    }

    pub fn fuel_litres(&self) -> f64 {
        self.distance_km() / self.km_per_litre
    }

    pub fn distance_text(&self) -> String {
        fixed(self.distance_km(), 2)
    }

    pub fn time_text(&self) -> String {
        fixed(self.time_minutes(), 0)
    }

    pub fn fuel_text(&self) -> String {
        fixed(self.fuel_litres(), 2)
    }

    pub fn lines(&self) -> [String; 3] {
        [
            format!("🛣 Distance: {} km", self.distance_text()),
            format!("⏱ Time: {} minutes", self.time_text()),
            format!("⛽ Fuel: {} litres", self.fuel_text()),
        ]
    }
}

/// Formats with `decimals` places, rounding halves away from zero
/// (`{:.N}` alone rounds them to even).
fn fixed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    format!("{:.*}", decimals, (value * scale).round() / scale)
}

#[test]
fn fuel_estimate_uses_fixed_consumption() {
    let summary = RouteSummary::new(150_000.0, 5400.0, DEFAULT_KM_PER_LITRE);

    assert_eq!(summary.distance_text(), "150.00");
    assert_eq!(summary.time_text(), "90");
    assert_eq!(summary.fuel_text(), "10.00");
}

#[test]
fn summary_lines_round_minutes() {
    let summary = RouteSummary::new(1234.0, 89.0, DEFAULT_KM_PER_LITRE);
    let [distance, time, fuel] = summary.lines();

    assert_eq!(distance, "🛣 Distance: 1.23 km");
    assert_eq!(time, "⏱ Time: 1 minutes");
    assert_eq!(fuel, "⛽ Fuel: 0.08 litres");
}

#[test]
fn zero_distance_needs_no_fuel() {
    let summary = RouteSummary::new(0.0, 0.0, DEFAULT_KM_PER_LITRE);
    assert_eq!(summary.fuel_text(), "0.00");
}

#[test]
fn halves_round_up() {
    let summary = RouteSummary::new(1875.0, 150.0, DEFAULT_KM_PER_LITRE);

    assert_eq!(summary.time_text(), "3");
    assert_eq!(summary.fuel_text(), "0.13");
    assert_eq!(summary.distance_text(), "1.88");

    let summary = RouteSummary::new(2500.0, 270.0, DEFAULT_KM_PER_LITRE);
    assert_eq!(summary.time_text(), "5");
    assert_eq!(summary.distance_text(), "2.50");
}
