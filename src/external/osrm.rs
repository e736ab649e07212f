use async_trait::async_trait;
use geo_types::Point;
use serde::{Deserialize, Serialize};

use crate::{
    entities::{Coordinates, RouteOptions},
    error::{invalid_input_error, upstream_error, Error},
    external::{RouteTotals, Router},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Route {
    distance: f64,
    duration: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    code: String,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Clone, Debug)]
pub struct OsrmRouter {
    client: reqwest::Client,
    api_base: String,
    profile: String,
}

impl OsrmRouter {
    pub fn new(api_base: String, profile: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
            profile,
        }
    }
}

/// Formats waypoints as OSRM's `lon,lat;lon,lat` path segment.
pub fn waypoint_path(waypoints: &[Coordinates]) -> String {
    waypoints
        .iter()
        .map(|&coordinates| {
            let point: Point<f64> = coordinates.into();
            format!("{},{}", point.x(), point.y())
        })
        .collect::<Vec<_>>()
        .join(";")
}

fn first_route(data: Response) -> Result<RouteTotals, Error> {
    if data.code != "Ok" {
        tracing::warn!("routing failed with code {}", data.code);
        return Err(upstream_error());
    }

    let route = data.routes.into_iter().next().ok_or_else(upstream_error)?;

    Ok(RouteTotals {
        distance: route.distance,
        duration: route.duration,
    })
}

#[async_trait]
impl Router for OsrmRouter {
    #[tracing::instrument(skip(self))]
    async fn route(
        &self,
        waypoints: &[Coordinates],
        options: &RouteOptions,
    ) -> Result<RouteTotals, Error> {
        if waypoints.len() < 2 {
            return Err(invalid_input_error());
        }

        let url = format!(
            "{}/route/v1/{}/{}",
            self.api_base.trim_end_matches('/'),
            self.profile,
            waypoint_path(waypoints)
        );

        let steps = if options.show_itinerary { "true" } else { "false" };

        let res = self
            .client
            .get(url)
            .query(&[("overview", "false")])
            .query(&[("steps", steps)])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        // OSRM reports NoRoute and friends with a 400 and a JSON body.
        if status_code != 200 && status_code != 400 {
            return Err(upstream_error());
        }

        let data: Response = res.json().await?;

        first_route(data)
    }
}

#[test]
fn waypoint_path_is_lon_lat_in_order() {
    let waypoints = vec![Coordinates::new(19.0, 72.8), Coordinates::new(28.6, 77.2)];
    assert_eq!(waypoint_path(&waypoints), "72.8,19;77.2,28.6");
}

#[test]
fn first_route_reads_leading_candidate() {
    let raw = r#"{
        "code": "Ok",
        "routes": [
            {"distance": 1415000.5, "duration": 86400.0, "weight": 1},
            {"distance": 1500000.0, "duration": 90000.0, "weight": 2}
        ],
        "waypoints": []
    }"#;
    let data: Response = serde_json::from_str(raw).unwrap();

    assert_eq!(
        first_route(data).unwrap(),
        RouteTotals {
            distance: 1415000.5,
            duration: 86400.0
        }
    );
}

#[test]
fn failed_routing_is_upstream_error() {
    let data: Response =
        serde_json::from_str(r#"{"code": "NoRoute", "message": "Impossible route"}"#).unwrap();

    assert_eq!(first_route(data).unwrap_err(), upstream_error());
}
