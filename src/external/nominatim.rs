use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use serde::{Deserialize, Serialize};

use crate::{
    entities::Coordinates,
    error::{invalid_input_error, upstream_error, Error},
    external::Geocoder,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub coordinates: Coordinates,
}

#[derive(Clone, Debug)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    api_base: String,
    user_agent: String,
}

impl NominatimGeocoder {
    pub fn new(api_base: String, user_agent: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
            user_agent,
        }
    }
}

pub fn first_match(results: Vec<SearchResult>) -> Option<Coordinates> {
    results.into_iter().next().map(|result| result.coordinates)
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[tracing::instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>, Error> {
        let url = format!("{}/search", self.api_base.trim_end_matches('/'));

        let res = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .query(&[("format", "json")])
            .query(&[("q", query)])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if status_code >= 400 && status_code < 500 {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let data: Vec<SearchResult> = res.json().await?;

        tracing::debug!("geocoding returned {} results", data.len());

        Ok(first_match(data))
    }
}

#[test]
fn first_match_takes_leading_result() {
    let raw = r#"[
        {"place_id": 1, "lat": "28.6138954", "lon": "77.2090057", "display_name": "Delhi, India"},
        {"place_id": 2, "lat": "28.7", "lon": "77.1", "display_name": "Delhi Cantonment"}
    ]"#;
    let results: Vec<SearchResult> = serde_json::from_str(raw).unwrap();

    assert_eq!(
        first_match(results),
        Some(Coordinates::new(28.6138954, 77.2090057))
    );
}

#[test]
fn empty_result_set_is_not_found() {
    let results: Vec<SearchResult> = serde_json::from_str("[]").unwrap();
    assert_eq!(first_match(results), None);
}
