use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::{
    entities::DEFAULT_KM_PER_LITRE,
    error::{invalid_input_error, Error},
};

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
    pub store_path: String,
    pub nominatim_api_base: String,
    pub nominatim_user_agent: String,
    pub osrm_api_base: String,
    pub osrm_profile: String,
    pub km_per_litre: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            store_path: "planner-store.json".into(),
            nominatim_api_base: "https://nominatim.openstreetmap.org".into(),
            nominatim_user_agent: concat!("waypoints/", env!("CARGO_PKG_VERSION")).into(),
            osrm_api_base: "https://router.project-osrm.org".into(),
            osrm_profile: "driving".into(),
            km_per_litre: DEFAULT_KM_PER_LITRE,
        }
    }
}

impl Config {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            addr: parsed(&lookup, "PLANNER_ADDR")?.unwrap_or(defaults.addr),
            store_path: lookup("PLANNER_STORE_PATH").unwrap_or(defaults.store_path),
            nominatim_api_base: lookup("NOMINATIM_API_BASE")
                .unwrap_or(defaults.nominatim_api_base),
            nominatim_user_agent: lookup("NOMINATIM_USER_AGENT")
                .unwrap_or(defaults.nominatim_user_agent),
            osrm_api_base: lookup("OSRM_API_BASE").unwrap_or(defaults.osrm_api_base),
            osrm_profile: lookup("OSRM_PROFILE").unwrap_or(defaults.osrm_profile),
            km_per_litre: parsed(&lookup, "PLANNER_KM_PER_LITRE")?
                .unwrap_or(defaults.km_per_litre),
        };

        if !(config.km_per_litre > 0.0) {
            tracing::error!("PLANNER_KM_PER_LITRE must be positive");
            return Err(invalid_input_error());
        }

        Ok(config)
    }
}

fn parsed<F, T>(lookup: &F, key: &str) -> Result<Option<T>, Error>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
            tracing::error!("could not parse {}: {:?}", key, raw);
            invalid_input_error()
        }),
        None => Ok(None),
    }
}

#[test]
fn defaults_apply_when_unset() {
    let config = Config::from_lookup(|_| None).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.km_per_litre, 15.0);
}

#[test]
fn overrides_are_read() {
    let config = Config::from_lookup(|key| match key {
        "PLANNER_ADDR" => Some("0.0.0.0:8080".into()),
        "OSRM_PROFILE" => Some("car".into()),
        "PLANNER_KM_PER_LITRE" => Some("12.5".into()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
    assert_eq!(config.osrm_profile, "car");
    assert_eq!(config.km_per_litre, 12.5);
}

#[test]
fn malformed_numbers_are_rejected() {
    let result = Config::from_lookup(|key| match key {
        "PLANNER_KM_PER_LITRE" => Some("lots".into()),
        _ => None,
    });
    assert_eq!(result.unwrap_err(), invalid_input_error());

    let result = Config::from_lookup(|key| match key {
        "PLANNER_KM_PER_LITRE" => Some("0".into()),
        _ => None,
    });
    assert!(result.is_err());
}
