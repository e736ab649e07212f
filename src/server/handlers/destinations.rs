use axum::extract::{Extension, Json, Path};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::api::DestinationAPI;
use crate::command::{Action, Command};
use crate::entities::{Destination, Listing};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    name: String,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Response, Error> {
    match api.add_destination(params.name).await? {
        Some(destination) => Ok(Json(destination).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

pub async fn list(Extension(api): Extension<DynAPI>) -> Json<Vec<Destination>> {
    api.list_destinations().await.into()
}

pub async fn listing(Extension(api): Extension<DynAPI>) -> Json<Listing> {
    api.listing().await.into()
}

pub async fn dispatch(
    Extension(api): Extension<DynAPI>,
    Path((index, action)): Path<(usize, Action)>,
) -> Result<Json<Listing>, Error> {
    api.dispatch(Command::from((index, action))).await?;

    Ok(api.listing().await.into())
}

#[cfg(test)]
fn test_api() -> DynAPI {
    use crate::engine::mock::{engine_with, CountingStore, MockGeocoder, MockRouter};
    use std::sync::Arc;
    use tokio_test::block_on;

    let geocoder = Arc::new(MockGeocoder::with_places(&[
        ("Delhi", 28.6, 77.2),
        ("Mumbai", 19.0, 72.8),
    ]));
    let router = Arc::new(MockRouter::returning(150_000.0, 5400.0));
    let store = Arc::new(CountingStore::default());

    Arc::new(block_on(engine_with(geocoder, router, store)).unwrap())
}

#[test]
fn create_reports_blank_and_unknown_input() {
    use tokio_test::block_on;

    let api = test_api();

    let response = block_on(create(
        Extension(api.clone()),
        Json(CreateParams { name: " ".into() }),
    ))
    .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = block_on(create(
        Extension(api.clone()),
        Json(CreateParams {
            name: "Delhi".into(),
        }),
    ))
    .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let err = block_on(create(
        Extension(api.clone()),
        Json(CreateParams {
            name: "Atlantis".into(),
        }),
    ))
    .unwrap_err();
    assert_eq!(err.code, 102);
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

    let Json(destinations) = block_on(list(Extension(api)));
    assert_eq!(destinations.len(), 1);
}

#[test]
fn dispatch_reorders_and_returns_listing() {
    use tokio_test::block_on;

    let api = test_api();
    block_on(api.add_destination("Delhi".into())).unwrap();
    block_on(api.add_destination("Mumbai".into())).unwrap();

    let Json(listing) = block_on(dispatch(
        Extension(api.clone()),
        Path((1, Action::MoveUp)),
    ))
    .unwrap();

    assert_eq!(listing.rows[0].name, "Mumbai");
    assert_eq!(listing, block_on(api.listing()));
}
