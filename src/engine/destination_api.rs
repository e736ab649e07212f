use super::Engine;

use async_trait::async_trait;

use crate::{
    api::DestinationAPI,
    command::Command,
    entities::{Destination, Listing},
    error::{location_not_found_error, Error},
};

#[async_trait]
impl DestinationAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn add_destination(&self, place_name: String) -> Result<Option<Destination>, Error> {
        let place = place_name.trim();
        if place.is_empty() {
            return Ok(None);
        }

        let mut session = self.session.lock().await;

        let coordinates = self
            .geocoder
            .geocode(place)
            .await?
            .ok_or_else(location_not_found_error)?;

        let latest_id = session.destinations.iter().map(|d| d.id).max();
        let destination = Destination::new(place.into(), coordinates, latest_id);

        tracing::info!("adding destination {} ({})", destination.name, destination.id);

        let mut destinations = session.destinations.clone();
        destinations.push(destination.clone());
        self.persist_and_render(&mut session, destinations).await?;

        Ok(Some(destination))
    }

    #[tracing::instrument(skip(self))]
    async fn move_up(&self, index: usize) -> Result<(), Error> {
        let mut session = self.session.lock().await;

        if index == 0 || index >= session.destinations.len() {
            return Ok(());
        }

        let mut destinations = session.destinations.clone();
        destinations.swap(index - 1, index);
        self.persist_and_render(&mut session, destinations).await
    }

    #[tracing::instrument(skip(self))]
    async fn move_down(&self, index: usize) -> Result<(), Error> {
        let mut session = self.session.lock().await;

        if index >= session.destinations.len().saturating_sub(1) {
            return Ok(());
        }

        let mut destinations = session.destinations.clone();
        destinations.swap(index, index + 1);
        self.persist_and_render(&mut session, destinations).await
    }

    async fn dispatch(&self, command: Command) -> Result<(), Error> {
        match command {
            Command::MoveUp(index) => self.move_up(index).await,
            Command::MoveDown(index) => self.move_down(index).await,
        }
    }

    async fn list_destinations(&self) -> Vec<Destination> {
        self.session.lock().await.destinations.clone()
    }

    async fn listing(&self) -> Listing {
        self.session.lock().await.listing.clone()
    }
}

#[cfg(test)]
fn names(destinations: &[Destination]) -> Vec<&str> {
    destinations.iter().map(|d| d.name.as_str()).collect()
}

#[cfg(test)]
fn planner(
    places: &[(&str, f64, f64)],
) -> (
    Engine,
    std::sync::Arc<super::mock::MockGeocoder>,
    std::sync::Arc<super::mock::MockRouter>,
    std::sync::Arc<super::mock::CountingStore>,
) {
    use super::mock::{engine_with, CountingStore, MockGeocoder, MockRouter};
    use std::sync::Arc;
    use tokio_test::block_on;

    let geocoder = Arc::new(MockGeocoder::with_places(places));
    let router = Arc::new(MockRouter::returning(150_000.0, 5400.0));
    let store = Arc::new(CountingStore::default());

    let engine = block_on(engine_with(
        geocoder.clone(),
        router.clone(),
        store.clone(),
    ))
    .unwrap();

    (engine, geocoder, router, store)
}

#[test]
fn blank_input_is_ignored() {
    use tokio_test::block_on;

    let (engine, geocoder, _, store) = planner(&[("Delhi", 28.6, 77.2)]);

    assert_eq!(block_on(engine.add_destination("".into())).unwrap(), None);
    assert_eq!(block_on(engine.add_destination("   ".into())).unwrap(), None);

    assert!(block_on(engine.list_destinations()).is_empty());
    assert_eq!(geocoder.calls(), 0);
    assert_eq!(store.writes(), 0);
}

#[test]
fn unknown_place_leaves_list_untouched() {
    use tokio_test::block_on;

    let (engine, _, _, store) = planner(&[("Delhi", 28.6, 77.2)]);
    block_on(engine.add_destination("Delhi".into())).unwrap();

    let result = block_on(engine.add_destination("Atlantis".into()));

    assert_eq!(result.unwrap_err(), location_not_found_error());
    assert_eq!(names(&block_on(engine.list_destinations())), vec!["Delhi"]);
    assert_eq!(store.writes(), 1);
}

#[test]
fn add_appends_trimmed_name_at_the_end() {
    use tokio_test::block_on;

    let (engine, _, _, _) = planner(&[("Delhi", 28.6, 77.2), ("Mumbai", 19.0, 72.8)]);

    block_on(engine.add_destination("Delhi".into())).unwrap();
    let added = block_on(engine.add_destination("  Mumbai ".into()))
        .unwrap()
        .unwrap();

    let destinations = block_on(engine.list_destinations());
    assert_eq!(destinations.len(), 2);
    assert_eq!(destinations.last(), Some(&added));
    assert_eq!(added.name, "Mumbai");
    assert!(destinations[1].id > destinations[0].id);
}

#[test]
fn boundary_moves_are_no_ops() {
    use tokio_test::block_on;

    let (engine, _, _, store) = planner(&[("Delhi", 28.6, 77.2), ("Mumbai", 19.0, 72.8)]);
    block_on(engine.add_destination("Delhi".into())).unwrap();
    block_on(engine.add_destination("Mumbai".into())).unwrap();
    let writes = store.writes();

    block_on(engine.move_up(0)).unwrap();
    block_on(engine.move_down(1)).unwrap();
    block_on(engine.move_down(7)).unwrap();
    block_on(engine.move_up(7)).unwrap();

    assert_eq!(
        names(&block_on(engine.list_destinations())),
        vec!["Delhi", "Mumbai"]
    );
    assert_eq!(store.writes(), writes);
}

#[test]
fn move_up_and_move_down_are_inverse() {
    use tokio_test::block_on;

    let places = [
        ("Delhi", 28.6, 77.2),
        ("Mumbai", 19.0, 72.8),
        ("Jaipur", 26.9, 75.8),
    ];
    let (engine, _, _, _) = planner(&places);
    for (name, _, _) in places {
        block_on(engine.add_destination(name.into())).unwrap();
    }
    let original = block_on(engine.list_destinations());

    for i in 1..original.len() {
        block_on(engine.move_up(i)).unwrap();
        assert_ne!(block_on(engine.list_destinations()), original);
        block_on(engine.move_down(i - 1)).unwrap();
        assert_eq!(block_on(engine.list_destinations()), original);

        block_on(engine.move_down(i - 1)).unwrap();
        block_on(engine.move_up(i)).unwrap();
        assert_eq!(block_on(engine.list_destinations()), original);
    }
}

#[test]
fn persisted_snapshot_matches_memory() {
    use crate::store::{KeyValueStore, DESTINATIONS_KEY};
    use tokio_test::block_on;

    let (engine, _, _, store) = planner(&[("Delhi", 28.6, 77.2), ("Mumbai", 19.0, 72.8)]);
    block_on(engine.add_destination("Delhi".into())).unwrap();
    block_on(engine.add_destination("Mumbai".into())).unwrap();
    block_on(engine.move_up(1)).unwrap();

    let raw = block_on(store.get(DESTINATIONS_KEY)).unwrap().unwrap();
    let persisted: Vec<Destination> = serde_json::from_str(&raw).unwrap();

    assert_eq!(persisted, block_on(engine.list_destinations()));
}

#[test]
fn dispatch_routes_row_controls() {
    use tokio_test::block_on;

    let (engine, _, _, _) = planner(&[("Delhi", 28.6, 77.2), ("Mumbai", 19.0, 72.8)]);
    block_on(engine.add_destination("Delhi".into())).unwrap();
    block_on(engine.add_destination("Mumbai".into())).unwrap();

    let listing = block_on(engine.listing());
    let move_mumbai_up = listing.rows[1].controls[0];
    block_on(engine.dispatch(move_mumbai_up)).unwrap();

    let listing = block_on(engine.listing());
    assert_eq!(listing.rows[0].name, "Mumbai");
    assert_eq!(listing.rows[0].rank, 1);
    assert_eq!(listing.rows[1].name, "Delhi");
}

#[test]
fn trip_through_delhi_and_mumbai() {
    use crate::api::MapAPI;
    use crate::entities::Coordinates;
    use tokio_test::block_on;

    let (engine, _, router, _) = planner(&[("Delhi", 28.6, 77.2), ("Mumbai", 19.0, 72.8)]);

    block_on(engine.add_destination("Delhi".into())).unwrap();
    let listing = block_on(engine.listing());
    assert_eq!(listing.rows.len(), 1);
    assert_eq!((listing.rows[0].rank, listing.rows[0].name.as_str()), (1, "Delhi"));
    assert!(router.requests().is_empty());

    block_on(engine.add_destination("Mumbai".into())).unwrap();
    assert_eq!(
        names(&block_on(engine.list_destinations())),
        vec!["Delhi", "Mumbai"]
    );

    block_on(engine.move_up(1)).unwrap();
    assert_eq!(
        names(&block_on(engine.list_destinations())),
        vec!["Mumbai", "Delhi"]
    );

    let requests = router.requests();
    assert_eq!(
        requests.last().unwrap(),
        &vec![Coordinates::new(19.0, 72.8), Coordinates::new(28.6, 77.2)]
    );

    let map = block_on(engine.map_view());
    assert_eq!(map.markers[0].label, "Mumbai");
    assert_eq!(
        map.route.unwrap().waypoints,
        vec![Coordinates::new(19.0, 72.8), Coordinates::new(28.6, 77.2)]
    );
    assert_eq!(block_on(engine.route_summary()).unwrap().fuel_text(), "10.00");
}

#[test]
fn overlapping_adds_run_in_call_order() {
    use tokio_test::block_on;

    let (engine, geocoder, _, store) = planner(&[("Delhi", 28.6, 77.2), ("Mumbai", 19.0, 72.8)]);

    let (first, second) = block_on(async {
        tokio::join!(
            engine.add_destination("Delhi".into()),
            engine.add_destination("Mumbai".into())
        )
    });

    let first = first.unwrap().unwrap();
    let second = second.unwrap().unwrap();

    assert_eq!(
        names(&block_on(engine.list_destinations())),
        vec!["Delhi", "Mumbai"]
    );
    assert!(second.id > first.id);
    assert_eq!(geocoder.max_in_flight(), 1);
    assert_eq!(store.writes(), 2);
}

#[test]
fn failed_write_keeps_previous_list() {
    use crate::api::MapAPI;
    use tokio_test::block_on;

    let places = [
        ("Delhi", 28.6, 77.2),
        ("Mumbai", 19.0, 72.8),
        ("Jaipur", 26.9, 75.8),
    ];
    let (engine, _, router, store) = planner(&places);
    block_on(engine.add_destination("Delhi".into())).unwrap();
    block_on(engine.add_destination("Mumbai".into())).unwrap();
    let requests = router.requests().len();

    store.set_failing(true);

    let err = block_on(engine.add_destination("Jaipur".into())).unwrap_err();
    assert_eq!(err.code, 2);
    assert!(block_on(engine.move_up(1)).is_err());
    assert!(block_on(engine.move_down(0)).is_err());

    assert_eq!(
        names(&block_on(engine.list_destinations())),
        vec!["Delhi", "Mumbai"]
    );
    assert_eq!(block_on(engine.listing()).rows[0].name, "Delhi");
    assert_eq!(block_on(engine.map_view()).markers.len(), 2);
    assert_eq!(router.requests().len(), requests);

    store.set_failing(false);
    block_on(engine.move_up(1)).unwrap();
    assert_eq!(
        names(&block_on(engine.list_destinations())),
        vec!["Mumbai", "Delhi"]
    );
}
