use std::fmt;

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::entities::Destination;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListingRow {
    pub rank: usize,
    pub name: String,
    pub controls: Vec<Command>,
}

/// The rendered destination list, one row per destination in list order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub rows: Vec<ListingRow>,
}

impl Listing {
    pub fn render(destinations: &[Destination]) -> Self {
        let rows = destinations
            .iter()
            .enumerate()
            .map(|(index, destination)| ListingRow {
                rank: index + 1,
                name: destination.name.clone(),
                controls: vec![Command::MoveUp(index), Command::MoveDown(index)],
            })
            .collect();

        Self { rows }
    }
}

impl fmt::Display for ListingRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.rank, self.name)?;

        for control in &self.controls {
            write!(f, " [{}]", control.label())?;
        }

        Ok(())
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }

        Ok(())
    }
}

#[test]
fn listing_ranks_from_one_and_binds_controls_to_index() {
    use crate::entities::Coordinates;

    let destinations = vec![
        Destination::new("Delhi".into(), Coordinates::new(28.6, 77.2), None),
        Destination::new("Mumbai".into(), Coordinates::new(19.0, 72.8), None),
    ];

    let listing = Listing::render(&destinations);

    assert_eq!(listing.rows[1].rank, 2);
    assert_eq!(
        listing.rows[1].controls,
        vec![Command::MoveUp(1), Command::MoveDown(1)]
    );
    assert_eq!(
        listing.to_string(),
        "1. Delhi [up] [down]\n2. Mumbai [up] [down]\n"
    );
}
