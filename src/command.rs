use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    MoveUp,
    MoveDown,
}

/// A per-row list control, bound to the index the row had when rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "index", rename_all = "snake_case")]
pub enum Command {
    MoveUp(usize),
    MoveDown(usize),
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MoveUp(_) => "up",
            Self::MoveDown(_) => "down",
        }
    }
}

impl From<(usize, Action)> for Command {
    fn from((index, action): (usize, Action)) -> Self {
        match action {
            Action::MoveUp => Self::MoveUp(index),
            Action::MoveDown => Self::MoveDown(index),
        }
    }
}

#[test]
fn command_binds_action_to_index() {
    assert_eq!(Command::from((3, Action::MoveDown)), Command::MoveDown(3));
    assert_eq!(Command::from((0, Action::MoveUp)), Command::MoveUp(0));
    assert_eq!(Command::MoveDown(3).label(), "down");
}

#[test]
fn command_serializes_as_tagged_pair() {
    let value = serde_json::to_value(Command::MoveUp(2)).unwrap();
    assert_eq!(value, serde_json::json!({"action": "move_up", "index": 2}));

    let action: Action = serde_json::from_str("\"move_down\"").unwrap();
    assert_eq!(action, Action::MoveDown);
}
