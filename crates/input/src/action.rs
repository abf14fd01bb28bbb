use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A high-level action that any input source can produce.
///
/// The kernel never sees raw keys. Keyboards and scripts are both mapped to
/// actions, and held actions are folded into a `ControlState` per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    /// Spin the craft counter-clockwise.
    RotateLeft,
    /// Spin the craft clockwise.
    RotateRight,
    /// Fire the main engine.
    Thrust,
    /// Leave the game loop.
    Quit,
    /// Bound but does nothing.
    Noop,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::RotateLeft,
        Action::RotateRight,
        Action::Thrust,
        Action::Quit,
        Action::Noop,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::RotateLeft => "left",
            Action::RotateRight => "right",
            Action::Thrust => "thrust",
            Action::Quit => "quit",
            Action::Noop => "noop",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action: {0:?}")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "rotate-left" | "ccw" => Ok(Action::RotateLeft),
            "right" | "rotate-right" | "cw" => Ok(Action::RotateRight),
            "thrust" | "up" => Ok(Action::Thrust),
            "quit" | "escape" => Ok(Action::Quit),
            "noop" | "idle" => Ok(Action::Noop),
            _ => Err(UnknownAction(s.to_string())),
        }
    }
}
