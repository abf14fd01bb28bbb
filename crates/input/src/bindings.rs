use lander_common::{ControlState, Rotation};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::action::Action;

/// Key name to action table. Key names are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings {
    keys: BTreeMap<String, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind("Left", Action::RotateLeft);
        bindings.bind("Right", Action::RotateRight);
        bindings.bind("Up", Action::Thrust);
        bindings.bind("Escape", Action::Quit);
        bindings
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    /// Bind `key` to `action`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: &str, action: Action) -> Option<Action> {
        self.keys.insert(key.to_ascii_lowercase(), action)
    }

    pub fn unbind(&mut self, key: &str) -> Option<Action> {
        self.keys.remove(&key.to_ascii_lowercase())
    }

    pub fn lookup(&self, key: &str) -> Option<Action> {
        self.keys.get(&key.to_ascii_lowercase()).copied()
    }

    /// Keys bound to `action`, in lowercase.
    pub fn keys_for(&self, action: Action) -> impl Iterator<Item = &str> {
        self.keys
            .iter()
            .filter(move |(_, a)| **a == action)
            .map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Actions currently held down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    held: BTreeSet<Action>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: Action) {
        self.held.insert(action);
    }

    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    /// Press or release whatever `key` is bound to. Unbound keys are ignored.
    pub fn handle_key(&mut self, bindings: &KeyBindings, key: &str, pressed: bool) {
        let Some(action) = bindings.lookup(key) else {
            tracing::trace!(key, "unbound key");
            return;
        };
        if pressed {
            self.press(action);
        } else {
            self.release(action);
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Fold the held actions into this frame's controls. Left wins when both
    /// rotations are held.
    pub fn controls(&self) -> ControlState {
        let rotation = if self.is_held(Action::RotateLeft) {
            Rotation::CounterClockwise
        } else if self.is_held(Action::RotateRight) {
            Rotation::Clockwise
        } else {
            Rotation::None
        };
        ControlState {
            rotation,
            thrust: self.is_held(Action::Thrust),
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.is_held(Action::Quit)
    }
}
