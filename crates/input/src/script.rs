//! Scripted input for headless runs.
//!
//! A script is a list of lines of the form `<frames> [action...]`. Each line
//! holds its actions for the given number of frames. Blank lines and
//! anything after `#` are ignored.
//!
//! ```text
//! # hover, then drift right
//! 30
//! 45 thrust
//! 20 thrust right
//! ```

use lander_common::ControlState;
use std::path::Path;

use crate::action::Action;
use crate::bindings::InputState;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Input for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptFrame {
    pub controls: ControlState,
    pub quit: bool,
}

impl ScriptFrame {
    pub const IDLE: Self = Self {
        controls: ControlState::IDLE,
        quit: false,
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    frames: u32,
    input: InputState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputScript {
    segments: Vec<Segment>,
}

impl InputScript {
    pub fn parse(source: &str) -> Result<Self, ScriptError> {
        let mut segments = Vec::new();
        for (index, raw) in source.lines().enumerate() {
            let line = index + 1;
            let text = raw.split('#').next().unwrap_or_default().trim();
            if text.is_empty() {
                continue;
            }

            let mut words = text.split_whitespace();
            let count = words.next().unwrap_or_default();
            let frames: u32 = count.parse().map_err(|_| ScriptError::Parse {
                line,
                message: format!("expected a frame count, found {count:?}"),
            })?;

            let mut input = InputState::new();
            for word in words {
                let action: Action = word.parse().map_err(|e| ScriptError::Parse {
                    line,
                    message: format!("{e}"),
                })?;
                input.press(action);
            }
            segments.push(Segment { frames, input });
        }
        tracing::debug!(segments = segments.len(), "input script parsed");
        Ok(Self { segments })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source)
    }

    /// Total number of frames the script covers.
    pub fn len(&self) -> usize {
        self.segments.iter().map(|s| s.frames as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One entry per frame, in order.
    pub fn frames(&self) -> impl Iterator<Item = ScriptFrame> + '_ {
        self.segments.iter().flat_map(|s| {
            let frame = ScriptFrame {
                controls: s.input.controls(),
                quit: s.input.quit_requested(),
            };
            std::iter::repeat_n(frame, s.frames as usize)
        })
    }

    /// Input for `frame`, or idle once the script has run out.
    pub fn frame(&self, frame: usize) -> ScriptFrame {
        self.frames().nth(frame).unwrap_or(ScriptFrame::IDLE)
    }
}
