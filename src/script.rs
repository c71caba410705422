//! Scripted sessions for the replay CLI.
//!
//! A script is a JSON document listing host events in order:
//!
//! ```json
//! {
//!   "viewport_width": 500,
//!   "steps": [
//!     { "intent": { "type": "ADD_COLOR_ITEM" } },
//!     { "pointer_down": { "pointer_id": 1, "position": { "x": 25, "y": 25 } } },
//!     { "pointer_move": { "pointer_id": 1, "position": { "x": 125, "y": 65 } } },
//!     { "pointer_up": { "pointer_id": 1, "position": { "x": 125, "y": 65 } } },
//!     { "key": { "key": "ArrowRight", "modifiers": { "shift": true } } },
//!     "export"
//!   ]
//! }
//! ```

use crate::export::{DownloadSink, ExportOutcome};
use crate::input::{FocusTarget, KeyEvent, Point, PointerEvent};
use crate::intent::BoardIntent;
use crate::session::BoardSession;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid script: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Intent(BoardIntent),
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    PointerCancel(PointerEvent),
    Key(KeyEvent),
    Focus(FocusTarget),
    Viewport(f64),
    CanvasOrigin(Point),
    Export,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    /// Initial width of the hosting surface
    pub viewport_width: Option<f64>,
    pub steps: Vec<Step>,
}

/// What a replay did.
#[derive(Debug, Default)]
pub struct ReplayReport {
    pub steps: usize,
    /// Steps that changed the board
    pub changes: usize,
    pub exports: Vec<ExportOutcome>,
}

impl Script {
    pub fn parse(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ScriptError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Feed every step to `session`. Exports go to `sink`.
    pub fn replay(&self, session: &mut BoardSession, sink: &mut impl DownloadSink) -> ReplayReport {
        let mut report = ReplayReport::default();
        if let Some(width) = self.viewport_width {
            session.set_viewport_width(width);
        }

        for (index, step) in self.steps.iter().enumerate() {
            let before = session.revision();
            match step {
                Step::Intent(intent) => {
                    session.dispatch(intent.clone());
                }
                Step::PointerDown(event) => {
                    session.pointer_down(*event);
                }
                Step::PointerMove(event) => {
                    session.pointer_move(*event);
                }
                Step::PointerUp(event) => {
                    session.pointer_up(*event);
                }
                Step::PointerCancel(event) => {
                    session.pointer_cancel(*event);
                }
                Step::Key(event) => {
                    session.key_down(event);
                }
                Step::Focus(focus) => session.set_focus(*focus),
                Step::Viewport(width) => {
                    session.set_viewport_width(*width);
                }
                Step::CanvasOrigin(origin) => session.set_canvas_origin(*origin),
                Step::Export => {
                    if let Some(outcome) = session.export(sink) {
                        report.exports.push(outcome);
                    }
                }
            }
            if session.revision() != before {
                report.changes += 1;
            }
            debug!(index, revision = session.revision(), "Replayed step");
            report.steps += 1;
        }
        report
    }
}
