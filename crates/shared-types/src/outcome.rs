//! Result of one chart initialization

use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal state of an initialization attempt.
///
/// Only `Rendered` leaves a live chart behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InitOutcome {
    Rendered,
    SurfaceMissing,
    NoData,
    AlreadyRendered,
    ConstructionFailed { message: String },
}

impl InitOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, InitOutcome::Rendered)
    }
}

impl fmt::Display for InitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitOutcome::Rendered => write!(f, "rendered"),
            InitOutcome::SurfaceMissing => write!(f, "surface missing"),
            InitOutcome::NoData => write!(f, "no data"),
            InitOutcome::AlreadyRendered => write!(f, "already rendered"),
            InitOutcome::ConstructionFailed { message } => {
                write!(f, "construction failed: {message}")
            }
        }
    }
}
