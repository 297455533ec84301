// src/error.rs
use thiserror::Error;

/// Errors raised by the editing and persistence layers.
///
/// The geometry engine itself never fails; these only surface when a
/// placement is rejected or a layout can't be read or written.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no wall within {threshold} units of ({x}, {y})")]
    NoWallNearby { x: f64, y: f64, threshold: f64 },

    #[error("wall would have zero length at ({x}, {y})")]
    ZeroLengthWall { x: f64, y: f64 },

    #[error("{kind} {index} not found")]
    NotFound { kind: &'static str, index: usize },

    #[error("unknown observer type: {0:?}")]
    UnknownObserverKind(String),

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}

pub type Result<T> = std::result::Result<T, PlanError>;
