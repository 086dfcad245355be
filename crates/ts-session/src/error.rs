use core::fmt;

use ts_core::{Cell, CellRect};

/// User-visible failure of a segmentation pass or sweep.
///
/// Out-of-bounds cell accesses never surface here; they are absorbed locally
/// as "not a boundary cell" / "not fillable". Every variant carries enough
/// context to render a diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// No closed boundary was found around the clicked cell, even after all
    /// threshold relaxations.
    NoPathFound { retries: u32 },
    /// The accepted loop is below the sanity floor of 5 cells.
    PathTooShort { len: usize },
    /// The fill front reached a cell outside the accepted loop's bounding
    /// box; the pass was abandoned with labels untouched.
    ContainmentEscape { cell: Cell, bounds: CellRect },
    /// The configuration requested a fill mode other than the 2D plane mode.
    VolumeModeUnsupported,
    /// Multi-plane propagation was cancelled; `completed` planes were
    /// committed before the cancellation was observed.
    StepAborted { completed: usize },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPathFound { retries } => {
                write!(f, "no suitable boundary found after {retries} threshold relaxations")
            }
            Self::PathTooShort { len } => {
                write!(f, "traced boundary has only {len} cells")
            }
            Self::ContainmentEscape { cell, bounds } => write!(
                f,
                "fill escaped the boundary at ({}, {}), box rows {}..={} cols {}..={}",
                cell.r, cell.c, bounds.min_r, bounds.max_r, bounds.min_c, bounds.max_c
            ),
            Self::VolumeModeUnsupported => {
                write!(f, "only the 2D plane fill mode is supported")
            }
            Self::StepAborted { completed } => {
                write!(f, "propagation cancelled after {completed} completed planes")
            }
        }
    }
}

impl std::error::Error for SessionError {}

impl From<ts_fill::Escape> for SessionError {
    fn from(e: ts_fill::Escape) -> Self {
        Self::ContainmentEscape {
            cell: e.cell,
            bounds: e.bounds,
        }
    }
}
