//! Closed-boundary extraction on scalar intensity planes.
//!
//! A cell is a boundary cell for a threshold window when its own intensity is
//! inside the window and at least one 4-connected neighbor is not (or is off
//! the plane). Tracing walks boundary cells 8-connectedly from a seed until
//! the walk returns to the seed, backtracking out of dead ends; the walk's
//! full visited footprint is kept alongside the accepted loop.
//!
//! Neighbor order is fixed everywhere (see [`ts_core::RING_OFFSETS`] and
//! [`ts_core::CARDINAL_OFFSETS`]) so results are deterministic.

mod edge;
mod seed;
mod select;
mod smooth;
mod trace;

pub use edge::is_boundary;
pub use seed::find_seeds;
pub use select::select_loop;
pub use smooth::seal_visited;
pub use trace::{trace_loop, TraceOutcome};
