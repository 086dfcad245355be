//! Orchestration of interactive segmentation passes.
//!
//! A [`Segmenter`] is built once from a validated [`SessionConfig`] and runs
//! click passes against borrowed plane views: seed search and tracing with
//! adaptive threshold relaxation, loop selection, optional leak sealing, and
//! a planned interior fill that is applied only after the whole pass is known
//! to be valid. Multi-plane propagation drives the same pass across a
//! [`SliceHost`], re-seeding each plane from the previous fill's centroid and
//! polling cancellation once per plane step.
//!
//! Everything here is single-threaded and synchronous; one entry point runs
//! one user interaction to completion.

mod config;
mod error;
mod host;
mod propagate;
mod session;

pub use config::{FillMode, SessionConfig};
pub use error::SessionError;
pub use host::{SliceHost, StackHost};
pub use propagate::SweepReport;
pub use session::{PassReport, PendingFill, Segmenter};
