//! Umbrella crate for the `trace-select` workspace.
//!
//! Re-exports the plane primitives, boundary tracing, fill planning, and
//! session orchestration crates under one roof.

pub use ts_core::*;
pub use ts_fill::*;
pub use ts_session::*;
pub use ts_trace::*;
