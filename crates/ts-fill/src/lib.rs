//! Interior derivation and budgeted flood-fill planning.
//!
//! The fill is planned, not performed: [`plan_fill`] walks the region against
//! a read-only label view and returns the exact cells a pass would write, so
//! callers apply labels only after the whole plan is known to be valid.
//!
//! The containment test is a four-ray parity check with a known blind spot
//! around axis-parallel boundary runs; the fill's bounding-box escape guard
//! exists precisely because that test can be wrong.

mod fill;
mod interior;

pub use fill::{plan_fill, Escape, FillPlan};
pub use interior::{encloses, interior_start};
