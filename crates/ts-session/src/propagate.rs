use ts_core::{Cell, CellRect};

use crate::{PassReport, Segmenter, SessionError, SliceHost};

/// Summary of a committed multi-plane sweep.
#[derive(Debug, Clone)]
pub struct SweepReport {
    pub planes_completed: usize,
    pub passes: Vec<PassReport>,
}

impl Segmenter {
    /// Run the click pass on the host's current plane, then repeat it across
    /// adjacent planes while the configured signed step count lasts.
    ///
    /// Each committed pass is announced to the host exactly once. Follow-up
    /// planes are seeded from the previous fill's centroid candidates rather
    /// than the original click. Cancellation is polled once per plane step,
    /// right after navigating; a cancellation reverts that navigation and
    /// surfaces [`SessionError::StepAborted`] with the completed-plane count,
    /// keeping the planes already committed. Stepping off the end of the
    /// stack ends the sweep without error.
    pub fn propagate<H: SliceHost>(
        &self,
        host: &mut H,
        origin: Cell,
        target: i32,
    ) -> Result<SweepReport, SessionError> {
        let mut remaining = self.config().plane_step_count;
        let dir = remaining.signum();
        let mut origins = vec![origin];
        let mut passes: Vec<PassReport> = Vec::new();

        loop {
            let report = {
                let (grid, mut labels) = host.planes();
                self.run_pass_seeded(&origins, &grid, &mut labels, target)?
            };
            host.plane_modified(host.plane_index());
            tracing::debug!(
                plane = host.plane_index(),
                newly = report.newly_labeled(),
                remaining,
                "committed plane pass"
            );

            let next_origins = reseed_candidates(&report).unwrap_or_else(|| origins.clone());
            passes.push(report);

            if remaining == 0 {
                break;
            }
            if !host.move_adjacent(dir) {
                tracing::debug!(dir, "no adjacent plane, ending sweep early");
                break;
            }
            remaining -= dir;

            if host.cancel_requested() {
                host.move_adjacent(-dir);
                let completed = passes.len();
                tracing::info!(completed, "sweep cancelled, reverted last plane step");
                return Err(SessionError::StepAborted { completed });
            }

            origins = next_origins;
        }

        Ok(SweepReport {
            planes_completed: passes.len(),
            passes,
        })
    }
}

/// Seed candidates for the adjacent plane, derived from the centroid of the
/// cells this pass changed and the accepted loop's box midpoints.
///
/// The centroid axes are truncated while the box midpoints use integer
/// halving, one box axis per candidate; the asymmetry is deliberate. No
/// changed cells means no usable centroid and the caller keeps its previous
/// origins.
fn reseed_candidates(report: &PassReport) -> Option<Vec<Cell>> {
    if report.fill_changed.is_empty() {
        return None;
    }

    let n = report.fill_changed.len() as f32;
    let cr = report.fill_changed.iter().map(|c| c.r as f32).sum::<f32>() / n;
    let cc = report.fill_changed.iter().map(|c| c.c as f32).sum::<f32>() / n;
    let rect = CellRect::of(&report.path)?;
    let mid_r = (rect.min_r + rect.max_r) / 2;
    let mid_c = (rect.min_c + rect.max_c) / 2;

    Some(vec![
        Cell::new(cr as i32, cc as i32),
        Cell::new(cr as i32, mid_c),
        Cell::new(mid_r, cc as i32),
    ])
}
