use std::collections::HashSet;

use ts_core::{Cell, CellRect, LabelJournal, PlaneView, PlaneViewMut};
use ts_fill::{encloses, interior_start, plan_fill, FillPlan};
use ts_trace::{find_seeds, seal_visited, select_loop, trace_loop, TraceOutcome};

use crate::{FillMode, SessionConfig, SessionError};

/// More dead ends than this marks the loop as degenerate and worth a retry
/// with a relaxed window.
const MAX_DEAD_ENDS: i32 = 150;

/// Sanity floor on accepted loop length.
const MIN_LOOP_CELLS: usize = 5;

/// Summary of one committed pass.
#[derive(Debug, Clone)]
pub struct PassReport {
    /// The accepted closed loop, labeled with the target.
    pub path: Vec<Cell>,
    /// Loop plus dead ends plus sealed cells; the fill barrier.
    pub visited: HashSet<Cell>,
    /// Dead ends encountered while tracing the accepted loop.
    pub dead_ends: i32,
    /// Interior cells the fill wrote, in fill order.
    pub fill_writes: Vec<Cell>,
    /// Interior cells whose label actually changed.
    pub fill_changed: Vec<Cell>,
}

impl PassReport {
    /// Cells newly labeled by the fill; this is what the pixel budget meters.
    pub fn newly_labeled(&self) -> usize {
        self.fill_changed.len()
    }
}

/// A previewed pass awaiting confirmation: the loop is labeled, the interior
/// is not. Must be confirmed or discarded before the plane changes; a plane
/// change invalidates the stash and the host discards it.
#[derive(Debug)]
pub struct PendingFill {
    path: Vec<Cell>,
    visited: HashSet<Cell>,
    dead_ends: i32,
    start: Option<Cell>,
    target: i32,
    plane: usize,
    journal: LabelJournal,
}

impl PendingFill {
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    pub fn start(&self) -> Option<Cell> {
        self.start
    }

    pub fn plane(&self) -> usize {
        self.plane
    }
}

/// Runs segmentation passes for one validated configuration.
#[derive(Debug, Clone)]
pub struct Segmenter {
    config: SessionConfig,
}

impl Segmenter {
    /// Validate and normalize `config`. Rejects any fill mode other than the
    /// 2D plane mode before any state is touched.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        if config.fill_mode != FillMode::Plane {
            return Err(SessionError::VolumeModeUnsupported);
        }
        Ok(Self {
            config: config.normalized(),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Run one click pass: trace, select, seal, fill, apply.
    pub fn run_pass(
        &self,
        origin: Cell,
        grid: &PlaneView<'_, f32>,
        labels: &mut PlaneViewMut<'_, i32>,
        target: i32,
    ) -> Result<PassReport, SessionError> {
        self.run_pass_seeded(&[origin], grid, labels, target)
    }

    /// Run one pass with several candidate origins. Seeds are gathered from
    /// every origin; the first origin anchors loop selection and the interior
    /// start. Propagation uses this with centroid-derived origins.
    pub fn run_pass_seeded(
        &self,
        origins: &[Cell],
        grid: &PlaneView<'_, f32>,
        labels: &mut PlaneViewMut<'_, i32>,
        target: i32,
    ) -> Result<PassReport, SessionError> {
        let outline = self.trace_outline(origins, grid)?;
        let start = self.fill_start(origins[0], &outline.path);
        let plan = self.plan_interior(&outline, start, &labels.as_view(), target)?;

        for &cell in &outline.path {
            labels
                .set(cell, target)
                .expect("boundary cells lie on the plane");
        }
        for &cell in &plan.writes {
            labels
                .set(cell, target)
                .expect("fill plans only in-bounds cells");
        }

        Ok(PassReport {
            path: outline.path,
            visited: outline.visited,
            dead_ends: outline.dead_ends,
            fill_writes: plan.writes,
            fill_changed: plan.changed,
        })
    }

    /// Trace and label only the boundary loop, stashing everything the later
    /// fill needs. The path labeling is journaled so it can be rolled back on
    /// discard or on a failed confirmation.
    pub fn begin_preview(
        &self,
        origin: Cell,
        grid: &PlaneView<'_, f32>,
        labels: &mut PlaneViewMut<'_, i32>,
        target: i32,
        plane: usize,
    ) -> Result<PendingFill, SessionError> {
        let outline = self.trace_outline(&[origin], grid)?;
        let start = self.fill_start(origin, &outline.path);

        let mut journal = LabelJournal::new();
        for &cell in &outline.path {
            journal
                .set(labels, cell, target)
                .expect("boundary cells lie on the plane");
        }

        Ok(PendingFill {
            path: outline.path,
            visited: outline.visited,
            dead_ends: outline.dead_ends,
            start,
            target,
            plane,
            journal,
        })
    }

    /// Fill the interior of a previewed loop, reusing the stashed loop and
    /// start verbatim. A containment escape rolls the previewed path labeling
    /// back before surfacing.
    pub fn confirm_fill(
        &self,
        pending: PendingFill,
        labels: &mut PlaneViewMut<'_, i32>,
    ) -> Result<PassReport, SessionError> {
        let PendingFill {
            path,
            visited,
            dead_ends,
            start,
            target,
            plane: _,
            journal,
        } = pending;

        let outline = TraceOutcome {
            path,
            visited,
            dead_ends,
        };
        let plan = match self.plan_interior(&outline, start, &labels.as_view(), target) {
            Ok(plan) => plan,
            Err(e) => {
                journal.rollback(labels);
                return Err(e);
            }
        };
        journal.commit();

        for &cell in &plan.writes {
            labels
                .set(cell, target)
                .expect("fill plans only in-bounds cells");
        }

        Ok(PassReport {
            path: outline.path,
            visited: outline.visited,
            dead_ends: outline.dead_ends,
            fill_writes: plan.writes,
            fill_changed: plan.changed,
        })
    }

    /// Abandon a preview, rolling its path labeling back.
    pub fn discard_preview(&self, pending: PendingFill, labels: &mut PlaneViewMut<'_, i32>) {
        pending.journal.rollback(labels);
    }

    fn trace_outline(
        &self,
        origins: &[Cell],
        grid: &PlaneView<'_, f32>,
    ) -> Result<TraceOutcome, SessionError> {
        let retries = self.config.max_retries;
        let Some(&primary) = origins.first() else {
            return Err(SessionError::NoPathFound { retries: 0 });
        };

        let mut window = self.config.window();
        for attempt in 0..=retries {
            if attempt > 0 {
                window = window.relaxed_low(self.config.relax_step);
                tracing::debug!(
                    attempt,
                    lo = window.lo(),
                    "relaxing lower threshold and retrying"
                );
            }

            let mut candidates: Vec<TraceOutcome> = Vec::new();
            for &origin in origins {
                for seed in find_seeds(origin, self.config.seed_search_radius, window, grid) {
                    let outcome = trace_loop(seed, window, grid);
                    if !outcome.is_failure() {
                        candidates.push(outcome);
                    }
                }
            }

            let Some(winner) = select_loop(&candidates, primary, self.config.strict_seed_dedup)
            else {
                continue;
            };
            if candidates[winner].dead_ends > MAX_DEAD_ENDS {
                tracing::debug!(
                    dead_ends = candidates[winner].dead_ends,
                    "accepted loop is degenerate"
                );
                continue;
            }

            let mut outline = candidates.swap_remove(winner);
            if outline.path.len() < MIN_LOOP_CELLS {
                return Err(SessionError::PathTooShort {
                    len: outline.path.len(),
                });
            }

            if self.config.seal_leaks {
                seal_visited(
                    &outline.path,
                    &mut outline.visited,
                    window,
                    grid,
                    self.config.seal_tolerance,
                );
            }

            tracing::debug!(
                cells = outline.path.len(),
                dead_ends = outline.dead_ends,
                attempt,
                "accepted boundary loop"
            );
            return Ok(outline);
        }

        tracing::warn!(retries, "no closed boundary found");
        Err(SessionError::NoPathFound { retries })
    }

    /// The clicked cell when the parity test accepts it, otherwise a probed
    /// neighbor of the loop's first cell. `None` means the loop has no
    /// reachable interior and only the boundary gets labeled.
    fn fill_start(&self, origin: Cell, path: &[Cell]) -> Option<Cell> {
        if encloses(origin, path) {
            return Some(origin);
        }
        let moved = interior_start(path);
        tracing::debug!(?origin, ?moved, "click is not interior, moving fill start");
        moved
    }

    fn plan_interior(
        &self,
        outline: &TraceOutcome,
        start: Option<Cell>,
        labels: &PlaneView<'_, i32>,
        target: i32,
    ) -> Result<FillPlan, SessionError> {
        let Some(start) = start else {
            tracing::warn!("no interior start; labeling the boundary only");
            return Ok(FillPlan::default());
        };
        let bounds = CellRect::of(&outline.path).expect("accepted loop is non-empty");

        let plan = plan_fill(
            start,
            &outline.visited,
            bounds,
            self.config.max_pixels_per_pass,
            labels,
            target,
            self.config.paint_over,
        )?;
        Ok(plan)
    }
}
