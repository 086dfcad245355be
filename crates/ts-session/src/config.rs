use serde::{Deserialize, Serialize};
use ts_core::ThresholdWindow;

/// Which shape of region one pass labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillMode {
    /// Fill within the current 2D plane.
    #[default]
    Plane,
    /// Fill through the whole stack. Not implemented; rejected at session
    /// construction.
    Volume,
}

/// Parameters of one segmentation session.
///
/// Values are normalized (not rejected) at [`crate::Segmenter::new`]: bounds
/// are ordered, counts clamped to their floors, non-finite scalars replaced
/// with defaults. Only an unsupported [`FillMode`] is an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Lower intensity bound of the band considered "inside the region".
    pub threshold_low: f32,
    /// Upper intensity bound, inclusive.
    pub threshold_high: f32,
    /// Soft ceiling on label changes per fill pass; the fill queue stops
    /// growing once the count is exceeded.
    pub max_pixels_per_pass: usize,
    /// How far the radial seed search scans from the clicked cell.
    pub seed_search_radius: i32,
    /// How much the lower bound drops per retry when tracing degenerates.
    pub relax_step: f32,
    /// How many relaxation retries to attempt before giving up.
    pub max_retries: u32,
    /// Grow the fill barrier with near-threshold neighbors of the loop.
    pub seal_leaks: bool,
    /// Maximum excursion outside the band for a cell to be sealed in.
    pub seal_tolerance: f32,
    /// Reconsider cells that already carry the target label (once per pass),
    /// so repeated clicks can keep growing a region.
    pub paint_over: bool,
    /// Signed number of adjacent planes to propagate across after the clicked
    /// plane; 0 disables propagation.
    pub plane_step_count: i32,
    /// Region shape; only [`FillMode::Plane`] is supported.
    pub fill_mode: FillMode,
    /// Check duplicate seeds against every pooled loop instead of only the
    /// first one.
    pub strict_seed_dedup: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            threshold_low: 250.0,
            threshold_high: 2799.0,
            max_pixels_per_pass: 2500,
            seed_search_radius: 200,
            relax_step: 25.0,
            max_retries: 2,
            seal_leaks: true,
            seal_tolerance: 125.0,
            paint_over: true,
            plane_step_count: 0,
            fill_mode: FillMode::Plane,
            strict_seed_dedup: false,
        }
    }
}

impl SessionConfig {
    /// The intensity band, ordered.
    pub fn window(&self) -> ThresholdWindow {
        ThresholdWindow::new(self.threshold_low, self.threshold_high)
    }

    pub(crate) fn normalized(&self) -> Self {
        let defaults = Self::default();
        let mut out = self.clone();

        if !out.threshold_low.is_finite() {
            out.threshold_low = defaults.threshold_low;
        }
        if !out.threshold_high.is_finite() {
            out.threshold_high = defaults.threshold_high;
        }
        if out.threshold_low > out.threshold_high {
            core::mem::swap(&mut out.threshold_low, &mut out.threshold_high);
        }
        out.max_pixels_per_pass = out.max_pixels_per_pass.max(1);
        out.seed_search_radius = out.seed_search_radius.max(1);
        if !out.relax_step.is_finite() || out.relax_step < 0.0 {
            out.relax_step = defaults.relax_step;
        }
        if !out.seal_tolerance.is_finite() || out.seal_tolerance < 0.0 {
            out.seal_tolerance = defaults.seal_tolerance;
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::{FillMode, SessionConfig};

    #[test]
    fn default_parameter_set_is_stable() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.threshold_low, 250.0);
        assert_eq!(cfg.threshold_high, 2799.0);
        assert_eq!(cfg.max_pixels_per_pass, 2500);
        assert_eq!(cfg.seed_search_radius, 200);
        assert_eq!(cfg.relax_step, 25.0);
        assert_eq!(cfg.max_retries, 2);
        assert_eq!(cfg.seal_tolerance, 125.0);
        assert!(cfg.paint_over);
        assert_eq!(cfg.plane_step_count, 0);
        assert_eq!(cfg.fill_mode, FillMode::Plane);
        assert!(!cfg.strict_seed_dedup);
    }

    #[test]
    fn normalization_orders_bounds_and_clamps_counts() {
        let cfg = SessionConfig {
            threshold_low: 900.0,
            threshold_high: 100.0,
            max_pixels_per_pass: 0,
            seed_search_radius: -5,
            relax_step: f32::NAN,
            ..SessionConfig::default()
        }
        .normalized();

        assert_eq!(cfg.threshold_low, 100.0);
        assert_eq!(cfg.threshold_high, 900.0);
        assert_eq!(cfg.max_pixels_per_pass, 1);
        assert_eq!(cfg.seed_search_radius, 1);
        assert_eq!(cfg.relax_step, 25.0);
    }
}
