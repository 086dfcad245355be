use ts_core::{Cell, CellRect};

use crate::TraceOutcome;

/// Pick the best closed loop among trace outcomes, returning its index.
///
/// Candidates are scanned in order. A candidate whose seed already lies on a
/// previously pooled loop is dropped as a re-trace of the same boundary; with
/// `strict_dedup` unset only the first pooled loop is consulted for this
/// check, which matches the historical behavior, while `strict_dedup`
/// consults every pooled loop. A pooled loop is eligible only when its
/// bounding box strictly encloses `origin` on both axes; among eligible loops
/// the largest bounding-box extent wins and ties keep the earlier candidate.
pub fn select_loop(
    candidates: &[TraceOutcome],
    origin: Cell,
    strict_dedup: bool,
) -> Option<usize> {
    let mut pooled: Vec<usize> = Vec::new();
    let mut best: Option<(usize, i64)> = None;

    for (i, candidate) in candidates.iter().enumerate() {
        let Some(seed) = candidate.seed() else {
            continue;
        };

        let dedup_against: &[usize] = if strict_dedup {
            &pooled
        } else {
            // Historical quirk: only the first pooled loop is checked.
            pooled.get(..1).unwrap_or(&[])
        };
        if dedup_against
            .iter()
            .any(|&p| candidates[p].path.contains(&seed))
        {
            tracing::debug!(?seed, "seed lies on an already pooled loop, skipping");
            continue;
        }
        pooled.push(i);

        let rect = CellRect::of(&candidate.path).expect("non-empty path has a bounding box");
        if !rect.encloses(origin) {
            continue;
        }

        let area = rect.extent_area();
        if best.map_or(true, |(_, best_area)| area > best_area) {
            best = Some((i, area));
        }
    }

    best.map(|(i, _)| i)
}
