//! Conflict detection over per-user plan intervals.
//!
//! All functions here are pure and read-only: they take a slice of plans
//! (typically one user's plans as returned by the store) and answer
//! questions about interval overlap. Plans in a terminal status, plans
//! without a parseable `scheduled_time`, and plans with zero duration
//! never participate, they cannot conflict with anything.
//!
//! Intervals are half-open `[start, start + duration)` in minutes since
//! midnight, so back-to-back plans (one ending exactly where the next
//! begins) do not conflict.

use crate::models::Plan;
use crate::timeofday::MINUTES_PER_DAY;

/// Whether two half-open intervals overlap.
///
/// # Examples
///
/// ```rust
/// use cadence_core::conflict::overlaps;
///
/// assert!(overlaps(540, 570, 555, 585));
/// // touching intervals do not overlap
/// assert!(!overlaps(540, 600, 600, 630));
/// ```
pub fn overlaps(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    a_start < b_end && b_start < a_end
}

/// Finds the first active plan whose window overlaps the candidate
/// interval `[start, start + duration)`.
///
/// `ignore_id` excludes the plan being updated so it cannot conflict
/// with itself. Returns the first match in slice order; callers must not
/// assume anything stronger than "some overlapping plan".
pub fn find_conflict(
    plans: &[Plan],
    start: u32,
    duration: u32,
    ignore_id: Option<u64>,
) -> Option<&Plan> {
    if duration == 0 {
        return None;
    }
    let end = start + duration;

    plans
        .iter()
        .filter(|plan| Some(plan.id) != ignore_id && plan.is_active())
        .find(|plan| {
            plan.interval()
                .is_some_and(|(p_start, p_end)| overlaps(start, end, p_start, p_end))
        })
}

/// First conflict-free start at or after `candidate` for a window of
/// `duration` minutes, skipping past each blocking plan's end.
///
/// Returns `None` when the window cannot be placed before midnight.
/// Used to suggest an alternative slot after a rejected create.
pub fn next_free_slot(
    plans: &[Plan],
    candidate: u32,
    duration: u32,
    ignore_id: Option<u64>,
) -> Option<u32> {
    if duration == 0 {
        return None;
    }

    let mut start = candidate;
    // Each iteration jumps past one blocking interval's end, so the scan
    // is bounded by the number of active plans.
    for _ in 0..=plans.len() {
        if start + duration > MINUTES_PER_DAY {
            return None;
        }
        match find_conflict(plans, start, duration, ignore_id) {
            Some(blocking) => {
                let (_, block_end) = blocking.interval()?;
                start = start.max(block_end);
            }
            None => return Some(start),
        }
    }
    None
}
