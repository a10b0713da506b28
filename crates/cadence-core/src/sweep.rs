//! Background reschedule sweep for overdue plans.
//!
//! The sweep scans for active plans whose scheduled time has already
//! passed, shrinks them, and moves them to the next free slot later in
//! the day. It runs periodically from [`reschedule_loop`] or on demand
//! via [`Scheduler::run_sweep_once`].

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::conflict;
use crate::error::Result;
use crate::models::{PlanPatch, PlanStatus};
use crate::scheduler::Scheduler;
use crate::timeofday::{self, MINUTES_PER_DAY};

/// Tuning knobs for the reschedule sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// How often the background loop runs a sweep cycle
    pub interval: Duration,
    /// Minutes past "now" the new slot is aimed at
    pub defer_minutes: u32,
    /// Slot granularity; new times land on multiples of this
    pub slot_minutes: u32,
    /// Lower bound the shrunken duration never goes below
    pub min_duration: u32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(300),
            defer_minutes: 60,
            slot_minutes: 5,
            min_duration: 10,
        }
    }
}

/// Counters for one sweep cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepStats {
    /// Plans examined
    pub scanned: usize,
    /// Plans moved to a new slot
    pub rescheduled: usize,
    /// Rescheduled plans whose slot had to shift around other plans
    pub conflicts_resolved: usize,
    /// Plans skipped because their reschedule failed
    pub errors: usize,
}

impl SweepStats {
    fn absorb(&mut self, other: SweepStats) {
        self.scanned += other.scanned;
        self.rescheduled += other.rescheduled;
        self.conflicts_resolved += other.conflicts_resolved;
        self.errors += other.errors;
    }
}

/// Aggregate counters over the lifetime of a sweep loop.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SweepTotals {
    /// Completed sweep cycles
    pub cycles: usize,
    /// Counters summed across all cycles
    pub stats: SweepStats,
}

// A full day of slots; if a window cannot be placed after walking this
// many candidates there is no room left today.
const MAX_SLOT_PROBES: u32 = MINUTES_PER_DAY / 5;

impl Scheduler {
    /// Runs one sweep cycle against the current wall-clock time.
    pub async fn run_sweep_once(&self, config: &SweepConfig) -> Result<SweepStats> {
        self.sweep_once_at(timeofday::current_minutes(), config)
            .await
    }

    /// Runs one sweep cycle as if the time of day were `now` minutes
    /// since midnight.
    ///
    /// A plan is overdue when it is pending or snoozed and its scheduled
    /// time is strictly before `now`. Each overdue plan is shrunk to
    /// three quarters of its duration (never below the configured
    /// minimum), moved to the first conflict-free slot at or after
    /// `now + defer_minutes`, and reopened as pending with
    /// `auto_rescheduled` set. Plans completed or cancelled between the
    /// scan and the write are left untouched.
    pub async fn sweep_once_at(&self, now: u32, config: &SweepConfig) -> Result<SweepStats> {
        let mut stats = SweepStats::default();

        let all = self.run_store(|store| store.list_all()).await?;
        stats.scanned = all.len();

        let overdue: Vec<(String, u64)> = all
            .iter()
            .filter(|plan| is_overdue(plan, now))
            .map(|plan| (plan.user_id.clone(), plan.id))
            .collect();

        for (user_id, id) in overdue {
            match self.reschedule_plan(&user_id, id, now, config).await {
                Ok(outcome) => stats.absorb(outcome),
                Err(err) => {
                    log::warn!("Sweep failed to reschedule plan {id}: {err}");
                    stats.errors += 1;
                }
            }
        }

        Ok(stats)
    }

    async fn reschedule_plan(
        &self,
        user_id: &str,
        id: u64,
        now: u32,
        config: &SweepConfig,
    ) -> Result<SweepStats> {
        let mut outcome = SweepStats::default();

        let _guard = self.lock_user(user_id).await?;

        // Re-read under the lock; the plan may have moved on since the scan
        let Some(plan) = self.run_store(move |store| store.get(id)).await? else {
            return Ok(outcome);
        };
        if !is_overdue(&plan, now) {
            return Ok(outcome);
        }

        let new_duration = (plan.duration_minutes * 3 / 4).max(config.min_duration);

        let plans = self.plans_of(user_id).await?;
        let mut candidate = timeofday::round_up_to_slot(
            (now + config.defer_minutes) % MINUTES_PER_DAY,
            config.slot_minutes,
        );
        let mut conflict_adjusted = false;
        let mut probes = 0;
        while let Some(existing) = conflict::find_conflict(&plans, candidate, new_duration, Some(id))
        {
            probes += 1;
            if probes > MAX_SLOT_PROBES {
                log::warn!("Sweep found no free slot for plan {id}, leaving it in place");
                outcome.errors += 1;
                return Ok(outcome);
            }
            candidate = timeofday::round_up_to_slot(
                (candidate + existing.duration_minutes + 5) % MINUTES_PER_DAY,
                config.slot_minutes,
            );
            conflict_adjusted = true;
        }

        let patch = PlanPatch {
            scheduled_time: Some(timeofday::minutes_to_hhmm(candidate)),
            duration_minutes: Some(new_duration),
            status: Some(PlanStatus::Pending),
            auto_rescheduled: Some(true),
            conflict_adjusted: Some(conflict_adjusted),
            ..Default::default()
        };

        // update_if_active keeps a plan completed after the re-read from
        // being reopened
        let updated = self
            .run_store(move |store| store.update_if_active(id, &patch))
            .await?;
        if updated.is_some() {
            outcome.rescheduled += 1;
            if conflict_adjusted {
                outcome.conflicts_resolved += 1;
            }
        }

        Ok(outcome)
    }
}

fn is_overdue(plan: &crate::models::Plan, now: u32) -> bool {
    if !matches!(plan.status, PlanStatus::Pending | PlanStatus::Snoozed) {
        return false;
    }
    plan.scheduled_time
        .as_deref()
        .and_then(timeofday::parse_to_minutes)
        .is_some_and(|start| start < now)
}

/// Runs sweep cycles on an interval until `shutdown` flips to `true`.
///
/// Ticks missed while a cycle is running are skipped rather than
/// bursted. A failed cycle is logged and does not stop the loop.
pub async fn reschedule_loop(
    scheduler: Arc<Scheduler>,
    config: SweepConfig,
    mut shutdown: watch::Receiver<bool>,
) -> SweepTotals {
    let mut totals = SweepTotals::default();

    let mut ticker = tokio::time::interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    log::info!(
        "Reschedule sweep started, interval {}s",
        config.interval.as_secs()
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match scheduler.run_sweep_once(&config).await {
                    Ok(stats) => {
                        totals.cycles += 1;
                        totals.stats.absorb(stats);
                        if stats.rescheduled > 0 || stats.errors > 0 {
                            log::info!(
                                "Sweep cycle: {} scanned, {} rescheduled, {} conflict-shifted, {} errors",
                                stats.scanned,
                                stats.rescheduled,
                                stats.conflicts_resolved,
                                stats.errors
                            );
                        }
                    }
                    Err(err) => {
                        log::error!("Sweep cycle failed: {err}");
                    }
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    log::info!("Reschedule sweep stopping");
                    break;
                }
            }
        }
    }

    totals
}
