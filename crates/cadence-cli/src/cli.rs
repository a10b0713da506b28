//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure using clap's derive API,
//! implementing the parameter wrapper pattern for clean separation
//! between CLI framework concerns and core domain logic.
//!
//! ## Parameter Wrapper Pattern
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Business Logic
//! ```
//!
//! Each command has a CLI-specific argument structure with clap derives
//! and a `From` conversion into the core parameter type. Core types stay
//! free of clap attributes, CLI concerns (help text, aliases, value
//! enums) stay here, and the mapping between the two layers is verified
//! at compile time.

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;

use cadence_core::params::{
    CalendarQuery, CreatePlan, Id, ListPlans, SetReminder, SnoozePlan, UpdatePlan,
};
use cadence_core::{
    conflict, timeofday, CreateResult, DeleteResult, PlanCategory, PlanList, PlanStatus,
    Scheduler, SchedulerError, SweepConfig, UpdateResult,
};

/// Create a new plan
#[derive(Args)]
pub struct CreatePlanArgs {
    /// Title of the plan
    pub title: String,
    /// Optional description providing more context about the plan
    #[arg(short, long)]
    pub description: Option<String>,
    /// Category of the plan
    #[arg(short, long, value_enum, default_value_t = CategoryArg::Other)]
    pub category: CategoryArg,
    /// Free-text subject, e.g. a study topic
    #[arg(long)]
    pub subject: Option<String>,
    /// Length of the plan in minutes (5-180, default 30)
    #[arg(short = 'm', long)]
    pub duration: Option<u32>,
    /// Start time of day, e.g. "09:30" or "2:30 PM"
    #[arg(short, long)]
    pub time: Option<String>,
    /// Calendar date, YYYY-MM-DD
    #[arg(short = 'D', long)]
    pub date: Option<String>,
    /// Minutes before the start time to fire a reminder (0-120)
    #[arg(long)]
    pub remind_before: Option<u32>,
    /// Mood entry this plan was derived from
    #[arg(long)]
    pub mood_id: Option<String>,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            title: val.title,
            description: val.description,
            category: val.category.into(),
            subject: val.subject,
            duration_minutes: val.duration,
            scheduled_time: val.time,
            scheduled_date: val.date,
            reminder_lead_minutes: val.remind_before,
            related_mood_id: val.mood_id,
        }
    }
}

/// List plans
#[derive(Args)]
pub struct ListPlansArgs {
    /// Keep only plans in this category
    #[arg(short, long, value_enum)]
    pub category: Option<CategoryArg>,
    /// Keep only plans with this status
    #[arg(short, long, value_enum)]
    pub status: Option<StatusArg>,
}

impl From<ListPlansArgs> for ListPlans {
    fn from(val: ListPlansArgs) -> Self {
        ListPlans {
            category: val.category.map(Into::into),
            status: val.status.map(Into::into),
        }
    }
}

/// Show details of a specific plan
#[derive(Args)]
pub struct ShowPlanArgs {
    /// Unique identifier of the plan to show
    pub id: u64,
}

impl From<ShowPlanArgs> for Id {
    fn from(val: ShowPlanArgs) -> Self {
        Id { id: val.id }
    }
}

/// Update fields of an existing plan
#[derive(Args)]
pub struct UpdatePlanArgs {
    /// Unique identifier of the plan to update
    pub id: u64,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New description
    #[arg(short, long)]
    pub description: Option<String>,
    /// New category
    #[arg(short, long, value_enum)]
    pub category: Option<CategoryArg>,
    /// New subject
    #[arg(long)]
    pub subject: Option<String>,
    /// New duration in minutes (5-180)
    #[arg(short = 'm', long)]
    pub duration: Option<u32>,
    /// New start time of day
    #[arg(short, long)]
    pub time: Option<String>,
    /// New calendar date, YYYY-MM-DD
    #[arg(short = 'D', long)]
    pub date: Option<String>,
    /// New status (pending, in-progress, completed, cancelled, missed, snoozed)
    #[arg(short, long, value_enum)]
    pub status: Option<StatusArg>,
    /// New reminder lead in minutes (0-120)
    #[arg(long)]
    pub remind_before: Option<u32>,
}

impl From<&UpdatePlanArgs> for UpdatePlan {
    fn from(val: &UpdatePlanArgs) -> Self {
        UpdatePlan {
            title: val.title.clone(),
            description: val.description.clone(),
            category: val.category.map(Into::into),
            subject: val.subject.clone(),
            duration_minutes: val.duration,
            scheduled_time: val.time.clone(),
            scheduled_date: val.date.clone(),
            status: val.status.map(Into::into),
            reminder_lead_minutes: val.remind_before,
        }
    }
}

/// Delete a plan permanently
#[derive(Args)]
pub struct DeletePlanArgs {
    /// Unique identifier of the plan to delete
    pub id: u64,
}

impl From<DeletePlanArgs> for Id {
    fn from(val: DeletePlanArgs) -> Self {
        Id { id: val.id }
    }
}

/// Push a plan forward by a number of minutes
#[derive(Args)]
pub struct SnoozePlanArgs {
    /// Unique identifier of the plan to snooze
    pub id: u64,
    /// Minutes to push the plan forward (1-240)
    pub minutes: u32,
}

impl From<SnoozePlanArgs> for SnoozePlan {
    fn from(val: SnoozePlanArgs) -> Self {
        SnoozePlan {
            id: val.id,
            minutes: val.minutes,
        }
    }
}

/// Set how far in advance a plan's reminder fires
#[derive(Args)]
pub struct RemindPlanArgs {
    /// Unique identifier of the plan
    pub id: u64,
    /// Minutes before the start time (0-120)
    pub lead_minutes: u32,
}

impl From<RemindPlanArgs> for SetReminder {
    fn from(val: RemindPlanArgs) -> Self {
        SetReminder {
            id: val.id,
            lead_minutes: val.lead_minutes,
        }
    }
}

/// Show per-day completion statistics
#[derive(Args)]
pub struct CalendarArgs {
    /// Restrict to this calendar month (1-12)
    #[arg(short, long)]
    pub month: Option<u8>,
    /// Restrict to this calendar year
    #[arg(short, long)]
    pub year: Option<i16>,
}

impl From<CalendarArgs> for CalendarQuery {
    fn from(val: CalendarArgs) -> Self {
        CalendarQuery {
            month: val.month,
            year: val.year,
        }
    }
}

/// Run the reschedule sweep periodically
#[derive(Args)]
pub struct WatchArgs {
    /// Seconds between sweep cycles
    #[arg(long, default_value_t = 300)]
    pub interval_seconds: u64,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show details of a specific plan
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Update fields of an existing plan
    #[command(alias = "u")]
    Update(UpdatePlanArgs),
    /// Delete a plan permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
    /// Push a plan forward by a number of minutes
    Snooze(SnoozePlanArgs),
    /// Set how far in advance a plan's reminder fires
    Remind(RemindPlanArgs),
}

/// Command-line argument representation of plan categories
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Study,
    Work,
    Personal,
    Other,
}

impl From<CategoryArg> for PlanCategory {
    fn from(val: CategoryArg) -> Self {
        match val {
            CategoryArg::Study => PlanCategory::Study,
            CategoryArg::Work => PlanCategory::Work,
            CategoryArg::Personal => PlanCategory::Personal,
            CategoryArg::Other => PlanCategory::Other,
        }
    }
}

/// Command-line argument representation of plan statuses
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Pending,
    InProgress,
    Completed,
    Cancelled,
    Missed,
    Snoozed,
}

impl From<StatusArg> for PlanStatus {
    fn from(val: StatusArg) -> Self {
        match val {
            StatusArg::Pending => PlanStatus::Pending,
            StatusArg::InProgress => PlanStatus::InProgress,
            StatusArg::Completed => PlanStatus::Completed,
            StatusArg::Cancelled => PlanStatus::Cancelled,
            StatusArg::Missed => PlanStatus::Missed,
            StatusArg::Snoozed => PlanStatus::Snoozed,
        }
    }
}

/// Command dispatcher tying parsed arguments to scheduler operations.
pub struct Cli {
    scheduler: Scheduler,
    user: String,
    json: bool,
}

impl Cli {
    pub fn new(scheduler: Scheduler, user: String, json: bool) -> Self {
        Self {
            scheduler,
            user,
            json,
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => self.create_plan(args).await,
            PlanCommands::List(args) => self.list_plans(args).await,
            PlanCommands::Show(args) => self.show_plan(args).await,
            PlanCommands::Update(args) => self.update_plan(args).await,
            PlanCommands::Delete(args) => self.delete_plan(args).await,
            PlanCommands::Snooze(args) => self.snooze_plan(args).await,
            PlanCommands::Remind(args) => self.set_reminder(args).await,
        }
    }

    async fn create_plan(&self, args: CreatePlanArgs) -> Result<()> {
        let params: CreatePlan = args.into();
        let requested = params.scheduled_time.clone();
        let duration = params.duration_minutes;

        match self.scheduler.create_plan(&self.user, &params).await {
            Ok(plan) => {
                if self.json {
                    self.emit(&plan)
                } else {
                    print!("{}", CreateResult::new(plan));
                    Ok(())
                }
            }
            Err(err) => self.report_conflict(err, requested.as_deref(), duration).await,
        }
    }

    pub async fn list_plans(&self, args: ListPlansArgs) -> Result<()> {
        let plans = self
            .scheduler
            .list_plans(&self.user, &args.into())
            .await
            .context("Failed to list plans")?;
        if self.json {
            self.emit(&plans)
        } else {
            print!("{}", PlanList(plans));
            Ok(())
        }
    }

    async fn show_plan(&self, args: ShowPlanArgs) -> Result<()> {
        let plan = self
            .scheduler
            .get_plan(&self.user, &args.into())
            .await
            .context("Failed to fetch plan")?;
        if self.json {
            self.emit(&plan)
        } else {
            print!("{plan}");
            Ok(())
        }
    }

    async fn update_plan(&self, args: UpdatePlanArgs) -> Result<()> {
        let params: UpdatePlan = (&args).into();
        let requested = params.scheduled_time.clone();

        match self.scheduler.update_plan(&self.user, args.id, &params).await {
            Ok(plan) => {
                if self.json {
                    self.emit(&plan)
                } else {
                    print!("{}", UpdateResult::new(plan));
                    Ok(())
                }
            }
            Err(err) => {
                self.report_conflict(err, requested.as_deref(), params.duration_minutes)
                    .await
            }
        }
    }

    async fn delete_plan(&self, args: DeletePlanArgs) -> Result<()> {
        let plan = self
            .scheduler
            .delete_plan(&self.user, &args.into())
            .await
            .context("Failed to delete plan")?;
        if self.json {
            self.emit(&plan)
        } else {
            println!("{}", DeleteResult::new(&plan));
            Ok(())
        }
    }

    async fn snooze_plan(&self, args: SnoozePlanArgs) -> Result<()> {
        let plan = self
            .scheduler
            .snooze_plan(&self.user, &args.into())
            .await
            .context("Failed to snooze plan")?;
        if self.json {
            self.emit(&plan)
        } else {
            println!(
                "Snoozed plan {} to {}",
                plan.id,
                plan.scheduled_time.as_deref().unwrap_or("--:--")
            );
            Ok(())
        }
    }

    async fn set_reminder(&self, args: RemindPlanArgs) -> Result<()> {
        let plan = self
            .scheduler
            .set_reminder(&self.user, &args.into())
            .await
            .context("Failed to set reminder")?;
        if self.json {
            self.emit(&plan)
        } else {
            println!(
                "Plan {} will remind {} minutes before its start",
                plan.id,
                plan.reminder_lead_minutes.unwrap_or(0)
            );
            Ok(())
        }
    }

    pub async fn calendar(&self, args: CalendarArgs) -> Result<()> {
        let report = self
            .scheduler
            .calendar_report(&self.user, &args.into())
            .await
            .context("Failed to build calendar report")?;
        if self.json {
            self.emit(&report)
        } else {
            print!("{report}");
            Ok(())
        }
    }

    pub async fn sweep_once(&self) -> Result<()> {
        let stats = self
            .scheduler
            .run_sweep_once(&SweepConfig::default())
            .await
            .context("Sweep failed")?;
        if self.json {
            self.emit(&stats)
        } else {
            println!("{stats}");
            Ok(())
        }
    }

    pub fn into_scheduler(self) -> Scheduler {
        self.scheduler
    }

    fn emit<T: Serialize>(&self, value: &T) -> Result<()> {
        println!(
            "{}",
            serde_json::to_string_pretty(value).context("Failed to serialize output")?
        );
        Ok(())
    }

    /// On a time conflict, print the blocking plan and suggest the next
    /// free slot of the day before failing.
    async fn report_conflict(
        &self,
        err: SchedulerError,
        requested: Option<&str>,
        duration: Option<u32>,
    ) -> Result<()> {
        if let SchedulerError::TimeConflict { ref existing } = err {
            eprintln!(
                "Time conflict with plan {} ('{}') at {} for {} minutes",
                existing.id,
                existing.title,
                existing.scheduled_time.as_deref().unwrap_or("--:--"),
                existing.duration_minutes
            );

            let start = requested.and_then(timeofday::parse_to_minutes);
            if let Some(start) = start {
                let duration = duration.unwrap_or(cadence_core::params::DEFAULT_DURATION_MINUTES);
                let plans = self
                    .scheduler
                    .list_plans(&self.user, &ListPlans::default())
                    .await
                    .unwrap_or_default();
                if let Some(slot) = conflict::next_free_slot(&plans, start, duration, None) {
                    eprintln!("Next free slot: {}", timeofday::minutes_to_hhmm(slot));
                }
            }
        }
        Err(err.into())
    }
}
