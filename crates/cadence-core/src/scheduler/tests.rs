//! Scheduler behavior tests on the in-memory store.

use super::*;
use crate::error::SchedulerError;
use crate::models::{PlanCategory, PlanStatus};
use crate::params::{CalendarQuery, CreatePlan, Id, ListPlans, SetReminder, SnoozePlan, UpdatePlan};

async fn scheduler() -> Scheduler {
    SchedulerBuilder::new()
        .in_memory()
        .build()
        .await
        .expect("in-memory build")
}

fn timed(title: &str, time: &str, duration: u32) -> CreatePlan {
    CreatePlan {
        title: title.to_string(),
        duration_minutes: Some(duration),
        scheduled_time: Some(time.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn create_applies_default_duration() {
    let scheduler = scheduler().await;
    let plan = scheduler
        .create_plan(
            "ada",
            &CreatePlan {
                title: "Walk".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(plan.duration_minutes, 30);
    assert_eq!(plan.status, PlanStatus::Pending);
    assert!(plan.scheduled_time.is_none());
}

#[tokio::test]
async fn create_normalizes_twelve_hour_times() {
    let scheduler = scheduler().await;
    let plan = scheduler
        .create_plan("ada", &timed("Afternoon review", "2:30 PM", 30))
        .await
        .unwrap();
    assert_eq!(plan.scheduled_time.as_deref(), Some("14:30"));
}

#[tokio::test]
async fn create_rejects_overlapping_window() {
    let scheduler = scheduler().await;
    scheduler
        .create_plan("ada", &timed("Deep work", "09:00", 60))
        .await
        .unwrap();

    let err = scheduler
        .create_plan("ada", &timed("Standup", "09:30", 15))
        .await
        .unwrap_err();
    let SchedulerError::TimeConflict { existing } = err else {
        panic!("expected time conflict, got {err}");
    };
    assert_eq!(existing.title, "Deep work");
    assert_eq!(existing.scheduled_time.as_deref(), Some("09:00"));

    // The rejected plan must not have been written
    let plans = scheduler.list_plans("ada", &ListPlans::default()).await.unwrap();
    assert_eq!(plans.len(), 1);
}

#[tokio::test]
async fn adjacent_windows_do_not_conflict() {
    let scheduler = scheduler().await;
    scheduler
        .create_plan("ada", &timed("First", "09:00", 60))
        .await
        .unwrap();
    // Starts exactly where the first one ends
    scheduler
        .create_plan("ada", &timed("Second", "10:00", 30))
        .await
        .unwrap();
}

#[tokio::test]
async fn completed_plans_do_not_block_new_ones() {
    let scheduler = scheduler().await;
    let done = scheduler
        .create_plan("ada", &timed("Old slot", "09:00", 60))
        .await
        .unwrap();
    scheduler
        .update_plan(
            "ada",
            done.id,
            &UpdatePlan {
                status: Some(PlanStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    scheduler
        .create_plan("ada", &timed("Reuse slot", "09:00", 60))
        .await
        .unwrap();
}

#[tokio::test]
async fn other_users_plans_never_conflict() {
    let scheduler = scheduler().await;
    scheduler
        .create_plan("ada", &timed("Ada's slot", "09:00", 60))
        .await
        .unwrap();
    scheduler
        .create_plan("grace", &timed("Grace's slot", "09:00", 60))
        .await
        .unwrap();
}

#[tokio::test]
async fn update_ignores_the_plans_own_window() {
    let scheduler = scheduler().await;
    let plan = scheduler
        .create_plan("ada", &timed("Focus", "09:00", 30))
        .await
        .unwrap();

    // Growing in place overlaps the old window but must succeed
    let updated = scheduler
        .update_plan(
            "ada",
            plan.id,
            &UpdatePlan {
                duration_minutes: Some(45),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.duration_minutes, 45);
    assert_eq!(updated.scheduled_time.as_deref(), Some("09:00"));
}

#[tokio::test]
async fn update_rejects_moving_onto_another_plan() {
    let scheduler = scheduler().await;
    scheduler
        .create_plan("ada", &timed("Fixed", "09:00", 60))
        .await
        .unwrap();
    let movable = scheduler
        .create_plan("ada", &timed("Movable", "11:00", 30))
        .await
        .unwrap();

    let err = scheduler
        .update_plan(
            "ada",
            movable.id,
            &UpdatePlan {
                scheduled_time: Some("09:15".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulerError::TimeConflict { .. }));
}

#[tokio::test]
async fn update_into_terminal_status_skips_conflict_check() {
    let scheduler = scheduler().await;
    scheduler
        .create_plan("ada", &timed("Fixed", "09:00", 60))
        .await
        .unwrap();
    let other = scheduler
        .create_plan("ada", &timed("Wrapping up", "11:00", 30))
        .await
        .unwrap();

    // Completing a plan while moving it into an occupied window is fine;
    // terminal plans take no space
    let updated = scheduler
        .update_plan(
            "ada",
            other.id,
            &UpdatePlan {
                scheduled_time: Some("09:15".to_string()),
                status: Some(PlanStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, PlanStatus::Completed);
}

#[tokio::test]
async fn ownership_is_enforced() {
    let scheduler = scheduler().await;
    let plan = scheduler
        .create_plan("ada", &timed("Private", "09:00", 30))
        .await
        .unwrap();

    let err = scheduler
        .get_plan("grace", &Id { id: plan.id })
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulerError::Forbidden { .. }));

    let err = scheduler
        .delete_plan("grace", &Id { id: plan.id })
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulerError::Forbidden { .. }));

    let err = scheduler
        .update_plan("grace", plan.id, &UpdatePlan::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulerError::Forbidden { .. }));
}

#[tokio::test]
async fn missing_plans_report_not_found() {
    let scheduler = scheduler().await;
    let err = scheduler.get_plan("ada", &Id { id: 42 }).await.unwrap_err();
    assert!(matches!(err, SchedulerError::PlanNotFound { id: 42 }));
}

#[tokio::test]
async fn delete_returns_the_removed_plan() {
    let scheduler = scheduler().await;
    let plan = scheduler
        .create_plan("ada", &timed("Ephemeral", "09:00", 30))
        .await
        .unwrap();

    let removed = scheduler
        .delete_plan("ada", &Id { id: plan.id })
        .await
        .unwrap();
    assert_eq!(removed.id, plan.id);

    let err = scheduler
        .get_plan("ada", &Id { id: plan.id })
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulerError::PlanNotFound { .. }));
}

#[tokio::test]
async fn list_filters_by_category_and_status() {
    let scheduler = scheduler().await;
    scheduler
        .create_plan(
            "ada",
            &CreatePlan {
                title: "Algebra".to_string(),
                category: PlanCategory::Study,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let chores = scheduler
        .create_plan(
            "ada",
            &CreatePlan {
                title: "Chores".to_string(),
                category: PlanCategory::Personal,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    scheduler
        .update_plan(
            "ada",
            chores.id,
            &UpdatePlan {
                status: Some(PlanStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let study = scheduler
        .list_plans(
            "ada",
            &ListPlans {
                category: Some(PlanCategory::Study),
                status: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(study.len(), 1);
    assert_eq!(study[0].title, "Algebra");

    let completed = scheduler
        .list_plans(
            "ada",
            &ListPlans {
                category: None,
                status: Some(PlanStatus::Completed),
            },
        )
        .await
        .unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].title, "Chores");
}

#[tokio::test]
async fn snooze_wraps_past_midnight() {
    let scheduler = scheduler().await;
    let plan = scheduler
        .create_plan("ada", &timed("Night owl", "23:50", 20))
        .await
        .unwrap();

    let snoozed = scheduler
        .snooze_plan(
            "ada",
            &SnoozePlan {
                id: plan.id,
                minutes: 20,
            },
        )
        .await
        .unwrap();
    assert_eq!(snoozed.scheduled_time.as_deref(), Some("00:10"));
    assert_eq!(snoozed.status, PlanStatus::Snoozed);
}

#[tokio::test]
async fn snooze_ignores_conflicts() {
    let scheduler = scheduler().await;
    scheduler
        .create_plan("ada", &timed("Fixed", "10:00", 60))
        .await
        .unwrap();
    let plan = scheduler
        .create_plan("ada", &timed("Sleepy", "09:00", 30))
        .await
        .unwrap();

    // 09:00 + 75 lands at 10:15, inside the fixed plan's window; snooze
    // goes through anyway and the sweep untangles it later
    let snoozed = scheduler
        .snooze_plan(
            "ada",
            &SnoozePlan {
                id: plan.id,
                minutes: 75,
            },
        )
        .await
        .unwrap();
    assert_eq!(snoozed.scheduled_time.as_deref(), Some("10:15"));
    assert_eq!(snoozed.status, PlanStatus::Snoozed);
}

#[tokio::test]
async fn snooze_bounds_and_terminal_plans_are_rejected() {
    let scheduler = scheduler().await;
    let plan = scheduler
        .create_plan("ada", &timed("Bounded", "09:00", 30))
        .await
        .unwrap();

    for minutes in [0, 241] {
        let err = scheduler
            .snooze_plan(
                "ada",
                &SnoozePlan {
                    id: plan.id,
                    minutes,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidInput { .. }));
    }

    scheduler
        .update_plan(
            "ada",
            plan.id,
            &UpdatePlan {
                status: Some(PlanStatus::Cancelled),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let err = scheduler
        .snooze_plan(
            "ada",
            &SnoozePlan {
                id: plan.id,
                minutes: 30,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulerError::InvalidInput { .. }));
}

#[tokio::test]
async fn reminder_lead_is_bounded() {
    let scheduler = scheduler().await;
    let plan = scheduler
        .create_plan("ada", &timed("Remind me", "09:00", 30))
        .await
        .unwrap();

    let updated = scheduler
        .set_reminder(
            "ada",
            &SetReminder {
                id: plan.id,
                lead_minutes: 120,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.reminder_lead_minutes, Some(120));

    let err = scheduler
        .set_reminder(
            "ada",
            &SetReminder {
                id: plan.id,
                lead_minutes: 121,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulerError::InvalidInput { .. }));
}

#[tokio::test]
async fn calendar_reports_per_day_rates() {
    let scheduler = scheduler().await;
    let dated = |title: &str, date: &str, duration: u32| CreatePlan {
        title: title.to_string(),
        duration_minutes: Some(duration),
        scheduled_date: Some(date.to_string()),
        ..Default::default()
    };

    let a = scheduler
        .create_plan("ada", &dated("One", "2024-06-01", 15))
        .await
        .unwrap();
    let b = scheduler
        .create_plan("ada", &dated("Two", "2024-06-01", 15))
        .await
        .unwrap();
    scheduler
        .create_plan("ada", &dated("Three", "2024-06-01", 15))
        .await
        .unwrap();
    // A dated plan in another month, excluded by the filter
    scheduler
        .create_plan("ada", &dated("Elsewhere", "2024-07-10", 15))
        .await
        .unwrap();
    // An undated plan never shows up in the calendar
    scheduler
        .create_plan(
            "ada",
            &CreatePlan {
                title: "Undated".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    for id in [a.id, b.id] {
        scheduler
            .update_plan(
                "ada",
                id,
                &UpdatePlan {
                    status: Some(PlanStatus::Completed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    let report = scheduler
        .calendar_report(
            "ada",
            &CalendarQuery {
                month: Some(6),
                year: Some(2024),
            },
        )
        .await
        .unwrap();

    assert_eq!(report.days.len(), 1);
    let day = &report.days["2024-06-01"];
    assert_eq!(day.total, 3);
    assert_eq!(day.completed, 2);
    assert_eq!(day.completion_rate, 66.67);
    assert_eq!(day.minutes_completion_rate, 66.67);
    assert_eq!(report.summary.total, 3);
}

#[tokio::test]
async fn calendar_rejects_invalid_month() {
    let scheduler = scheduler().await;
    let err = scheduler
        .calendar_report(
            "ada",
            &CalendarQuery {
                month: Some(13),
                year: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulerError::InvalidInput { .. }));
}
