//! Tests for the models module.

use jiff::Timestamp;

use super::*;

fn sample_plan() -> Plan {
    Plan {
        id: 1,
        user_id: "u1".to_string(),
        title: "Revise algebra".to_string(),
        description: None,
        category: PlanCategory::Study,
        subject: Some("Math".to_string()),
        duration_minutes: 30,
        scheduled_time: Some("09:00".to_string()),
        scheduled_date: Some("2024-06-01".to_string()),
        status: PlanStatus::Pending,
        reminder_lead_minutes: None,
        auto_rescheduled: false,
        conflict_adjusted: false,
        related_mood_id: None,
        created_at: Timestamp::now(),
        updated_at: Timestamp::now(),
    }
}

#[test]
fn status_round_trips_through_strings() {
    for status in [
        PlanStatus::Pending,
        PlanStatus::InProgress,
        PlanStatus::Completed,
        PlanStatus::Cancelled,
        PlanStatus::Missed,
        PlanStatus::Snoozed,
    ] {
        assert_eq!(status.as_str().parse::<PlanStatus>(), Ok(status));
    }
    assert!("paused".parse::<PlanStatus>().is_err());
}

#[test]
fn terminal_statuses() {
    assert!(PlanStatus::Completed.is_terminal());
    assert!(PlanStatus::Cancelled.is_terminal());
    assert!(!PlanStatus::Pending.is_terminal());
    assert!(!PlanStatus::Missed.is_terminal());
    assert!(!PlanStatus::Snoozed.is_terminal());
}

#[test]
fn category_round_trips_through_strings() {
    for category in [
        PlanCategory::Study,
        PlanCategory::Work,
        PlanCategory::Personal,
        PlanCategory::Other,
    ] {
        assert_eq!(category.as_str().parse::<PlanCategory>(), Ok(category));
    }
}

#[test]
fn plan_interval_is_half_open_minutes() {
    let plan = sample_plan();
    assert_eq!(plan.interval(), Some((540, 570)));
}

#[test]
fn unscheduled_or_corrupt_plans_have_no_interval() {
    let mut plan = sample_plan();
    plan.scheduled_time = None;
    assert_eq!(plan.interval(), None);

    let mut plan = sample_plan();
    plan.scheduled_time = Some("never".to_string());
    assert_eq!(plan.interval(), None);

    let mut plan = sample_plan();
    plan.duration_minutes = 0;
    assert_eq!(plan.interval(), None);
}

#[test]
fn filter_matches_on_category_and_status() {
    let plan = sample_plan();

    assert!(PlanFilter::default().matches(&plan));
    assert!(PlanFilter {
        category: Some(PlanCategory::Study),
        status: Some(PlanStatus::Pending),
    }
    .matches(&plan));
    assert!(!PlanFilter {
        category: Some(PlanCategory::Work),
        status: None,
    }
    .matches(&plan));
    assert!(!PlanFilter {
        category: None,
        status: Some(PlanStatus::Completed),
    }
    .matches(&plan));
}

#[test]
fn calendar_report_counts_and_rates() {
    let mut completed_20 = sample_plan();
    completed_20.duration_minutes = 20;
    completed_20.status = PlanStatus::Completed;

    let mut completed_10 = sample_plan();
    completed_10.id = 2;
    completed_10.duration_minutes = 10;
    completed_10.status = PlanStatus::Completed;

    let mut pending_15 = sample_plan();
    pending_15.id = 3;
    pending_15.duration_minutes = 15;

    let report =
        CalendarReport::from_plans([&completed_20, &completed_10, &pending_15]);

    let day = &report.days["2024-06-01"];
    assert_eq!(day.total, 3);
    assert_eq!(day.completed, 2);
    assert_eq!(day.pending, 1);
    assert_eq!(day.missed, 0);
    assert_eq!(day.planned_minutes, 45);
    assert_eq!(day.completed_minutes, 30);
    assert_eq!(day.completion_rate, 66.67);
    assert_eq!(day.minutes_completion_rate, 66.67);

    assert_eq!(report.summary, *day);
}

#[test]
fn calendar_report_skips_undated_plans() {
    let mut undated = sample_plan();
    undated.scheduled_date = None;

    let report = CalendarReport::from_plans([&undated]);
    assert!(report.days.is_empty());
    assert_eq!(report.summary.total, 0);
}
