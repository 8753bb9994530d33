//! Dashboard aggregations: summary counts, aging, per-user performance.
//!
//! Counts bucket by exact string match against the variant's status
//! vocabulary. A status outside the vocabulary (possible through the bulk
//! grid or a file shared between variants with different literals) counts
//! toward no bucket, so the per-status counts can sum to less than the
//! total. That silent mismatch is a documented trait of the deployments,
//! kept rather than corrected.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::Task;
use crate::variant::Variant;

#[derive(Debug, Clone, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

/// KPI block rendered at the top of the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total: usize,
    pub statuses: Vec<StatusCount>,
}

/// Count visible tasks per recognized status literal
pub fn summary(tasks: &[Task], variant: Variant) -> Summary {
    let statuses = variant
        .statuses()
        .iter()
        .map(|literal| StatusCount {
            status: literal.to_string(),
            count: tasks.iter().filter(|task| task.status == *literal).count(),
        })
        .collect();
    Summary {
        total: tasks.len(),
        statuses,
    }
}

/// Days between today and the due date, signed: positive means overdue,
/// negative not yet due. Exactly 0 when there is no (parseable) due date.
pub fn aging_days(task: &Task, today: NaiveDate) -> i64 {
    match task.due_date {
        Some(due) => (today - due).num_days(),
        None => 0,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AgingRow {
    pub task_name: String,
    pub assigned_to: String,
    pub aging_days: i64,
}

/// Aging table over the caller's visible tasks
pub fn aging_table(tasks: &[Task], today: NaiveDate) -> Vec<AgingRow> {
    tasks
        .iter()
        .map(|task| AgingRow {
            task_name: task.name.clone(),
            assigned_to: task.assigned_to.clone(),
            aging_days: aging_days(task, today),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceRow {
    pub assignee: String,
    pub completed: usize,
}

/// Completed-task count per assignee.
///
/// Computed over the FULL table, not the caller's filtered view, whatever
/// the caller's role. The original showed this chart to everyone; the broad
/// disclosure is preserved.
pub fn performance(all_tasks: &[Task], variant: Variant) -> Vec<PerformanceRow> {
    let completed_literal = variant.completed_status();
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for task in all_tasks {
        if task.status == completed_literal {
            *counts.entry(task.assigned_to.as_str()).or_insert(0) += 1;
        }
    }
    let mut rows: Vec<PerformanceRow> = counts
        .into_iter()
        .map(|(assignee, completed)| PerformanceRow {
            assignee: assignee.to_string(),
            completed,
        })
        .collect();
    rows.sort_by(|left, right| {
        right
            .completed
            .cmp(&left.completed)
            .then_with(|| left.assignee.cmp(&right.assignee))
    });
    rows
}

#[derive(Debug, Clone, Serialize)]
pub struct AssigneeStatusCount {
    pub assignee: String,
    pub status: String,
    pub count: usize,
}

/// Status-by-assignee counts feeding the dashboard bar chart, over the full
/// table. Unlike [`summary`] this groups by whatever status string is in the
/// cell, recognized or not, the way the original chart did.
pub fn assignee_status_counts(all_tasks: &[Task]) -> Vec<AssigneeStatusCount> {
    let mut counts: BTreeMap<(String, String), usize> = BTreeMap::new();
    for task in all_tasks {
        *counts
            .entry((task.assigned_to.clone(), task.status.clone()))
            .or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|((assignee, status), count)| AssigneeStatusCount {
            assignee,
            status,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(assignee: &str, status: &str, due: Option<(i32, u32, u32)>) -> Task {
        Task {
            id: 0,
            given_date: None,
            name: "t".to_string(),
            sort_centre: None,
            email_subject: None,
            remarks: String::new(),
            priority: "Low".to_string(),
            due_date: due.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            assigned_to: assignee.to_string(),
            status: status.to_string(),
            completion_remarks: String::new(),
            created_by: "admin@task.com".to_string(),
            reminder: false,
        }
    }

    #[test]
    fn unrecognized_status_counts_toward_no_bucket() {
        let tasks = vec![
            task("bob@task.com", "In Progress", None),
            task("bob@task.com", "Completed", None),
            // A variant-B literal leaking into a variant-A file.
            task("bob@task.com", "Task Completed", None),
        ];
        let summary = summary(&tasks, Variant::A);
        assert_eq!(summary.total, 3);
        let bucketed: usize = summary.statuses.iter().map(|s| s.count).sum();
        assert_eq!(bucketed, 2);
    }

    #[test]
    fn aging_is_zero_without_due_date_and_signed_with_one() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        assert_eq!(aging_days(&task("b", "In Progress", None), today), 0);
        // Overdue by ten days.
        assert_eq!(
            aging_days(&task("b", "In Progress", Some((2026, 8, 19))), today),
            10
        );
        // Due in five days.
        assert_eq!(
            aging_days(&task("b", "In Progress", Some((2026, 9, 3))), today),
            -5
        );
    }

    #[test]
    fn performance_counts_full_table_by_completed_literal() {
        let tasks = vec![
            task("bob@task.com", "Completed", None),
            task("bob@task.com", "Completed", None),
            task("alice@task.com", "Completed", None),
            task("alice@task.com", "In Progress", None),
        ];
        let rows = performance(&tasks, Variant::A);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].assignee, "bob@task.com");
        assert_eq!(rows[0].completed, 2);

        // On variant B's vocabulary the same rows count nothing.
        assert!(performance(&tasks, Variant::B).is_empty());
    }

    #[test]
    fn bar_chart_groups_any_status_string() {
        let tasks = vec![
            task("bob@task.com", "Weird", None),
            task("bob@task.com", "Weird", None),
        ];
        let rows = assignee_status_counts(&tasks);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, "Weird");
        assert_eq!(rows[0].count, 2);
    }
}
