//! Per-deployment variant rules.
//!
//! Three near-duplicate deployments of the tracker exist. They differ only in
//! login method, one extra task column, the status vocabulary, and a few
//! permission quirks. The differences are intentional historical behavior and
//! are kept distinct here instead of being merged into one "corrected" set.

use serde::{Deserialize, Serialize};

/// Sentinel assignee meaning "visible to every non-admin user"
pub const EVERYONE: &str = "everyone@task.com";

/// Status every new task starts in, in all variants
pub const INITIAL_STATUS: &str = "In Progress";

/// Tasks older than this many days are silently dropped by variant C
pub const RETENTION_DAYS: i64 = 90;

const STATUSES_AC: [&str; 4] = [
    "In Progress",
    "Completed",
    "Partially Completed",
    "Need Assistance",
];

// Variant B renamed the completed literal; summary buckets match exactly, so
// "Completed" rows from an A/C file count toward no bucket on a B deployment.
const STATUSES_B: [&str; 4] = [
    "In Progress",
    "Task Completed",
    "Partially Completed",
    "Need Assistance",
];

/// How a deployment authenticates logins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMethod {
    /// Any email containing the company domain suffix; no password
    DomainSuffix,
    /// Email looked up in the user table, one shared static password
    SharedPassword,
    /// Email looked up in the user table, per-user password column
    PerUserPassword,
}

/// Deployment variant selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    A,
    B,
    C,
}

impl Variant {
    pub fn login_method(self) -> LoginMethod {
        match self {
            Variant::A => LoginMethod::DomainSuffix,
            Variant::B => LoginMethod::SharedPassword,
            Variant::C => LoginMethod::PerUserPassword,
        }
    }

    /// Recognized status literals, exact-match vocabulary
    pub fn statuses(self) -> &'static [&'static str] {
        match self {
            Variant::A | Variant::C => &STATUSES_AC,
            Variant::B => &STATUSES_B,
        }
    }

    /// The literal counted as "completed" by the performance ranking
    pub fn completed_status(self) -> &'static str {
        match self {
            Variant::A | Variant::C => "Completed",
            Variant::B => "Task Completed",
        }
    }

    pub fn is_recognized_status(self, status: &str) -> bool {
        self.statuses().iter().any(|entry| *entry == status)
    }

    /// Whether an admin may update task status. Variant C restricts status
    /// edits to non-admins; the other two let admins edit anything.
    pub fn admin_may_update_status(self) -> bool {
        !matches!(self, Variant::C)
    }

    /// Whether a non-admin also sees tasks they created (variant B quirk)
    pub fn creator_sees_own_tasks(self) -> bool {
        matches!(self, Variant::B)
    }

    /// Whether the admin bulk-edit grid is available
    pub fn supports_bulk_edit(self) -> bool {
        matches!(self, Variant::B)
    }

    /// Whether tasks past [`RETENTION_DAYS`] are dropped on load
    pub fn applies_retention(self) -> bool {
        matches!(self, Variant::C)
    }

    /// Whether users can change their own password
    pub fn supports_password_change(self) -> bool {
        matches!(self, Variant::C)
    }

    /// Task column this variant adds on top of the base schema
    pub fn extra_column(self) -> Option<&'static str> {
        match self {
            Variant::A => Some("Sort_Centre"),
            Variant::B => Some("Email_Subject"),
            Variant::C => None,
        }
    }

    /// Full on-disk column schema for a freshly created task file
    pub fn task_columns(self) -> Vec<String> {
        let mut columns = vec![
            "Task_ID".to_string(),
            "Task_Given_Date".to_string(),
            "Task_Name".to_string(),
        ];
        if let Some(extra) = self.extra_column() {
            columns.push(extra.to_string());
        }
        columns.extend(
            [
                "Task_Remarks",
                "Priority",
                "Due_Date",
                "Assigned_To",
                "Status",
                "Completion_Remarks",
                "Created_By",
                "Reminder",
            ]
            .iter()
            .map(|name| name.to_string()),
        );
        columns
    }
}
