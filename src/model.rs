//! Domain records for taskdesk.
//!
//! The table file is the source of truth and mutations edit its cells
//! directly, the way the original tool edited spreadsheet rows in place.
//! [`Task`] is a lenient typed projection of one row, used by the view
//! filter, the reports, and the JSON API. Projection never fails: junk cells
//! (possible via the bulk-edit grid, which skips per-field validation)
//! project as empty/zero rather than aborting a render.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::table::Table;

/// Task file column names
pub mod columns {
    pub const TASK_ID: &str = "Task_ID";
    pub const GIVEN_DATE: &str = "Task_Given_Date";
    pub const NAME: &str = "Task_Name";
    pub const SORT_CENTRE: &str = "Sort_Centre";
    pub const EMAIL_SUBJECT: &str = "Email_Subject";
    pub const REMARKS: &str = "Task_Remarks";
    pub const PRIORITY: &str = "Priority";
    pub const DUE_DATE: &str = "Due_Date";
    pub const ASSIGNED_TO: &str = "Assigned_To";
    pub const STATUS: &str = "Status";
    pub const COMPLETION_REMARKS: &str = "Completion_Remarks";
    pub const CREATED_BY: &str = "Created_By";
    pub const REMINDER: &str = "Reminder";
}

/// User file column names
pub mod user_columns {
    pub const EMAIL: &str = "Email";
    pub const ROLE: &str = "Role";
    pub const PASSWORD: &str = "Password";
}

/// Date format used in both backing files
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date cell; blank or junk cells coerce to `None`
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Parse a role cell; anything that is not "admin" is a plain user
    pub fn from_cell(cell: &str) -> Self {
        if cell.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::User
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// Task priority, validated on the creation form only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            v if v.eq_ignore_ascii_case("low") => Some(Priority::Low),
            v if v.eq_ignore_ascii_case("medium") => Some(Priority::Medium),
            v if v.eq_ignore_ascii_case("high") => Some(Priority::High),
            _ => None,
        }
    }
}

/// One row of the user file
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub password: Option<String>,
}

/// Per-session identity; the only server-side state besides the files
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub email: String,
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Fields a user fills in on the creation form. Everything else (id, given
/// date, status, reminder, creator) is assigned by the store at append time.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskDraft {
    pub name: String,
    #[serde(default)]
    pub sort_centre: String,
    #[serde(default)]
    pub email_subject: String,
    #[serde(default)]
    pub remarks: String,
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub assigned_to: String,
}

/// Typed projection of one task row
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub id: i64,
    pub given_date: Option<NaiveDate>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_centre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_subject: Option<String>,
    pub remarks: String,
    pub priority: String,
    pub due_date: Option<NaiveDate>,
    pub assigned_to: String,
    pub status: String,
    pub completion_remarks: String,
    pub created_by: String,
    pub reminder: bool,
}

impl Task {
    /// Project one table row. `row` must be a valid index.
    pub fn from_row(table: &Table, row: usize) -> Self {
        let cell = |name: &str| table.get(row, name).unwrap_or("").to_string();
        let optional_cell = |name: &str| {
            table
                .column_index(name)
                .map(|_| cell(name))
        };

        Task {
            id: cell(columns::TASK_ID).trim().parse().unwrap_or(0),
            given_date: parse_date(&cell(columns::GIVEN_DATE)),
            name: cell(columns::NAME),
            sort_centre: optional_cell(columns::SORT_CENTRE),
            email_subject: optional_cell(columns::EMAIL_SUBJECT),
            remarks: cell(columns::REMARKS),
            priority: cell(columns::PRIORITY),
            due_date: parse_date(&cell(columns::DUE_DATE)),
            assigned_to: cell(columns::ASSIGNED_TO),
            status: cell(columns::STATUS),
            completion_remarks: cell(columns::COMPLETION_REMARKS),
            created_by: cell(columns::CREATED_BY),
            reminder: cell(columns::REMINDER).trim().eq_ignore_ascii_case("true"),
        }
    }

    /// Project every row of a task table, in file order
    pub fn all_from(table: &Table) -> Vec<Task> {
        (0..table.row_count())
            .map(|row| Task::from_row(table, row))
            .collect()
    }
}
