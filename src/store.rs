//! Backing stores for the task and user tables.
//!
//! Both stores follow the same pattern the original deployments used: read
//! the whole file, change cells in memory, rewrite the whole file. There is
//! no row-level update and no optimistic-lock check; concurrent sessions
//! overwrite each other, last writer wins. The flock in [`crate::lock`] only
//! keeps individual reads and writes torn-free.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::error::{Error, Result};
use crate::lock::{read_locked_str, write_atomic_locked, DEFAULT_LOCK_TIMEOUT_MS};
use crate::model::{columns, user_columns, Role, Session, TaskDraft, User, DATE_FORMAT};
use crate::table::Table;
use crate::variant::{Variant, INITIAL_STATUS, RETENTION_DAYS};

/// Backfill value for a task column that is missing from an older file
fn column_default(name: &str) -> &'static str {
    if name == columns::REMINDER {
        "False"
    } else {
        ""
    }
}

/// Store for the task table file
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
    variant: Variant,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>, variant: Variant) -> Self {
        Self {
            path: path.into(),
            variant,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Create the task file with the variant's full schema if absent
    pub fn init(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        let table = Table::new(self.variant.task_columns());
        self.save_all(&table)
    }

    /// Read the whole table.
    ///
    /// Missing variant columns are backfilled with defaults. Columns the
    /// variant does not know keep their position and contents. On variant C
    /// this also silently drops tasks whose given date is more than
    /// [`RETENTION_DAYS`] days old; the drop reaches disk with the next
    /// save and there is no archive.
    pub fn load(&self) -> Result<Table> {
        self.init()?;
        let content = read_locked_str(&self.path, DEFAULT_LOCK_TIMEOUT_MS)?;
        let mut table: Table = serde_json::from_str(&content)?;

        for name in self.variant.task_columns() {
            if table.column_index(&name).is_none() {
                table.ensure_columns(std::slice::from_ref(&name), column_default(&name));
            }
        }
        table.pad_rows();

        if self.variant.applies_retention() {
            apply_retention(&mut table, Local::now().date_naive());
        }

        Ok(table)
    }

    /// Rewrite the entire table file. No merge with concurrent edits: a
    /// save unconditionally replaces whatever the file held.
    pub fn save_all(&self, table: &Table) -> Result<()> {
        let json = serde_json::to_string_pretty(table)?;
        write_atomic_locked(&self.path, json.as_bytes(), DEFAULT_LOCK_TIMEOUT_MS)
    }

    /// Append a new task and persist.
    ///
    /// The identifier is `existing row count + 1`, exactly as the original
    /// assigned it. It collides after rows are deleted through the bulk
    /// grid and under concurrent creators; preserved, not repaired.
    pub fn create(&self, draft: &TaskDraft, session: &Session) -> Result<i64> {
        let mut table = self.load()?;
        let id = table.row_count() as i64 + 1;

        let today = Local::now().date_naive().format(DATE_FORMAT).to_string();
        let due = draft
            .due_date
            .map(|date| date.format(DATE_FORMAT).to_string())
            .unwrap_or_default();

        let row: Vec<String> = table
            .columns
            .iter()
            .map(|column| match column.as_str() {
                c if c == columns::TASK_ID => id.to_string(),
                c if c == columns::GIVEN_DATE => today.clone(),
                c if c == columns::NAME => draft.name.clone(),
                c if c == columns::SORT_CENTRE => draft.sort_centre.clone(),
                c if c == columns::EMAIL_SUBJECT => draft.email_subject.clone(),
                c if c == columns::REMARKS => draft.remarks.clone(),
                c if c == columns::PRIORITY => draft.priority.as_str().to_string(),
                c if c == columns::DUE_DATE => due.clone(),
                c if c == columns::ASSIGNED_TO => draft.assigned_to.clone(),
                c if c == columns::STATUS => INITIAL_STATUS.to_string(),
                c if c == columns::CREATED_BY => session.email.clone(),
                c if c == columns::REMINDER => "False".to_string(),
                _ => String::new(),
            })
            .collect();
        table.push_row(row);

        self.save_all(&table)?;
        Ok(id)
    }

    /// Row index of a task by its `Task_ID` cell
    pub fn find_row(table: &Table, id: i64) -> Option<usize> {
        let wanted = id.to_string();
        (0..table.row_count())
            .find(|row| table.get(*row, columns::TASK_ID).unwrap_or("").trim() == wanted)
    }
}

fn apply_retention(table: &mut Table, today: NaiveDate) {
    let Some(given_index) = table.column_index(columns::GIVEN_DATE) else {
        return;
    };
    table.rows.retain(|row| {
        let cell = row.get(given_index).map(String::as_str).unwrap_or("");
        match NaiveDate::parse_from_str(cell.trim(), DATE_FORMAT) {
            Ok(given) => (today - given).num_days() <= RETENTION_DAYS,
            // Rows with no parseable given date are kept
            Err(_) => true,
        }
    });
}

/// Store for the user table file
#[derive(Debug, Clone)]
pub struct UserStore {
    path: PathBuf,
    variant: Variant,
    default_password: String,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>, variant: Variant, default_password: &str) -> Self {
        Self {
            path: path.into(),
            variant,
            default_password: default_password.to_string(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Verify the user file exists. It is provisioned externally; its
    /// absence is a startup failure for variants that look users up.
    pub fn check_present(&self) -> Result<()> {
        if self.variant.login_method() == crate::variant::LoginMethod::DomainSuffix {
            return Ok(());
        }
        if self.path.exists() {
            Ok(())
        } else {
            Err(Error::UserFileMissing(self.path.clone()))
        }
    }

    fn load_table(&self) -> Result<Table> {
        if !self.path.exists() {
            return Err(Error::UserFileMissing(self.path.clone()));
        }
        let content = read_locked_str(&self.path, DEFAULT_LOCK_TIMEOUT_MS)?;
        let mut table: Table = serde_json::from_str(&content)?;

        // Variant C: the password column appears lazily, pre-filled with the
        // shared default, and is written back so later loads see it.
        if self.variant.supports_password_change()
            && table.column_index(user_columns::PASSWORD).is_none()
        {
            table.ensure_columns(
                &[user_columns::PASSWORD.to_string()],
                &self.default_password,
            );
            let json = serde_json::to_string_pretty(&table)?;
            write_atomic_locked(&self.path, json.as_bytes(), DEFAULT_LOCK_TIMEOUT_MS)?;
        } else {
            table.pad_rows();
        }

        Ok(table)
    }

    /// All provisioned users, in file order
    pub fn load(&self) -> Result<Vec<User>> {
        let table = self.load_table()?;
        let users = (0..table.row_count())
            .map(|row| User {
                email: table.get(row, user_columns::EMAIL).unwrap_or("").trim().to_string(),
                role: Role::from_cell(table.get(row, user_columns::ROLE).unwrap_or("")),
                password: table
                    .get(row, user_columns::PASSWORD)
                    .map(|cell| cell.to_string()),
            })
            .collect();
        Ok(users)
    }

    /// Look a user up by email, case-insensitively
    pub fn find(&self, email: &str) -> Result<Option<User>> {
        let users = self.load()?;
        Ok(users
            .into_iter()
            .find(|user| user.email.eq_ignore_ascii_case(email.trim())))
    }

    /// Overwrite one user's password by email (variant C self-service)
    pub fn set_password(&self, email: &str, new_password: &str) -> Result<()> {
        let mut table = self.load_table()?;
        let row = (0..table.row_count()).find(|row| {
            table
                .get(*row, user_columns::EMAIL)
                .unwrap_or("")
                .trim()
                .eq_ignore_ascii_case(email.trim())
        });
        let Some(row) = row else {
            return Err(Error::UnauthorizedEmail(email.to_string()));
        };
        if !table.set(row, user_columns::PASSWORD, new_password) {
            return Err(Error::ColumnMissing(user_columns::PASSWORD.to_string()));
        }
        let json = serde_json::to_string_pretty(&table)?;
        write_atomic_locked(&self.path, json.as_bytes(), DEFAULT_LOCK_TIMEOUT_MS)
    }
}
