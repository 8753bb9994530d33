//! Task mutation operations.
//!
//! Every operation is a full read-modify-rewrite of the task table, guarded
//! by the single [`crate::auth::authorize`] gate. Between the load and the
//! save nothing re-checks the file, so two concurrent sessions that both
//! load and then save will keep only the second session's changes. That
//! lost-update behavior is intentional fidelity, covered by a test, and not
//! worked around here.

use tracing::info;

use crate::auth::{authorize, Action};
use crate::error::{Error, Result};
use crate::model::{columns, Session, TaskDraft};
use crate::store::TaskStore;
use crate::table::Table;
use crate::variant::EVERYONE;

/// Create a task from the submission form. Any logged-in user may create;
/// status, reminder, given date, and creator are assigned here.
pub fn create_task(store: &TaskStore, session: &Session, draft: &TaskDraft) -> Result<i64> {
    if draft.name.trim().is_empty() {
        return Err(Error::InvalidField("task name is required".to_string()));
    }
    if draft.assigned_to.trim().is_empty() {
        return Err(Error::InvalidField(format!(
            "assign to an email or {EVERYONE}"
        )));
    }
    let id = store.create(draft, session)?;
    info!(id, creator = %session.email, "task created");
    Ok(id)
}

/// Update a task's status and completion remarks
pub fn update_status(
    store: &TaskStore,
    session: &Session,
    id: i64,
    new_status: &str,
    completion_remarks: &str,
) -> Result<()> {
    if !store.variant().is_recognized_status(new_status) {
        return Err(Error::UnknownStatus(new_status.to_string()));
    }

    let mut table = store.load()?;
    let row = TaskStore::find_row(&table, id).ok_or(Error::TaskNotFound(id))?;

    let assignee = table.get(row, columns::ASSIGNED_TO).unwrap_or("").to_string();
    authorize(
        store.variant(),
        session,
        &Action::UpdateStatus {
            assignee: &assignee,
        },
    )?;

    table.set(row, columns::STATUS, new_status);
    table.set(row, columns::COMPLETION_REMARKS, completion_remarks);
    store.save_all(&table)?;
    info!(id, status = new_status, by = %session.email, "status updated");
    Ok(())
}

/// Reassign a task to another email. Admin only; the new assignee is free
/// text and is not checked against the user table.
pub fn reassign(store: &TaskStore, session: &Session, id: i64, new_assignee: &str) -> Result<()> {
    authorize(store.variant(), session, &Action::Reassign)?;

    let mut table = store.load()?;
    let row = TaskStore::find_row(&table, id).ok_or(Error::TaskNotFound(id))?;

    table.set(row, columns::ASSIGNED_TO, new_assignee.trim());
    store.save_all(&table)?;
    info!(id, assignee = new_assignee, "task reassigned");
    Ok(())
}

/// Flag a task for a reminder. Admin only; nothing is delivered anywhere,
/// the flag is just a visible marker.
pub fn set_reminder(store: &TaskStore, session: &Session, id: i64) -> Result<()> {
    authorize(store.variant(), session, &Action::SetReminder)?;

    let mut table = store.load()?;
    let row = TaskStore::find_row(&table, id).ok_or(Error::TaskNotFound(id))?;

    table.set(row, columns::REMINDER, "True");
    store.save_all(&table)?;
    info!(id, "reminder set");
    Ok(())
}

/// Commit a whole edited grid as one overwrite (variant B admins).
///
/// This bypasses per-field validation on purpose: any cell, identifiers
/// included, lands on disk exactly as submitted, and omitted rows are gone.
pub fn bulk_save(store: &TaskStore, session: &Session, grid: &Table) -> Result<()> {
    authorize(store.variant(), session, &Action::BulkEdit)?;

    store.save_all(grid)?;
    info!(rows = grid.row_count(), by = %session.email, "bulk grid saved");
    Ok(())
}
