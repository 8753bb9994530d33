//! Role-based view filtering.
//!
//! Recomputed from the full table on every request; there is no cached view
//! and no pagination, matching the original render-everything model.

use crate::model::{Session, Task};
use crate::variant::{Variant, EVERYONE};

/// The subset of tasks a session may see.
///
/// Admins see everything. A non-admin sees tasks assigned to them or to the
/// `everyone@task.com` sentinel; variant B additionally shows tasks the
/// caller created.
pub fn visible_tasks(tasks: &[Task], session: &Session, variant: Variant) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| can_see(task, session, variant))
        .cloned()
        .collect()
}

/// Whether one task is in the session's view
pub fn can_see(task: &Task, session: &Session, variant: Variant) -> bool {
    session.is_admin()
        || task.assigned_to.eq_ignore_ascii_case(&session.email)
        || task.assigned_to == EVERYONE
        || (variant.creator_sees_own_tasks()
            && task.created_by.eq_ignore_ascii_case(&session.email))
}
