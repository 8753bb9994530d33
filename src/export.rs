//! On-demand CSV snapshot of the caller's visible tasks.
//!
//! The export carries every column of the backing file, unknown ones
//! included, for exactly the rows the caller can see. Nothing is persisted;
//! the bytes go straight out as a download.

use crate::model::{Session, Task};
use crate::table::Table;
use crate::variant::Variant;
use crate::view::can_see;

/// File name offered for the download
pub const EXPORT_FILE_NAME: &str = "tasks_export.csv";

/// Render the visible subset of `table` as CSV
pub fn visible_csv(table: &Table, session: &Session, variant: Variant) -> String {
    let mut snapshot = Table::new(table.columns.clone());
    for (row, task) in Task::all_from(table).into_iter().enumerate() {
        if can_see(&task, session, variant) {
            snapshot.push_row(table.rows[row].clone());
        }
    }
    snapshot.to_csv()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{columns, Role};
    use crate::variant::EVERYONE;

    fn table_with_rows() -> Table {
        let mut table = Table::new(Variant::A.task_columns());
        // A column from some other deployment's schema tags along.
        table.columns.push("Legacy_Flag".to_string());
        for (id, assignee) in [("1", "bob@task.com"), ("2", "alice@task.com"), ("3", EVERYONE)] {
            let mut row = vec![String::new(); table.columns.len()];
            row[0] = id.to_string();
            let assigned_index = table.column_index(columns::ASSIGNED_TO).unwrap();
            row[assigned_index] = assignee.to_string();
            *row.last_mut().unwrap() = "legacy".to_string();
            table.rows.push(row);
        }
        table
    }

    #[test]
    fn export_filters_rows_but_keeps_all_columns() {
        let bob = Session {
            email: "bob@task.com".to_string(),
            role: Role::User,
        };
        let csv = visible_csv(&table_with_rows(), &bob, Variant::A);
        let lines: Vec<&str> = csv.lines().collect();
        // Header + bob's task + the everyone task.
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("Legacy_Flag"));
        assert!(lines[1].starts_with('1'));
        assert!(lines[2].starts_with('3'));
        assert!(lines[1].ends_with("legacy"));
    }
}
