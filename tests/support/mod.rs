use std::path::Path;

use tempfile::TempDir;

use taskdesk::model::{Priority, Role, Session, TaskDraft};
use taskdesk::store::{TaskStore, UserStore};
use taskdesk::table::Table;
use taskdesk::variant::Variant;

/// Temp data directory with helpers for seeding the two table files
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn task_store(&self, variant: Variant) -> TaskStore {
        TaskStore::new(self.path().join("tasks.json"), variant)
    }

    pub fn user_store(&self, variant: Variant) -> UserStore {
        UserStore::new(self.path().join("users.json"), variant, "task123")
    }

    /// Write a users file with Email/Role columns
    pub fn seed_users(&self, rows: &[(&str, &str)]) {
        let mut table = Table::new(vec!["Email".to_string(), "Role".to_string()]);
        for (email, role) in rows {
            table.push_row(vec![email.to_string(), role.to_string()]);
        }
        self.write_table("users.json", &table);
    }

    pub fn write_table(&self, file: &str, table: &Table) {
        let json = serde_json::to_string_pretty(table).expect("serialize table");
        std::fs::write(self.path().join(file), json).expect("write table");
    }

    pub fn read_table(&self, file: &str) -> Table {
        let content = std::fs::read_to_string(self.path().join(file)).expect("read table");
        serde_json::from_str(&content).expect("parse table")
    }
}

pub fn session(email: &str, role: Role) -> Session {
    Session {
        email: email.to_string(),
        role,
    }
}

pub fn draft(name: &str, assignee: &str) -> TaskDraft {
    TaskDraft {
        name: name.to_string(),
        sort_centre: String::new(),
        email_subject: String::new(),
        remarks: String::new(),
        priority: Priority::Medium,
        due_date: None,
        assigned_to: assignee.to_string(),
    }
}
