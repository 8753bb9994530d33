mod support;

use taskdesk::model::{columns, Role};
use taskdesk::ops;
use taskdesk::table::Table;
use taskdesk::variant::Variant;

use support::{draft, session, TestEnv};

#[test]
fn first_run_creates_the_full_schema() {
    let env = TestEnv::new();
    let store = env.task_store(Variant::A);

    store.init().expect("init");

    let on_disk = env.read_table("tasks.json");
    assert_eq!(on_disk.columns, Variant::A.task_columns());
    assert_eq!(on_disk.row_count(), 0);
}

#[test]
fn new_task_gets_row_count_plus_one_and_defaults() {
    let env = TestEnv::new();
    let store = env.task_store(Variant::A);
    let bob = session("bob@task.com", Role::User);

    let first = ops::create_task(&store, &bob, &draft("One", "bob@task.com")).expect("create");
    let second = ops::create_task(&store, &bob, &draft("Two", "bob@task.com")).expect("create");
    assert_eq!(first, 1);
    assert_eq!(second, 2);

    let table = store.load().expect("load");
    assert_eq!(table.get(1, columns::STATUS), Some("In Progress"));
    assert_eq!(table.get(1, columns::REMINDER), Some("False"));
    assert_eq!(table.get(1, columns::CREATED_BY), Some("bob@task.com"));
}

#[test]
fn save_of_unmodified_load_is_lossless() {
    let env = TestEnv::new();
    let store = env.task_store(Variant::A);
    let bob = session("bob@task.com", Role::User);
    ops::create_task(&store, &bob, &draft("One", "bob@task.com")).expect("create");

    // A column and a value this variant knows nothing about.
    let mut table = env.read_table("tasks.json");
    table.columns.push("Warehouse_Zone".to_string());
    table.rows[0].push("Z-14".to_string());
    env.write_table("tasks.json", &table);

    let loaded = store.load().expect("load");
    store.save_all(&loaded).expect("save");

    let reloaded = env.read_table("tasks.json");
    assert_eq!(reloaded.columns, loaded.columns);
    assert_eq!(reloaded.rows, loaded.rows);
    assert_eq!(reloaded.get(0, "Warehouse_Zone"), Some("Z-14"));
}

#[test]
fn older_file_gains_missing_columns_with_defaults() {
    let env = TestEnv::new();
    // A file written before the Reminder column existed.
    let mut table = Table::new(
        Variant::A
            .task_columns()
            .into_iter()
            .filter(|c| c != columns::REMINDER)
            .collect(),
    );
    let mut row = vec![String::new(); table.columns.len()];
    row[0] = "1".to_string();
    table.rows.push(row);
    env.write_table("tasks.json", &table);

    let store = env.task_store(Variant::A);
    let loaded = store.load().expect("load");

    assert_eq!(loaded.get(0, columns::REMINDER), Some("False"));
    // The legacy column order is untouched; the new column sits at the end.
    assert_eq!(loaded.columns.last().map(String::as_str), Some("Reminder"));
}

#[test]
fn variant_c_retention_reaches_disk_on_next_save() {
    let env = TestEnv::new();
    let store = env.task_store(Variant::C);

    let mut table = Table::new(Variant::C.task_columns());
    for (id, given) in [("1", "2020-01-01"), ("2", "2999-01-01")] {
        let mut row = vec![String::new(); table.columns.len()];
        row[0] = id.to_string();
        row[1] = given.to_string();
        table.rows.push(row);
    }
    env.write_table("tasks.json", &table);

    let loaded = store.load().expect("load");
    assert_eq!(loaded.row_count(), 1);
    assert_eq!(loaded.get(0, taskdesk::model::columns::TASK_ID), Some("2"));

    // The stale row is still on disk until something saves...
    assert_eq!(env.read_table("tasks.json").row_count(), 2);

    // ...after which it is gone for good. No archive exists.
    store.save_all(&loaded).expect("save");
    assert_eq!(env.read_table("tasks.json").row_count(), 1);
}

#[test]
fn variant_a_never_drops_old_tasks() {
    let env = TestEnv::new();
    let store = env.task_store(Variant::A);

    let mut table = Table::new(Variant::A.task_columns());
    let mut row = vec![String::new(); table.columns.len()];
    row[0] = "1".to_string();
    row[1] = "2020-01-01".to_string();
    table.rows.push(row);
    env.write_table("tasks.json", &table);

    assert_eq!(store.load().expect("load").row_count(), 1);
}
