use std::fs;

use tempfile::tempdir;
use tick_core::controller::{Action, AppController};
use tick_core::i18n::Localizer;
use tick_core::store::TaskStore;

#[test]
fn every_mutation_is_flushed_and_reloads_identically() {
    let temp = tempdir().expect("tempdir");
    let data = temp.path().join("tasks.json");

    let mut controller = AppController::new(data.clone(), Localizer::default());
    controller.apply(Action::Add {
        name: "Buy milk".to_string(),
    });
    controller.apply(Action::Add {
        name: "Walk dog".to_string(),
    });

    let first = controller.store().tasks()[0].id;
    controller.apply(Action::Toggle {
        id: first,
        completed: true,
    });

    // the toggle hit the disk immediately; a fresh load sees it
    let reloaded = TaskStore::load(&data);
    assert_eq!(reloaded.serialize(), controller.store().serialize());

    controller.apply(Action::ClearCompleted);
    let rows = controller.store().serialize();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].task_name, "Walk dog");
    assert!(!rows[0].completed);

    let reloaded = TaskStore::load(&data);
    assert_eq!(reloaded.serialize(), controller.store().serialize());
}

#[test]
fn persist_then_load_round_trips_order_and_fields() {
    let temp = tempdir().expect("tempdir");
    let data = temp.path().join("tasks.json");

    let mut store = TaskStore::new();
    store.add("Buy milk").expect("add");
    let second = store.add("Walk dog").expect("add");
    store.add("Water plants").expect("add");
    store.set_completed(second, true);

    store.persist(&data).expect("persist");
    let reloaded = TaskStore::load(&data);
    assert_eq!(reloaded.serialize(), store.serialize());

    // loading assigns fresh ids but keeps everything the wire format carries
    reloaded.persist(&data).expect("persist again");
    assert_eq!(TaskStore::load(&data).serialize(), store.serialize());
}

#[test]
fn missing_and_malformed_files_load_as_empty_stores() {
    let temp = tempdir().expect("tempdir");

    let missing = temp.path().join("absent.json");
    assert!(TaskStore::load(&missing).is_empty());

    let garbage = temp.path().join("garbage.json");
    fs::write(&garbage, "not json").expect("write garbage");
    assert!(TaskStore::load(&garbage).is_empty());
}

#[test]
fn persisted_file_is_pretty_printed_with_verbatim_utf8() {
    let temp = tempdir().expect("tempdir");
    let data = temp.path().join("tasks.json");

    let mut controller = AppController::new(data.clone(), Localizer::new("ja"));
    controller.apply(Action::Add {
        name: "牛乳を買う".to_string(),
    });

    let raw = fs::read_to_string(&data).expect("read data file");
    assert!(raw.contains("牛乳を買う"), "non-ASCII must not be escaped");
    assert!(raw.contains("\"task_name\""));
    assert!(raw.lines().count() > 1, "array must be pretty-printed");

    let reloaded = TaskStore::load(&data);
    assert_eq!(reloaded.serialize(), controller.store().serialize());
}

#[test]
fn load_action_replaces_the_in_memory_list() {
    let temp = tempdir().expect("tempdir");
    let data = temp.path().join("tasks.json");

    let mut writer = AppController::new(data.clone(), Localizer::default());
    writer.apply(Action::Add {
        name: "Buy milk".to_string(),
    });

    let mut reader = AppController::new(data.clone(), Localizer::default());
    assert!(reader.store().is_empty());
    reader.apply(Action::Load { path: data });
    assert_eq!(reader.store().len(), 1);
    assert_eq!(reader.store().tasks()[0].name, "Buy milk");
}
