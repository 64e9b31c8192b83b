use georemind_core::db::{open_db, open_db_in_memory};
use georemind_core::{
    Reminder, ReminderStore, ReminderValidationError, SqliteReminderStore, StoreError,
};
use rusqlite::Connection;

fn store() -> SqliteReminderStore {
    SqliteReminderStore::new(open_db_in_memory().unwrap())
}

fn big_ben() -> Reminder {
    Reminder::with_id("x", "Tour", "Take Photos", "Big Ben", 51.5, 0.12).unwrap()
}

fn eiffel_tower() -> Reminder {
    Reminder::with_id("y", "Tour", "Take Photos", "Eiffel Tower", 48.86, 2.29).unwrap()
}

#[test]
fn save_and_get_by_id_roundtrip() {
    let store = store();
    let reminder = Reminder::new(
        "Tours",
        "Take photos along the bridge",
        "London Bridge",
        51.5,
        -0.08,
    );
    store.save_reminder(&reminder).unwrap();

    let loaded = store.get_reminder_by_id(&reminder.id).unwrap().unwrap();
    assert_eq!(loaded, reminder);
}

#[test]
fn get_reminders_returns_every_saved_reminder() {
    let store = store();
    store.save_reminder(&big_ben()).unwrap();
    store.save_reminder(&eiffel_tower()).unwrap();

    let all = store.get_reminders().unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.contains(&big_ben()));
    assert!(all.contains(&eiffel_tower()));
}

#[test]
fn save_with_existing_id_replaces_in_place() {
    let store = store();
    store.save_reminder(&big_ben()).unwrap();
    store.save_reminder(&eiffel_tower()).unwrap();

    let mut edited = big_ben();
    edited.title = "Evening tour".to_string();
    store.save_reminder(&edited).unwrap();

    let all = store.get_reminders().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0], edited);
    assert_eq!(all[1], eiffel_tower());
}

#[test]
fn missing_id_is_absent_not_error() {
    let store = store();
    assert_eq!(store.get_reminder_by_id("never-saved").unwrap(), None);
}

#[test]
fn delete_missing_id_is_noop() {
    let store = store();
    store.save_reminder(&big_ben()).unwrap();

    store.delete_reminder_by_id("never-saved").unwrap();

    assert_eq!(store.get_reminders().unwrap(), vec![big_ben()]);
}

#[test]
fn delete_by_id_removes_only_that_reminder() {
    let store = store();
    store.save_reminder(&big_ben()).unwrap();
    store.save_reminder(&eiffel_tower()).unwrap();

    store.delete_reminder_by_id("x").unwrap();

    assert_eq!(store.get_reminder_by_id("x").unwrap(), None);
    assert_eq!(store.get_reminders().unwrap(), vec![eiffel_tower()]);
}

#[test]
fn delete_all_clears_store() {
    let store = store();
    store.save_reminder(&big_ben()).unwrap();
    store.save_reminder(&eiffel_tower()).unwrap();

    store.delete_all_reminders().unwrap();

    assert!(store.get_reminders().unwrap().is_empty());
}

#[test]
fn save_rejects_out_of_range_coordinates() {
    let store = store();
    let mut reminder = big_ben();
    reminder.longitude = 181.0;

    let err = store.save_reminder(&reminder).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ReminderValidationError::LongitudeOutOfRange(_))
    ));
    assert!(store.get_reminders().unwrap().is_empty());
}

#[test]
fn reminders_survive_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reminders.db");

    SqliteReminderStore::new(open_db(&path).unwrap())
        .save_reminder(&big_ben())
        .unwrap();

    let reopened = SqliteReminderStore::new(open_db(&path).unwrap());
    assert_eq!(reopened.get_reminder_by_id("x").unwrap(), Some(big_ben()));
}

#[test]
fn invalid_persisted_row_is_rejected_on_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.db");
    drop(open_db(&path).unwrap());

    let raw = Connection::open(&path).unwrap();
    raw.execute(
        "INSERT INTO reminders (id, title, description, location, latitude, longitude)
         VALUES ('bad', 'Tour', '', 'Nowhere', 123.0, 0.0);",
        [],
    )
    .unwrap();
    drop(raw);

    let store = SqliteReminderStore::new(open_db(&path).unwrap());
    let err = store.get_reminder_by_id("bad").unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(ref message) if message.contains("bad")));
    assert!(store.get_reminders().is_err());
}
