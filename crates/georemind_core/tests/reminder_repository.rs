use georemind_core::db::open_db_in_memory;
use georemind_core::{
    LocalReminderRepository, Outcome, Reminder, ReminderDataSource, ReminderStore, RepoError,
    SqliteReminderStore, StoreError, StoreResult, REMINDER_NOT_FOUND_MESSAGE,
};

fn repository() -> LocalReminderRepository<SqliteReminderStore> {
    LocalReminderRepository::new(SqliteReminderStore::new(open_db_in_memory().unwrap()))
}

/// Store whose every call fails, standing in for an I/O fault.
struct BrokenStore;

impl ReminderStore for BrokenStore {
    fn save_reminder(&self, _reminder: &Reminder) -> StoreResult<()> {
        Err(StoreError::Poisoned)
    }

    fn get_reminders(&self) -> StoreResult<Vec<Reminder>> {
        Err(StoreError::InvalidData("disk unreadable".to_string()))
    }

    fn get_reminder_by_id(&self, _id: &str) -> StoreResult<Option<Reminder>> {
        Err(StoreError::Poisoned)
    }

    fn delete_reminder_by_id(&self, _id: &str) -> StoreResult<()> {
        Err(StoreError::Poisoned)
    }

    fn delete_all_reminders(&self) -> StoreResult<()> {
        Err(StoreError::Poisoned)
    }
}

#[tokio::test]
async fn get_reminders_returns_both_saved_reminders() {
    let repo = repository();
    let big_ben = Reminder::with_id("x", "Tour", "Take Photos", "Big Ben", 51.5, 0.12).unwrap();
    let eiffel =
        Reminder::with_id("y", "Tour", "Take Photos", "Eiffel Tower", 48.86, 2.29).unwrap();
    repo.save_reminder(big_ben.clone()).await.unwrap();
    repo.save_reminder(eiffel.clone()).await.unwrap();

    let loaded = repo.get_reminders().await.unwrap();
    assert_eq!(loaded.len(), 2);
    assert!(loaded.contains(&big_ben));
    assert!(loaded.contains(&eiffel));
}

#[tokio::test]
async fn saved_reminder_is_fetched_field_wise_equal() {
    let repo = repository();
    let reminder = Reminder::new(
        "Tours",
        "Take photos along the bridge",
        "London Bridge",
        51.5,
        -0.08,
    );
    repo.save_reminder(reminder.clone()).await.unwrap();

    let loaded = repo.get_reminder(&reminder.id).await.unwrap();
    assert_eq!(loaded.id, reminder.id);
    assert_eq!(loaded.title, reminder.title);
    assert_eq!(loaded.description, reminder.description);
    assert_eq!(loaded.location, reminder.location);
    assert_eq!(loaded.latitude, reminder.latitude);
    assert_eq!(loaded.longitude, reminder.longitude);
}

#[tokio::test]
async fn get_reminder_for_unknown_id_is_not_found_with_fixed_message() {
    let repo = repository();

    let err = repo.get_reminder("AD").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, RepoError::NotFound(ref id) if id == "AD"));
    assert_eq!(err.to_string(), "Reminder not found!");
    assert_eq!(err.to_string(), REMINDER_NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn empty_store_is_a_successful_empty_list() {
    let repo = repository();
    assert!(repo.get_reminders().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_all_then_get_reminders_is_empty() {
    let repo = repository();
    repo.save_reminder(Reminder::new("A", "", "Big Ben", 51.5, 0.12))
        .await
        .unwrap();
    repo.save_reminder(Reminder::new("B", "", "Eiffel Tower", 48.86, 2.29))
        .await
        .unwrap();

    repo.delete_all_reminders().await.unwrap();

    let loaded = repo.get_reminders().await.unwrap();
    assert!(loaded.is_empty());
}

#[tokio::test]
async fn delete_unknown_id_changes_nothing() {
    let repo = repository();
    let reminder = Reminder::new("A", "", "Big Ben", 51.5, 0.12);
    repo.save_reminder(reminder.clone()).await.unwrap();

    repo.delete_reminder("never-saved").await.unwrap();

    assert_eq!(repo.get_reminders().await.unwrap(), vec![reminder]);
}

#[tokio::test]
async fn deleted_reminder_is_no_longer_found() {
    let repo = repository();
    let reminder = Reminder::new("A", "", "Big Ben", 51.5, 0.12);
    repo.save_reminder(reminder.clone()).await.unwrap();

    repo.delete_reminder(&reminder.id).await.unwrap();

    assert!(repo.get_reminder(&reminder.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn store_fault_surfaces_as_error_with_description() {
    let repo = LocalReminderRepository::new(BrokenStore);

    let err = repo.get_reminders().await.unwrap_err();
    assert!(matches!(err, RepoError::Store(_)));
    assert!(err.to_string().contains("disk unreadable"));

    let err = repo.get_reminder("x").await.unwrap_err();
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn outcome_wraps_repository_results() {
    let repo = repository();

    let outcome: Outcome<Reminder> = repo.get_reminder("missing").await.into();
    assert_eq!(outcome.message(), Some(REMINDER_NOT_FOUND_MESSAGE));

    let outcome: Outcome<Vec<Reminder>> = repo.get_reminders().await.into();
    assert!(outcome.is_success());
}

#[test]
fn outcome_serializes_as_tagged_union() {
    let success: Outcome<Vec<String>> = Outcome::Success {
        payload: vec!["x".to_string()],
    };
    let json = serde_json::to_value(&success).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["payload"][0], "x");

    let error: Outcome<Vec<String>> = Outcome::Error {
        message: REMINDER_NOT_FOUND_MESSAGE.to_string(),
    };
    let json = serde_json::to_value(&error).unwrap();
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "Reminder not found!");
}
