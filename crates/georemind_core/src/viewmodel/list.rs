//! Reminder list and detail view model.

use crate::model::data_item::ReminderDataItem;
use crate::service::reminder_repository::{ReminderDataSource, RepoResult};
use crate::viewmodel::signal::Signal;
use std::sync::Arc;

/// Backs the reminder list screen and its detail view.
pub struct RemindersListViewModel {
    data_source: Arc<dyn ReminderDataSource>,
    /// Items shown by the list; kept from the last successful load.
    pub reminders: Signal<Vec<ReminderDataItem>>,
    pub show_loading: Signal<bool>,
    /// True when the list has nothing to show.
    pub show_no_data: Signal<bool>,
    /// Last repository error, verbatim.
    pub show_error_message: Signal<Option<String>>,
}

impl RemindersListViewModel {
    pub fn new(data_source: Arc<dyn ReminderDataSource>) -> Self {
        Self {
            data_source,
            reminders: Signal::default(),
            show_loading: Signal::new(false),
            show_no_data: Signal::new(true),
            show_error_message: Signal::default(),
        }
    }

    /// Loads every reminder into `reminders`, or surfaces the error.
    pub async fn load_reminders(&self) {
        self.show_loading.set(true);
        let result = self.data_source.get_reminders().await;
        self.show_loading.set(false);

        match result {
            Ok(reminders) => {
                let items = reminders
                    .into_iter()
                    .map(ReminderDataItem::from)
                    .collect::<Vec<_>>();
                self.reminders.set(items);
            }
            Err(err) => self.show_error_message.set(Some(err.to_string())),
        }

        self.invalidate_show_no_data();
    }

    /// Fetches one reminder for the detail screen.
    ///
    /// Returns `None` and surfaces the error message when the lookup fails.
    pub async fn get_reminder(&self, id: &str) -> Option<ReminderDataItem> {
        match self.data_source.get_reminder(id).await {
            Ok(reminder) => Some(ReminderDataItem::from(reminder)),
            Err(err) => {
                self.show_error_message.set(Some(err.to_string()));
                None
            }
        }
    }

    /// Deletes one reminder and reloads the list.
    pub async fn delete_reminder(&self, id: &str) -> RepoResult<()> {
        let result = self.data_source.delete_reminder(id).await;
        self.after_delete(result).await
    }

    /// Deletes every reminder and reloads the list.
    pub async fn delete_all_reminders(&self) -> RepoResult<()> {
        let result = self.data_source.delete_all_reminders().await;
        self.after_delete(result).await
    }

    async fn after_delete(&self, result: RepoResult<()>) -> RepoResult<()> {
        match &result {
            Ok(()) => self.load_reminders().await,
            Err(err) => self.show_error_message.set(Some(err.to_string())),
        }
        result
    }

    fn invalidate_show_no_data(&self) {
        let empty = self.reminders.with(Vec::is_empty);
        self.show_no_data.set(empty);
    }
}
