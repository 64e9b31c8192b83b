//! Observable UI value backed by a `tokio::sync::watch` channel.

use tokio::sync::watch;

/// Latest-value signal observed by the UI.
///
/// Writes never fail, even with no subscriber attached.
#[derive(Debug)]
pub struct Signal<T> {
    sender: watch::Sender<T>,
}

impl<T: Clone> Signal<T> {
    pub fn new(initial: T) -> Self {
        let (sender, _receiver) = watch::channel(initial);
        Self { sender }
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Reads the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.sender.borrow())
    }

    /// Subscribes to future changes; the receiver starts at the current value.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }

    pub(crate) fn set(&self, value: T) {
        self.sender.send_replace(value);
    }
}

impl<T: Clone + Default> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::Signal;

    #[tokio::test]
    async fn subscribers_observe_latest_value() {
        let signal = Signal::new(false);
        let mut receiver = signal.subscribe();

        signal.set(true);
        receiver.changed().await.unwrap();
        assert!(*receiver.borrow());
        assert!(signal.get());
    }

    #[test]
    fn set_without_subscribers_keeps_value() {
        let signal: Signal<Option<String>> = Signal::default();
        signal.set(Some("hello".to_string()));
        assert_eq!(signal.get().as_deref(), Some("hello"));
    }
}
