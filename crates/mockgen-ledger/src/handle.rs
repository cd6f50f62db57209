//! Test handle: where mocks report verification failures.
//!
//! A [`TestHandle`] collects failures for one test. Non-fatal failures
//! ([`TestHandle::error`]) are recorded and the test keeps running; fatal
//! ones ([`TestHandle::fatal`]) are recorded and then panic. When the last
//! clone of a handle is dropped with failures still recorded, it panics with
//! all of them, so a test that merely records failures still fails.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared failure sink for one test.
#[derive(Debug, Clone)]
pub struct TestHandle {
    inner: Arc<HandleInner>,
}

#[derive(Debug)]
struct HandleInner {
    name: String,
    failures: Mutex<Vec<String>>,
}

impl TestHandle {
    /// Creates a handle labelled with the test's name.
    pub fn new(name: impl Into<String>) -> Self {
        TestHandle {
            inner: Arc::new(HandleInner {
                name: name.into(),
                failures: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Records a failure and keeps going.
    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(test = %self.inner.name, "{}", message);
        self.inner.lock().push(message);
    }

    /// Records a failure and aborts the test by panicking.
    pub fn fatal(&self, message: impl Into<String>) -> ! {
        let message = message.into();
        self.error(message.clone());
        panic!("{}: {}", self.inner.name, message);
    }

    /// Whether any failure has been recorded.
    pub fn failed(&self) -> bool {
        !self.inner.lock().is_empty()
    }

    /// Snapshot of the recorded failures.
    pub fn failures(&self) -> Vec<String> {
        self.inner.lock().clone()
    }

    /// Removes and returns the recorded failures.
    ///
    /// Tests that expect a failure drain it here so the handle does not
    /// fail them on drop.
    pub fn take_failures(&self) -> Vec<String> {
        std::mem::take(&mut *self.inner.lock())
    }
}

impl HandleInner {
    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        // A fatal failure panics while other clones stay usable.
        self.failures.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for HandleInner {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        let failures = std::mem::take(
            self.failures
                .get_mut()
                .unwrap_or_else(PoisonError::into_inner),
        );
        if !failures.is_empty() {
            panic!(
                "test `{}` recorded {} failure(s):\n  {}",
                self.name,
                failures.len(),
                failures.join("\n  ")
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_records_without_panicking() {
        let handle = TestHandle::new("records");
        handle.error("first");
        handle.error("second");
        assert!(handle.failed());
        assert_eq!(handle.failures(), vec!["first", "second"]);
        assert_eq!(handle.take_failures().len(), 2);
        assert!(!handle.failed());
    }

    #[test]
    fn clones_share_failures() {
        let handle = TestHandle::new("shared");
        let clone = handle.clone();
        clone.error("from clone");
        assert_eq!(handle.take_failures(), vec!["from clone"]);
        assert_eq!(clone.name(), "shared");
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn fatal_panics() {
        let handle = TestHandle::new("fatal");
        handle.fatal("boom");
    }

    #[test]
    #[should_panic(expected = "recorded 1 failure(s)")]
    fn drop_with_failures_panics() {
        let handle = TestHandle::new("dropped");
        handle.error("left behind");
        drop(handle);
    }

    #[test]
    fn handle_stays_usable_after_fatal_on_another_thread() {
        let handle = TestHandle::new("poison");
        let clone = handle.clone();
        let result = std::thread::spawn(move || clone.fatal("thread failure")).join();
        assert!(result.is_err());
        assert_eq!(handle.take_failures(), vec!["thread failure"]);
    }
}
