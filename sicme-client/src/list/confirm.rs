//! Confirmation dialog with per-row busy tracking

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A single destructive confirmation ("deactivate this record?")
///
/// `busy_id` names the row whose action buttons must stay disabled while
/// the confirmed operation runs. Clones share the same state, so a row
/// renderer holding a clone sees the busy id while another task awaits
/// [`ConfirmDialog::execute_with_loading`].
pub struct ConfirmDialog<T> {
    inner: Arc<Mutex<DialogState<T>>>,
}

#[derive(Debug)]
struct DialogState<T> {
    is_open: bool,
    entity: Option<T>,
    is_loading: bool,
    busy_id: Option<i64>,
}

impl<T> Clone for ConfirmDialog<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for ConfirmDialog<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(DialogState {
                is_open: false,
                entity: None,
                is_loading: false,
                busy_id: None,
            })),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ConfirmDialog<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfirmDialog").field("state", &*self.lock()).finish()
    }
}

impl<T> ConfirmDialog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, DialogState<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn open_confirm(&self, entity: T) {
        let mut state = self.lock();
        state.entity = Some(entity);
        state.is_open = true;
    }

    /// Dismiss the dialog. Ignored while the operation runs.
    pub fn close_confirm(&self) -> bool {
        let mut state = self.lock();
        if state.is_loading {
            return false;
        }
        state.is_open = false;
        state.entity = None;
        true
    }

    /// Run `action` for `entity_id` with loading and busy state set.
    ///
    /// On success the dialog closes. On failure it stays open with its
    /// entity and the error is handed back. Loading and busy id are reset
    /// in every case, including when the returned future is dropped early.
    pub async fn execute_with_loading<F, Fut, R, E>(&self, entity_id: i64, action: F) -> Result<R, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, E>>,
    {
        {
            let mut state = self.lock();
            state.is_loading = true;
            state.busy_id = Some(entity_id);
        }
        let mut guard = LoadingGuard {
            dialog: self,
            succeeded: false,
        };

        let result = action().await;
        guard.succeeded = result.is_ok();
        result
    }

    pub fn is_open(&self) -> bool {
        self.lock().is_open
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading
    }

    pub fn busy_id(&self) -> Option<i64> {
        self.lock().busy_id
    }

    /// Whether the row with `id` is undergoing the confirmed operation
    pub fn is_busy(&self, id: i64) -> bool {
        self.lock().busy_id == Some(id)
    }
}

impl<T: Clone> ConfirmDialog<T> {
    pub fn entity(&self) -> Option<T> {
        self.lock().entity.clone()
    }
}

struct LoadingGuard<'a, T> {
    dialog: &'a ConfirmDialog<T>,
    succeeded: bool,
}

impl<T> Drop for LoadingGuard<'_, T> {
    fn drop(&mut self) {
        let mut state = self.dialog.lock();
        state.is_loading = false;
        state.busy_id = None;
        if self.succeeded {
            state.is_open = false;
            state.entity = None;
        }
    }
}
