//! CRUD operations wrapper
//!
//! Runs repository calls with uniform bookkeeping: loading flag, the last
//! normalized error and lifecycle callbacks. Failures never escape as
//! errors; they come back as `None`/`false` with [`CrudOperations::error`]
//! set.

use crate::ClientResult;
use crate::error::ErrorInfo;
use crate::repository::{CrudOperation, Repository};
use shared::EntityState;
use std::future::Future;
use std::sync::Arc;

/// Lifecycle callbacks around each CRUD operation
///
/// Every method defaults to a no-op.
pub trait CrudListener<T>: Send + Sync {
    fn before_operation(&self, _op: CrudOperation) {}

    fn on_success(&self, _op: CrudOperation, _entity: Option<&T>) {}

    fn on_error(&self, _op: CrudOperation, _message: &str) {}

    /// Fires once per operation, whatever its outcome
    fn after_operation(&self, _op: CrudOperation) {}
}

/// Listener that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl<T> CrudListener<T> for NoopListener {}

pub struct CrudOperations<R: Repository> {
    repository: Arc<R>,
    listener: Arc<dyn CrudListener<R::Entity>>,
    loading: bool,
    error: Option<ErrorInfo>,
}

impl<R: Repository> CrudOperations<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            listener: Arc::new(NoopListener),
            loading: false,
            error: None,
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn CrudListener<R::Entity>>) -> Self {
        self.listener = listener;
        self
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub async fn list(&mut self) -> Option<Vec<R::Entity>> {
        let repository = self.repository.clone();
        self.run(CrudOperation::List, async move { repository.list().await }, |_| None)
            .await
    }

    pub async fn get_by_id(&mut self, id: i64) -> Option<R::Entity> {
        let repository = self.repository.clone();
        self.run(
            CrudOperation::GetById,
            async move { repository.get_by_id(id).await },
            |entity| Some(entity),
        )
        .await
    }

    pub async fn create(&mut self, data: &R::Create) -> Option<R::Entity> {
        let repository = self.repository.clone();
        self.run(
            CrudOperation::Create,
            async move { repository.create(data).await },
            |entity| Some(entity),
        )
        .await
    }

    pub async fn update(&mut self, id: i64, data: &R::Update) -> Option<R::Entity> {
        let repository = self.repository.clone();
        self.run(
            CrudOperation::Update,
            async move { repository.update(id, data).await },
            |entity| Some(entity),
        )
        .await
    }

    /// Flip the activation state of `id`.
    ///
    /// Returns `false` without calling anything when the repository has no
    /// state endpoint.
    pub async fn update_state(&mut self, id: i64, state: EntityState) -> bool {
        if !self.repository.supports(CrudOperation::UpdateState) {
            tracing::warn!(id, %state, "Repository does not support updateState");
            return false;
        }
        let repository = self.repository.clone();
        self.run(
            CrudOperation::UpdateState,
            async move { repository.update_state(id, state).await },
            |entity| Some(entity),
        )
        .await
        .is_some()
    }

    /// Hard delete. Returns `false` without a call when unsupported.
    pub async fn remove(&mut self, id: i64) -> bool {
        if !self.repository.supports(CrudOperation::Delete) {
            tracing::warn!(id, "Repository does not support delete");
            return false;
        }
        let repository = self.repository.clone();
        self.run(
            CrudOperation::Delete,
            async move { repository.delete(id).await },
            |_| None,
        )
        .await
        .is_some()
    }

    async fn run<V, Fut>(
        &mut self,
        op: CrudOperation,
        action: Fut,
        entity_of: fn(&V) -> Option<&R::Entity>,
    ) -> Option<V>
    where
        Fut: Future<Output = ClientResult<V>>,
    {
        self.loading = true;
        self.error = None;
        self.listener.before_operation(op);
        let _scope = OperationScope {
            loading: &mut self.loading,
            listener: self.listener.as_ref(),
            op,
        };

        match action.await {
            Ok(value) => {
                self.listener.on_success(op, entity_of(&value));
                Some(value)
            }
            Err(err) => {
                let info = ErrorInfo::from_client_error(&err);
                tracing::warn!(operation = %op, error = %err, "CRUD operation failed");
                self.listener.on_error(op, &info.message);
                self.error = Some(info);
                None
            }
        }
    }
}

/// Resets loading and fires `after_operation` on every exit path
struct OperationScope<'a, T> {
    loading: &'a mut bool,
    listener: &'a dyn CrudListener<T>,
    op: CrudOperation,
}

impl<T> Drop for OperationScope<'_, T> {
    fn drop(&mut self) {
        *self.loading = false;
        self.listener.after_operation(self.op);
    }
}
