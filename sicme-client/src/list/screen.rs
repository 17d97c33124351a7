//! Entity screen controller
//!
//! Everything an entity page needs besides rendering: the fetched rows, the
//! search box, client-side paging, the create/edit modal, the confirmation
//! dialog and the CRUD bookkeeping behind them.

use super::{ConfirmDialog, CrudListener, CrudOperations, EntityModal, ListPagination, ModalMode};
use crate::repository::Repository;
use shared::models::Entity;
use std::sync::Arc;

/// Payload submitted from the create/edit modal
#[derive(Debug, Clone)]
pub enum ScreenForm<C, U> {
    Create(C),
    Update(U),
}

/// What the confirmation dialog is about to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Activate an inactive row or deactivate an active one
    ToggleState,
    /// Hard delete
    Delete,
}

/// Enabled state of a row's buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowActions {
    pub edit_disabled: bool,
    pub delete_disabled: bool,
}

impl RowActions {
    /// Buttons for `entity` given the dialog that may be running an action on it
    pub fn for_row<T: Entity>(dialog: &ConfirmDialog<T>, entity: &T) -> RowActions {
        let busy = dialog.is_busy(entity.id());
        RowActions {
            edit_disabled: busy,
            delete_disabled: busy || !entity.state().is_active(),
        }
    }
}

pub struct EntityScreen<R: Repository>
where
    R::Entity: Entity + Clone,
{
    items: Vec<R::Entity>,
    search: String,
    pagination: ListPagination<R::Entity>,
    modal: EntityModal<R::Entity>,
    confirm: ConfirmDialog<R::Entity>,
    pending: Option<PendingAction>,
    crud: CrudOperations<R>,
}

impl<R: Repository> EntityScreen<R>
where
    R::Entity: Entity + Clone,
{
    pub fn new(repository: Arc<R>, page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            search: String::new(),
            pagination: ListPagination::new(page_size),
            modal: EntityModal::new(),
            confirm: ConfirmDialog::new(),
            pending: None,
            crud: CrudOperations::new(repository),
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn CrudListener<R::Entity>>) -> Self {
        self.crud = self.crud.with_listener(listener);
        self
    }

    /// Fetch every row. On failure the previous rows are kept.
    pub async fn load(&mut self) -> bool {
        match self.crud.list().await {
            Some(items) => {
                self.items = items;
                self.refresh_view();
                true
            }
            None => false,
        }
    }

    /// Change the search text and go back to the first page.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.refresh_view();
        self.pagination.reset_to_first_page();
    }

    /// Re-apply the search filter to the rows, keeping the page in range
    fn refresh_view(&mut self) {
        let needle = self.search.trim().to_lowercase();
        let filtered = self
            .items
            .iter()
            .filter(|item| needle.is_empty() || item.matches_search(&needle))
            .cloned()
            .collect();
        self.pagination.set_items(filtered);
    }

    pub fn open_create(&mut self) {
        self.modal.open_create();
    }

    /// Open the modal on the row with `id`. `false` if no such row.
    pub fn open_edit(&mut self, id: i64) -> bool {
        match self.find(id) {
            Some(entity) => {
                self.modal.open_edit(entity);
                true
            }
            None => false,
        }
    }

    pub fn close_modal(&mut self) -> bool {
        self.modal.close()
    }

    /// Send the modal's form.
    ///
    /// Created rows go to the top of the list, replacing a row with the same
    /// id if there is one. Updated rows are replaced in place. The modal
    /// closes on success and stays open on failure.
    pub async fn submit(&mut self, form: ScreenForm<R::Create, R::Update>) -> bool {
        let edit_id = match (&form, self.modal.mode()) {
            (ScreenForm::Create(_), _) => None,
            (ScreenForm::Update(_), ModalMode::Edit) => self.modal.entity().map(|entity| entity.id()),
            (ScreenForm::Update(_), ModalMode::Create) => None,
        };
        if matches!(form, ScreenForm::Update(_)) && edit_id.is_none() {
            tracing::warn!("Update submitted without an entity being edited");
            return false;
        }

        let saved = {
            let _submitting = self.modal.begin_submit();
            match (&form, edit_id) {
                (ScreenForm::Create(data), _) => self.crud.create(data).await,
                (ScreenForm::Update(data), Some(id)) => self.crud.update(id, data).await,
                (ScreenForm::Update(_), None) => None,
            }
        };

        let Some(saved) = saved else {
            return false;
        };
        match form {
            ScreenForm::Create(_) => {
                self.items.retain(|item| item.id() != saved.id());
                self.items.insert(0, saved);
            }
            ScreenForm::Update(_) => {
                if let Some(slot) = self.items.iter_mut().find(|item| item.id() == saved.id()) {
                    *slot = saved;
                }
            }
        }
        self.refresh_view();
        self.modal.close();
        true
    }

    /// Ask for confirmation before flipping the state of `id`
    pub fn request_toggle_state(&mut self, id: i64) -> bool {
        self.request(id, PendingAction::ToggleState)
    }

    /// Ask for confirmation before deleting `id`
    pub fn request_delete(&mut self, id: i64) -> bool {
        self.request(id, PendingAction::Delete)
    }

    fn request(&mut self, id: i64, action: PendingAction) -> bool {
        if self.confirm.is_loading() {
            return false;
        }
        let Some(entity) = self.find(id) else {
            return false;
        };
        self.pending = Some(action);
        self.confirm.open_confirm(entity);
        true
    }

    /// Run the confirmed action with the row marked busy.
    ///
    /// On success the row is updated (or removed) in place and the dialog
    /// closes. On failure the dialog stays open and [`Self::error_message`]
    /// holds the reason.
    pub async fn confirm(&mut self) -> bool {
        let (Some(entity), Some(action)) = (self.confirm.entity(), self.pending) else {
            return false;
        };
        let id = entity.id();
        let crud = &mut self.crud;

        match action {
            PendingAction::ToggleState => {
                let target = entity.state().toggled();
                let outcome = self
                    .confirm
                    .execute_with_loading(id, || async move {
                        if crud.update_state(id, target).await { Ok(()) } else { Err(()) }
                    })
                    .await;
                if outcome.is_err() {
                    return false;
                }
                if let Some(item) = self.items.iter_mut().find(|item| item.id() == id) {
                    item.set_state(target);
                }
            }
            PendingAction::Delete => {
                let outcome = self
                    .confirm
                    .execute_with_loading(id, || async move {
                        if crud.remove(id).await { Ok(()) } else { Err(()) }
                    })
                    .await;
                if outcome.is_err() {
                    return false;
                }
                self.items.retain(|item| item.id() != id);
            }
        }

        self.pending = None;
        self.refresh_view();
        true
    }

    /// Dismiss the confirmation dialog. Ignored while the action runs.
    pub fn cancel_confirm(&mut self) -> bool {
        if self.confirm.close_confirm() {
            self.pending = None;
            return true;
        }
        false
    }

    /// Buttons for `entity`'s row: both locked while the row is busy, delete
    /// also locked for inactive rows.
    pub fn row_actions(&self, entity: &R::Entity) -> RowActions {
        RowActions::for_row(&self.confirm, entity)
    }

    fn find(&self, id: i64) -> Option<R::Entity> {
        self.items.iter().find(|item| item.id() == id).cloned()
    }

    pub fn items(&self) -> &[R::Entity] {
        &self.items
    }

    /// Rows of the current page after search filtering
    pub fn visible(&self) -> &[R::Entity] {
        self.pagination.paginated_items()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn pagination(&self) -> &ListPagination<R::Entity> {
        &self.pagination
    }

    pub fn pagination_mut(&mut self) -> &mut ListPagination<R::Entity> {
        &mut self.pagination
    }

    pub fn modal(&self) -> &EntityModal<R::Entity> {
        &self.modal
    }

    pub fn confirm_dialog(&self) -> &ConfirmDialog<R::Entity> {
        &self.confirm
    }

    /// Shared handle on the dialog, readable while [`Self::confirm`] runs
    pub fn confirm_handle(&self) -> ConfirmDialog<R::Entity> {
        self.confirm.clone()
    }

    pub fn pending_action(&self) -> Option<PendingAction> {
        self.pending
    }

    pub fn crud(&self) -> &CrudOperations<R> {
        &self.crud
    }

    pub fn is_loading(&self) -> bool {
        self.crud.loading()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.crud.error_message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::test_support::{FakeBrands, brand};
    use shared::EntityState;
    use shared::models::{Brand, BrandCreate, BrandUpdate};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    async fn loaded(items: Vec<Brand>, page_size: usize) -> (EntityScreen<FakeBrands>, Arc<FakeBrands>) {
        let repo = Arc::new(FakeBrands::new(items));
        let mut screen = EntityScreen::new(repo.clone(), page_size);
        assert!(screen.load().await);
        (screen, repo)
    }

    fn names(rows: &[Brand]) -> Vec<&str> {
        rows.iter().map(|b| b.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_resets_page() {
        let items = (1..=12)
            .map(|i| brand(i, &format!("Marca {i}"), EntityState::Active))
            .chain([brand(13, "ACME Industrial", EntityState::Active)])
            .collect();
        let (mut screen, _) = loaded(items, 5).await;
        screen.pagination_mut().set_page(3);

        screen.set_search("acme");

        assert_eq!(screen.pagination().page(), 1);
        assert_eq!(names(screen.visible()), vec!["ACME Industrial"]);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_rows() {
        let (mut screen, repo) = loaded(vec![brand(1, "Acme", EntityState::Active)], 10).await;
        repo.fail_next(500, "Error interno");

        assert!(!screen.load().await);
        assert_eq!(screen.items().len(), 1);
        assert_eq!(screen.error_message(), Some("Error interno"));
    }

    #[tokio::test]
    async fn test_create_prepends_and_closes_modal() {
        let (mut screen, _) = loaded(vec![brand(1, "Acme", EntityState::Active)], 10).await;
        screen.open_create();

        let ok = screen
            .submit(ScreenForm::Create(BrandCreate {
                name: "Bosch".to_string(),
            }))
            .await;

        assert!(ok);
        assert_eq!(names(screen.items()), vec!["Bosch", "Acme"]);
        assert!(!screen.modal().is_open());
        assert!(!screen.modal().is_submitting());
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let (mut screen, _) = loaded(
            vec![
                brand(1, "Acme", EntityState::Active),
                brand(2, "Bosch", EntityState::Active),
            ],
            10,
        )
        .await;
        assert!(screen.open_edit(1));

        let ok = screen
            .submit(ScreenForm::Update(BrandUpdate {
                name: Some("Acme S.A.".to_string()),
            }))
            .await;

        assert!(ok);
        assert_eq!(names(screen.items()), vec!["Acme S.A.", "Bosch"]);
        assert!(!screen.modal().is_open());
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_modal_open() {
        let (mut screen, repo) = loaded(vec![], 10).await;
        screen.open_create();
        repo.fail_next(400, "El nombre es obligatorio");

        let ok = screen
            .submit(ScreenForm::Create(BrandCreate {
                name: String::new(),
            }))
            .await;

        assert!(!ok);
        assert!(screen.modal().is_open());
        assert!(!screen.modal().is_submitting());
        assert_eq!(screen.error_message(), Some("El nombre es obligatorio"));
    }

    #[tokio::test]
    async fn test_submitting_cleared_when_submit_dropped() {
        let (mut screen, repo) = loaded(vec![], 10).await;
        screen.open_create();
        repo.hang.store(true, Ordering::SeqCst);

        let timed_out = tokio::time::timeout(
            Duration::from_millis(20),
            screen.submit(ScreenForm::Create(BrandCreate {
                name: "Bosch".to_string(),
            })),
        )
        .await;

        assert!(timed_out.is_err());
        assert!(!screen.modal().is_submitting());
        assert!(screen.close_modal());
        assert!(!screen.is_loading());
    }

    #[tokio::test]
    async fn test_update_without_edit_target_is_rejected() {
        let (mut screen, repo) = loaded(vec![brand(1, "Acme", EntityState::Active)], 10).await;
        screen.open_create();
        let calls = repo.calls();

        let ok = screen.submit(ScreenForm::Update(BrandUpdate::default())).await;

        assert!(!ok);
        assert_eq!(repo.calls(), calls);
    }

    #[tokio::test]
    async fn test_confirmed_deactivation_updates_row() {
        let (mut screen, _) = loaded(vec![brand(7, "Acme", EntityState::Active)], 10).await;
        assert!(screen.request_toggle_state(7));
        assert_eq!(screen.pending_action(), Some(PendingAction::ToggleState));

        assert!(screen.confirm().await);

        let row = &screen.items()[0];
        assert_eq!(row.state, EntityState::Inactive);
        assert!(!screen.confirm_dialog().is_open());
        assert_eq!(screen.confirm_dialog().busy_id(), None);
        assert_eq!(screen.pending_action(), None);
        assert_eq!(
            screen.row_actions(row),
            RowActions {
                edit_disabled: false,
                delete_disabled: true,
            }
        );
    }

    #[tokio::test]
    async fn test_row_locked_while_confirmation_runs() {
        let (mut screen, repo) = loaded(vec![brand(7, "Acme", EntityState::Active)], 10).await;
        assert!(screen.request_toggle_state(7));
        let dialog = screen.confirm_handle();
        let row = screen.items()[0].clone();
        repo.hang.store(true, Ordering::SeqCst);

        let mut observed = None;
        tokio::select! {
            _ = screen.confirm() => panic!("hanging repository returned"),
            _ = async {
                while !dialog.is_busy(7) {
                    tokio::task::yield_now().await;
                }
                observed = Some((RowActions::for_row(&dialog, &row), dialog.close_confirm()));
            } => {}
        }

        assert_eq!(
            observed,
            Some((
                RowActions {
                    edit_disabled: true,
                    delete_disabled: true,
                },
                false
            ))
        );
        // Dropping the pending confirmation releases the row
        assert!(!dialog.is_busy(7));
        assert!(dialog.is_open());
        assert_eq!(screen.row_actions(&row), RowActions::default());
    }

    #[tokio::test]
    async fn test_failed_confirmation_keeps_dialog() {
        let (mut screen, repo) = loaded(vec![brand(7, "Acme", EntityState::Active)], 10).await;
        screen.request_toggle_state(7);
        repo.fail_next(500, "No se pudo actualizar");

        assert!(!screen.confirm().await);

        assert!(screen.confirm_dialog().is_open());
        assert_eq!(screen.confirm_dialog().entity().map(|b| b.id), Some(7));
        assert!(!screen.confirm_dialog().is_loading());
        assert_eq!(screen.items()[0].state, EntityState::Active);
        assert_eq!(screen.error_message(), Some("No se pudo actualizar"));
    }

    #[tokio::test]
    async fn test_confirmed_delete_removes_row() {
        let (mut screen, _) = loaded(
            vec![
                brand(1, "Acme", EntityState::Active),
                brand(2, "Bosch", EntityState::Active),
            ],
            10,
        )
        .await;
        screen.request_delete(1);

        assert!(screen.confirm().await);
        assert_eq!(names(screen.items()), vec!["Bosch"]);
    }

    #[tokio::test]
    async fn test_cancel_confirm_clears_pending() {
        let (mut screen, repo) = loaded(vec![brand(1, "Acme", EntityState::Active)], 10).await;
        screen.request_toggle_state(1);

        assert!(screen.cancel_confirm());
        assert_eq!(screen.pending_action(), None);
        assert!(!screen.confirm().await);
        assert_eq!(repo.calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_row_is_ignored() {
        let (mut screen, _) = loaded(vec![], 10).await;
        assert!(!screen.open_edit(99));
        assert!(!screen.request_toggle_state(99));
        assert!(!screen.confirm_dialog().is_open());
    }
}
