//! List-management substrate
//!
//! The building blocks every entity screen is assembled from:
//!
//! - [`EntityModal`]: create/edit modal lifecycle
//! - [`ConfirmDialog`]: destructive confirmation with a per-row busy id
//! - [`ListPagination`]: paging over an in-memory, already filtered list
//! - [`ServerPagination`]: server-side paging with a page-keyed cache
//! - [`CrudOperations`]: repository calls with uniform loading/error state
//! - [`EntityScreen`]: the composition of all of the above for one entity

mod confirm;
mod crud;
mod list_pagination;
mod modal;
mod screen;
mod server_pagination;

pub use confirm::ConfirmDialog;
pub use crud::{CrudListener, CrudOperations, NoopListener};
pub use list_pagination::ListPagination;
pub use modal::{EntityModal, ModalMode};
pub use screen::{EntityScreen, PendingAction, RowActions, ScreenForm};
pub use server_pagination::{PageFetcher, PageState, ServerPagination};

#[cfg(test)]
pub(crate) mod test_support;
