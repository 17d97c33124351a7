//! Create/edit modal state

/// Whether the modal creates a new record or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalMode {
    #[default]
    Create,
    Edit,
}

/// Lifecycle of a single create/edit modal
///
/// Pure bookkeeping: validation belongs to the form.
#[derive(Debug, Clone)]
pub struct EntityModal<T> {
    is_open: bool,
    mode: ModalMode,
    entity: Option<T>,
    is_submitting: bool,
}

impl<T> Default for EntityModal<T> {
    fn default() -> Self {
        Self {
            is_open: false,
            mode: ModalMode::Create,
            entity: None,
            is_submitting: false,
        }
    }
}

impl<T> EntityModal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_create(&mut self) {
        self.mode = ModalMode::Create;
        self.entity = None;
        self.is_open = true;
    }

    pub fn open_edit(&mut self, entity: T) {
        self.mode = ModalMode::Edit;
        self.entity = Some(entity);
        self.is_open = true;
    }

    /// Close and reset to the create state.
    ///
    /// Ignored while a save is in flight; returns whether the modal closed.
    pub fn close(&mut self) -> bool {
        if self.is_submitting {
            return false;
        }
        self.is_open = false;
        self.mode = ModalMode::Create;
        self.entity = None;
        true
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.is_submitting = submitting;
    }

    /// Mark a save in flight until the returned guard drops
    pub(crate) fn begin_submit(&mut self) -> SubmittingGuard<'_, T> {
        self.is_submitting = true;
        SubmittingGuard { modal: self }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn mode(&self) -> ModalMode {
        self.mode
    }

    pub fn is_edit(&self) -> bool {
        self.mode == ModalMode::Edit
    }

    pub fn entity(&self) -> Option<&T> {
        self.entity.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }
}

pub(crate) struct SubmittingGuard<'a, T> {
    modal: &'a mut EntityModal<T>,
}

impl<T> Drop for SubmittingGuard<'_, T> {
    fn drop(&mut self) {
        self.modal.is_submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_create_resets_entity() {
        let mut modal = EntityModal::new();
        modal.open_edit("brand-1");
        modal.open_create();

        assert!(modal.is_open());
        assert_eq!(modal.mode(), ModalMode::Create);
        assert!(modal.entity().is_none());
    }

    #[test]
    fn test_open_edit_keeps_entity() {
        let mut modal = EntityModal::new();
        modal.open_edit(7);

        assert!(modal.is_open());
        assert!(modal.is_edit());
        assert_eq!(modal.entity(), Some(&7));
    }

    #[test]
    fn test_close_is_ignored_while_submitting() {
        let mut modal = EntityModal::new();
        modal.open_edit(7);
        modal.set_submitting(true);

        assert!(!modal.close());
        assert!(modal.is_open());
        assert_eq!(modal.entity(), Some(&7));

        modal.set_submitting(false);
        assert!(modal.close());
        assert!(!modal.is_open());
        assert_eq!(modal.mode(), ModalMode::Create);
        assert!(modal.entity().is_none());
    }

    #[test]
    fn test_submit_guard_clears_flag() {
        let mut modal: EntityModal<i32> = EntityModal::new();
        modal.open_create();
        {
            let _submitting = modal.begin_submit();
        }
        assert!(!modal.is_submitting());
        assert!(modal.close());
    }
}
