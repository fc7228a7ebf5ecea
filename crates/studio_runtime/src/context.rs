//! App-lifetime provider slot for the selection store.
//!
//! Screens normally receive a [`SelectionStore`] by injection. The shell installs the one store of
//! the running app here at startup so deeply nested views can reach it; reading the slot before
//! that is a wiring bug.

use std::cell::RefCell;

use thiserror::Error;

use crate::store::SelectionStore;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
/// Provider slot errors.
pub enum StoreError {
    /// No store was provided on this thread.
    #[error("selection store not provided; call provide_selection_store at startup")]
    NotInstalled,
}

thread_local! {
    static PROVIDED_STORE: RefCell<Option<SelectionStore>> = const { RefCell::new(None) };
}

/// Installs `store` as this thread's app store, returning any store it replaces.
pub fn provide_selection_store(store: SelectionStore) -> Option<SelectionStore> {
    PROVIDED_STORE.with(|slot| slot.borrow_mut().replace(store))
}

/// Removes the provided store, if any.
pub fn take_selection_store() -> Option<SelectionStore> {
    PROVIDED_STORE.with(|slot| slot.borrow_mut().take())
}

/// Returns the provided store.
///
/// # Errors
///
/// Returns [`StoreError::NotInstalled`] when [`provide_selection_store`] has not been called.
pub fn try_selection_store() -> Result<SelectionStore, StoreError> {
    PROVIDED_STORE.with(|slot| slot.borrow().clone().ok_or(StoreError::NotInstalled))
}

/// Returns the provided store.
///
/// # Panics
///
/// Panics if called before [`provide_selection_store`].
pub fn use_selection_store() -> SelectionStore {
    try_selection_store().expect("SelectionStore not provided")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{catalog::fixtures::small_catalog, model::StudioState};

    fn store() -> SelectionStore {
        SelectionStore::new(Arc::new(small_catalog()), StudioState::default())
    }

    #[test]
    fn reading_before_provide_is_an_error() {
        let _ = take_selection_store();
        assert_eq!(
            try_selection_store().map(|_| ()),
            Err(StoreError::NotInstalled)
        );
    }

    #[test]
    #[should_panic(expected = "SelectionStore not provided")]
    fn use_before_provide_panics() {
        let _ = take_selection_store();
        let _ = use_selection_store();
    }

    #[test]
    fn provided_store_is_shared_with_readers() {
        let app_store = store();
        assert!(provide_selection_store(app_store.clone()).is_none());

        use_selection_store().toggle_favorite("n1");

        assert!(app_store.is_favorite("n1"));
        assert!(take_selection_store().is_some());
        assert!(try_selection_store().is_err());
    }

    #[test]
    fn providing_again_returns_the_previous_store() {
        let first = store();
        first.toggle_favorite("s1");
        let _ = take_selection_store();

        provide_selection_store(first);
        let replaced = provide_selection_store(store()).expect("previous store");

        assert!(replaced.is_favorite("s1"));
        assert!(!use_selection_store().is_favorite("s1"));
        let _ = take_selection_store();
    }
}
