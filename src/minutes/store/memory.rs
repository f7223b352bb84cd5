use super::StateStore;
use crate::error::{MinutesError, Result};
use std::cell::RefCell;
use std::collections::BTreeSet;

/// In-memory state store for testing.
///
/// Uses `RefCell` for interior mutability since minutes is single-threaded,
/// letting `StateStore::save` take `&self` like the file-backed store.
#[derive(Default)]
pub struct InMemoryStateStore {
    keys: RefCell<Option<BTreeSet<String>>>,
    simulate_read_error: RefCell<bool>,
    simulate_write_error: RefCell<bool>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        *store.keys.borrow_mut() = Some(keys.into_iter().map(Into::into).collect());
        store
    }

    /// Enable read error simulation for testing degraded loads.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Whether `save` has ever succeeded.
    pub fn is_saved(&self) -> bool {
        self.keys.borrow().is_some()
    }
}

impl StateStore for InMemoryStateStore {
    fn load(&self) -> Result<BTreeSet<String>> {
        if *self.simulate_read_error.borrow() {
            return Err(MinutesError::Store("Simulated read error".to_string()));
        }
        Ok(self.keys.borrow().clone().unwrap_or_default())
    }

    fn save(&self, keys: &BTreeSet<String>) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(MinutesError::Store("Simulated write error".to_string()));
        }
        *self.keys.borrow_mut() = Some(keys.clone());
        Ok(())
    }
}
