//! Panel interaction handlers shared by toolbar buttons, keyboard shortcuts
//! and the run-history sidebar.
//!
//! Each handler owns one intent ("cancel the preview panel") so call sites
//! never poke panel flags directly; they all funnel through the same
//! [`WorkflowUiState`] mutators.

use std::cell::RefCell;
use std::rc::Rc;

use crate::state::WorkflowUiState;

/// Handle over a shared session store exposing the panel intents.
///
/// Cheap to clone; clones operate on the same underlying store.
#[derive(Clone)]
pub struct WorkflowInteractions {
    store: Rc<RefCell<WorkflowUiState>>,
}

impl WorkflowInteractions {
    pub fn new(store: Rc<RefCell<WorkflowUiState>>) -> Self {
        Self { store }
    }

    /// Close the debug-and-preview panel.
    pub fn cancel_debug_and_preview_panel(&self) {
        mut_borrow!(self.store).set_show_debug_and_preview_panel(false);
    }

    /// Open the debug-and-preview panel.
    pub fn show_debug_and_preview_panel(&self) {
        mut_borrow!(self.store).set_show_debug_and_preview_panel(true);
    }

    pub fn toggle_env_panel(&self) {
        let mut store = mut_borrow!(self.store);
        let next = !store.show_env_panel();
        store.set_show_env_panel(next);
    }

    pub fn toggle_inputs_panel(&self) {
        let mut store = mut_borrow!(self.store);
        let next = !store.show_inputs_panel();
        store.set_show_inputs_panel(next);
    }
}

// Native unit tests -----------------------------------------------------------
