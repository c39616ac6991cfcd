//! State-management core of the workflow studio frontend.
//!
//! The crate owns panel/session state, the toast lifecycle and the small
//! formatting utilities the shell needs; graph rendering and workflow
//! execution live elsewhere. Everything browser-specific enters through
//! injected capabilities so the core builds and tests on native targets.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

// Export convenience macros crate-wide
#[macro_use]
mod macros;

pub mod chat;
pub mod constants;
pub mod dom_utils;
pub mod interactions;
pub mod keyboard;
pub mod models;
pub mod state;
pub mod storage;
pub mod toast;
pub mod utils;

use interactions::WorkflowInteractions;
use keyboard::{key_code, key_display_name, BrowserPlatform};
use models::{WorkflowRunningData, WorkflowRunningStatus};
use state::WorkflowUiState;
use storage::{LocalStorageBackend, StorageBackend};
use toast::{DomToastHost, SharedToastManager, ToastManager};

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() {
    // Initialize better panic messages
    console_error_panic_hook::set_once();
}

/// Facade handed to the host page.
///
/// Created once on startup; wires the browser capabilities (localStorage,
/// DOM toast surface, navigator platform) into the session store, the toast
/// manager and the panel interaction handlers, and exposes the slice of the
/// store the shell's drag handlers and toolbar need.
#[wasm_bindgen]
pub struct WorkflowStudio {
    state: Rc<RefCell<WorkflowUiState>>,
    toasts: SharedToastManager,
    interactions: WorkflowInteractions,
    shortcut_handler: RefCell<Option<Closure<dyn FnMut(web_sys::KeyboardEvent)>>>,
}

#[wasm_bindgen]
impl WorkflowStudio {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WorkflowStudio {
        let backend: Rc<dyn StorageBackend> = Rc::new(LocalStorageBackend::new());
        let state = Rc::new(RefCell::new(WorkflowUiState::new(backend)));
        let toasts = ToastManager::new(Box::new(DomToastHost::new())).into_shared();
        let interactions = WorkflowInteractions::new(state.clone());

        debug_log!("Workflow studio initialised");

        // Signal to automation/tests that the studio finished bootstrapping.
        if let Some(win) = web_sys::window() {
            let key = js_sys::JsString::from("__STUDIO_READY__");
            let _ = js_sys::Reflect::set(&win, &key, &JsValue::from_bool(true));
        }

        WorkflowStudio {
            state,
            toasts,
            interactions,
            shortcut_handler: RefCell::new(None),
        }
    }

    // Toasts ------------------------------------------------------------------

    pub fn toast_success(&self, message: &str) {
        toast::success(&self.toasts, message);
    }

    pub fn toast_error(&self, message: &str) {
        toast::error(&self.toasts, message);
    }

    pub fn toast_warning(&self, message: &str) {
        toast::warning(&self.toasts, message);
    }

    pub fn toast_info(&self, message: &str) {
        toast::info(&self.toasts, message);
    }

    /// Drop every visible toast at once, e.g. before a route change.
    pub fn clear_toasts(&self) {
        toast::clear_all(&self.toasts);
    }

    // Panels ------------------------------------------------------------------

    pub fn show_debug_and_preview_panel(&self) {
        self.interactions.show_debug_and_preview_panel();
    }

    pub fn cancel_debug_and_preview_panel(&self) {
        self.interactions.cancel_debug_and_preview_panel();
    }

    pub fn toggle_env_panel(&self) {
        self.interactions.toggle_env_panel();
    }

    pub fn toggle_inputs_panel(&self) {
        self.interactions.toggle_inputs_panel();
    }

    pub fn maximize_canvas(&self) -> bool {
        self.state.borrow().maximize_canvas()
    }

    pub fn set_maximize_canvas(&self, maximize: bool) {
        mut_borrow!(self.state).set_maximize_canvas(maximize);
    }

    // Geometry (drag-handle callbacks) ----------------------------------------

    pub fn set_panel_width(&self, width: f64) {
        mut_borrow!(self.state).set_panel_width(width);
    }

    pub fn set_node_panel_width(&self, width: f64) {
        mut_borrow!(self.state).set_node_panel_width(width);
    }

    pub fn set_preview_panel_width(&self, width: f64) {
        mut_borrow!(self.state).set_preview_panel_width(width);
    }

    pub fn set_variable_inspect_panel_height(&self, height: f64) {
        mut_borrow!(self.state).set_variable_inspect_panel_height(height);
    }

    pub fn set_bottom_panel_width(&self, width: f64) {
        mut_borrow!(self.state).set_bottom_panel_width(width);
    }

    pub fn set_bottom_panel_height(&self, height: f64) {
        mut_borrow!(self.state).set_bottom_panel_height(height);
    }

    /// Measured width of the right-hand panel column, or `undefined` while it
    /// is unmounted.
    pub fn set_right_panel_width(&self, width: Option<f64>) {
        mut_borrow!(self.state).set_right_panel_width(width);
    }

    pub fn set_workflow_canvas_size(&self, width: f64, height: f64) {
        let mut state = mut_borrow!(self.state);
        state.set_workflow_canvas_width(Some(width));
        state.set_workflow_canvas_height(Some(height));
    }

    pub fn computed_node_panel_width(&self) -> f64 {
        self.state.borrow().computed_node_panel_width()
    }

    pub fn is_restoring(&self) -> bool {
        self.state.borrow().is_restoring()
    }

    pub fn set_is_restoring(&self, restoring: bool) {
        mut_borrow!(self.state).set_is_restoring(restoring);
    }

    // Run data ----------------------------------------------------------------

    /// Ingest the latest run payload from the execution layer.
    ///
    /// `null`/`undefined` clears the stored run. A failed run additionally
    /// surfaces a truncated error toast so the user sees it even with the
    /// preview panel closed.
    pub fn set_workflow_running_data(&self, data: JsValue) -> Result<(), JsValue> {
        if data.is_null() || data.is_undefined() {
            mut_borrow!(self.state).set_workflow_running_data(None);
            return Ok(());
        }

        let data: WorkflowRunningData = serde_wasm_bindgen::from_value(data)?;
        if matches!(data.result.status, WorkflowRunningStatus::Failed) {
            if let Some(error) = data.result.error.as_deref() {
                toast::error(
                    &self.toasts,
                    &utils::truncate_graphemes(error, constants::RUN_ERROR_PREVIEW_GRAPHEMES),
                );
            }
        }
        mut_borrow!(self.state).set_workflow_running_data(Some(data));
        Ok(())
    }

    /// Current layout geometry as a plain JS object, for the shell to apply
    /// on mount and after drag gestures.
    pub fn layout_snapshot(&self) -> Result<JsValue, JsValue> {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct LayoutSnapshot {
            panel_width: f64,
            node_panel_width: f64,
            computed_node_panel_width: f64,
            preview_panel_width: f64,
            other_panel_width: f64,
            bottom_panel_width: f64,
            bottom_panel_height: f64,
            variable_inspect_panel_height: f64,
            maximize_canvas: bool,
            right_panel_width: Option<f64>,
            workflow_canvas_width: Option<f64>,
            workflow_canvas_height: Option<f64>,
        }

        let state = self.state.borrow();
        let snapshot = LayoutSnapshot {
            panel_width: state.panel_width(),
            node_panel_width: state.node_panel_width(),
            computed_node_panel_width: state.computed_node_panel_width(),
            preview_panel_width: state.preview_panel_width(),
            other_panel_width: state.other_panel_width(),
            bottom_panel_width: state.bottom_panel_width(),
            bottom_panel_height: state.bottom_panel_height(),
            variable_inspect_panel_height: state.variable_inspect_panel_height(),
            maximize_canvas: state.maximize_canvas(),
            right_panel_width: state.right_panel_width(),
            workflow_canvas_width: state.workflow_canvas_width(),
            workflow_canvas_height: state.workflow_canvas_height(),
        };
        Ok(serde_wasm_bindgen::to_value(&snapshot)?)
    }

    // Keyboard shortcuts ------------------------------------------------------

    /// Register the global keyboard shortcut handler if not already.
    pub fn install_shortcuts(&self, document: &web_sys::Document) {
        if self.shortcut_handler.borrow().is_some() {
            return;
        }

        let state = self.state.clone();
        let toasts = self.toasts.clone();
        let interactions = self.interactions.clone();

        let keydown_cb = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
            // Prevent global shortcuts from firing inside input fields or
            // editable areas.
            if let Some(active_el) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.active_element())
            {
                if dom_utils::is_input_area(&active_el) {
                    return;
                }
            }

            let platform = BrowserPlatform::new();
            let key = event.key();

            // ? with no modifiers → show shortcut help
            if key == "?" && !event.ctrl_key() && !event.meta_key() {
                event.prevent_default();
                let modifier = key_display_name(&platform, "ctrl");
                toast::info(
                    &toasts,
                    &format!(
                        "Shortcuts:\nD – Toggle debug & preview\nE – Toggle environment panel\nI – Toggle inputs panel\n{} + M – Maximize canvas\n? – Show this help",
                        modifier
                    ),
                );
                return;
            }

            // The maximize chord is declared as ctrl+M and remapped to the
            // platform's primary modifier (meta on Mac-like hosts).
            let modifier_down = if key_code(&platform, "ctrl") == "meta" {
                event.meta_key()
            } else {
                event.ctrl_key()
            };
            if modifier_down && (key == "m" || key == "M") {
                event.prevent_default();
                let mut state = mut_borrow!(state);
                let next = !state.maximize_canvas();
                state.set_maximize_canvas(next);
                return;
            }

            // Plain-key panel shortcuts without modifiers
            if !event.ctrl_key() && !event.meta_key() {
                match key.as_str() {
                    "d" | "D" => {
                        event.prevent_default();
                        let shown = state.borrow().show_debug_and_preview_panel();
                        if shown {
                            interactions.cancel_debug_and_preview_panel();
                        } else {
                            interactions.show_debug_and_preview_panel();
                        }
                    }
                    "e" | "E" => {
                        event.prevent_default();
                        interactions.toggle_env_panel();
                    }
                    "i" | "I" => {
                        event.prevent_default();
                        interactions.toggle_inputs_panel();
                    }
                    _ => {}
                }
            }
        }) as Box<dyn FnMut(_)>);

        let target: web_sys::EventTarget = document.clone().into();
        let _ =
            target.add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref());
        self.shortcut_handler.replace(Some(keydown_cb));
    }

    /// Remove the global keyboard shortcut handler.
    pub fn remove_shortcuts(&self, document: &web_sys::Document) {
        if let Some(cb) = self.shortcut_handler.borrow_mut().take() {
            let target: web_sys::EventTarget = document.clone().into();
            let _ =
                target.remove_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
        }
    }
}

// wasm-bindgen tests ----------------------------------------------------------
