//! Integration test for the persisted-session lifecycle: successive store
//! generations sharing one backend, the way a page reload reuses the same
//! localStorage area.
//!
//! Run with: cargo test --test session_restore

#![cfg(not(target_arch = "wasm32"))]

use std::rc::Rc;

use workflow_studio_frontend::state::WorkflowUiState;
use workflow_studio_frontend::storage::{MemoryBackend, StorageBackend};
use workflow_studio_frontend::toast::{self, NullToastHost, ToastManager};

fn shared_backend() -> (Rc<MemoryBackend>, Rc<dyn StorageBackend>) {
    let backend = Rc::new(MemoryBackend::default());
    let erased: Rc<dyn StorageBackend> = backend.clone();
    (backend, erased)
}

#[test]
fn layout_survives_a_reload() {
    let (raw, backend) = shared_backend();

    {
        let mut session = WorkflowUiState::new(backend.clone());
        session.set_node_panel_width(512.0);
        session.set_preview_panel_width(358.5);
        session.set_variable_inspect_panel_height(222.0);
        session.set_maximize_canvas(true);
        session.set_show_env_panel(true);
        session.set_right_panel_width(Some(900.0));
    }

    // Durable values sit in storage in their display form.
    assert_eq!(raw.get("workflow-node-panel-width").as_deref(), Some("512"));
    assert_eq!(
        raw.get("debug-and-preview-panel-width").as_deref(),
        Some("358.5")
    );
    assert_eq!(
        raw.get("workflow-variable-inpsect-panel-height").as_deref(),
        Some("222")
    );
    assert_eq!(raw.get("workflow-canvas-maximize").as_deref(), Some("true"));

    let rebooted = WorkflowUiState::new(backend);

    // Durable geometry came back; panel_width shares the node-width key and
    // follows it after a reload.
    assert_eq!(rebooted.node_panel_width(), 512.0);
    assert_eq!(rebooted.panel_width(), 512.0);
    assert_eq!(rebooted.preview_panel_width(), 358.5);
    assert_eq!(rebooted.variable_inspect_panel_height(), 222.0);
    assert!(rebooted.maximize_canvas());

    // Session-only state did not.
    assert!(!rebooted.show_env_panel());
    assert_eq!(rebooted.right_panel_width(), None);
    assert_eq!(rebooted.computed_node_panel_width(), 512.0);
}

#[test]
fn corrupted_saved_values_fall_back_to_defaults() {
    let backend = Rc::new(
        MemoryBackend::default()
            .seed("debug-and-preview-panel-width", "garbage")
            .seed("workflow-canvas-maximize", "TRUE"),
    );
    let session = WorkflowUiState::new(backend);

    assert_eq!(session.preview_panel_width(), 400.0);
    // Boolean restore is exact-match on "true"; any other spelling is false.
    assert!(!session.maximize_canvas());
}

#[test]
fn headless_toasts_stay_inert_across_a_session() {
    let manager = ToastManager::new(Box::new(NullToastHost)).into_shared();

    let handle = toast::error(&manager, "workflow failed");
    assert!(handle.is_inert());
    assert_eq!(manager.borrow().active_count(), 0);

    // Both teardown paths remain callable on an inert handle.
    handle.clear();
    handle.clear();
    toast::clear_all(&manager);
    assert_eq!(manager.borrow().active_count(), 0);
}
