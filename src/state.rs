//! UI session state for the workflow editor.
//!
//! One `WorkflowUiState` instance lives for the lifetime of an editor
//! session. Construction is explicit and takes the storage capability, so an
//! embedder (or a test) can run any number of independent instances side by
//! side. Everything here runs on the UI thread; there is no interior
//! locking and no hidden global.
//!
//! Fields are private on purpose: each one is written by exactly one setter,
//! and the setters of the four durable fields are the only code that writes
//! their storage keys.

use std::rc::Rc;

use crate::constants::{
    CANVAS_MAXIMIZE_KEY, DEFAULT_BOTTOM_PANEL_HEIGHT, DEFAULT_BOTTOM_PANEL_WIDTH,
    DEFAULT_NODE_PANEL_WIDTH, DEFAULT_OTHER_PANEL_WIDTH, DEFAULT_PANEL_WIDTH,
    DEFAULT_PREVIEW_PANEL_WIDTH, DEFAULT_VARIABLE_INSPECT_PANEL_HEIGHT, NODE_PANEL_WIDTH_KEY,
    PREVIEW_PANEL_WIDTH_KEY, VARIABLE_INSPECT_PANEL_HEIGHT_KEY,
};
use crate::models::WorkflowRunningData;
use crate::storage::{
    get_persisted_boolean, get_persisted_number, set_persisted, StorageBackend,
};

/// Anchor for the floating panel context menu, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelMenuPosition {
    pub top: f64,
    pub left: f64,
}

pub struct WorkflowUiState {
    storage: Rc<dyn StorageBackend>,

    // Panel visibility
    show_features_panel: bool,
    show_workflow_version_history_panel: bool,
    show_inputs_panel: bool,
    show_debug_and_preview_panel: bool,
    show_variable_inspect_panel: bool,
    show_env_panel: bool,
    init_show_last_run_tab: bool,
    panel_menu: Option<PanelMenuPosition>,

    // Panel geometry. Sizes are raw pixel values straight from the drag
    // handlers; nothing here clamps or validates them.
    panel_width: f64,
    node_panel_width: f64,
    preview_panel_width: f64,
    other_panel_width: f64,
    bottom_panel_width: f64,
    bottom_panel_height: f64,
    variable_inspect_panel_height: f64,
    maximize_canvas: bool,
    workflow_canvas_width: Option<f64>,
    workflow_canvas_height: Option<f64>,
    right_panel_width: Option<f64>,

    // Latest run result shown in the preview panel, kept as delivered.
    workflow_running_data: Option<WorkflowRunningData>,

    // True while a draft restore is in flight.
    is_restoring: bool,
}

impl WorkflowUiState {
    /// Build a fresh session, restoring the durable layout values from
    /// `storage`. `panel_width` and `node_panel_width` share a stored value
    /// but keep their own defaults; only the node panel writes the key back.
    pub fn new(storage: Rc<dyn StorageBackend>) -> Self {
        let panel_width =
            get_persisted_number(&*storage, NODE_PANEL_WIDTH_KEY, DEFAULT_PANEL_WIDTH);
        let node_panel_width =
            get_persisted_number(&*storage, NODE_PANEL_WIDTH_KEY, DEFAULT_NODE_PANEL_WIDTH);
        let preview_panel_width =
            get_persisted_number(&*storage, PREVIEW_PANEL_WIDTH_KEY, DEFAULT_PREVIEW_PANEL_WIDTH);
        let variable_inspect_panel_height = get_persisted_number(
            &*storage,
            VARIABLE_INSPECT_PANEL_HEIGHT_KEY,
            DEFAULT_VARIABLE_INSPECT_PANEL_HEIGHT,
        );
        let maximize_canvas = get_persisted_boolean(&*storage, CANVAS_MAXIMIZE_KEY, false);

        WorkflowUiState {
            storage,
            show_features_panel: false,
            show_workflow_version_history_panel: false,
            show_inputs_panel: false,
            show_debug_and_preview_panel: false,
            show_variable_inspect_panel: false,
            show_env_panel: false,
            init_show_last_run_tab: false,
            panel_menu: None,
            panel_width,
            node_panel_width,
            preview_panel_width,
            other_panel_width: DEFAULT_OTHER_PANEL_WIDTH,
            bottom_panel_width: DEFAULT_BOTTOM_PANEL_WIDTH,
            bottom_panel_height: DEFAULT_BOTTOM_PANEL_HEIGHT,
            variable_inspect_panel_height,
            maximize_canvas,
            workflow_canvas_width: None,
            workflow_canvas_height: None,
            right_panel_width: None,
            workflow_running_data: None,
            is_restoring: false,
        }
    }

    // -----------------------------------------------------------------------
    // Panel visibility
    // -----------------------------------------------------------------------

    pub fn show_features_panel(&self) -> bool {
        self.show_features_panel
    }

    pub fn set_show_features_panel(&mut self, show: bool) {
        self.show_features_panel = show;
    }

    pub fn show_workflow_version_history_panel(&self) -> bool {
        self.show_workflow_version_history_panel
    }

    pub fn set_show_workflow_version_history_panel(&mut self, show: bool) {
        self.show_workflow_version_history_panel = show;
    }

    pub fn show_inputs_panel(&self) -> bool {
        self.show_inputs_panel
    }

    pub fn set_show_inputs_panel(&mut self, show: bool) {
        self.show_inputs_panel = show;
    }

    pub fn show_debug_and_preview_panel(&self) -> bool {
        self.show_debug_and_preview_panel
    }

    pub fn set_show_debug_and_preview_panel(&mut self, show: bool) {
        self.show_debug_and_preview_panel = show;
    }

    pub fn show_variable_inspect_panel(&self) -> bool {
        self.show_variable_inspect_panel
    }

    pub fn set_show_variable_inspect_panel(&mut self, show: bool) {
        self.show_variable_inspect_panel = show;
    }

    pub fn show_env_panel(&self) -> bool {
        self.show_env_panel
    }

    pub fn set_show_env_panel(&mut self, show: bool) {
        self.show_env_panel = show;
    }

    /// Whether the preview panel should open straight onto the last-run tab.
    pub fn init_show_last_run_tab(&self) -> bool {
        self.init_show_last_run_tab
    }

    pub fn set_init_show_last_run_tab(&mut self, show: bool) {
        self.init_show_last_run_tab = show;
    }

    pub fn panel_menu(&self) -> Option<PanelMenuPosition> {
        self.panel_menu
    }

    pub fn set_panel_menu(&mut self, menu: Option<PanelMenuPosition>) {
        self.panel_menu = menu;
    }

    // -----------------------------------------------------------------------
    // Panel geometry
    // -----------------------------------------------------------------------

    pub fn panel_width(&self) -> f64 {
        self.panel_width
    }

    pub fn set_panel_width(&mut self, width: f64) {
        self.panel_width = width;
    }

    pub fn node_panel_width(&self) -> f64 {
        self.node_panel_width
    }

    pub fn set_node_panel_width(&mut self, width: f64) {
        self.node_panel_width = width;
        let _ = set_persisted(&*self.storage, NODE_PANEL_WIDTH_KEY, width);
    }

    pub fn preview_panel_width(&self) -> f64 {
        self.preview_panel_width
    }

    pub fn set_preview_panel_width(&mut self, width: f64) {
        self.preview_panel_width = width;
        let _ = set_persisted(&*self.storage, PREVIEW_PANEL_WIDTH_KEY, width);
    }

    pub fn other_panel_width(&self) -> f64 {
        self.other_panel_width
    }

    pub fn set_other_panel_width(&mut self, width: f64) {
        self.other_panel_width = width;
    }

    pub fn bottom_panel_width(&self) -> f64 {
        self.bottom_panel_width
    }

    pub fn set_bottom_panel_width(&mut self, width: f64) {
        self.bottom_panel_width = width;
    }

    pub fn bottom_panel_height(&self) -> f64 {
        self.bottom_panel_height
    }

    pub fn set_bottom_panel_height(&mut self, height: f64) {
        self.bottom_panel_height = height;
    }

    pub fn variable_inspect_panel_height(&self) -> f64 {
        self.variable_inspect_panel_height
    }

    pub fn set_variable_inspect_panel_height(&mut self, height: f64) {
        self.variable_inspect_panel_height = height;
        let _ = set_persisted(&*self.storage, VARIABLE_INSPECT_PANEL_HEIGHT_KEY, height);
    }

    pub fn maximize_canvas(&self) -> bool {
        self.maximize_canvas
    }

    pub fn set_maximize_canvas(&mut self, maximize: bool) {
        self.maximize_canvas = maximize;
        let _ = set_persisted(&*self.storage, CANVAS_MAXIMIZE_KEY, maximize);
    }

    pub fn workflow_canvas_width(&self) -> Option<f64> {
        self.workflow_canvas_width
    }

    pub fn set_workflow_canvas_width(&mut self, width: Option<f64>) {
        self.workflow_canvas_width = width;
    }

    pub fn workflow_canvas_height(&self) -> Option<f64> {
        self.workflow_canvas_height
    }

    pub fn set_workflow_canvas_height(&mut self, height: Option<f64>) {
        self.workflow_canvas_height = height;
    }

    pub fn right_panel_width(&self) -> Option<f64> {
        self.right_panel_width
    }

    pub fn set_right_panel_width(&mut self, width: Option<f64>) {
        self.right_panel_width = width;
    }

    /// Width the node panel should render at. Once the right-hand panel has
    /// been measured this is the measured width minus the width reserved for
    /// the other panel (zero and negative results included); until then it
    /// falls back to the stored node panel width. Derived on every call so
    /// it can never go stale against its inputs.
    pub fn computed_node_panel_width(&self) -> f64 {
        match self.right_panel_width {
            Some(right) => right - self.other_panel_width,
            None => self.node_panel_width,
        }
    }

    // -----------------------------------------------------------------------
    // Run data / restore flag
    // -----------------------------------------------------------------------

    pub fn workflow_running_data(&self) -> Option<&WorkflowRunningData> {
        self.workflow_running_data.as_ref()
    }

    pub fn set_workflow_running_data(&mut self, data: Option<WorkflowRunningData>) {
        self.workflow_running_data = data;
    }

    pub fn is_restoring(&self) -> bool {
        self.is_restoring
    }

    pub fn set_is_restoring(&mut self, restoring: bool) {
        self.is_restoring = restoring;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RunResult, WorkflowRunningStatus};
    use crate::storage::{MemoryBackend, StorageError};
    use proptest::prelude::*;

    fn fresh_state() -> WorkflowUiState {
        WorkflowUiState::new(Rc::new(MemoryBackend::new()))
    }

    /// Backend whose writes always fail, standing in for a full or
    /// unavailable storage area.
    struct RejectingBackend;

    impl StorageBackend for RejectingBackend {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn defaults_match_initial_layout() {
        let state = fresh_state();
        assert_eq!(state.panel_width(), 420.0);
        assert_eq!(state.node_panel_width(), 400.0);
        assert_eq!(state.preview_panel_width(), 400.0);
        assert_eq!(state.other_panel_width(), 400.0);
        assert_eq!(state.bottom_panel_width(), 480.0);
        assert_eq!(state.bottom_panel_height(), 324.0);
        assert_eq!(state.variable_inspect_panel_height(), 320.0);
        assert!(!state.maximize_canvas());
        assert_eq!(state.workflow_canvas_width(), None);
        assert_eq!(state.workflow_canvas_height(), None);
        assert_eq!(state.right_panel_width(), None);
        assert_eq!(state.panel_menu(), None);
        assert!(state.workflow_running_data().is_none());
        assert!(!state.is_restoring());
    }

    #[test]
    fn visibility_flags_default_false_and_flip() {
        let mut state = fresh_state();
        assert!(!state.show_features_panel());
        assert!(!state.show_workflow_version_history_panel());
        assert!(!state.show_inputs_panel());
        assert!(!state.show_debug_and_preview_panel());
        assert!(!state.show_variable_inspect_panel());
        assert!(!state.show_env_panel());
        assert!(!state.init_show_last_run_tab());

        state.set_show_features_panel(true);
        state.set_show_workflow_version_history_panel(true);
        state.set_show_inputs_panel(true);
        state.set_show_debug_and_preview_panel(true);
        state.set_show_variable_inspect_panel(true);
        state.set_show_env_panel(true);
        state.set_init_show_last_run_tab(true);

        assert!(state.show_features_panel());
        assert!(state.show_workflow_version_history_panel());
        assert!(state.show_inputs_panel());
        assert!(state.show_debug_and_preview_panel());
        assert!(state.show_variable_inspect_panel());
        assert!(state.show_env_panel());
        assert!(state.init_show_last_run_tab());
    }

    #[test]
    fn restores_durable_fields_from_storage() {
        let backend = MemoryBackend::new()
            .seed("workflow-node-panel-width", "333")
            .seed("debug-and-preview-panel-width", "500.5")
            .seed("workflow-variable-inpsect-panel-height", "250")
            .seed("workflow-canvas-maximize", "true");
        let state = WorkflowUiState::new(Rc::new(backend));

        // The shared key feeds both widths once a value exists.
        assert_eq!(state.panel_width(), 333.0);
        assert_eq!(state.node_panel_width(), 333.0);
        assert_eq!(state.preview_panel_width(), 500.5);
        assert_eq!(state.variable_inspect_panel_height(), 250.0);
        assert!(state.maximize_canvas());
    }

    #[test]
    fn shared_key_keeps_separate_defaults() {
        let state = fresh_state();
        assert_eq!(state.panel_width(), 420.0);
        assert_eq!(state.node_panel_width(), 400.0);
    }

    #[test]
    fn persisted_setters_write_through() {
        let backend = Rc::new(MemoryBackend::new());
        let mut state = WorkflowUiState::new(backend.clone());

        state.set_node_panel_width(512.0);
        state.set_preview_panel_width(358.5);
        state.set_variable_inspect_panel_height(222.0);
        state.set_maximize_canvas(true);

        assert_eq!(backend.get("workflow-node-panel-width").as_deref(), Some("512"));
        assert_eq!(backend.get("debug-and-preview-panel-width").as_deref(), Some("358.5"));
        assert_eq!(
            backend.get("workflow-variable-inpsect-panel-height").as_deref(),
            Some("222")
        );
        assert_eq!(backend.get("workflow-canvas-maximize").as_deref(), Some("true"));
    }

    #[test]
    fn maximize_canvas_round_trips_through_storage() {
        let backend = Rc::new(MemoryBackend::new());
        let mut state = WorkflowUiState::new(backend.clone());

        state.set_maximize_canvas(true);
        assert!(WorkflowUiState::new(backend.clone()).maximize_canvas());

        state.set_maximize_canvas(false);
        assert_eq!(backend.get("workflow-canvas-maximize").as_deref(), Some("false"));
        assert!(!WorkflowUiState::new(backend).maximize_canvas());
    }

    #[test]
    fn reads_own_writes_even_when_storage_rejects() {
        let mut state = WorkflowUiState::new(Rc::new(RejectingBackend));
        state.set_node_panel_width(555.0);
        state.set_maximize_canvas(true);
        assert_eq!(state.node_panel_width(), 555.0);
        assert!(state.maximize_canvas());
    }

    #[test]
    fn transient_setters_do_not_touch_storage() {
        let backend = Rc::new(MemoryBackend::new());
        let mut state = WorkflowUiState::new(backend.clone());

        state.set_panel_width(600.0);
        state.set_other_panel_width(450.0);
        state.set_bottom_panel_width(700.0);
        state.set_bottom_panel_height(-10.0);

        assert_eq!(state.panel_width(), 600.0);
        assert_eq!(state.bottom_panel_height(), -10.0);
        assert!(backend.get("workflow-node-panel-width").is_none());
    }

    #[test]
    fn computed_width_falls_back_until_measured() {
        let mut state = fresh_state();
        assert_eq!(state.computed_node_panel_width(), 400.0);

        state.set_node_panel_width(480.0);
        assert_eq!(state.computed_node_panel_width(), 480.0);
    }

    #[test]
    fn computed_width_uses_measurement_when_present() {
        let mut state = fresh_state();
        state.set_right_panel_width(Some(1000.0));
        assert_eq!(state.computed_node_panel_width(), 600.0);

        // Narrower than the reserved width: the difference goes negative
        // rather than clamping.
        state.set_right_panel_width(Some(300.0));
        assert_eq!(state.computed_node_panel_width(), -100.0);

        state.set_right_panel_width(Some(400.0));
        assert_eq!(state.computed_node_panel_width(), 0.0);

        state.set_right_panel_width(None);
        assert_eq!(state.computed_node_panel_width(), state.node_panel_width());
    }

    #[test]
    fn computed_width_tracks_latest_inputs() {
        let mut state = fresh_state();
        state.set_right_panel_width(Some(900.0));
        state.set_other_panel_width(200.0);
        assert_eq!(state.computed_node_panel_width(), 700.0);

        state.set_other_panel_width(350.0);
        assert_eq!(state.computed_node_panel_width(), 550.0);
    }

    #[test]
    fn panel_menu_opens_and_clears() {
        let mut state = fresh_state();
        state.set_panel_menu(Some(PanelMenuPosition { top: 24.0, left: 128.0 }));
        assert_eq!(
            state.panel_menu(),
            Some(PanelMenuPosition { top: 24.0, left: 128.0 })
        );
        state.set_panel_menu(None);
        assert_eq!(state.panel_menu(), None);
    }

    #[test]
    fn run_data_is_stored_and_cleared_as_given() {
        let mut state = fresh_state();
        let data = WorkflowRunningData {
            result: RunResult {
                status: WorkflowRunningStatus::Succeeded,
                finished_at: Some(1_700_000_000),
                ..RunResult::default()
            },
            ..WorkflowRunningData::default()
        };

        state.set_workflow_running_data(Some(data));
        let held = state.workflow_running_data().unwrap();
        assert_eq!(held.result.status, WorkflowRunningStatus::Succeeded);
        assert_eq!(held.result.finished_at, Some(1_700_000_000));

        state.set_workflow_running_data(None);
        assert!(state.workflow_running_data().is_none());
    }

    #[test]
    fn restore_flag_toggles() {
        let mut state = fresh_state();
        state.set_is_restoring(true);
        assert!(state.is_restoring());
        state.set_is_restoring(false);
        assert!(!state.is_restoring());
    }

    #[test]
    fn computed_width_is_difference_for_any_measurement() {
        let mut runner = proptest::test_runner::TestRunner::default();
        let strategy = (
            proptest::option::of(-10_000.0f64..10_000.0),
            -10_000.0f64..10_000.0,
            -10_000.0f64..10_000.0,
        );

        runner
            .run(&strategy, |(right, other, node)| {
                let mut state = WorkflowUiState::new(Rc::new(MemoryBackend::new()));
                state.set_right_panel_width(right);
                state.set_other_panel_width(other);
                state.set_node_panel_width(node);

                let expected = match right {
                    Some(r) => r - other,
                    None => node,
                };
                prop_assert_eq!(state.computed_node_panel_width(), expected);
                Ok(())
            })
            .expect("property test failed");
    }
}
