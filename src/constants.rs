// Default panel geometry - these are the single source of truth for initial layout values
pub const DEFAULT_PANEL_WIDTH: f64 = 420.0;
pub const DEFAULT_NODE_PANEL_WIDTH: f64 = 400.0;
pub const DEFAULT_PREVIEW_PANEL_WIDTH: f64 = 400.0;
pub const DEFAULT_OTHER_PANEL_WIDTH: f64 = 400.0;
pub const DEFAULT_BOTTOM_PANEL_WIDTH: f64 = 480.0;
pub const DEFAULT_BOTTOM_PANEL_HEIGHT: f64 = 324.0;
pub const DEFAULT_VARIABLE_INSPECT_PANEL_HEIGHT: f64 = 320.0;

// localStorage keys for layout state that survives a reload. These spellings
// are frozen: values already live under them in user profiles, so correcting
// the "inpsect" typo would silently discard saved heights.
pub const NODE_PANEL_WIDTH_KEY: &str = "workflow-node-panel-width";
pub const PREVIEW_PANEL_WIDTH_KEY: &str = "debug-and-preview-panel-width";
pub const VARIABLE_INSPECT_PANEL_HEIGHT_KEY: &str = "workflow-variable-inpsect-panel-height";
pub const CANVAS_MAXIMIZE_KEY: &str = "workflow-canvas-maximize";

// Toast defaults
pub const DEFAULT_TOAST_DURATION_MS: u32 = 4000;

// Longest run-error excerpt shown in a toast before truncation kicks in
pub const RUN_ERROR_PREVIEW_GRAPHEMES: usize = 160;

// Fallback label for a run that has not finished yet
pub const RUN_LABEL_FALLBACK: &str = "running";
