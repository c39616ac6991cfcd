//! Keyboard helpers: platform detection plus the Mac-specific key-name and
//! key-code mappings used when rendering and matching shortcuts.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Where "what platform is this?" comes from. The browser implementation
/// reports the user agent; tests inject fixed strings.
pub trait HostPlatform {
    fn platform_id(&self) -> String;
}

/// Reads `navigator.userAgent`; empty when there is no window to ask.
pub struct BrowserPlatform;

impl BrowserPlatform {
    pub fn new() -> Self {
        BrowserPlatform
    }
}

impl HostPlatform for BrowserPlatform {
    fn platform_id(&self) -> String {
        web_sys::window()
            .and_then(|w| w.navigator().user_agent().ok())
            .unwrap_or_default()
    }
}

/// Fixed platform string, for tests and non-browser embedding.
pub struct StaticPlatform(pub String);

impl StaticPlatform {
    pub fn new(platform_id: impl Into<String>) -> Self {
        StaticPlatform(platform_id.into())
    }
}

impl HostPlatform for StaticPlatform {
    fn platform_id(&self) -> String {
        self.0.clone()
    }
}

lazy_static! {
    /// Modifier glyphs shown on Mac keyboards.
    static ref SPECIAL_KEY_NAMES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("ctrl", "\u{2318}");
        m.insert("alt", "\u{2325}");
        m.insert("shift", "\u{21e7}");
        m
    };

    /// Event key codes that differ on Mac keyboards.
    static ref SPECIAL_KEY_CODES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("ctrl", "meta");
        m
    };
}

/// True when the reported platform mentions "MAC" in any casing.
pub fn is_mac_platform(platform: &dyn HostPlatform) -> bool {
    platform.platform_id().to_uppercase().contains("MAC")
}

/// The name to render for `key` on this platform: Mac swaps the modifier
/// glyphs in, everything else passes through unchanged.
pub fn key_display_name<'a>(platform: &dyn HostPlatform, key: &'a str) -> &'a str {
    if is_mac_platform(platform) {
        if let Some(mapped) = SPECIAL_KEY_NAMES.get(key) {
            return mapped;
        }
    }
    key
}

/// The key code to match events against: Macs route ctrl-combos through the
/// command (meta) key.
pub fn key_code<'a>(platform: &dyn HostPlatform, key: &'a str) -> &'a str {
    if is_mac_platform(platform) {
        if let Some(mapped) = SPECIAL_KEY_CODES.get(key) {
            return mapped;
        }
    }
    key
}
