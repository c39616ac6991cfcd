//! Persisted scalar storage.
//!
//! A handful of layout values survive a reload. All access goes through the
//! `StorageBackend` capability so the session store never reaches for the
//! browser directly: the application wires in `LocalStorageBackend`, tests
//! and headless embedders wire in `MemoryBackend`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Backend capability
// ---------------------------------------------------------------------------

pub trait StorageBackend {
    /// Raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, synchronously. The only failure mode is
    /// the host refusing the write (quota, privacy mode, no storage area).
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The host exposes no storage area at all.
    Unavailable,
    /// The storage area rejected the write.
    WriteRejected(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "no storage area available"),
            StorageError::WriteRejected(detail) => {
                write!(f, "storage write rejected: {}", detail)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Browser backend
// ---------------------------------------------------------------------------

/// `window.localStorage`. Failed reads behave as "nothing stored"; failed
/// writes are reported to the console here so callers can stay best-effort.
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    pub fn new() -> Self {
        LocalStorageBackend
    }

    fn area(&self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(area) => area,
            Err(_) => None,
        }
    }
}

impl StorageBackend for LocalStorageBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.area()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self.area() {
            Some(area) => area.set_item(key, value).map_err(|e| {
                web_sys::console::warn_1(
                    &format!("localStorage write failed for '{}': {:?}", key, e).into(),
                );
                StorageError::WriteRejected(format!("{:?}", e))
            }),
            None => Err(StorageError::Unavailable),
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// Plain map-backed storage for tests and headless embedding.
#[derive(Default)]
pub struct MemoryBackend {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, mimicking a value left behind by an earlier
    /// session.
    pub fn seed(self, key: &str, value: &str) -> Self {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Persisted scalar accessors
// ---------------------------------------------------------------------------

/// Read a persisted number. Absent and empty values fall back to `default`,
/// as does a value with no numeric prefix at all. Anything else is parsed
/// leniently: the longest numeric prefix wins and trailing junk is ignored,
/// so a value like `"416px"` still restores as 416. Values written by
/// [`set_persisted`] always round-trip.
pub fn get_persisted_number(storage: &dyn StorageBackend, key: &str, default: f64) -> f64 {
    match storage.get(key) {
        Some(raw) if !raw.is_empty() => parse_number_prefix(&raw).unwrap_or(default),
        _ => default,
    }
}

/// Read a persisted flag. Absent falls back to `default`; any present value
/// is compared against the literal string `"true"`.
pub fn get_persisted_boolean(storage: &dyn StorageBackend, key: &str, default: bool) -> bool {
    match storage.get(key) {
        Some(raw) => raw == "true",
        None => default,
    }
}

/// Write a value in its display form (`420` / `true`). Best-effort: callers
/// that can keep working without persistence ignore the error.
pub fn set_persisted<T: ToString>(
    storage: &dyn StorageBackend,
    key: &str,
    value: T,
) -> Result<(), StorageError> {
    storage.set(key, &value.to_string())
}

/// Longest-numeric-prefix float parse: optional leading whitespace and sign,
/// digits with an optional fraction and exponent. `None` when there are no
/// digits where the number should start.
fn parse_number_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - int_start;

    let mut frac_digits = 0;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut scan = end + 1;
        while scan < bytes.len() && bytes[scan].is_ascii_digit() {
            scan += 1;
        }
        frac_digits = scan - (end + 1);
        // "416." and ".5" are numbers, a bare "." is not.
        if int_digits > 0 || frac_digits > 0 {
            end = scan;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // The exponent only counts when digits follow the marker, otherwise
    // "5e" parses as 5 with "e" as trailing junk.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut scan = end + 1;
        if scan < bytes.len() && (bytes[scan] == b'+' || bytes[scan] == b'-') {
            scan += 1;
        }
        let exp_start = scan;
        while scan < bytes.len() && bytes[scan].is_ascii_digit() {
            scan += 1;
        }
        if scan > exp_start {
            end = scan;
        }
    }

    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn number_read_after_write() {
        let storage = MemoryBackend::new();
        set_persisted(&storage, "w", 416.5).unwrap();
        assert_eq!(get_persisted_number(&storage, "w", 400.0), 416.5);
    }

    #[test]
    fn number_absent_yields_default() {
        let storage = MemoryBackend::new();
        assert_eq!(get_persisted_number(&storage, "missing", 420.0), 420.0);
    }

    #[test]
    fn number_empty_yields_default() {
        let storage = MemoryBackend::new().seed("w", "");
        assert_eq!(get_persisted_number(&storage, "w", 420.0), 420.0);
    }

    #[test]
    fn number_prefix_parse_ignores_trailing_junk() {
        let storage = MemoryBackend::new().seed("w", "416px");
        assert_eq!(get_persisted_number(&storage, "w", 0.0), 416.0);
    }

    #[test]
    fn number_malformed_yields_default() {
        for raw in ["abc", ".", "-", "e5", "px416", "  "] {
            let storage = MemoryBackend::new().seed("w", raw);
            assert_eq!(get_persisted_number(&storage, "w", 42.0), 42.0, "raw={:?}", raw);
        }
    }

    #[test]
    fn number_prefix_parse_edge_shapes() {
        let cases = [
            (" 12.5rem", 12.5),
            (".5", 0.5),
            ("5.", 5.0),
            ("-60", -60.0),
            ("+3", 3.0),
            ("1e3", 1000.0),
            ("1e-2m", 0.01),
            ("5e", 5.0),
            ("5e+", 5.0),
            ("7.5.9", 7.5),
        ];
        for (raw, expected) in cases {
            let storage = MemoryBackend::new().seed("w", raw);
            assert_eq!(get_persisted_number(&storage, "w", 0.0), expected, "raw={:?}", raw);
        }
    }

    #[test]
    fn boolean_matches_literal_true_only() {
        for (raw, expected) in [("true", true), ("false", false), ("TRUE", false), ("1", false), ("", false)] {
            let storage = MemoryBackend::new().seed("b", raw);
            assert_eq!(get_persisted_boolean(&storage, "b", true), expected, "raw={:?}", raw);
        }
    }

    #[test]
    fn boolean_absent_yields_default() {
        let storage = MemoryBackend::new();
        assert!(get_persisted_boolean(&storage, "missing", true));
        assert!(!get_persisted_boolean(&storage, "missing", false));
    }

    #[test]
    fn set_persisted_writes_display_form() {
        let storage = MemoryBackend::new();
        set_persisted(&storage, "w", 420.0).unwrap();
        set_persisted(&storage, "on", true).unwrap();
        set_persisted(&storage, "off", false).unwrap();
        assert_eq!(storage.get("w").as_deref(), Some("420"));
        assert_eq!(storage.get("on").as_deref(), Some("true"));
        assert_eq!(storage.get("off").as_deref(), Some("false"));
    }

    /// Strategy covering the value range layout code actually stores:
    /// pixel-ish sizes with a fractional part, either sign.
    fn panel_size_strategy() -> impl Strategy<Value = f64> {
        (-100_000i32..100_000i32, 0u8..100u8)
            .prop_map(|(whole, cents)| f64::from(whole) + f64::from(cents) / 100.0)
    }

    #[test]
    fn persisted_numbers_round_trip() {
        let mut runner = proptest::test_runner::TestRunner::default();

        runner
            .run(&panel_size_strategy(), |value| {
                let storage = MemoryBackend::new();
                set_persisted(&storage, "w", value).unwrap();
                let restored = get_persisted_number(&storage, "w", f64::NAN);
                prop_assert!((restored - value).abs() < 1e-9);
                Ok(())
            })
            .expect("property test failed");
    }
}
