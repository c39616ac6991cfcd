//! Small crate-wide convenience macros.

/// Acquire a **mutable** borrow from a `RefCell` (or `Rc<RefCell>`).
/// If another mutable borrow is still active the call panics – the standard
/// panic message emitted by `RefCell::borrow_mut()` is preserved to keep the
/// macro zero-cost.
///
/// ```rust,ignore
/// use std::cell::RefCell;
/// let cell = RefCell::new(1);
/// {
///     let mut n = mut_borrow!(cell);
///     *n += 1;
/// }
/// assert_eq!(*cell.borrow(), 2);
/// ```
#[macro_export]
macro_rules! mut_borrow {
    ($cell:expr) => {
        $cell.borrow_mut()
    };
}

/// Log a formatted message to the browser console in debug builds.
/// Release builds (and non-wasm targets, where there is no console to reach)
/// still evaluate the format arguments so the macro never changes what code
/// compiles, only whether anything is emitted.
///
/// ```rust,ignore
/// debug_log!("Restored panel width: {}", width);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        let msg = format!($($arg)*);
        #[cfg(all(target_arch = "wasm32", debug_assertions))]
        web_sys::console::log_1(&msg.into());
        #[cfg(not(all(target_arch = "wasm32", debug_assertions)))]
        let _ = msg;
    }};
}
