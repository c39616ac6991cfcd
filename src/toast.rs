//! Toast notifications.
//!
//! `ToastManager` owns an explicit registry of live toasts and a
//! `ToastHost` capability that does the actual mounting; the browser host
//! creates a `#toast-root` container once per page and appends toast divs,
//! while headless embedders get a host that refuses every mount, turning
//! notifications into silent no-ops.
//!
//! A toast can be torn down along two paths: its own dismiss trigger
//! (auto-dismiss timeout or a user action inside the rendered toast), which
//! runs the caller's `on_close`, or an explicit clear from outside
//! (`ToastHandle::clear` / `clear_all`), which does not. Both paths are
//! idempotent and may be interleaved freely.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element};

use crate::constants::DEFAULT_TOAST_DURATION_MS;

pub type SharedToastManager = Rc<RefCell<ToastManager>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
        }
    }
}

/// Everything a toast can be configured with. Build one with
/// [`ToastOptions::new`] and the `with_*` methods; fields left alone keep
/// their defaults (`duration_ms: None` means "use the standard duration",
/// an explicit 0 keeps the toast up until something clears it).
pub struct ToastOptions {
    pub kind: ToastKind,
    pub message: String,
    pub duration_ms: Option<u32>,
    /// Runs exactly once if the toast dismisses itself; never runs when the
    /// toast is cleared from outside (see [`ClearPolicy`] for the manager-
    /// wide variant).
    pub on_close: Option<Box<dyn FnOnce()>>,
}

impl Default for ToastOptions {
    fn default() -> Self {
        ToastOptions {
            kind: ToastKind::Info,
            message: String::new(),
            duration_ms: None,
            on_close: None,
        }
    }
}

impl ToastOptions {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        ToastOptions {
            kind,
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_kind(mut self, kind: ToastKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_on_close(mut self, on_close: impl FnOnce() + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }
}

/// Registry key for one live toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// What the host needs to render a toast. The close callback stays with the
/// manager.
pub struct ToastView<'a> {
    pub kind: ToastKind,
    pub message: &'a str,
    pub duration_ms: u32,
}

/// Single-shot capability handed to the host at mount time. Firing it routes
/// the toast's own dismissal (timeout, close button) back through the
/// manager so the close callback runs on exactly this path. Firing after the
/// toast is already gone is a no-op. Must not be fired synchronously from
/// inside `mount`/`unmount` – the manager is borrowed there.
pub struct DismissTrigger {
    manager: Weak<RefCell<ToastManager>>,
    id: ToastId,
}

impl DismissTrigger {
    pub fn fire(self) {
        if let Some(manager) = self.manager.upgrade() {
            dismiss(&manager, self.id);
        }
    }
}

/// Where toasts become visible. `mount` returns false when no display
/// surface exists; the manager then forgets the toast entirely. `unmount`
/// must tolerate ids it never mounted.
pub trait ToastHost {
    fn mount(&mut self, id: ToastId, view: &ToastView, dismiss: DismissTrigger) -> bool;
    fn unmount(&mut self, id: ToastId);
}

/// What a manager-wide [`clear_all`] does with the close callbacks of the
/// toasts it removes. Skipping them matches the asymmetry callers of the
/// original interface rely on: clear-all is a teardown, not a dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearPolicy {
    SkipCallbacks,
    InvokeCallbacks,
}

impl Default for ClearPolicy {
    fn default() -> Self {
        ClearPolicy::SkipCallbacks
    }
}

#[derive(PartialEq)]
enum ToastPhase {
    Mounted,
    Closing,
}

struct ToastEntry {
    phase: ToastPhase,
    on_close: Option<Box<dyn FnOnce()>>,
}

pub struct ToastManager {
    host: Box<dyn ToastHost>,
    entries: HashMap<ToastId, ToastEntry>,
    next_seq: u64,
    clear_policy: ClearPolicy,
}

impl ToastManager {
    pub fn new(host: Box<dyn ToastHost>) -> Self {
        Self::with_clear_policy(host, ClearPolicy::default())
    }

    pub fn with_clear_policy(host: Box<dyn ToastHost>, clear_policy: ClearPolicy) -> Self {
        ToastManager {
            host,
            entries: HashMap::new(),
            next_seq: 0,
            clear_policy,
        }
    }

    /// Wrap a manager for shared use; the free functions below all take the
    /// shared form so they can hand out weak handles.
    pub fn into_shared(self) -> SharedToastManager {
        Rc::new(RefCell::new(self))
    }

    pub fn active_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_active(&self, id: ToastId) -> bool {
        matches!(self.entries.get(&id), Some(entry) if entry.phase == ToastPhase::Mounted)
    }

    fn register(&mut self, on_close: Option<Box<dyn FnOnce()>>) -> ToastId {
        let id = ToastId(self.next_seq);
        self.next_seq += 1;
        self.entries.insert(
            id,
            ToastEntry {
                phase: ToastPhase::Mounted,
                on_close,
            },
        );
        id
    }

    fn mount(&mut self, id: ToastId, view: &ToastView, dismiss: DismissTrigger) -> bool {
        if self.host.mount(id, view, dismiss) {
            true
        } else {
            self.entries.remove(&id);
            false
        }
    }

    /// Unmount and drop one toast, surrendering its close callback to the
    /// caller (who either invokes or drops it, outside any borrow of the
    /// manager). Unknown and already-closing ids fall through as `None`.
    fn begin_teardown(&mut self, id: ToastId) -> Option<Box<dyn FnOnce()>> {
        match self.entries.get_mut(&id) {
            Some(entry) if entry.phase == ToastPhase::Mounted => {
                entry.phase = ToastPhase::Closing;
            }
            _ => return None,
        }
        self.host.unmount(id);
        self.entries.remove(&id).and_then(|entry| entry.on_close)
    }

    /// Unmount every toast (no guaranteed order) and empty the registry.
    /// Returns the callbacks to run, per the clear policy.
    fn begin_clear(&mut self) -> Vec<Box<dyn FnOnce()>> {
        let ids: Vec<ToastId> = self.entries.keys().copied().collect();
        let mut callbacks = Vec::new();
        for id in ids {
            self.host.unmount(id);
            if let Some(entry) = self.entries.remove(&id) {
                if self.clear_policy == ClearPolicy::InvokeCallbacks {
                    if let Some(on_close) = entry.on_close {
                        callbacks.push(on_close);
                    }
                }
            }
        }
        callbacks
    }
}

/// Caller-side handle for one toast: a weak clear capability. Inert when
/// the toast was never mounted (headless) – calling `clear` then, or after
/// the toast is already gone, or twice, does nothing.
pub struct ToastHandle {
    target: Option<(Weak<RefCell<ToastManager>>, ToastId)>,
}

impl ToastHandle {
    fn inert() -> Self {
        ToastHandle { target: None }
    }

    pub fn is_inert(&self) -> bool {
        self.target.is_none()
    }

    pub fn id(&self) -> Option<ToastId> {
        self.target.as_ref().map(|(_, id)| *id)
    }

    /// Remove the toast without running its close callback.
    pub fn clear(&self) {
        if let Some((manager, id)) = &self.target {
            if let Some(manager) = manager.upgrade() {
                // Take the callback out while borrowed, drop it after the
                // borrow ends: it may itself hold the manager.
                let undispatched = manager.borrow_mut().begin_teardown(*id);
                drop(undispatched);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Show a toast. Returns an inert handle when the host has nowhere to put
/// it.
pub fn notify(manager: &SharedToastManager, options: ToastOptions) -> ToastHandle {
    let ToastOptions {
        kind,
        message,
        duration_ms,
        on_close,
    } = options;
    let view = ToastView {
        kind,
        message: &message,
        duration_ms: duration_ms.unwrap_or(DEFAULT_TOAST_DURATION_MS),
    };

    let mut inner = manager.borrow_mut();
    let id = inner.register(on_close);
    let trigger = DismissTrigger {
        manager: Rc::downgrade(manager),
        id,
    };
    if inner.mount(id, &view, trigger) {
        ToastHandle {
            target: Some((Rc::downgrade(manager), id)),
        }
    } else {
        ToastHandle::inert()
    }
}

pub fn success(manager: &SharedToastManager, message: &str) -> ToastHandle {
    notify(manager, ToastOptions::new(ToastKind::Success, message))
}

pub fn error(manager: &SharedToastManager, message: &str) -> ToastHandle {
    notify(manager, ToastOptions::new(ToastKind::Error, message))
}

pub fn warning(manager: &SharedToastManager, message: &str) -> ToastHandle {
    notify(manager, ToastOptions::new(ToastKind::Warning, message))
}

pub fn info(manager: &SharedToastManager, message: &str) -> ToastHandle {
    notify(manager, ToastOptions::new(ToastKind::Info, message))
}

/// Like [`success`] with extra options. The severity and message arguments
/// always win over whatever `options` carries; everything else comes from
/// `options`.
pub fn success_with(
    manager: &SharedToastManager,
    message: &str,
    options: ToastOptions,
) -> ToastHandle {
    notify(manager, options.with_kind(ToastKind::Success).with_message(message))
}

pub fn error_with(
    manager: &SharedToastManager,
    message: &str,
    options: ToastOptions,
) -> ToastHandle {
    notify(manager, options.with_kind(ToastKind::Error).with_message(message))
}

pub fn warning_with(
    manager: &SharedToastManager,
    message: &str,
    options: ToastOptions,
) -> ToastHandle {
    notify(manager, options.with_kind(ToastKind::Warning).with_message(message))
}

pub fn info_with(
    manager: &SharedToastManager,
    message: &str,
    options: ToastOptions,
) -> ToastHandle {
    notify(manager, options.with_kind(ToastKind::Info).with_message(message))
}

/// Route a toast's own dismissal through the manager. This is the one path
/// that runs `on_close`.
pub fn dismiss(manager: &SharedToastManager, id: ToastId) {
    let callback = manager.borrow_mut().begin_teardown(id);
    if let Some(callback) = callback {
        callback();
    }
}

/// Tear down every live toast. Close callbacks run only under
/// [`ClearPolicy::InvokeCallbacks`], each at most once.
pub fn clear_all(manager: &SharedToastManager) {
    let callbacks = manager.borrow_mut().begin_clear();
    for callback in callbacks {
        callback();
    }
}

// ---------------------------------------------------------------------------
// Hosts
// ---------------------------------------------------------------------------

/// Browser host: toast divs under a `#toast-root` container, newest on top,
/// auto-dismissed through the trigger after the configured duration.
pub struct DomToastHost {
    elements: HashMap<ToastId, Element>,
}

impl DomToastHost {
    pub fn new() -> Self {
        DomToastHost {
            elements: HashMap::new(),
        }
    }
}

impl ToastHost for DomToastHost {
    fn mount(&mut self, id: ToastId, view: &ToastView, dismiss: DismissTrigger) -> bool {
        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(d) => d,
            None => return false,
        };
        let root = match ensure_root(&document) {
            Some(r) => r,
            None => return false,
        };
        let toast = match document.create_element("div") {
            Ok(el) => el,
            Err(_) => return false,
        };
        toast.set_id(&id.to_string());
        toast.set_class_name(&format!("toast toast-{}", view.kind.as_str()));
        toast.set_text_content(Some(view.message));

        // Prepend so newest appears on top.
        let _ = root.prepend_with_node_1(&toast);
        ensure_styles(&document);
        self.elements.insert(id, toast);

        if view.duration_ms > 0 {
            let duration_ms = view.duration_ms;
            spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(duration_ms).await;
                dismiss.fire();
            });
        }
        true
    }

    fn unmount(&mut self, id: ToastId) {
        if let Some(el) = self.elements.remove(&id) {
            if let Some(parent) = el.parent_node() {
                let _ = parent.remove_child(&el);
            }
        }
    }
}

/// Host for embeddings with no display surface at all: refuses every mount.
pub struct NullToastHost;

impl ToastHost for NullToastHost {
    fn mount(&mut self, _id: ToastId, _view: &ToastView, _dismiss: DismissTrigger) -> bool {
        false
    }

    fn unmount(&mut self, _id: ToastId) {}
}

fn ensure_root(document: &Document) -> Option<Element> {
    if let Some(el) = document.get_element_by_id("toast-root") {
        return Some(el);
    }
    let root = document.create_element("div").ok()?;
    root.set_id("toast-root");
    root.set_class_name("toast-root");
    document.body()?.append_child(&root).ok()?;
    Some(root)
}

fn ensure_styles(document: &Document) {
    if document.get_element_by_id("toast-styles").is_some() {
        return;
    }

    let css = "
.toast-root{position:fixed;top:16px;right:16px;display:flex;flex-direction:column;gap:8px;z-index:9999;font-family:Arial,Helvetica,sans-serif}
.toast{padding:10px 16px;border-radius:4px;color:#fff;box-shadow:0 2px 4px rgba(0,0,0,.1);opacity:0;animation:toast-in .2s forwards}
.toast-success{background:#16a34a}
.toast-error{background:#dc2626}
.toast-warning{background:#d97706}
.toast-info{background:#2563eb}
@keyframes toast-in{to{opacity:1}}
";

    let style = match document.create_element("style") {
        Ok(el) => el,
        Err(_) => return,
    };
    style.set_id("toast-styles");
    style.set_text_content(Some(css));
    match document.query_selector("head") {
        Ok(Some(head)) => {
            let _ = head.append_child(&style);
        }
        _ => {
            if let Some(body) = document.body() {
                let _ = body.append_child(&style);
            }
        }
    }
}
