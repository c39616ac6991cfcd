//! dom_utils.rs – thin helpers for DOM checks the shortcut layer needs.

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

/// True when `el` is somewhere the user types: an input, a textarea, or any
/// content-editable element. Global shortcuts stay quiet there.
pub fn is_input_area(el: &Element) -> bool {
    let tag = el.node_name();
    if tag == "INPUT" || tag == "TEXTAREA" {
        return true;
    }
    el.dyn_ref::<HtmlElement>()
        .map_or(false, |el| el.is_content_editable())
}
