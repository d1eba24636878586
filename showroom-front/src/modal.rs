//! Modal dialogs: language chooser, terms, notice, about, and the product overlay.
//!
//! Opening removes `hidden` then fades in; closing fades out then hides the
//! modal once the CSS transition is over. Each opening bumps a counter on
//! the modal so a pending hide from an earlier close is dropped.

use crate::dom::{add_classes, by_id, listen, remove_classes, set_timeout};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget};

const CONTENT: &str = ".bg-white, .modal-content-product";
const GENERATION: &str = "data-modal-generation";

fn generation(modal: &Element) -> u32 {
    modal
        .get_attribute(GENERATION)
        .and_then(|g| g.parse().ok())
        .unwrap_or(0)
}

pub fn open_modal(modal: &Element) {
    let next = generation(modal).wrapping_add(1);
    modal.set_attribute(GENERATION, &next.to_string()).ok();
    remove_classes(modal, &["hidden"]);
    if let Ok(Some(content)) = modal.query_selector(CONTENT) {
        remove_classes(&content, &["animate-scale-out"]);
        add_classes(&content, &["animate-scale-in"]);
    }
    let modal = modal.clone();
    set_timeout(10, move || remove_classes(&modal, &["opacity-0"]));
}

pub fn close_modal(modal: &Element, delay_ms: u32) {
    if let Ok(Some(content)) = modal.query_selector(CONTENT) {
        remove_classes(&content, &["animate-scale-in"]);
        add_classes(&content, &["animate-scale-out"]);
    }
    add_classes(modal, &["opacity-0"]);
    let closing = generation(modal);
    let modal = modal.clone();
    set_timeout(delay_ms, move || {
        if generation(&modal) == closing {
            add_classes(&modal, &["hidden"]);
        }
    });
}

/// True when the click landed on the backdrop rather than on the dialog.
pub fn is_backdrop(evt: &Event, modal: &Element) -> bool {
    evt.target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .map_or(false, |t| &t == modal)
}

fn on_click<F>(id: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    if let Some(element) = by_id(id) {
        listen(&element, "click", handler);
    }
}

fn opens(trigger: &str, modal: &Option<Element>) {
    if let Some(modal) = modal.clone() {
        on_click(trigger, move |evt| {
            evt.prevent_default();
            open_modal(&modal);
        });
    }
}

fn closes(trigger: &str, modal: &Option<Element>, delay_ms: u32) {
    if let Some(modal) = modal.clone() {
        on_click(trigger, move |_| close_modal(&modal, delay_ms));
    }
}

/// Wires the dialogs found in the page, header and footer.
pub fn init(delay_ms: u32) {
    let lang = by_id("lang-modal");
    let terms = by_id("terms-modal");
    let notice = by_id("notice-modal");
    let about = by_id("about-modal");

    opens("open-lang-modal", &lang);
    opens("open-lang-modal-mobile", &lang);
    opens("terms-link", &terms);
    opens("notice-link", &notice);
    opens("footer-about-link", &about);

    closes("close-lang-modal", &lang, delay_ms);
    closes("close-terms-modal", &terms, delay_ms);
    closes("close-terms-modal-button", &terms, delay_ms);
    closes("close-notice-modal", &notice, delay_ms);
    closes("close-notice-modal-button", &notice, delay_ms);
    closes("close-about-modal", &about, delay_ms);
    closes("close-about-modal-button", &about, delay_ms);

    let modals: Vec<Element> = vec![lang, terms, notice, about]
        .into_iter()
        .flatten()
        .collect();
    if let Some(window) = web_sys::window() {
        let window: &EventTarget = window.as_ref();
        listen(window, "click", move |evt| {
            for modal in modals.iter().filter(|m| is_backdrop(&evt, m)) {
                close_modal(modal, delay_ms);
            }
        });
    }
}
