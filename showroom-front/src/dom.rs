//! Small helpers over `web-sys`, plus the DOM side of the localizer.

use crate::error::FrontError;
use showroom_common::{locale::TextSurface, storage::KeyValueStore, storage::MemoryStore};
use tracing::warn;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{window, Document, Element, Event, EventTarget, HtmlElement, Storage, Window};

pub fn win() -> Result<Window, FrontError> {
    window().ok_or_else(|| FrontError::Js("no window".to_owned()))
}

pub fn document() -> Result<Document, FrontError> {
    win()?
        .document()
        .ok_or_else(|| FrontError::Js("no document".to_owned()))
}

pub fn by_id(id: &str) -> Option<Element> {
    document().ok()?.get_element_by_id(id)
}

/// Every element matching `selector`, in document order.
pub fn select_all(selector: &str) -> Vec<Element> {
    let nodes = match document().and_then(|d| Ok(d.query_selector_all(selector)?)) {
        Ok(nodes) => nodes,
        Err(e) => {
            warn!("Invalid selector {}: {}", selector, e);
            return Vec::new();
        }
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

pub fn select(selector: &str) -> Option<Element> {
    document().ok()?.query_selector(selector).ok().flatten()
}

/// Registers `handler` for `event` on `target` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let handler = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    match target.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref()) {
        Ok(()) => handler.forget(),
        Err(e) => warn!("Couldn't listen to {}: {}", event, FrontError::from(e)),
    }
}

/// Runs `f` once after `ms` milliseconds.
pub fn set_timeout<F>(ms: u32, f: F)
where
    F: FnOnce() + 'static,
{
    let callback = Closure::once_into_js(f);
    let scheduled = win().and_then(|w| {
        Ok(w.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            ms as i32,
        )?)
    });
    if let Err(e) = scheduled {
        warn!("Couldn't schedule a timeout: {}", e);
    }
}

/// The element under the event, or its closest ancestor matching `selector`.
pub fn closest(evt: &Event, selector: &str) -> Option<Element> {
    evt.target()?
        .dyn_ref::<Element>()?
        .closest(selector)
        .ok()
        .flatten()
}

pub fn set_text(element: &Element, text: &str) {
    match element.dyn_ref::<HtmlElement>() {
        Some(html) => html.set_inner_text(text),
        None => element.set_text_content(Some(text)),
    }
}

pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        if let Err(e) = html.style().set_property(property, value) {
            warn!("Couldn't set {}: {}", property, FrontError::from(e));
        }
    }
}

/// Adds or removes CSS classes, ignoring failures (only raised for invalid tokens).
pub fn add_classes(element: &Element, classes: &[&str]) {
    for class in classes {
        element.class_list().add_1(class).ok();
    }
}

pub fn remove_classes(element: &Element, classes: &[&str]) {
    for class in classes {
        element.class_list().remove_1(class).ok();
    }
}

/// Elements carrying a `data-i18n` attribute.
pub struct DomSurface;

impl TextSurface for DomSurface {
    fn for_each_tagged(&self, translate: &mut dyn FnMut(&str) -> Option<String>) {
        for element in select_all("[data-i18n]") {
            if let Some(key) = element.get_attribute("data-i18n") {
                if let Some(text) = translate(&key) {
                    set_text(&element, &text);
                }
            }
        }
    }

    fn show_locale(&self, code: &str) {
        for span in select_all(".language-selector span") {
            set_text(&span, code);
        }
    }
}

/// `localStorage`, or page-lived storage when the browser refuses it.
pub struct BrowserStore {
    storage: Option<Storage>,
    fallback: MemoryStore,
}

impl BrowserStore {
    pub fn local() -> Self {
        let storage = win().ok().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            warn!("localStorage is unavailable, the language choice won't be remembered");
        }
        BrowserStore {
            storage,
            fallback: MemoryStore::default(),
        }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        match &self.storage {
            Some(storage) => storage.get_item(key).ok().flatten(),
            None => self.fallback.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> showroom_common::Result<()> {
        match &self.storage {
            Some(storage) => storage
                .set_item(key, value)
                .map_err(|e| showroom_common::Error::Storage(FrontError::from(e).to_string())),
            None => self.fallback.set(key, value),
        }
    }
}
