//! Cosmetic behaviour of the pages: mobile menu, smooth scrolling, reveal
//! animations, the image slider and the contact form.

use crate::{
    dom::{
        add_classes, by_id, document, listen, remove_classes, select, select_all, set_style,
        set_timeout, win,
    },
    error::FrontError,
};
use showroom_common::slider::Slider;
use std::{cell::RefCell, rc::Rc};
use tracing::{debug, warn};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{
    Element, HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

/// Toggle the menu on small screens
pub fn mobile_menu() {
    let (button, menu) = match (by_id("mobile-menu-button"), by_id("mobile-menu")) {
        (Some(button), Some(menu)) => (button, menu),
        _ => return,
    };
    listen(&button, "click", move |_| {
        let body = document().ok().and_then(|d| d.body());
        if menu.class_list().contains("hidden") {
            remove_classes(&menu, &["hidden"]);
            let menu = menu.clone();
            set_timeout(10, move || remove_classes(&menu, &["scale-y-0"]));
            if let Some(body) = body {
                add_classes(&body, &["mobile-menu-open"]);
            }
        } else {
            add_classes(&menu, &["scale-y-0"]);
            let menu = menu.clone();
            set_timeout(300, move || add_classes(&menu, &["hidden"]));
            if let Some(body) = body {
                remove_classes(&body, &["mobile-menu-open"]);
            }
        }
    });
}

fn scroll_to(target: &Element) {
    let mut options = ScrollIntoViewOptions::new();
    options.behavior(ScrollBehavior::Smooth);
    options.block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Smooth scrolling for links to anchors of the same page
pub fn smooth_scroll() {
    for anchor in select_all(r##"a[href^="#"]"##) {
        let href = match anchor.get_attribute("href") {
            Some(href) if href.len() > 1 => href,
            _ => continue,
        };
        listen(&anchor, "click", move |evt| {
            // Product ids are not valid selectors, so an invalid one just isn't an anchor
            if let Some(target) = select(&href) {
                evt.prevent_default();
                scroll_to(&target);
            }
        });
    }
}

/// Observer adding `animate-fadeIn` to observed elements when they scroll into view.
pub fn reveal_observer() -> Option<IntersectionObserver> {
    let callback = Closure::wrap(Box::new(|entries: js_sys::Array, _: JsValue| {
        for entry in entries.iter() {
            if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                if entry.is_intersecting() {
                    add_classes(&entry.target(), &["animate-fadeIn"]);
                }
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, JsValue)>);

    let mut options = IntersectionObserverInit::new();
    options.threshold(&JsValue::from_f64(0.1));
    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => {
            callback.forget();
            for element in select_all(".reveal") {
                observer.observe(&element);
            }
            Some(observer)
        }
        Err(e) => {
            warn!(
                "No IntersectionObserver, animations are disabled: {}",
                FrontError::from(e)
            );
            None
        }
    }
}

fn show_slide(slides: &[Element], dots: &[Element], slider: &Slider) {
    for (i, slide) in slides.iter().enumerate() {
        slide.class_list().toggle_with_force("active", slider.is_active(i)).ok();
        if let Some(dot) = dots.get(i) {
            dot.class_list().toggle_with_force("active", slider.is_active(i)).ok();
        }
    }
}

/// Image slider with previous/next buttons and one dot per slide
pub fn slider() {
    let slides = Rc::new(select_all(".slide"));
    let dots = Rc::new(select_all(".dot"));
    let slider = match Slider::new(slides.len()) {
        Some(slider) if !dots.is_empty() => Rc::new(RefCell::new(slider)),
        _ => return,
    };
    show_slide(&slides, &dots, &slider.borrow());

    let step = |selector: &str, forward: bool| {
        if let Some(button) = select(selector) {
            let (slides, dots, slider) = (slides.clone(), dots.clone(), slider.clone());
            listen(&button, "click", move |_| {
                let mut slider = slider.borrow_mut();
                if forward {
                    slider.next();
                } else {
                    slider.prev();
                }
                show_slide(&slides, &dots, &slider);
            });
        }
    };
    step(".slider-btn.prev", false);
    step(".slider-btn.next", true);

    for (index, dot) in dots.iter().enumerate() {
        let (slides, dots, slider) = (slides.clone(), dots.clone(), slider.clone());
        listen(dot, "click", move |_| {
            let mut slider = slider.borrow_mut();
            slider.go(index);
            show_slide(&slides, &dots, &slider);
        });
    }
}

/// Landing page: the down arrow reveals the lower section, pictures fade in one by one.
pub fn landing() {
    if let Some(more) = by_id("more-content") {
        remove_classes(&more, &["visible"]);
        if let Some(arrow) = by_id("down-arrow") {
            listen(&arrow, "click", move |_| {
                add_classes(&more, &["visible"]);
                scroll_to(&more);
            });
        }
    }

    for (index, image) in select_all(".images img").into_iter().enumerate() {
        set_style(&image, "opacity", "0");
        set_timeout(400 + index as u32 * 300, move || {
            set_style(&image, "transition", "opacity 1s");
            set_style(&image, "opacity", "1");
        });
    }
}

/// Sends the contact form through the visitor's mail client.
pub fn contact_form(contact_email: Option<String>) {
    let form = match by_id("contact-form") {
        Some(form) => form,
        None => return,
    };
    let to = match contact_email {
        Some(to) => to,
        None => {
            debug!("No contact address configured, the contact form posts normally");
            return;
        }
    };
    listen(&form, "submit", move |evt| {
        evt.prevent_default();
        let message = by_id("message")
            .and_then(|m| m.dyn_into::<HtmlTextAreaElement>().ok())
            .map(|m| m.value())
            .unwrap_or_default();
        let link = format!(
            "mailto:{}?subject={}&body={}",
            to,
            String::from(js_sys::encode_uri_component(
                "Message from Website Contact Form"
            )),
            String::from(js_sys::encode_uri_component(&message))
        );
        if let Err(e) = win().and_then(|w| Ok(w.location().set_href(&link)?)) {
            warn!("Couldn't open the mail client: {}", e);
        }
    });
}
