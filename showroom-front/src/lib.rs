use showroom_common::{
    config::{self, Config},
    locale::{LocaleTable, Localizer},
};
use std::{cell::RefCell, rc::Rc};
use tracing::{error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::dom::{select_all, BrowserStore, DomSurface};

mod dom;
mod error;
mod fetch;
mod fragment;
mod logging;
mod modal;
mod products;
mod ui;
mod view;

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    extern crate console_error_panic_hook;
    use std::panic;
    panic::set_hook(Box::new(console_error_panic_hook::hook));
    logging::init();

    let document = dom::document().map_err(|e| JsValue::from_str(&e.to_string()))?;
    if document.ready_state() == "loading" {
        dom::listen(&document, "DOMContentLoaded", |_| spawn_local(start()));
    } else {
        spawn_local(start());
    }
    Ok(())
}

/// Settings come from the `data-*` attributes of `<body>`.
fn read_config() -> Config {
    let body = dom::document().ok().and_then(|d| d.body());
    Config::from_lookup(|key| body.as_ref()?.get_attribute(&config::data_attribute(key)))
}

async fn start() {
    let config = read_config();
    ui::landing();
    ui::slider();

    // The menu and language selector live in the header, nothing can be
    // wired before it is mounted.
    let (header, _, _) = futures::join!(
        fragment::load("#header-placeholder", &config.header_url),
        fragment::load("#footer-placeholder", &config.footer_url),
        fragment::load("#about-modal-placeholder", &config.about_url),
    );
    if header {
        initialize(config).await;
    } else {
        warn!("Header not mounted, the page stays static");
    }
}

async fn initialize(config: Config) {
    ui::mobile_menu();
    ui::smooth_scroll();
    let observer = ui::reveal_observer();
    modal::init(config.transition_ms);
    ui::contact_form(config.contact_email.clone());

    let localizer = Rc::new(RefCell::new(Localizer::new(BrowserStore::local(), &config)));
    let grid = dom::by_id("product-grid");
    let wants_catalog = grid.is_some();
    let catalog = async {
        if wants_catalog {
            Some(products::load(&config).await)
        } else {
            None
        }
    };
    let (translations, catalog) = futures::join!(
        fetch::fetch_json::<LocaleTable>(&config.translations_url),
        catalog
    );

    match translations {
        Ok(table) => localizer.borrow_mut().set_table(table),
        Err(e) => error!("Could not load translations: {}", e),
    }
    {
        let mut localizer = localizer.borrow_mut();
        let active = localizer.active().to_owned();
        localizer.apply(&active, &DomSurface);
    }
    language_buttons(&localizer, config.transition_ms);

    if let (Some(grid), Some(catalog)) = (grid, catalog) {
        products::init(&config, grid, catalog, &localizer, observer);
    }
}

fn language_buttons(localizer: &Rc<RefCell<Localizer<BrowserStore>>>, delay_ms: u32) {
    for button in select_all(".lang-modal-btn") {
        let localizer = localizer.clone();
        let lang = button.get_attribute("data-lang").unwrap_or_default();
        dom::listen(&button, "click", move |_| {
            // invalid codes are already reported by the localizer
            localizer.borrow_mut().set_locale(&lang, &DomSurface).ok();
            if let Some(modal) = dom::by_id("lang-modal") {
                modal::close_modal(&modal, delay_ms);
            }
        });
    }
}
