//! The products page: category filters, product grid and product details.

use crate::{
    dom::{by_id, closest, listen, win, BrowserStore},
    error::FrontError,
    fetch::fetch_text,
    modal::is_backdrop,
    view::DomCatalogView,
};
use showroom_common::{
    catalog::{CatalogStore, Filter},
    config::Config,
    locale::Localizer,
    product::ProductId,
    render::CatalogRenderer,
};
use std::{cell::RefCell, rc::Rc};
use tracing::{error, info};
use web_sys::{Element, EventTarget, IntersectionObserver};

type Renderer = Rc<RefCell<CatalogRenderer<DomCatalogView>>>;

/// Loads the catalog. A catalog that can't be loaded is an empty one.
pub async fn load(config: &Config) -> CatalogStore {
    let store = match fetch_text(&config.catalog_url).await {
        Ok(json) => CatalogStore::from_json(&json).map_err(FrontError::from),
        Err(e) => Err(e),
    };
    match store {
        Ok(store) => {
            info!("{} products loaded", store.len());
            store
        }
        Err(e) => {
            error!("Could not load products: {}", e);
            CatalogStore::default()
        }
    }
}

/// Current URL fragment, percent-decoded.
fn current_fragment() -> String {
    let hash = win()
        .ok()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default();
    js_sys::decode_uri_component(&hash)
        .map(String::from)
        .unwrap_or(hash)
}

pub fn init(
    config: &Config,
    grid: Element,
    store: CatalogStore,
    localizer: &Rc<RefCell<Localizer<BrowserStore>>>,
    observer: Option<IntersectionObserver>,
) {
    let view = DomCatalogView::new(grid.clone(), observer);
    let modal = view.modal().cloned();
    let renderer: Renderer = Rc::new(RefCell::new(CatalogRenderer::new(
        Rc::new(store),
        view,
        config,
    )));
    renderer
        .borrow_mut()
        .select_filter(Filter::All, &localizer.borrow().translator());

    let subscriber = renderer.clone();
    localizer
        .borrow_mut()
        .subscribe(move |t| subscriber.borrow_mut().locale_changed(t));

    if let Some(filters) = by_id("category-filters") {
        let (renderer, localizer) = (renderer.clone(), localizer.clone());
        listen(&filters, "click", move |evt| {
            let category =
                closest(&evt, ".filter-btn").and_then(|b| b.get_attribute("data-category"));
            if let Some(category) = category {
                let localizer = localizer.borrow();
                renderer
                    .borrow_mut()
                    .select_filter(Filter::parse(&category), &localizer.translator());
            }
        });
    }

    {
        let renderer = renderer.clone();
        listen(&grid, "click", move |evt| {
            let id = closest(&evt, ".view-details-btn")
                .and_then(|b| b.get_attribute("data-product-id"));
            if let Some(id) = id {
                evt.stop_propagation();
                renderer.borrow_mut().show_by_id(&ProductId::from(id));
            }
        });
    }

    if let Some(button) = by_id("close-modal") {
        let renderer = renderer.clone();
        listen(&button, "click", move |_| renderer.borrow_mut().hide_detail());
    }
    if let Some(modal) = modal {
        let renderer = renderer.clone();
        let backdrop = modal.clone();
        listen(&modal, "click", move |evt| {
            if is_backdrop(&evt, &backdrop) {
                renderer.borrow_mut().hide_detail();
            }
        });
    }

    if let Ok(window) = win() {
        let renderer = renderer.clone();
        let window: &EventTarget = window.as_ref();
        listen(window, "hashchange", move |_| {
            renderer.borrow_mut().resolve_fragment(&current_fragment());
        });
    }
    renderer.borrow_mut().resolve_fragment(&current_fragment());
}
