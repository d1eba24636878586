use crate::{
    dom::{add_classes, by_id, document, remove_classes, set_style, set_text},
    error::FrontError,
    modal,
};
use showroom_common::render::{Card, CatalogView, Detail, FilterControl};
use tracing::{error, warn};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, IntersectionObserver};

const FILTER_CLASSES: &str =
    "filter-btn font-bold py-2 px-4 rounded-full shadow-md hover:bg-gray-200 transition duration-300";
const DETAILS_BUTTON_CLASSES: &str = "view-details-btn w-full bg-white/20 backdrop-blur-sm text-white \
     py-2 px-4 rounded-lg font-bold hover:bg-white/30 transition-all duration-300";
const ACTIVE: &[&str] = &["bg-gray-900", "text-white"];
const INACTIVE: &[&str] = &["bg-white", "text-gray-800"];

/// The product grid, category filter row and product overlay of the page.
pub struct DomCatalogView {
    grid: Element,
    filters: Option<Element>,
    modal: Option<Element>,
    observer: Option<IntersectionObserver>,
}

impl DomCatalogView {
    pub fn new(grid: Element, observer: Option<IntersectionObserver>) -> Self {
        let filters = by_id("category-filters");
        let modal = by_id("product-modal");
        if modal.is_none() {
            warn!("No #product-modal, product details are disabled");
        }
        DomCatalogView {
            grid,
            filters,
            modal,
            observer,
        }
    }

    pub fn modal(&self) -> Option<&Element> {
        self.modal.as_ref()
    }

    fn filter_button(doc: &Document, control: &FilterControl) -> Result<Element, FrontError> {
        let button = doc.create_element("button")?;
        button.set_attribute("class", FILTER_CLASSES)?;
        button.set_attribute("data-category", &control.value)?;
        add_classes(&button, if control.active { ACTIVE } else { INACTIVE });
        set_text(&button, &control.label);
        Ok(button)
    }

    fn card(doc: &Document, card: &Card) -> Result<Element, FrontError> {
        let root = doc.create_element("div")?;
        root.set_attribute("class", "product-card rounded-xl shadow-lg text-white")?;
        root.set_attribute("style", &format!("background: {};", card.background))?;

        let wrapper = doc.create_element("div")?;
        wrapper.set_attribute("class", "image-wrapper rounded-t-xl overflow-hidden p-4")?;
        let image = doc.create_element("img")?;
        image.set_attribute("src", &card.image)?;
        image.set_attribute("alt", &card.name)?;
        image.set_attribute("class", "w-full h-full object-cover")?;
        wrapper.append_child(&image)?;

        let body = doc.create_element("div")?;
        body.set_attribute("class", "p-6 text-center")?;
        let name = doc.create_element("h2")?;
        name.set_attribute("class", "text-xl font-bold mb-2 text-white")?;
        name.set_text_content(Some(card.name.as_str()));
        let viscosity = doc.create_element("p")?;
        viscosity.set_attribute("class", "text-gray-200 font-bold text-lg mb-4")?;
        viscosity.set_text_content(Some(card.viscosity.as_str()));
        let button = doc.create_element("button")?;
        button.set_attribute("class", DETAILS_BUTTON_CLASSES)?;
        button.set_attribute("data-product-id", &card.id)?;
        button.set_text_content(Some(card.action_label.as_str()));
        body.append_child(&name)?;
        body.append_child(&viscosity)?;
        body.append_child(&button)?;

        root.append_child(&wrapper)?;
        root.append_child(&body)?;
        Ok(root)
    }

    fn fill_table(doc: &Document, rows: &[Vec<String>]) -> Result<(), FrontError> {
        let table = match by_id("modal-table") {
            Some(table) => table,
            None => return Ok(()),
        };
        let body = table.query_selector("tbody")?.unwrap_or_else(|| table.clone());
        body.set_inner_html("");
        for row in rows {
            let tr = doc.create_element("tr")?;
            for cell in row {
                let td = doc.create_element("td")?;
                td.set_text_content(Some(cell.as_str()));
                tr.append_child(&td)?;
            }
            body.append_child(&tr)?;
        }
        if rows.is_empty() {
            add_classes(&table, &["hidden"]);
        } else {
            remove_classes(&table, &["hidden"]);
        }
        Ok(())
    }

    fn try_replace_filters(&self, controls: &[FilterControl]) -> Result<(), FrontError> {
        let container = match &self.filters {
            Some(container) => container,
            None => return Ok(()),
        };
        let doc = document()?;
        container.set_inner_html("");
        for control in controls {
            let button = DomCatalogView::filter_button(&doc, control)?;
            container.append_child(&button)?;
        }
        Ok(())
    }

    fn try_replace_grid(&self, cards: &[Card]) -> Result<(), FrontError> {
        let doc = document()?;
        self.grid.set_inner_html("");
        for card in cards {
            let element = DomCatalogView::card(&doc, card)?;
            self.grid.append_child(&element)?;
            if let Some(observer) = &self.observer {
                observer.observe(&element);
            }
        }
        Ok(())
    }

    fn try_fill_detail(&self, detail: &Detail) -> Result<(), FrontError> {
        let modal = match &self.modal {
            Some(modal) => modal,
            None => return Ok(()),
        };
        if let Some(content) = modal.query_selector(".modal-content")? {
            set_style(&content, "background", &detail.background);
        }
        if let Some(image) = by_id("modal-image") {
            image.set_attribute("src", &detail.image)?;
            image.set_attribute("alt", &detail.name)?;
        }
        for (id, text) in &[
            ("modal-name", &detail.name),
            ("modal-viscosity", &detail.viscosity),
            ("modal-description", &detail.description),
        ] {
            if let Some(element) = by_id(id) {
                element.set_text_content(Some(text.as_str()));
            }
        }
        DomCatalogView::fill_table(&document()?, &detail.rows)
    }
}

impl CatalogView for DomCatalogView {
    fn replace_filters(&self, controls: &[FilterControl]) {
        if let Err(e) = self.try_replace_filters(controls) {
            error!("Couldn't render the category filters: {}", e);
        }
    }

    fn replace_grid(&self, cards: &[Card]) {
        if let Err(e) = self.try_replace_grid(cards) {
            error!("Couldn't render the product grid: {}", e);
        }
    }

    fn fill_detail(&self, detail: &Detail) {
        if let Err(e) = self.try_fill_detail(detail) {
            error!("Couldn't show product {}: {}", detail.id, e);
        }
    }

    fn open_detail(&self) {
        if let Some(modal) = &self.modal {
            modal::open_modal(modal);
        }
    }

    fn close_detail(&self, delay_ms: u32) {
        if let Some(modal) = &self.modal {
            modal::close_modal(modal, delay_ms);
        }
    }

    fn set_fragment(&self, fragment: Option<&str>) {
        let window = match web_sys::window() {
            Some(window) => window,
            None => return,
        };
        let location = window.location();
        let result = match fragment {
            Some(id) => {
                let hash = format!("#{}", id);
                if location.hash().ok().as_deref() == Some(hash.as_str()) {
                    Ok(())
                } else {
                    location.set_hash(id)
                }
            }
            None => window.history().and_then(|history| {
                let url = format!(
                    "{}{}",
                    location.pathname().unwrap_or_default(),
                    location.search().unwrap_or_default()
                );
                history.replace_state_with_url(&JsValue::NULL, "", Some(&url))
            }),
        };
        if let Err(e) = result {
            warn!("Couldn't update the URL fragment: {}", FrontError::from(e));
        }
    }
}
