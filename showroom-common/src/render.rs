//! Projection of the catalog onto the page: filter controls, product grid
//! and the detail overlay, kept in sync with the active filter, the locale
//! and the URL fragment.

use crate::{
    catalog::{CatalogStore, Filter},
    config::Config,
    locale::Translator,
    navigation,
    product::{Product, ProductId},
};
use std::rc::Rc;
use tracing::debug;

pub const SHOW_ALL_KEY: &str = "Show All";
pub const VIEW_DETAILS_KEY: &str = "View Details";

const CARD_GRADIENT_END: &str = "#2C3E50";
const DETAIL_GRADIENT_END: &str = "#1a202c";

#[derive(Clone, Debug, PartialEq)]
pub struct FilterControl {
    /// `data-category` value
    pub value: String,
    pub label: String,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub image: String,
    pub viscosity: String,
    pub background: String,
    pub action_label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Detail {
    pub id: String,
    pub name: String,
    pub image: String,
    pub viscosity: String,
    pub description: String,
    pub background: String,
    pub rows: Vec<Vec<String>>,
}

/// The page elements the renderer drives.
pub trait CatalogView {
    fn replace_filters(&self, controls: &[FilterControl]);
    fn replace_grid(&self, cards: &[Card]);
    fn fill_detail(&self, detail: &Detail);
    fn open_detail(&self);
    /// Starts the closing transition, hiding the overlay after `delay_ms`.
    fn close_detail(&self, delay_ms: u32);
    fn set_fragment(&self, fragment: Option<&str>);
}

#[derive(Clone, Debug, PartialEq)]
pub enum Overlay {
    Hidden,
    Visible(ProductId),
}

pub struct CatalogRenderer<V> {
    store: Rc<CatalogStore>,
    view: V,
    filter: Filter,
    overlay: Overlay,
    fallback_color: String,
    transition_ms: u32,
}

impl<V: CatalogView> CatalogRenderer<V> {
    pub fn new(store: Rc<CatalogStore>, view: V, config: &Config) -> Self {
        CatalogRenderer {
            store,
            view,
            filter: Filter::All,
            overlay: Overlay::Hidden,
            fallback_color: config.fallback_color.clone(),
            transition_ms: config.transition_ms,
        }
    }

    pub fn store(&self) -> &Rc<CatalogStore> {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Rebuilds the filter row: "show all" first, then one control per category.
    ///
    /// Exactly one control is active. A filter naming an unknown category
    /// falls back to "show all".
    pub fn render_filters(&mut self, categories: &[&str], t: &Translator<'_>) {
        let known = match &self.filter {
            Filter::All => true,
            Filter::Category(current) => categories.contains(&current.as_str()),
        };
        if !known {
            self.filter = Filter::All;
        }

        let mut controls = Vec::with_capacity(categories.len() + 1);
        controls.push(FilterControl {
            value: Filter::ALL.to_owned(),
            label: t.text_or(SHOW_ALL_KEY, SHOW_ALL_KEY).to_owned(),
            active: self.filter == Filter::All,
        });
        for &category in categories {
            controls.push(FilterControl {
                value: category.to_owned(),
                label: t.text(category).unwrap_or(category).to_owned(),
                active: matches!(&self.filter, Filter::Category(c) if c == category),
            });
        }
        self.view.replace_filters(&controls);
    }

    /// Replaces the grid content with one card per product.
    pub fn render_grid(&self, products: &[&Product], t: &Translator<'_>) {
        let action_label = t.text_or(VIEW_DETAILS_KEY, VIEW_DETAILS_KEY);
        let cards = products
            .iter()
            .map(|p| Card {
                id: p.id.to_string(),
                name: p.name.clone(),
                image: p.image.clone(),
                viscosity: p.viscosity.clone(),
                background: p.gradient(&self.fallback_color, CARD_GRADIENT_END),
                action_label: action_label.to_owned(),
            })
            .collect::<Vec<_>>();
        self.view.replace_grid(&cards);
    }

    pub fn select_filter(&mut self, filter: Filter, t: &Translator<'_>) {
        debug!("Showing products for {:?}", filter);
        self.filter = filter;
        let store = self.store.clone();
        self.render_filters(&store.categories(), t);
        self.render_grid(&store.filter(&self.filter), t);
    }

    /// Re-labels controls and cards, keeping the current filter.
    pub fn locale_changed(&mut self, t: &Translator<'_>) {
        let filter = self.filter.clone();
        self.select_filter(filter, t);
    }

    /// Fills the overlay with `product` and makes it visible.
    ///
    /// Showing a product while the overlay is already visible only refreshes
    /// its content.
    pub fn show_detail(&mut self, product: &Product) {
        self.view.fill_detail(&Detail {
            id: product.id.to_string(),
            name: product.name.clone(),
            image: product.image.clone(),
            viscosity: product.viscosity.clone(),
            description: product.description.clone(),
            background: product.gradient(&self.fallback_color, DETAIL_GRADIENT_END),
            rows: product.detail_rows().to_vec(),
        });
        if self.overlay == Overlay::Hidden {
            self.view.open_detail();
        }
        self.overlay = Overlay::Visible(product.id.clone());
        self.view.set_fragment(Some(product.id.as_str()));
    }

    /// Shows the product with the given id, if the catalog has one.
    pub fn show_by_id(&mut self, id: &ProductId) -> bool {
        let store = self.store.clone();
        match store.by_id(id) {
            Some(product) => {
                self.show_detail(product);
                true
            }
            None => {
                debug!("No product with id {:?}", id.as_str());
                false
            }
        }
    }

    pub fn hide_detail(&mut self) {
        if self.overlay == Overlay::Hidden {
            return;
        }
        self.overlay = Overlay::Hidden;
        self.view.close_detail(self.transition_ms);
        self.view.set_fragment(None);
    }

    /// Opens the product named by the URL fragment (`#3`), if any.
    pub fn resolve_fragment(&mut self, fragment: &str) -> bool {
        match navigation::parse(fragment) {
            Some(id) => self.show_by_id(&ProductId::from(id)),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocaleTable;
    use std::cell::RefCell;

    #[derive(Debug, PartialEq)]
    enum Call {
        Filters(Vec<FilterControl>),
        Grid(Vec<String>),
        Fill(String),
        Open,
        Close(u32),
        Fragment(Option<String>),
    }

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<Call>>,
    }

    impl Recorder {
        fn take(&self) -> Vec<Call> {
            self.calls.borrow_mut().drain(..).collect()
        }
    }

    impl CatalogView for Recorder {
        fn replace_filters(&self, controls: &[FilterControl]) {
            self.calls.borrow_mut().push(Call::Filters(controls.to_vec()));
        }
        fn replace_grid(&self, cards: &[Card]) {
            self.calls
                .borrow_mut()
                .push(Call::Grid(cards.iter().map(|c| c.id.clone()).collect()));
        }
        fn fill_detail(&self, detail: &Detail) {
            self.calls.borrow_mut().push(Call::Fill(detail.id.clone()));
        }
        fn open_detail(&self) {
            self.calls.borrow_mut().push(Call::Open);
        }
        fn close_detail(&self, delay_ms: u32) {
            self.calls.borrow_mut().push(Call::Close(delay_ms));
        }
        fn set_fragment(&self, fragment: Option<&str>) {
            self.calls
                .borrow_mut()
                .push(Call::Fragment(fragment.map(str::to_owned)));
        }
    }

    fn renderer() -> CatalogRenderer<Recorder> {
        let store = CatalogStore::from_json(
            r##"[
                {"id": 1, "name": "A", "category": "X", "color": "#111"},
                {"id": 2, "name": "B", "category": "Y", "color": "#222"},
                {"id": 3, "name": "C", "category": "X"}
            ]"##,
        )
        .unwrap();
        CatalogRenderer::new(Rc::new(store), Recorder::default(), &Config::default())
    }

    fn active(controls: &[FilterControl]) -> Vec<&str> {
        controls
            .iter()
            .filter(|c| c.active)
            .map(|c| c.value.as_str())
            .collect()
    }

    #[test]
    fn exactly_one_active_filter() {
        let table = LocaleTable::default();
        let t = Translator::new(&table, "en");
        let mut renderer = renderer();

        renderer.select_filter(Filter::parse("Y"), &t);
        match renderer.view().take().as_slice() {
            [Call::Filters(controls), Call::Grid(ids)] => {
                assert_eq!(active(controls), vec!["Y"]);
                assert_eq!(controls.len(), 3);
                assert_eq!(ids, &vec!["2".to_owned()]);
            }
            calls => panic!("unexpected calls {:?}", calls),
        }

        renderer.select_filter(Filter::parse("Z"), &t);
        match renderer.view().take().as_slice() {
            [Call::Filters(controls), Call::Grid(ids)] => {
                assert_eq!(active(controls), vec!["all"]);
                assert_eq!(ids.len(), 3);
            }
            calls => panic!("unexpected calls {:?}", calls),
        }
        assert_eq!(renderer.filter(), &Filter::All);
    }

    #[test]
    fn labels_follow_the_locale() {
        let table = LocaleTable::from_json(
            r#"{"ko": {"Show All": "전체보기", "X": "엔진오일", "View Details": "자세히"}}"#,
        )
        .unwrap();
        let mut renderer = renderer();
        renderer.select_filter(Filter::All, &Translator::new(&table, "en"));
        renderer.view().take();

        renderer.locale_changed(&Translator::new(&table, "ko"));
        match renderer.view().take().as_slice() {
            [Call::Filters(controls), Call::Grid(_)] => {
                let labels: Vec<&str> = controls.iter().map(|c| c.label.as_str()).collect();
                assert_eq!(labels, vec!["전체보기", "엔진오일", "Y"]);
            }
            calls => panic!("unexpected calls {:?}", calls),
        }
    }

    #[test]
    fn overlay_transitions() {
        let mut renderer = renderer();
        assert_eq!(renderer.overlay(), &Overlay::Hidden);

        renderer.hide_detail();
        assert!(renderer.view().take().is_empty());

        assert!(renderer.show_by_id(&ProductId::from("2")));
        assert_eq!(
            renderer.view().take(),
            vec![
                Call::Fill("2".to_owned()),
                Call::Open,
                Call::Fragment(Some("2".to_owned()))
            ]
        );

        assert!(renderer.show_by_id(&ProductId::from(1)));
        assert_eq!(
            renderer.view().take(),
            vec![Call::Fill("1".to_owned()), Call::Fragment(Some("1".to_owned()))]
        );
        assert_eq!(renderer.overlay(), &Overlay::Visible(ProductId::from(1)));

        renderer.hide_detail();
        assert_eq!(
            renderer.view().take(),
            vec![Call::Close(300), Call::Fragment(None)]
        );
        assert_eq!(renderer.overlay(), &Overlay::Hidden);
    }

    #[test]
    fn unknown_fragment_is_ignored() {
        let mut renderer = renderer();
        assert!(!renderer.resolve_fragment("#99"));
        assert!(!renderer.resolve_fragment("#"));
        assert!(!renderer.resolve_fragment(""));
        assert!(renderer.view().take().is_empty());
        assert_eq!(renderer.overlay(), &Overlay::Hidden);
    }
}
