use assert_json_diff::assert_json_include;
use serde_json::json;
use showroom_common::{
    catalog::{CatalogStore, Filter},
    config::Config,
    locale::{LocaleTable, Localizer, TextSurface},
    product::ProductId,
    render::{Card, CatalogRenderer, CatalogView, Detail, FilterControl, Overlay},
    storage::{KeyValueStore, MemoryStore},
};
use std::{cell::RefCell, ops::Deref, rc::Rc};

fn catalog() -> CatalogStore {
    CatalogStore::from_json(
        r##"[
            {"id": 1, "name": "A", "category": "X", "color": "#111"},
            {"id": 2, "name": "B", "category": "Y", "color": "#222"}
        ]"##,
    )
    .unwrap()
}

/// In-memory page holding what the DOM would show.
#[derive(Default)]
struct PageState {
    tagged: RefCell<Vec<(String, String)>>,
    indicator: RefCell<String>,
    filters: RefCell<Vec<FilterControl>>,
    grid: RefCell<Vec<Card>>,
    detail: RefCell<Option<Detail>>,
    visible: RefCell<bool>,
    opened: RefCell<u32>,
    fragment: RefCell<String>,
}

#[derive(Clone, Default)]
struct Page(Rc<PageState>);

impl Deref for Page {
    type Target = PageState;

    fn deref(&self) -> &PageState {
        &self.0
    }
}

impl Page {
    fn label(&self, value: &str) -> String {
        self.filters
            .borrow()
            .iter()
            .find(|c| c.value == value)
            .map(|c| c.label.clone())
            .unwrap()
    }
}

impl TextSurface for Page {
    fn for_each_tagged(&self, translate: &mut dyn FnMut(&str) -> Option<String>) {
        for (key, text) in self.tagged.borrow_mut().iter_mut() {
            if let Some(t) = translate(key) {
                *text = t;
            }
        }
    }

    fn show_locale(&self, code: &str) {
        *self.indicator.borrow_mut() = code.to_owned();
    }
}

impl CatalogView for Page {
    fn replace_filters(&self, controls: &[FilterControl]) {
        *self.filters.borrow_mut() = controls.to_vec();
    }

    fn replace_grid(&self, cards: &[Card]) {
        *self.grid.borrow_mut() = cards.to_vec();
    }

    fn fill_detail(&self, detail: &Detail) {
        *self.detail.borrow_mut() = Some(detail.clone());
    }

    fn open_detail(&self) {
        *self.visible.borrow_mut() = true;
        *self.opened.borrow_mut() += 1;
    }

    fn close_detail(&self, _delay_ms: u32) {
        *self.visible.borrow_mut() = false;
    }

    fn set_fragment(&self, fragment: Option<&str>) {
        *self.fragment.borrow_mut() = fragment.unwrap_or_default().to_owned();
    }
}

#[test]
fn lookups_and_filters() {
    let catalog = catalog();
    assert_eq!(catalog.categories(), vec!["X", "Y"]);

    let y = catalog.filter(&Filter::parse("Y"));
    assert_eq!(y.len(), 1);
    assert_eq!(y[0].name, "B");

    assert_eq!(catalog.by_id(&ProductId::from(2)).unwrap().name, "B");
    assert_eq!(
        catalog.by_id(&ProductId::from("2")),
        catalog.by_id(&ProductId::from(2))
    );
    assert!(catalog.by_id(&ProductId::from(99)).is_none());

    for product in catalog.products() {
        assert_eq!(catalog.by_id(&product.id), Some(product));
    }
    for category in catalog.categories() {
        let products = catalog.filter(&Filter::parse(category));
        assert!(!products.is_empty());
        assert!(products.iter().all(|p| p.category() == Some(category)));
    }
    let all: Vec<&str> = catalog
        .filter(&Filter::All)
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(all, vec!["A", "B"]);
}

#[test]
fn grid_render_is_idempotent() {
    let page = Page::default();
    let localizer = Localizer::new(MemoryStore::default(), &Config::default());
    let mut renderer = CatalogRenderer::new(Rc::new(catalog()), page.clone(), &Config::default());

    renderer.select_filter(Filter::All, &localizer.translator());
    renderer.select_filter(Filter::All, &localizer.translator());
    let ids: Vec<String> = page.grid.borrow().iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(page.filters.borrow().len(), 3);
    assert_eq!(
        page.grid.borrow()[0].background,
        "linear-gradient(135deg, #111 0%, #2C3E50 100%)"
    );
    assert_eq!(page.grid.borrow()[0].action_label, "View Details");
}

#[test]
fn locale_round_trip() {
    let store = MemoryStore::default();
    let page = Page::default();
    page.tagged
        .borrow_mut()
        .push(("Show All".to_owned(), "Show All".to_owned()));

    let mut localizer = Localizer::new(store.clone(), &Config::default());
    localizer.set_table(
        LocaleTable::from_json(r#"{"en": {"Show All": "Show All"}, "ko": {"Show All": "전체보기"}}"#)
            .unwrap(),
    );

    let renderer = Rc::new(RefCell::new(CatalogRenderer::new(
        Rc::new(catalog()),
        page.clone(),
        &Config::default(),
    )));
    renderer
        .borrow_mut()
        .select_filter(Filter::All, &localizer.translator());
    let subscriber = renderer.clone();
    localizer.subscribe(move |t| subscriber.borrow_mut().locale_changed(t));

    localizer.set_locale("ko", &page).unwrap();
    assert_eq!(store.get("lang").as_deref(), Some("ko"));
    assert_eq!(page.label("all"), "전체보기");
    assert_eq!(page.tagged.borrow()[0].1, "전체보기");
    assert_eq!(*page.indicator.borrow(), "KO");

    localizer.set_locale("fr", &page).unwrap();
    assert_eq!(store.get("lang").as_deref(), Some("fr"));
    assert_eq!(page.tagged.borrow()[0].1, "전체보기");
    assert_eq!(*page.indicator.borrow(), "FR");

    // A fresh visit starts from the saved locale.
    assert_eq!(Localizer::new(store, &Config::default()).active(), "fr");
}

#[test]
fn deep_link_resolution() {
    let catalog = CatalogStore::from_json(
        r##"[
            {"id": 1, "name": "A", "category": "X"},
            {"id": "3", "name": "C", "viscosity": "5W-30", "description": "Synthetic",
             "image": "img/c.png", "color": "#333",
             "table": [["Grade", "Flash point"], ["5W-30", "230"]]}
        ]"##,
    )
    .unwrap();
    let page = Page::default();
    let mut renderer = CatalogRenderer::new(Rc::new(catalog), page.clone(), &Config::default());

    assert!(renderer.resolve_fragment("#3"));
    assert_eq!(renderer.overlay(), &Overlay::Visible(ProductId::from(3)));
    let first = page.detail.borrow().clone().unwrap();
    assert_eq!(first.name, "C");
    assert_eq!(first.rows, vec![vec!["5W-30".to_owned(), "230".to_owned()]]);
    assert_eq!(
        first.background,
        "linear-gradient(135deg, #333 0%, #1a202c 100%)"
    );
    assert_eq!(*page.fragment.borrow(), "3");

    assert!(renderer.resolve_fragment("#3"));
    assert!(*page.visible.borrow());
    assert_eq!(*page.opened.borrow(), 1);
    assert_eq!(page.detail.borrow().clone().unwrap(), first);

    renderer.hide_detail();
    assert!(!*page.visible.borrow());
    assert_eq!(*page.fragment.borrow(), "");
    assert_eq!(renderer.overlay(), &Overlay::Hidden);
}

#[test]
fn products_serialize_with_string_ids() {
    let catalog = catalog();
    let product = catalog.by_id(&ProductId::from(1)).unwrap();
    assert_json_include!(
        actual: serde_json::to_value(product).unwrap(),
        expected: json!({"id": "1", "name": "A", "category": "X", "color": "#111"})
    );
}
