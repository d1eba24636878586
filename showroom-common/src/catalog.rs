use crate::{
    product::{Product, ProductId},
    Result,
};
use serde_json::Value;
use tracing::{debug, warn};

/// Which products the grid shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    All,
    Category(String),
}

impl Filter {
    /// Value of the `data-category` attribute of the "show all" control
    pub const ALL: &'static str = "all";

    pub fn parse(value: &str) -> Filter {
        if value == Filter::ALL {
            Filter::All
        } else {
            Filter::Category(value.to_owned())
        }
    }

    pub fn as_attr(&self) -> &str {
        match self {
            Filter::All => Filter::ALL,
            Filter::Category(c) => c,
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(c) => product.category() == Some(c.as_str()),
        }
    }
}

impl Default for Filter {
    fn default() -> Self {
        Filter::All
    }
}

/// The product catalog of the current page, loaded once and then read-only.
#[derive(Clone, Debug, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
}

impl CatalogStore {
    pub fn new(products: Vec<Product>) -> Self {
        CatalogStore { products }
    }

    /// Reads a JSON array of products. Records that can't be read, like
    /// ones without an id, are skipped with a warning.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<Value> = serde_json::from_str(json)?;
        let total = records.len();
        let products: Vec<Product> = records
            .into_iter()
            .enumerate()
            .filter_map(|(i, record)| match serde_json::from_value(record) {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!("Skipping product #{}: {}", i + 1, e);
                    None
                }
            })
            .collect();
        debug!("Loaded {} of {} products", products.len(), total);
        Ok(CatalogStore::new(products))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Distinct non-empty categories, in the order they first appear.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for category in self.products.iter().filter_map(Product::category) {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }

    pub fn filter(&self, filter: &Filter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CatalogStore {
        CatalogStore::from_json(
            r##"[
                {"id": 1, "name": "A", "category": "Engine", "color": "#111"},
                {"id": 2, "name": "B", "category": "Gear", "color": "#222"},
                {"id": "3", "name": "C", "category": "Engine"},
                {"id": 4, "name": "D", "category": ""},
                {"id": 5, "name": "E"},
                {"id": 6, "name": "F", "category": "engine"}
            ]"##,
        )
        .unwrap()
    }

    #[test]
    fn categories_in_first_seen_order() {
        assert_eq!(store().categories(), vec!["Engine", "Gear", "engine"]);
    }

    #[test]
    fn filter_is_case_sensitive() {
        let store = store();
        let names = |f: &Filter| {
            store
                .filter(f)
                .into_iter()
                .map(|p| p.name.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&Filter::parse("Engine")), vec!["A", "C"]);
        assert_eq!(names(&Filter::parse("engine")), vec!["F"]);
        assert_eq!(names(&Filter::parse("Oil")), Vec::<String>::new());
        assert_eq!(names(&Filter::All), vec!["A", "B", "C", "D", "E", "F"]);
    }

    #[test]
    fn lookup_by_id() {
        let store = store();
        assert_eq!(store.by_id(&ProductId::from(3)).unwrap().name, "C");
        assert_eq!(store.by_id(&ProductId::from("1")).unwrap().name, "A");
        assert!(store.by_id(&ProductId::from(99)).is_none());
    }

    #[test]
    fn filter_attribute() {
        assert_eq!(Filter::parse("all"), Filter::All);
        assert_eq!(Filter::parse("All"), Filter::Category("All".to_owned()));
        assert_eq!(Filter::All.as_attr(), "all");
        assert_eq!(Filter::parse("Gear").as_attr(), "Gear");
    }

    #[test]
    fn empty_and_malformed() {
        assert!(CatalogStore::default().categories().is_empty());
        assert!(CatalogStore::default().filter(&Filter::All).is_empty());
        assert!(CatalogStore::from_json("{\"id\": 1}").is_err());
        assert!(CatalogStore::from_json("not json").is_err());
        assert!(CatalogStore::from_json("[{\"name\": \"no id\"}]")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn unreadable_records_are_skipped() {
        let store = CatalogStore::from_json(
            r##"[
                {"id": 1, "name": "A", "category": "Engine"},
                {"id": 2, "name": null, "viscosity": 40, "table": [["Grade"], [230]]},
                {"name": "no id"},
                {"id": null, "name": "null id"},
                "not a product",
                {"id": [3], "name": "array id"},
                {"id": 4, "name": "D", "category": "Engine"}
            ]"##,
        )
        .unwrap();
        let ids: Vec<&str> = store.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "4"]);
        let second = store.by_id(&ProductId::from(2)).unwrap();
        assert_eq!(second.name, "");
        assert_eq!(second.viscosity, "40");
        assert_eq!(second.detail_rows(), &[vec!["230".to_owned()]]);
        assert_eq!(store.filter(&Filter::parse("Engine")).len(), 2);
    }
}
