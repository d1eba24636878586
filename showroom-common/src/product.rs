use serde::{
    de::{self, Visitor},
    Deserializer, Serializer,
};
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Opaque product identifier.
///
/// Catalog files carry ids either as JSON numbers or as strings, and the
/// page hands them back as strings (`data-product-id`, the URL fragment).
/// Two ids are equal when their text matches or when both read as the same
/// number, so `2`, `"2"` and `"2.0"` all name the same product.
#[derive(Clone, Debug, Default)]
pub struct ProductId(String);

impl ProductId {
    pub fn new<S: Into<String>>(raw: S) -> Self {
        ProductId(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    fn as_number(&self) -> Option<f64> {
        let text = self.0.trim();
        if text.is_empty() {
            return None;
        }
        text.parse::<f64>().ok().filter(|n| n.is_finite())
    }
}

impl PartialEq for ProductId {
    fn eq(&self, other: &Self) -> bool {
        if self.0 == other.0 {
            return true;
        }
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ProductId {}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(raw: &str) -> Self {
        ProductId::new(raw)
    }
}

impl From<String> for ProductId {
    fn from(raw: String) -> Self {
        ProductId(raw)
    }
}

impl From<i64> for ProductId {
    fn from(n: i64) -> Self {
        ProductId(n.to_string())
    }
}

impl serde::Serialize for ProductId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

struct ProductIdVisitor;

impl<'de> Visitor<'de> for ProductIdVisitor {
    type Value = ProductId;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a string or a number")
    }

    fn visit_str<E>(self, value: &str) -> Result<ProductId, E>
    where
        E: de::Error,
    {
        Ok(ProductId::new(value))
    }

    fn visit_string<E>(self, value: String) -> Result<ProductId, E>
    where
        E: de::Error,
    {
        Ok(ProductId(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<ProductId, E>
    where
        E: de::Error,
    {
        Ok(ProductId(value.to_string()))
    }

    fn visit_u64<E>(self, value: u64) -> Result<ProductId, E>
    where
        E: de::Error,
    {
        Ok(ProductId(value.to_string()))
    }

    fn visit_f64<E>(self, value: f64) -> Result<ProductId, E>
    where
        E: de::Error,
    {
        Ok(ProductId(value.to_string()))
    }
}

impl<'de> serde::Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ProductIdVisitor)
    }
}

/// Text of a scalar JSON value. Numbers and booleans are written out,
/// anything else has no text.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Value = serde::Deserialize::deserialize(deserializer)?;
    Ok(scalar_text(&value).unwrap_or_default())
}

fn lenient_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Value = serde::Deserialize::deserialize(deserializer)?;
    Ok(scalar_text(&value))
}

/// Rows that are not arrays become empty rows, so the header stays first.
fn lenient_table<'de, D>(deserializer: D) -> Result<Option<Vec<Vec<String>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Value = serde::Deserialize::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(rows) => Some(
            rows.iter()
                .map(|row| match row {
                    Value::Array(cells) => cells
                        .iter()
                        .map(|c| scalar_text(c).unwrap_or_default())
                        .collect(),
                    _ => Vec::new(),
                })
                .collect(),
        ),
        _ => None,
    })
}

/// A catalog entry, as found in the catalog JSON file.
///
/// Only `id` is mandatory; every other field falls back to an empty value.
/// Numbers are accepted where text is expected.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub viscosity: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image: String,
    /// Comparison table, first row being the header
    #[serde(
        default,
        deserialize_with = "lenient_table",
        skip_serializing_if = "Option::is_none"
    )]
    pub table: Option<Vec<Vec<String>>>,
}

impl Product {
    /// The category used for filtering, if any. Blank categories count as
    /// absent; others are kept as written.
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
    }

    pub fn color<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.color
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(fallback)
    }

    /// CSS background going from the product color to `end`.
    ///
    /// The color is not validated: a bad value only breaks the background.
    pub fn gradient(&self, fallback: &str, end: &str) -> String {
        format!(
            "linear-gradient(135deg, {} 0%, {} 100%)",
            self.color(fallback),
            end
        )
    }

    /// Rows of the comparison table, without the header row.
    pub fn detail_rows(&self) -> &[Vec<String>] {
        self.table
            .as_deref()
            .and_then(|rows| rows.get(1..))
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loose_id_equality() {
        assert_eq!(ProductId::from(2), ProductId::from("2"));
        assert_eq!(ProductId::from("2.0"), ProductId::from(2));
        assert_eq!(ProductId::from("abc"), ProductId::from("abc"));
        assert_ne!(ProductId::from("abc"), ProductId::from("ABC"));
        assert_ne!(ProductId::from(2), ProductId::from(3));
        assert_ne!(ProductId::from(""), ProductId::from("0"));
    }

    #[test]
    fn ids_from_numbers_and_strings() {
        let products: Vec<Product> =
            serde_json::from_str(r#"[{"id": 7}, {"id": "7"}, {"id": 1.5}, {"id": "x-1"}]"#)
                .unwrap();
        assert_eq!(products[0].id.as_str(), "7");
        assert_eq!(products[0].id, products[1].id);
        assert_eq!(products[2].id.as_str(), "1.5");
        assert_eq!(products[3].id.as_str(), "x-1");
    }

    #[test]
    fn optional_fields() {
        let product: Product = serde_json::from_str(r#"{"id": 1, "name": "A"}"#).unwrap();
        assert_eq!(product.name, "A");
        assert_eq!(product.category(), None);
        assert_eq!(product.color("#4A5568"), "#4A5568");
        assert!(product.detail_rows().is_empty());

        let blank: Product =
            serde_json::from_str(r#"{"id": 1, "category": "  ", "color": ""}"#).unwrap();
        assert_eq!(blank.category(), None);
        assert_eq!(blank.color("#000"), "#000");
    }

    #[test]
    fn gradient() {
        let product = Product {
            color: Some("#111".to_owned()),
            ..Product::default()
        };
        assert_eq!(
            product.gradient("#4A5568", "#1a202c"),
            "linear-gradient(135deg, #111 0%, #1a202c 100%)"
        );
        assert_eq!(
            Product::default().gradient("#4A5568", "#2C3E50"),
            "linear-gradient(135deg, #4A5568 0%, #2C3E50 100%)"
        );
    }

    #[test]
    fn header_row_is_skipped() {
        let product: Product = serde_json::from_str(
            r#"{"id": 1, "table": [["Grade", "Flash point"], ["5W-30", "220"], ["10W-40", "230"]]}"#,
        )
        .unwrap();
        assert_eq!(
            product.detail_rows(),
            &[
                vec!["5W-30".to_owned(), "220".to_owned()],
                vec!["10W-40".to_owned(), "230".to_owned()]
            ]
        );

        let header_only: Product =
            serde_json::from_str(r#"{"id": 1, "table": [["Grade"]]}"#).unwrap();
        assert!(header_only.detail_rows().is_empty());
        let empty: Product = serde_json::from_str(r#"{"id": 1, "table": []}"#).unwrap();
        assert!(empty.detail_rows().is_empty());
    }

    #[test]
    fn nulls_and_numbers_as_text() {
        let product: Product = serde_json::from_str(
            r#"{"id": 2, "name": null, "viscosity": 40, "category": 7, "color": null,
                "image": false, "table": [["Grade", "Flash point"], ["10W-40", 230], [null, 1.5]]}"#,
        )
        .unwrap();
        assert_eq!(product.name, "");
        assert_eq!(product.viscosity, "40");
        assert_eq!(product.category(), Some("7"));
        assert_eq!(product.color("#4A5568"), "#4A5568");
        assert_eq!(product.image, "false");
        assert_eq!(
            product.detail_rows(),
            &[
                vec!["10W-40".to_owned(), "230".to_owned()],
                vec!["".to_owned(), "1.5".to_owned()]
            ]
        );

        let odd_table: Product =
            serde_json::from_str(r#"{"id": 3, "table": [["Grade"], "x", ["5W"]]}"#).unwrap();
        assert_eq!(odd_table.detail_rows(), &[vec![], vec!["5W".to_owned()]]);
        let no_table: Product = serde_json::from_str(r#"{"id": 4, "table": "none"}"#).unwrap();
        assert_eq!(no_table.table, None);
    }

    #[test]
    fn category_is_kept_as_written() {
        let product: Product = serde_json::from_str(r#"{"id": 1, "category": "X "}"#).unwrap();
        assert_eq!(product.category(), Some("X "));
    }
}
