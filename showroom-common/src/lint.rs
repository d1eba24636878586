//! Consistency checks on the site assets, used by `shw check`.

use crate::{catalog::CatalogStore, locale::LocaleTable};
use lazy_static::lazy_static;
use regex::Regex;
use std::{collections::BTreeSet, fmt};

lazy_static! {
    static ref I18N_ATTRIBUTE: Regex =
        Regex::new(r#"data-i18n\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("invalid regex");
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
}

impl Issue {
    fn warning<S: Into<String>>(message: S) -> Self {
        Issue {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    fn error<S: Into<String>>(message: S) -> Self {
        Issue {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

pub fn has_errors(issues: &[Issue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

/// Translation keys used by `data-i18n` attributes in some markup.
pub fn markup_keys(html: &str) -> BTreeSet<String> {
    I18N_ATTRIBUTE
        .captures_iter(html)
        .filter_map(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().trim().to_owned())
        .filter(|k| !k.is_empty())
        .collect()
}

pub fn check_catalog(catalog: &CatalogStore) -> Vec<Issue> {
    let mut issues = Vec::new();
    let products = catalog.products();
    for (i, product) in products.iter().enumerate() {
        let name = if product.name.is_empty() {
            format!("product #{}", i + 1)
        } else {
            format!("{:?}", product.name)
        };

        if product.id.is_empty() {
            issues.push(Issue::error(format!("{} has an empty id", name)));
        } else if products[..i].iter().any(|p| p.id == product.id) {
            issues.push(Issue::error(format!(
                "{} reuses the id {}",
                name, product.id
            )));
        }
        if product.name.is_empty() {
            issues.push(Issue::warning(format!("{} has no name", name)));
        }
        if product.image.is_empty() {
            issues.push(Issue::warning(format!("{} has no image", name)));
        }
        if product.color("").is_empty() {
            issues.push(Issue::warning(format!(
                "{} has no color, the fallback color will be used",
                name
            )));
        }
        if product.category().is_none() {
            issues.push(Issue::warning(format!(
                "{} has no category and won't appear in any filter",
                name
            )));
        }
        if let Some(table) = &product.table {
            if let Some(header) = table.first() {
                for (r, row) in table.iter().enumerate().skip(1) {
                    if row.len() != header.len() {
                        issues.push(Issue::warning(format!(
                            "{}: row {} of the table has {} cells, the header has {}",
                            name,
                            r,
                            row.len(),
                            header.len()
                        )));
                    }
                }
            }
        }
    }
    issues
}

pub fn check_translations(table: &LocaleTable, default_locale: &str) -> Vec<Issue> {
    let mut issues = Vec::new();
    if table.texts(default_locale).is_none() {
        issues.push(Issue::error(format!(
            "no translations for the default locale {:?}",
            default_locale
        )));
    }

    let all_keys: BTreeSet<&str> = table
        .locales()
        .into_iter()
        .filter_map(|l| table.texts(l))
        .flat_map(|texts| texts.keys().map(String::as_str))
        .collect();
    for locale in table.locales() {
        for key in &all_keys {
            if table.lookup(locale, key).is_none() {
                issues.push(Issue::warning(format!(
                    "{:?} has no translation for {:?}",
                    locale, key
                )));
            }
        }
    }
    issues
}

/// Keys used in the markup but unknown to the default locale.
pub fn check_markup_keys<'a, I>(keys: I, table: &LocaleTable, default_locale: &str) -> Vec<Issue>
where
    I: IntoIterator<Item = &'a String>,
{
    keys.into_iter()
        .filter(|key| table.lookup(default_locale, key).is_none())
        .map(|key| {
            Issue::warning(format!(
                "{:?} is used in the markup but missing from {:?}",
                key, default_locale
            ))
        })
        .collect()
}
