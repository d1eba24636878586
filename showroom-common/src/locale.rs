//! Locale-keyed text replacement.
//!
//! Translations come from a single JSON object mapping locale codes to
//! `key => text` tables. Elements of the page carrying a translation key get
//! their text replaced when a locale is applied; a key missing from the table,
//! or mapped to an empty text, leaves the element as it is.

use crate::{config::Config, storage::KeyValueStore, Error, Result};
use serde::Deserializer;
use serde_derive::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LocaleTable(BTreeMap<String, HashMap<String, String>>);

/// Keeps the text entries of one locale. Numbers and booleans are written
/// out, other values are dropped.
fn read_texts(locale: &str, entries: Map<String, Value>) -> HashMap<String, String> {
    entries
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(text) => Some((key, text)),
            Value::Number(n) => Some((key, n.to_string())),
            Value::Bool(b) => Some((key, b.to_string())),
            other => {
                warn!("Ignoring {:?} in {:?}: not a text ({})", key, locale, other);
                None
            }
        })
        .collect()
}

impl<'de> serde::Deserialize<'de> for LocaleTable {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let locales: BTreeMap<String, Value> = serde::Deserialize::deserialize(deserializer)?;
        Ok(LocaleTable(
            locales
                .into_iter()
                .filter_map(|(locale, texts)| match texts {
                    Value::Object(entries) => {
                        let texts = read_texts(&locale, entries);
                        Some((locale, texts))
                    }
                    _ => {
                        warn!("Ignoring locale {:?}: not an object", locale);
                        None
                    }
                })
                .collect(),
        ))
    }
}

impl LocaleTable {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
        self.0
            .get(locale)
            .and_then(|texts| texts.get(key))
            .map(String::as_str)
    }

    /// Locale codes with an entry in the table, sorted.
    pub fn locales(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    pub fn texts(&self, locale: &str) -> Option<&HashMap<String, String>> {
        self.0.get(locale)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Read-only view of the table for one locale.
#[derive(Clone, Copy, Debug)]
pub struct Translator<'a> {
    table: &'a LocaleTable,
    locale: &'a str,
}

impl<'a> Translator<'a> {
    pub fn new(table: &'a LocaleTable, locale: &'a str) -> Self {
        Translator { table, locale }
    }

    pub fn locale(&self) -> &'a str {
        self.locale
    }

    /// Non-empty text for `key`.
    pub fn text(&self, key: &str) -> Option<&'a str> {
        self.table
            .lookup(self.locale, key)
            .filter(|t| !t.is_empty())
    }

    pub fn text_or(&self, key: &str, default: &'a str) -> &'a str {
        self.text(key).unwrap_or(default)
    }
}

/// The part of the page the localizer writes to.
pub trait TextSurface {
    /// Calls `translate` with the key of every tagged element, replacing the
    /// element text when it returns something.
    fn for_each_tagged(&self, translate: &mut dyn FnMut(&str) -> Option<String>);

    /// Shows `code` in the locale indicators.
    fn show_locale(&self, code: &str);
}

pub fn is_valid_locale(locale: &str) -> bool {
    !locale.is_empty()
        && locale
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

type Subscriber = Box<dyn FnMut(&Translator<'_>)>;

pub struct Localizer<S> {
    table: LocaleTable,
    active: String,
    store: S,
    storage_key: String,
    subscribers: Vec<Subscriber>,
}

impl<S: KeyValueStore> Localizer<S> {
    /// Creates a localizer with an empty table, restoring the locale saved
    /// by a previous visit.
    pub fn new(store: S, config: &Config) -> Self {
        let active = store
            .get(&config.locale_storage_key)
            .filter(|l| is_valid_locale(l))
            .unwrap_or_else(|| config.default_locale.clone());
        Localizer {
            table: LocaleTable::default(),
            active,
            store,
            storage_key: config.locale_storage_key.clone(),
            subscribers: Vec::new(),
        }
    }

    /// Replaces the whole translation table.
    pub fn set_table(&mut self, table: LocaleTable) {
        debug!("Translation table loaded for {:?}", table.locales());
        self.table = table;
    }

    pub fn table(&self) -> &LocaleTable {
        &self.table
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn translator(&self) -> Translator<'_> {
        Translator::new(&self.table, &self.active)
    }

    pub fn translate(&self, key: &str) -> Option<&str> {
        self.translator().text(key)
    }

    /// Registers a callback run after every [`Localizer::apply`].
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&Translator<'_>) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Writes the texts of `locale` to the page and notifies subscribers.
    pub fn apply(&mut self, locale: &str, surface: &dyn TextSurface) {
        let table = &self.table;
        if table.texts(locale).is_none() {
            debug!("No translations for {:?}, keeping current texts", locale);
        }
        surface.for_each_tagged(&mut |key| {
            table
                .lookup(locale, key)
                .filter(|t| !t.is_empty())
                .map(str::to_owned)
        });
        surface.show_locale(&locale.to_uppercase());

        let translator = Translator::new(&self.table, locale);
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&translator);
        }
    }

    /// Makes `locale` the active one, saves it and applies it.
    pub fn set_locale(&mut self, locale: &str, surface: &dyn TextSurface) -> Result<()> {
        let locale = locale.trim();
        if !is_valid_locale(locale) {
            warn!("Ignoring invalid locale {:?}", locale);
            return Err(Error::InvalidLocale(locale.to_owned()));
        }
        self.active = locale.to_owned();
        if let Err(e) = self.store.set(&self.storage_key, locale) {
            warn!("Couldn't save the locale: {}", e);
        }
        let active = self.active.clone();
        self.apply(&active, surface);
        Ok(())
    }
}
