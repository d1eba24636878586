use tracing::warn;

/// Runtime settings of the site script.
///
/// Every value can be overridden through a lookup function keyed by an
/// upper-snake name (`CATALOG_URL`, `DEFAULT_LOCALE`, ...). The command line
/// tool looks them up in the environment, the browser in `data-*` attributes
/// of `<body>` (see [`data_attribute`]).
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub translations_url: String,
    pub catalog_url: String,
    pub header_url: String,
    pub footer_url: String,
    pub about_url: String,
    pub default_locale: String,
    pub locale_storage_key: String,
    pub fallback_color: String,
    pub transition_ms: u32,
    pub contact_email: Option<String>,
}

pub const KEYS: &[&str] = &[
    "TRANSLATIONS_URL",
    "CATALOG_URL",
    "HEADER_URL",
    "FOOTER_URL",
    "ABOUT_URL",
    "DEFAULT_LOCALE",
    "LOCALE_STORAGE_KEY",
    "FALLBACK_COLOR",
    "TRANSITION_MS",
    "CONTACT_EMAIL",
];

const DEFAULT_TRANSITION_MS: u32 = 300;

impl Config {
    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };
        let or = |name: &str, default: &str| var(name).unwrap_or_else(|| default.to_owned());

        let transition_ms = match var("TRANSITION_MS") {
            Some(ms) => ms.parse::<u32>().unwrap_or_else(|_| {
                warn!(
                    "TRANSITION_MS is not a number ({:?}), using {}",
                    ms, DEFAULT_TRANSITION_MS
                );
                DEFAULT_TRANSITION_MS
            }),
            None => DEFAULT_TRANSITION_MS,
        };

        Config {
            translations_url: or("TRANSLATIONS_URL", "translation.json"),
            catalog_url: or("CATALOG_URL", "products.json"),
            header_url: or("HEADER_URL", "layout/header.html"),
            footer_url: or("FOOTER_URL", "layout/footer.html"),
            about_url: or("ABOUT_URL", "about.html"),
            default_locale: or("DEFAULT_LOCALE", "en"),
            locale_storage_key: or("LOCALE_STORAGE_KEY", "lang"),
            fallback_color: or("FALLBACK_COLOR", "#4A5568"),
            transition_ms,
            contact_email: var("CONTACT_EMAIL"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::from_lookup(|_| None)
    }
}

/// Name of the `<body>` attribute carrying a setting: `CATALOG_URL` is read
/// from `data-catalog-url`.
pub fn data_attribute(key: &str) -> String {
    format!("data-{}", key.to_lowercase().replace('_', "-"))
}
