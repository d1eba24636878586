use crate::site::Site;
use clap::{App, ArgMatches, SubCommand};
use showroom_common::lint::{self, Issue};
use std::{collections::BTreeSet, fs};
use tracing::{error, info};

pub fn command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("check").about(
        "Check the catalog, the translations and the data-i18n keys used in the HTML files",
    )
}

pub fn run<'a>(_args: &ArgMatches<'a>, site: &Site) -> bool {
    let mut issues: Vec<Issue> = Vec::new();
    let mut failed = false;

    match site.catalog() {
        Ok(catalog) => {
            info!("{} products in the catalog", catalog.len());
            issues.extend(lint::check_catalog(&catalog));
        }
        Err(e) => {
            error!("Couldn't read {}: {}", site.config.catalog_url, e);
            failed = true;
        }
    }

    let default_locale = &site.config.default_locale;
    match site.translations() {
        Ok(table) => {
            info!("Translations for {:?}", table.locales());
            issues.extend(lint::check_translations(&table, default_locale));

            match site.markup_files() {
                Ok(files) => {
                    let mut keys = BTreeSet::new();
                    for file in files {
                        match fs::read_to_string(&file) {
                            Ok(html) => keys.extend(lint::markup_keys(&html)),
                            Err(e) => error!("Couldn't read {}: {}", file.display(), e),
                        }
                    }
                    info!("{} translation keys used in the markup", keys.len());
                    issues.extend(lint::check_markup_keys(&keys, &table, default_locale));
                }
                Err(e) => error!("Couldn't list the HTML files: {}", e),
            }
        }
        Err(e) => {
            error!("Couldn't read {}: {}", site.config.translations_url, e);
            failed = true;
        }
    }

    issues.sort_by(|a, b| b.severity.cmp(&a.severity));
    for issue in &issues {
        println!("{}", issue);
    }
    if issues.is_empty() && !failed {
        println!("Everything looks fine.");
    }
    !failed && !lint::has_errors(&issues)
}
