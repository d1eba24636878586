use crate::site::Site;
use clap::{App, Arg, ArgMatches, SubCommand};
use showroom_common::locale::LocaleTable;
use std::collections::BTreeSet;
use tracing::error;

pub fn command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("locale")
        .about("Inspect the translation table")
        .subcommand(SubCommand::with_name("list").about("List the available locales"))
        .subcommand(
            SubCommand::with_name("missing")
                .arg(
                    Arg::with_name("locale")
                        .takes_value(true)
                        .required(true)
                        .help("Locale to check"),
                )
                .about("List the keys of the default locale that a locale doesn't translate"),
        )
}

pub fn run<'a>(args: &ArgMatches<'a>, site: &Site) -> bool {
    let table = match site.translations() {
        Ok(table) => table,
        Err(e) => {
            error!("Couldn't read {}: {}", site.config.translations_url, e);
            return false;
        }
    };
    match args.subcommand() {
        ("list", Some(_)) => {
            for locale in table.locales() {
                let count = table.texts(locale).map_or(0, |t| t.len());
                println!("{}\t{} texts", locale, count);
            }
            true
        }
        ("missing", Some(x)) => {
            let locale = x.value_of("locale").unwrap_or_default();
            for key in missing(&table, &site.config.default_locale, locale) {
                println!("{}", key);
            }
            true
        }
        _ => {
            println!("Unknown subcommand");
            false
        }
    }
}

fn missing<'t>(table: &'t LocaleTable, reference: &str, locale: &str) -> BTreeSet<&'t str> {
    table
        .texts(reference)
        .map(|texts| {
            texts
                .keys()
                .map(String::as_str)
                .filter(|key| table.lookup(locale, key).is_none())
                .collect()
        })
        .unwrap_or_default()
}
