use clap::{App, Arg};
use lazy_static::lazy_static;
use showroom_common::config::Config;
use std::{env, path::PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod catalog;
mod check;
mod locale;
mod site;

use site::Site;

lazy_static! {
    pub static ref CONFIG: Config = Config::from_lookup(|key| env::var(key).ok());
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut app = App::new("Showroom CLI")
        .bin_name("shw")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect and validate the assets of the showroom site.")
        .arg(
            Arg::with_name("root")
                .short("r")
                .long("root")
                .takes_value(true)
                .global(true)
                .help("Directory the site is served from (defaults to SITE_ROOT, then .)"),
        )
        .subcommand(check::command())
        .subcommand(catalog::command())
        .subcommand(locale::command());
    let matches = app.clone().get_matches();

    match dotenv::dotenv() {
        Ok(path) => info!("Configuration read from {}", path.display()),
        Err(ref e) if e.not_found() => warn!("no .env was found"),
        Err(e) => warn!("Invalid .env file: {}", e),
    }

    let root = matches
        .value_of("root")
        .map(PathBuf::from)
        .or_else(|| env::var("SITE_ROOT").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let site = Site::new(root, &CONFIG);

    let ok = match matches.subcommand() {
        ("check", Some(args)) => check::run(args, &site),
        ("catalog", Some(args)) => catalog::run(args, &site),
        ("locale", Some(args)) => locale::run(args, &site),
        _ => {
            app.print_help().expect("Couldn't print help");
            println!();
            true
        }
    };
    if !ok {
        std::process::exit(1);
    }
}
