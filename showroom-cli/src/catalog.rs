use crate::site::Site;
use clap::{App, Arg, ArgMatches, SubCommand};
use showroom_common::{
    catalog::{CatalogStore, Filter},
    product::ProductId,
};
use tracing::error;

pub fn command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("catalog")
        .about("Browse the product catalog")
        .subcommand(SubCommand::with_name("categories").about("List the filter categories"))
        .subcommand(
            SubCommand::with_name("list")
                .arg(
                    Arg::with_name("category")
                        .short("c")
                        .long("category")
                        .takes_value(true)
                        .help("Only show the products of this category"),
                )
                .about("List the products"),
        )
        .subcommand(
            SubCommand::with_name("show")
                .arg(
                    Arg::with_name("id")
                        .takes_value(true)
                        .required(true)
                        .help("Id of the product"),
                )
                .arg(
                    Arg::with_name("json")
                        .long("json")
                        .help("Print the product as JSON"),
                )
                .about("Show one product"),
        )
}

pub fn run<'a>(args: &ArgMatches<'a>, site: &Site) -> bool {
    let catalog = match site.catalog() {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Couldn't read {}: {}", site.config.catalog_url, e);
            return false;
        }
    };
    match args.subcommand() {
        ("categories", Some(_)) => {
            for category in catalog.categories() {
                println!("{}", category);
            }
            true
        }
        ("list", Some(x)) => {
            list(x, &catalog);
            true
        }
        ("show", Some(x)) => show(x, &catalog, &site.config.fallback_color),
        _ => {
            println!("Unknown subcommand");
            false
        }
    }
}

fn list<'a>(args: &ArgMatches<'a>, catalog: &CatalogStore) {
    let filter = Filter::parse(args.value_of("category").unwrap_or(Filter::ALL));
    for product in catalog.filter(&filter) {
        println!(
            "{}\t{}\t{}\t{}",
            product.id,
            product.name,
            product.viscosity,
            product.category().unwrap_or("-")
        );
    }
}

fn show<'a>(args: &ArgMatches<'a>, catalog: &CatalogStore, fallback_color: &str) -> bool {
    let id = ProductId::from(args.value_of("id").unwrap_or_default());
    let product = match catalog.by_id(&id) {
        Some(product) => product,
        None => {
            error!("No product with id {}", id);
            return false;
        }
    };

    if args.is_present("json") {
        match serde_json::to_string_pretty(product) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Couldn't serialize the product: {}", e);
                return false;
            }
        }
        return true;
    }

    println!("{} ({})", product.name, product.id);
    println!("Viscosity: {}", product.viscosity);
    println!("Category: {}", product.category().unwrap_or("-"));
    println!("Color: {}", product.color(fallback_color));
    println!("Image: {}", product.image);
    if !product.description.is_empty() {
        println!("\n{}", product.description);
    }
    if let Some(header) = product.table.as_ref().and_then(|t| t.first()) {
        println!("\n{}", header.join("\t"));
        for row in product.detail_rows() {
            println!("{}", row.join("\t"));
        }
    }
    true
}
