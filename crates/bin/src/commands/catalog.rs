//! Catalog commands: list, add, update, and remove products.

use stockroom::{EntityId, Product, ProductPatch, Storefront};

use crate::cli::{CatalogAddArgs, CatalogUpdateArgs};
use crate::output::{OutputFormat, print_table};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Run the `catalog list` command
pub fn list(store: &Storefront, format: OutputFormat) -> CommandResult {
    let products = store.catalog().all();

    match format {
        OutputFormat::Human => {
            if products.is_empty() {
                println!("The catalog is empty.");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = products
                .iter()
                .map(|p| {
                    vec![
                        p.id.to_string(),
                        p.name.clone(),
                        format!("{:.2}", p.price),
                        p.category.to_string(),
                        p.brand.clone().unwrap_or_default(),
                    ]
                })
                .collect();
            print_table(&["ID", "NAME", "PRICE", "CATEGORY", "BRAND"], &rows);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(products)?),
    }
    Ok(())
}

/// Run the `catalog add` command
pub fn add(store: &mut Storefront, args: &CatalogAddArgs, format: OutputFormat) -> CommandResult {
    let product = Product {
        id: EntityId::from(args.id.clone()),
        name: args.name.clone(),
        price: args.price,
        category: args.category.into(),
        description: args.description.clone(),
        image: args.image.clone(),
        brand: args.brand.clone(),
    };
    let added = store.catalog_mut().add(product)?;

    if !added {
        eprintln!("A product with id {} already exists.", args.id);
        std::process::exit(1);
    }

    match format {
        OutputFormat::Human => println!("Product {} added.", args.id),
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "added": true, "id": args.id }))
        }
    }
    Ok(())
}

/// Run the `catalog update` command
pub fn update(
    store: &mut Storefront,
    args: &CatalogUpdateArgs,
    format: OutputFormat,
) -> CommandResult {
    let patch = ProductPatch {
        name: args.name.clone(),
        price: args.price,
        category: args.category.map(Into::into),
        description: args.description.clone(),
        image: args.image.clone(),
        brand: args.brand.clone(),
    };
    let updated = store.catalog_mut().update(&args.id.as_str().into(), patch)?;

    if !updated {
        eprintln!("No product with id {}.", args.id);
        std::process::exit(1);
    }

    match format {
        OutputFormat::Human => println!("Product {} updated.", args.id),
        OutputFormat::Json => {
            let product = store.catalog().get(&args.id.as_str().into());
            println!(
                "{}",
                serde_json::json!({ "updated": true, "product": product })
            );
        }
    }
    Ok(())
}

/// Run the `catalog remove` command
pub fn remove(store: &mut Storefront, id: &str, format: OutputFormat) -> CommandResult {
    let removed = store.catalog_mut().remove(&id.into())?;

    if !removed {
        eprintln!("No product with id {id}.");
        std::process::exit(1);
    }

    match format {
        OutputFormat::Human => println!("Product {id} removed."),
        OutputFormat::Json => println!("{}", serde_json::json!({ "removed": true, "id": id })),
    }
    Ok(())
}
