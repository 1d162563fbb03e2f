//! Review commands: list and add product reviews.

use stockroom::{Review, Storefront};

use crate::cli::{ReviewAddArgs, ReviewListArgs};
use crate::output::{OutputFormat, print_table};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn review_rows(reviews: &[&Review]) -> Vec<Vec<String>> {
    reviews
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.product_id.to_string(),
                r.rating.to_string(),
                r.user_name.clone(),
                r.date.clone(),
            ]
        })
        .collect()
}

/// Run the `review list` command
pub fn list(store: &Storefront, args: &ReviewListArgs, format: OutputFormat) -> CommandResult {
    let reviews: Vec<&Review> = match &args.product {
        Some(product) => store.reviews().for_product(&product.as_str().into()),
        None => store.reviews().all().iter().collect(),
    };

    match format {
        OutputFormat::Human => {
            if reviews.is_empty() {
                println!("No reviews yet.");
                return Ok(());
            }
            print_table(
                &["ID", "PRODUCT", "RATING", "BY", "DATE"],
                &review_rows(&reviews),
            );
            if let Some(product) = &args.product {
                let average = store.reviews().average_rating(&product.as_str().into());
                println!();
                println!("Average rating: {average:.1}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&reviews)?),
    }
    Ok(())
}

/// Run the `review add` command
pub fn add(store: &mut Storefront, args: &ReviewAddArgs, format: OutputFormat) -> CommandResult {
    let Some(user) = store.identity().current_user().cloned() else {
        eprintln!("Not logged in. Use `login --remember` first.");
        std::process::exit(1);
    };
    let product_id = args.product.as_str().into();
    if store.catalog().get(&product_id).is_none() {
        eprintln!("No product with id {}.", args.product);
        std::process::exit(1);
    }

    let id = store
        .reviews_mut()
        .add(&product_id, &user.id, &user.name, args.rating, &args.comment)?;

    match format {
        OutputFormat::Human => println!("Review {id} added."),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "added": true, "id": id.to_string() })
        ),
    }
    Ok(())
}
