//! Complaint commands: list, file, and mark messages read.

use stockroom::Storefront;

use crate::cli::ComplaintFileArgs;
use crate::output::{OutputFormat, print_table};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Run the `complaint list` command
pub fn list(store: &Storefront, format: OutputFormat) -> CommandResult {
    let complaints = store.complaints().all();

    match format {
        OutputFormat::Human => {
            if complaints.is_empty() {
                println!("No messages.");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = complaints
                .iter()
                .map(|c| {
                    vec![
                        c.id.to_string(),
                        c.kind.to_string(),
                        c.status.to_string(),
                        c.name.clone(),
                        c.email.clone(),
                        c.date.clone(),
                    ]
                })
                .collect();
            print_table(&["ID", "KIND", "STATUS", "FROM", "EMAIL", "DATE"], &rows);
            println!();
            println!("Unread: {}", store.complaints().unread_count());
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(complaints)?),
    }
    Ok(())
}

/// Run the `complaint file` command
pub fn file(
    store: &mut Storefront,
    args: &ComplaintFileArgs,
    format: OutputFormat,
) -> CommandResult {
    let id = store.complaints_mut().file(
        &args.name,
        &args.email,
        args.kind.into(),
        &args.message,
        args.order.clone(),
    )?;

    match format {
        OutputFormat::Human => println!("Message {id} filed. We'll be in touch."),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "filed": true, "id": id.to_string() })
        ),
    }
    Ok(())
}

/// Run the `complaint mark-read` command
pub fn mark_read(store: &mut Storefront, id: &str, format: OutputFormat) -> CommandResult {
    let marked = store.complaints_mut().mark_read(&id.into())?;

    if !marked {
        eprintln!("No message with id {id}.");
        std::process::exit(1);
    }

    match format {
        OutputFormat::Human => println!("Message {id} marked read."),
        OutputFormat::Json => println!("{}", serde_json::json!({ "read": true, "id": id })),
    }
    Ok(())
}
