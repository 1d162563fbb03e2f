//! Stockroom command-line driver.
//!
//! Opens the storefront over the configured backend, runs one command, and
//! exits. With a real data directory (the default) every invocation restores
//! state from the snapshot files, so a `login --remember` in one invocation
//! carries into the next.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod backend;
mod cli;
mod commands;
mod output;

use cli::{CatalogCommands, Cli, Commands, ComplaintCommands, ReviewCommands, UserCommands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("stockroom=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let format = cli.format;
    let mut store = backend::open_storefront(&cli)?;

    match &cli.command {
        Commands::Signup(args) => commands::identity::signup(&mut store, args, format),
        Commands::Login(args) => commands::identity::login(&mut store, args, format),
        Commands::Logout => commands::identity::logout(&mut store, format),
        Commands::Whoami => commands::identity::whoami(&store, format),
        Commands::Profile(args) => commands::identity::profile(&mut store, args, format),
        Commands::Passwd(args) => commands::identity::passwd(&mut store, args, format),
        Commands::ForgotPassword(args) => {
            commands::identity::forgot_password(&store, args, format)
        }
        Commands::User(command) => match command {
            UserCommands::List => commands::identity::list(&store, format),
            UserCommands::Delete(args) => commands::identity::delete(&mut store, &args.id, format),
            UserCommands::ResetPassword(args) => {
                commands::identity::reset_password(&mut store, &args.id, format)
            }
        },
        Commands::Catalog(command) => match command {
            CatalogCommands::List => commands::catalog::list(&store, format),
            CatalogCommands::Add(args) => commands::catalog::add(&mut store, args, format),
            CatalogCommands::Update(args) => commands::catalog::update(&mut store, args, format),
            CatalogCommands::Remove(args) => {
                commands::catalog::remove(&mut store, &args.id, format)
            }
        },
        Commands::Review(command) => match command {
            ReviewCommands::List(args) => commands::reviews::list(&store, args, format),
            ReviewCommands::Add(args) => commands::reviews::add(&mut store, args, format),
        },
        Commands::Complaint(command) => match command {
            ComplaintCommands::List => commands::complaints::list(&store, format),
            ComplaintCommands::File(args) => commands::complaints::file(&mut store, args, format),
            ComplaintCommands::MarkRead(args) => {
                commands::complaints::mark_read(&mut store, &args.id, format)
            }
        },
    }
}
