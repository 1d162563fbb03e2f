//! Backend creation and utility functions.

use stockroom::backend::{Backend, InMemory, OnDisk};
use stockroom::{Result, Storefront};

use crate::cli::Cli;

/// Create the appropriate backend based on configuration
pub fn create_backend(cli: &Cli) -> Result<Box<dyn Backend>> {
    if cli.ephemeral {
        tracing::info!("Using ephemeral in-memory backend");
        return Ok(Box::new(InMemory::new()));
    }

    tracing::info!("Using data directory at {}", cli.data_dir.display());
    Ok(Box::new(OnDisk::open(&cli.data_dir)?))
}

/// Open the storefront over the configured backend
pub fn open_storefront(cli: &Cli) -> Result<Storefront> {
    Storefront::open(create_backend(cli)?)
}
