use anyhow::{Context, Result};
use hypercat_client::{ClientConfig, HypercatClient};
use std::path::PathBuf;
use tracing::info;

use crate::io::{catalog_json, read_catalog};

pub fn fetch(url: &str, config: ClientConfig, pretty: bool) -> Result<()> {
    let client = HypercatClient::new(config)?;
    let catalog = client
        .fetch_catalog(url)
        .with_context(|| format!("Failed to fetch catalogue from {url}"))?;
    println!("{}", catalog_json(&catalog, pretty)?);
    Ok(())
}

/// Publish `input` at `url`. With `replace`, any catalogue already there is
/// deleted first.
pub fn push(url: &str, input: PathBuf, replace: bool, config: ClientConfig) -> Result<()> {
    let catalog = read_catalog(Some(&input))?;
    catalog
        .validate()
        .with_context(|| format!("Refusing to publish invalid catalogue {:?}", input))?;
    let client = HypercatClient::new(config)?;
    client
        .create(url, &catalog, replace)
        .with_context(|| format!("Failed to publish catalogue to {url}"))?;
    info!(url, items = catalog.items().len(), "published catalogue");
    eprintln!("Published {} items to {}", catalog.items().len(), url);
    Ok(())
}

pub fn delete(url: &str, config: ClientConfig) -> Result<()> {
    let client = HypercatClient::new(config)?;
    client
        .delete(url)
        .with_context(|| format!("Failed to delete catalogue at {url}"))?;
    eprintln!("Deleted {}", url);
    Ok(())
}
