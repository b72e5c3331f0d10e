use anyhow::{Result, bail};
use hypercat::v1::{Catalog, NodeRef};
use std::path::PathBuf;

use crate::io::{catalog_json, read_catalog, to_json};

pub fn run(input: Option<PathBuf>, rel: &str, path: &str, pretty: bool) -> Result<()> {
    let catalog = read_catalog(input.as_ref())?;
    println!("{}", render_found(&catalog, rel, path, pretty)?);
    Ok(())
}

/// The root renders as a whole document, anything below it as an item entry.
fn render_found(catalog: &Catalog, rel: &str, path: &str, pretty: bool) -> Result<String> {
    match catalog.find_by_path(rel, path) {
        None => bail!("No item at {:?} (matching on {})", path, rel),
        Some(NodeRef::Catalog(found)) if std::ptr::eq(found, catalog) => {
            catalog_json(catalog, pretty)
        }
        Some(found) => to_json(&found.item_entry(), pretty),
    }
}
