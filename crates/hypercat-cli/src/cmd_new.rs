use anyhow::{Result, anyhow};
use clap::Args;
use hypercat::v1::Catalog;
use std::path::PathBuf;

use crate::io::{catalog_json, write_output};

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Human-readable description (may be empty)
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Declare that the catalogue supports simple search
    #[arg(long)]
    pub simple_search: bool,

    /// Homepage URL
    #[arg(long)]
    pub homepage: Option<String>,

    /// Content type found in this catalogue (repeatable)
    #[arg(long = "contains-type")]
    pub contains_types: Vec<String>,

    /// Extra relation as REL=VAL (repeatable)
    #[arg(long = "rel")]
    pub relations: Vec<String>,

    /// Output file (writes to stdout if not provided)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: NewArgs, pretty: bool) -> Result<()> {
    let catalog = build(&args)?;
    write_output(args.output.as_ref(), &catalog_json(&catalog, pretty)?)
}

fn build(args: &NewArgs) -> Result<Catalog> {
    let mut catalog = Catalog::new(args.description.as_str());
    if args.simple_search {
        catalog.supports_simple_search();
    }
    if let Some(url) = &args.homepage {
        catalog.has_homepage(url.as_str());
    }
    for content_type in &args.contains_types {
        catalog.contains_content_type(content_type.as_str());
    }
    for pair in &args.relations {
        let (rel, val) = split_relation(pair)?;
        catalog.add_relation(rel, val);
    }
    Ok(catalog)
}

/// Split `REL=VAL` at the first `=`. Relation URNs contain colons, so `=` is
/// the only safe separator.
pub fn split_relation(pair: &str) -> Result<(&str, &str)> {
    pair.split_once('=')
        .ok_or_else(|| anyhow!("Expected REL=VAL, got {:?}", pair))
}
