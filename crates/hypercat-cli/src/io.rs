use anyhow::{Context, Result};
use hypercat::v1::{Catalog, parse, to_canonical_string};
use std::io::Read;
use std::path::PathBuf;

/// Read a file, or stdin when no path is given.
pub fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

pub fn read_catalog(input: Option<&PathBuf>) -> Result<Catalog> {
    let content = read_input(input)?;
    let source = match input {
        Some(path) => format!("{:?}", path),
        None => "stdin".to_string(),
    };
    parse(&content).with_context(|| format!("Failed to parse catalogue from {source}"))
}

/// Write to a file, or stdout when no path is given.
pub fn write_output(output: Option<&PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))
        }
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}

pub fn catalog_json(catalog: &Catalog, pretty: bool) -> Result<String> {
    let json = if pretty {
        catalog.to_json_pretty()?
    } else {
        catalog.to_json()?
    };
    Ok(json)
}

pub fn to_json<T: serde::Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        to_canonical_string(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
