use anyhow::{Result, bail};
use clap::Args;
use hypercat::v1::{Catalog, Node, Resource};
use hypercat::vocab::CATALOGUE_TYPE;
use std::path::PathBuf;

use crate::cmd_new::split_relation;
use crate::io::{catalog_json, read_catalog, write_output};

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Catalogue to add to (reads from stdin if not provided)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (writes to stdout if not provided; may equal --input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Where the item can be fetched
    #[arg(long)]
    pub href: String,

    /// Item description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Item content type; the catalogue type adds a child catalogue
    #[arg(long, default_value = CATALOGUE_TYPE)]
    pub content_type: String,

    /// Extra relation as REL=VAL (repeatable)
    #[arg(long = "rel")]
    pub relations: Vec<String>,
}

pub fn run(args: AddArgs, pretty: bool) -> Result<()> {
    let mut catalog = read_catalog(args.input.as_ref())?;
    add(&mut catalog, &args)?;
    write_output(args.output.as_ref(), &catalog_json(&catalog, pretty)?)
}

fn add(catalog: &mut Catalog, args: &AddArgs) -> Result<()> {
    if args.href.is_empty() {
        bail!("--href must not be empty");
    }
    let mut item: Node = if args.content_type == CATALOGUE_TYPE {
        Catalog::new(args.description.as_str()).into()
    } else {
        Resource::new(args.description.as_str(), args.content_type.as_str()).into()
    };
    for pair in &args.relations {
        let (rel, val) = split_relation(pair)?;
        item.add_relation(rel, val);
    }
    catalog.add_item(item, args.href.as_str());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(href: &str, content_type: &str) -> AddArgs {
        AddArgs {
            input: None,
            output: None,
            href: href.to_string(),
            description: "item".to_string(),
            content_type: content_type.to_string(),
            relations: vec!["name=item".to_string()],
        }
    }

    #[test]
    fn test_add_resource() {
        let mut cat = Catalog::new("root");
        add(&mut cat, &args("http://r", "text/plain")).unwrap();
        let item = &cat.items()[0];
        assert!(item.as_resource().is_some());
        assert_eq!(item.href(), Some("http://r"));
        assert_eq!(item.content_type(), Some("text/plain"));
        assert_eq!(item.values("name"), vec!["item"]);
    }

    #[test]
    fn test_add_child_catalogue_by_default_type() {
        let mut cat = Catalog::new("root");
        add(&mut cat, &args("http://c", CATALOGUE_TYPE)).unwrap();
        assert!(cat.items()[0].as_catalog().is_some());
    }

    #[test]
    fn test_add_rejects_empty_href() {
        let mut cat = Catalog::new("root");
        assert!(add(&mut cat, &args("", "text/plain")).is_err());
    }

    #[test]
    fn test_run_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat.json");
        std::fs::write(&path, Catalog::new("root").to_json().unwrap()).unwrap();

        let mut a = args("http://r", "text/plain");
        a.input = Some(path.clone());
        a.output = Some(path.clone());
        run(a, false).unwrap();

        let cat = hypercat::v1::parse(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(cat.items().len(), 1);
    }
}
