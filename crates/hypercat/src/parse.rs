//! Reading catalogue documents back into a tree.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{HypercatError, Result};
use crate::types::{Catalog, MetadataList, Node, Relation, Resource};
use crate::vocab::{
    CATALOGUE_METADATA, CATALOGUE_TYPE, HAS_DESCRIPTION, HREF, IS_CONTENT_TYPE, ITEM_METADATA,
    ITEMS, REL, VAL,
};

/// Options controlling how much of a document survives parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keep every relation of the root and of each item, in document order.
    /// When false, only the content type and first description are rebuilt
    /// and everything else is dropped.
    pub retain_metadata: bool,
    /// Rebuild items whose content type is the catalogue type as (childless)
    /// [`Catalog`] nodes instead of [`Resource`] leaves. Rendering is the
    /// same either way; this only changes the in-memory variant.
    pub restore_catalogs: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            retain_metadata: true,
            restore_catalogs: false,
        }
    }
}

impl ParseOptions {
    /// Rebuild each node from its mandatory relations only.
    pub fn mandatory_only() -> Self {
        Self {
            retain_metadata: false,
            restore_catalogs: false,
        }
    }
}

/// Parse a catalogue document with the default [`ParseOptions`].
pub fn parse(json: &str) -> Result<Catalog> {
    parse_with(json, ParseOptions::default())
}

pub fn parse_with(json: &str, options: ParseOptions) -> Result<Catalog> {
    let value: Value = serde_json::from_str(json)?;
    from_value(&value, options)
}

/// Build a catalogue from an already-decoded JSON value.
///
/// Fails fast on the first problem; nothing is partially returned.
pub fn from_value(value: &Value, options: ParseOptions) -> Result<Catalog> {
    let object = value.as_object().ok_or(HypercatError::NotAnObject)?;

    let metadata = metadata_at(
        field(object, CATALOGUE_METADATA, CATALOGUE_METADATA)?,
        CATALOGUE_METADATA,
    )?;
    if !metadata.contains(IS_CONTENT_TYPE, CATALOGUE_TYPE) {
        return Err(HypercatError::NotACatalog {
            location: CATALOGUE_METADATA.to_string(),
        });
    }
    let description = first(&metadata, HAS_DESCRIPTION, CATALOGUE_METADATA)?.to_string();

    let mut catalog = if options.retain_metadata {
        Catalog::from_metadata(metadata)
    } else {
        Catalog::new(description)
    };

    let items = field(object, ITEMS, ITEMS)?
        .as_array()
        .ok_or_else(|| wrong_type(ITEMS, "array"))?;

    for (index, entry) in items.iter().enumerate() {
        let location = format!("{ITEMS}[{index}]");
        let (node, href) = item_at(entry, &location, options)?;
        catalog.add_item(node, href);
    }

    debug!(
        description = catalog.description().unwrap_or_default(),
        items = catalog.items().len(),
        "parsed catalogue"
    );
    Ok(catalog)
}

fn item_at(entry: &Value, location: &str, options: ParseOptions) -> Result<(Node, String)> {
    let object = entry
        .as_object()
        .ok_or_else(|| wrong_type(location, "object"))?;

    let href = string_at(object, HREF, location)?.to_string();

    let metadata_location = format!("{location}.{ITEM_METADATA}");
    let metadata = metadata_at(
        field(object, ITEM_METADATA, &metadata_location)?,
        &metadata_location,
    )?;
    let content_type = first(&metadata, IS_CONTENT_TYPE, &metadata_location)?.to_string();
    let description = first(&metadata, HAS_DESCRIPTION, &metadata_location)?.to_string();

    let as_catalog = options.restore_catalogs && content_type == CATALOGUE_TYPE;
    let node: Node = match (as_catalog, options.retain_metadata) {
        (true, true) => Catalog::from_metadata(metadata).into(),
        (true, false) => Catalog::new(description).into(),
        (false, true) => Resource::from_metadata(metadata).into(),
        (false, false) => Resource::new(description, content_type).into(),
    };
    Ok((node, href))
}

fn metadata_at(value: &Value, location: &str) -> Result<MetadataList> {
    let entries = value
        .as_array()
        .ok_or_else(|| wrong_type(location, "array"))?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let location = format!("{location}[{index}]");
            let object = entry
                .as_object()
                .ok_or_else(|| wrong_type(&location, "object"))?;
            let rel = string_at(object, REL, &location)?;
            let val = string_at(object, VAL, &location)?;
            Ok(Relation::new(rel, val))
        })
        .collect()
}

fn field<'a>(object: &'a Map<String, Value>, key: &str, location: &str) -> Result<&'a Value> {
    object
        .get(key)
        .ok_or_else(|| HypercatError::MissingField {
            location: location.to_string(),
        })
}

fn string_at<'a>(object: &'a Map<String, Value>, key: &str, parent: &str) -> Result<&'a str> {
    let location = format!("{parent}.{key}");
    field(object, key, &location)?
        .as_str()
        .ok_or_else(|| wrong_type(&location, "string"))
}

fn first<'a>(metadata: &'a MetadataList, rel: &'static str, location: &str) -> Result<&'a str> {
    metadata
        .first(rel)
        .ok_or_else(|| HypercatError::MissingRelation {
            rel,
            location: location.to_string(),
        })
}

fn wrong_type(location: &str, expected: &'static str) -> HypercatError {
    HypercatError::WrongType {
        location: location.to_string(),
        expected,
    }
}
