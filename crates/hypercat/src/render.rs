//! Wire rendering for catalogues and items.
//!
//! A catalogue renders differently depending on where it appears. Fetched on
//! its own it is a document with `item-metadata` and `items`; listed inside a
//! parent it is an item entry with `href` and `i-object-metadata`. Only one
//! level is ever rendered: a child catalogue's own items never appear in its
//! parent's document, so a client walks the hierarchy one fetch per level.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::types::{Catalog, MetadataList, Node, NodeRef};

/// A catalogue rendered as a document root.
///
/// Field order is the sorted key order, so the output is canonical without
/// going through a map.
///
/// # JSON shape
///
/// ```json
/// {
///   "item-metadata": [ { "rel": "…", "val": "…" } ],
///   "items": [ { "href": "…", "i-object-metadata": [ … ] } ]
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CatalogDocument<'a> {
    #[serde(rename = "item-metadata")]
    pub metadata: &'a MetadataList,
    pub items: Vec<ItemEntry<'a>>,
}

/// Any node rendered as a child reference.
///
/// Only attached children carry an href. A node rendered before it has been
/// attached omits the `href` key, which no reader will accept as an item.
#[derive(Debug, Clone, Serialize)]
pub struct ItemEntry<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<&'a str>,
    #[serde(rename = "i-object-metadata")]
    pub metadata: &'a MetadataList,
}

impl Catalog {
    /// Render this catalogue as a document root, one level deep.
    pub fn document(&self) -> CatalogDocument<'_> {
        CatalogDocument {
            metadata: self.metadata(),
            items: self.items().iter().map(Node::item_entry).collect(),
        }
    }

    /// Serialize to compact JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.document())
    }

    /// Serialize to canonical pretty-printed JSON (sorted keys, four-space
    /// indent)
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        to_canonical_string(&self.document())
    }

    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self.document())
    }
}

impl<'a> NodeRef<'a> {
    /// Render this node as a child reference. Never includes `items`, even
    /// for a catalogue that has children.
    pub fn item_entry(self) -> ItemEntry<'a> {
        ItemEntry {
            href: self.href(),
            metadata: self.metadata(),
        }
    }
}

impl Node {
    pub fn item_entry(&self) -> ItemEntry<'_> {
        self.as_node_ref().item_entry()
    }

    pub fn to_item_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.item_entry())
    }

    pub fn to_item_json_pretty(&self) -> Result<String, serde_json::Error> {
        to_canonical_string(&self.item_entry())
    }
}

/// Pretty-print any serializable value with four-space indentation, `,` at
/// line ends and `": "` between keys and values.
///
/// Non-ASCII text is written as raw UTF-8, not `\uXXXX` escapes, so bytes
/// differ from an `ensure_ascii` producer for such values.
pub fn to_canonical_string<T>(value: &T) -> Result<String, serde_json::Error>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(<serde_json::Error as serde::ser::Error>::custom)
}
