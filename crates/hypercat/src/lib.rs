#![doc = include_str!("../README.md")]

mod error;
mod parse;
mod query;
mod render;
mod types;

pub mod vocab;

pub mod v1 {
    //! Versioned public API for HyperCat catalogues.
    //!
    //! # Model
    //!
    //! - [`Catalog`]: a catalogue owning an ordered list of items
    //! - [`Resource`]: a leaf item with a content type
    //! - [`Node`]: either of the above, as stored in a catalogue's items
    //! - [`NodeRef`]: a borrowed view of either variant
    //! - [`MetadataList`] / [`Relation`]: ordered `rel`/`val` pairs
    //!
    //! # Wire format
    //!
    //! - [`CatalogDocument`]: a catalogue rendered as a document root
    //! - [`ItemEntry`]: any node rendered as a child reference
    //! - [`parse`], [`parse_with`], [`from_value`] and [`ParseOptions`]
    //!
    //! # Example: build, render and read back a catalogue
    //!
    //! ```
    //! use hypercat::v1::*;
    //!
    //! let mut cat = Catalog::new("Building sensors");
    //! cat.supports_simple_search();
    //! cat.add_item(
    //!     Resource::new("Lobby temperature", "application/senml+json")
    //!         .with_relation("name", "lobby"),
    //!     "http://example.com/sensors/lobby",
    //! );
    //!
    //! let json = cat.to_json_pretty().unwrap();
    //! let back = parse(&json).unwrap();
    //! assert_eq!(back.to_json_pretty().unwrap(), json);
    //!
    //! let lobby = back.find_by_path("name", "/lobby").unwrap();
    //! assert_eq!(lobby.href(), Some("http://example.com/sensors/lobby"));
    //! ```

    /// Path lookup and item filters.
    pub mod query {
        pub use crate::query::{find_by_path, items_with_content_type};
    }
    pub use crate::error::{ErrorKind, HypercatError, Result};
    pub use crate::parse::{ParseOptions, from_value, parse, parse_with};
    pub use crate::render::{CatalogDocument, ItemEntry, to_canonical_string};
    pub use crate::types::{Catalog, MetadataList, Node, NodeRef, Relation, Resource};
}
