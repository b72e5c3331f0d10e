//! Fixed HyperCat 1.0 vocabulary.
//!
//! These strings are part of the interoperability contract and must match
//! other catalogue producers and consumers byte for byte.

// ============================================================================
// Document keys
// ============================================================================

/// Array of metadata about the catalogue itself (root rendering).
pub const CATALOGUE_METADATA: &str = "item-metadata";
/// Array of child item entries (root rendering only).
pub const ITEMS: &str = "items";
/// Locator assigned to an item by its parent.
pub const HREF: &str = "href";
/// Array of metadata about an item (child rendering).
pub const ITEM_METADATA: &str = "i-object-metadata";
/// Relation key inside a metadata pair.
pub const REL: &str = "rel";
/// Value key inside a metadata pair.
pub const VAL: &str = "val";

// ============================================================================
// Mandatory relations
// ============================================================================

pub const IS_CONTENT_TYPE: &str = "urn:X-tsbiot:rels:isContentType";
pub const CATALOGUE_TYPE: &str = "application/vnd.tsbiot.catalogue+json";
pub const HAS_DESCRIPTION: &str = "urn:X-tsbiot:rels:hasDescription:en";

// ============================================================================
// Optional relations
// ============================================================================

pub const SUPPORTS_SEARCH: &str = "urn:X-tsbiot:rels:supportsSearch";
pub const SIMPLE_SEARCH: &str = "urn:X-tsbiot:search:simple";
pub const HAS_HOMEPAGE: &str = "urn:X-tsbiot:rels:hasHomepage";
pub const CONTAINS_CONTENT_TYPE: &str = "urn:X-tsbiot:rels:containsContentType";
