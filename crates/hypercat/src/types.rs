use serde::{Deserialize, Serialize};

use crate::error::{HypercatError, Result};
use crate::vocab::{
    CATALOGUE_TYPE, CONTAINS_CONTENT_TYPE, HAS_DESCRIPTION, HAS_HOMEPAGE, IS_CONTENT_TYPE,
    SIMPLE_SEARCH, SUPPORTS_SEARCH,
};

// ============================================================================
// Metadata
// ============================================================================

/// One `{ "rel": …, "val": … }` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub rel: String,
    pub val: String,
}

impl Relation {
    pub fn new(rel: impl Into<String>, val: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            val: val.into(),
        }
    }
}

/// Ordered metadata attached to a catalogue or resource.
///
/// HyperCat lets a relation repeat ("Pilgrim is_a human", "Pilgrim is_a
/// man"), so this is a plain list rather than a map: insertion order is kept
/// and nothing is ever deduplicated. Lookups are linear scans.
///
/// Serializes as a bare JSON array:
///
/// ```json
/// [
///   { "rel": "urn:X-tsbiot:rels:isContentType", "val": "text/plain" },
///   { "rel": "urn:X-tsbiot:rels:hasDescription:en", "val": "A sensor" }
/// ]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataList {
    relations: Vec<Relation>,
}

impl MetadataList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair. Existing pairs are never touched.
    pub fn add_relation(&mut self, rel: impl Into<String>, val: impl Into<String>) {
        self.relations.push(Relation::new(rel, val));
    }

    /// Every value recorded for `rel`, in insertion order.
    pub fn values(&self, rel: &str) -> Vec<&str> {
        self.relations
            .iter()
            .filter(|r| r.rel == rel)
            .map(|r| r.val.as_str())
            .collect()
    }

    /// The first value recorded for `rel`.
    pub fn first(&self, rel: &str) -> Option<&str> {
        self.relations
            .iter()
            .find(|r| r.rel == rel)
            .map(|r| r.val.as_str())
    }

    /// Whether the exact pair `rel = val` is present.
    pub fn contains(&self, rel: &str, val: &str) -> bool {
        self.relations.iter().any(|r| r.rel == rel && r.val == val)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Relation> {
        self.relations.iter()
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Metadata for a freshly built node: content type first, then description.
    fn mandatory(content_type: impl Into<String>, description: impl Into<String>) -> Self {
        let mut list = Self::new();
        list.add_relation(IS_CONTENT_TYPE, content_type);
        list.add_relation(HAS_DESCRIPTION, description);
        list
    }
}

impl From<Vec<Relation>> for MetadataList {
    fn from(relations: Vec<Relation>) -> Self {
        Self { relations }
    }
}

impl FromIterator<Relation> for MetadataList {
    fn from_iter<I: IntoIterator<Item = Relation>>(iter: I) -> Self {
        Self {
            relations: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MetadataList {
    type Item = &'a Relation;
    type IntoIter = std::slice::Iter<'a, Relation>;

    fn into_iter(self) -> Self::IntoIter {
        self.relations.iter()
    }
}

// ============================================================================
// Catalogue
// ============================================================================

/// A HyperCat catalogue: metadata plus an ordered list of owned items.
///
/// A catalogue owns its children outright. Attaching a child moves it into
/// the parent, so a node can never sit under two parents and the tree can
/// never contain a cycle. The child's `href` is set by the parent at attach
/// time; the root catalogue has none.
///
/// # Builder API
///
/// ```
/// use hypercat::v1::{Catalog, Resource};
///
/// let cat = Catalog::new("Sensors in building 4")
///     .with_relation("urn:X-tsbiot:rels:hasHomepage", "http://example.com")
///     .with_item(
///         Resource::new("Lobby temperature", "application/senml+json"),
///         "http://example.com/sensors/lobby",
///     );
/// assert_eq!(cat.items().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    metadata: MetadataList,
    items: Vec<Node>,
    href: Option<String>,
}

impl Catalog {
    /// Create a catalogue carrying only its mandatory relations.
    ///
    /// An empty description is allowed.
    pub fn new(description: impl Into<String>) -> Self {
        Self::from_metadata(MetadataList::mandatory(CATALOGUE_TYPE, description))
    }

    /// Wrap existing metadata without checking it. Use [`Catalog::validate`]
    /// afterwards when the metadata came from an untrusted source.
    pub fn from_metadata(metadata: MetadataList) -> Self {
        Self {
            metadata,
            items: Vec::new(),
            href: None,
        }
    }

    pub fn metadata(&self) -> &MetadataList {
        &self.metadata
    }

    pub fn add_relation(&mut self, rel: impl Into<String>, val: impl Into<String>) {
        self.metadata.add_relation(rel, val);
    }

    pub fn with_relation(mut self, rel: impl Into<String>, val: impl Into<String>) -> Self {
        self.add_relation(rel, val);
        self
    }

    pub fn values(&self, rel: &str) -> Vec<&str> {
        self.metadata.values(rel)
    }

    /// Attach `child` under this catalogue with the given `href`.
    ///
    /// Any href the child already had is replaced. The href is not checked
    /// for uniqueness or syntax. Returns the attached child so deeper levels
    /// can still be built after the move.
    pub fn add_item(&mut self, child: impl Into<Node>, href: impl Into<String>) -> &mut Node {
        let mut child = child.into();
        let href = href.into();
        tracing::trace!(
            href = %href,
            catalogue = self.description().unwrap_or_default(),
            "attaching item"
        );
        child.set_href(href);
        let index = self.items.len();
        self.items.push(child);
        &mut self.items[index]
    }

    pub fn with_item(mut self, child: impl Into<Node>, href: impl Into<String>) -> Self {
        self.add_item(child, href);
        self
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// The first `hasDescription` value. `None` only for hand-built metadata
    /// that lacks one.
    pub fn description(&self) -> Option<&str> {
        self.metadata.first(HAS_DESCRIPTION)
    }

    pub fn supports_simple_search(&mut self) {
        self.add_relation(SUPPORTS_SEARCH, SIMPLE_SEARCH);
    }

    pub fn has_homepage(&mut self, url: impl Into<String>) {
        self.add_relation(HAS_HOMEPAGE, url);
    }

    pub fn contains_content_type(&mut self, content_type: impl Into<String>) {
        self.add_relation(CONTAINS_CONTENT_TYPE, content_type);
    }

    /// Check the mandatory relations of this catalogue and of every node
    /// below it. Each node needs exactly one content type and at least one
    /// description.
    pub fn validate(&self) -> Result<()> {
        self.check_metadata("item-metadata")?;
        for (index, item) in self.items.iter().enumerate() {
            item.validate_at(&format!("items[{index}]"))?;
        }
        Ok(())
    }

    fn check_metadata(&self, location: &str) -> Result<()> {
        at_most_once(&self.metadata, IS_CONTENT_TYPE, location)?;
        if !self.metadata.contains(IS_CONTENT_TYPE, CATALOGUE_TYPE) {
            return Err(HypercatError::NotACatalog {
                location: location.to_string(),
            });
        }
        require(&self.metadata, HAS_DESCRIPTION, location)
    }
}

// ============================================================================
// Resource
// ============================================================================

/// A leaf item: anything that is not a catalogue.
///
/// `content_type` should be an RFC 2046 MIME type, e.g.
/// `"application/senml+json"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    metadata: MetadataList,
    href: Option<String>,
}

impl Resource {
    pub fn new(description: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self::from_metadata(MetadataList::mandatory(content_type, description))
    }

    /// Wrap existing metadata without checking it.
    pub fn from_metadata(metadata: MetadataList) -> Self {
        Self {
            metadata,
            href: None,
        }
    }

    pub fn metadata(&self) -> &MetadataList {
        &self.metadata
    }

    pub fn add_relation(&mut self, rel: impl Into<String>, val: impl Into<String>) {
        self.metadata.add_relation(rel, val);
    }

    pub fn with_relation(mut self, rel: impl Into<String>, val: impl Into<String>) -> Self {
        self.add_relation(rel, val);
        self
    }

    pub fn values(&self, rel: &str) -> Vec<&str> {
        self.metadata.values(rel)
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.metadata.first(HAS_DESCRIPTION)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.metadata.first(IS_CONTENT_TYPE)
    }
}

// ============================================================================
// Node
// ============================================================================

/// Any item in a catalogue tree.
///
/// Only the [`Node::Catalog`] variant can own children; see
/// [`Node::can_have_children`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Catalog(Catalog),
    Resource(Resource),
}

impl From<Catalog> for Node {
    fn from(catalog: Catalog) -> Self {
        Node::Catalog(catalog)
    }
}

impl From<Resource> for Node {
    fn from(resource: Resource) -> Self {
        Node::Resource(resource)
    }
}

impl Node {
    pub fn metadata(&self) -> &MetadataList {
        self.as_node_ref().metadata()
    }

    pub fn add_relation(&mut self, rel: impl Into<String>, val: impl Into<String>) {
        match self {
            Node::Catalog(c) => c.add_relation(rel, val),
            Node::Resource(r) => r.add_relation(rel, val),
        }
    }

    pub fn values(&self, rel: &str) -> Vec<&str> {
        self.metadata().values(rel)
    }

    pub fn href(&self) -> Option<&str> {
        self.as_node_ref().href()
    }

    pub fn description(&self) -> Option<&str> {
        self.metadata().first(HAS_DESCRIPTION)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.metadata().first(IS_CONTENT_TYPE)
    }

    pub fn can_have_children(&self) -> bool {
        matches!(self, Node::Catalog(_))
    }

    /// Direct children; always empty for a resource.
    pub fn children(&self) -> &[Node] {
        self.as_node_ref().children()
    }

    pub fn as_catalog(&self) -> Option<&Catalog> {
        match self {
            Node::Catalog(c) => Some(c),
            Node::Resource(_) => None,
        }
    }

    pub fn as_catalog_mut(&mut self) -> Option<&mut Catalog> {
        match self {
            Node::Catalog(c) => Some(c),
            Node::Resource(_) => None,
        }
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Node::Resource(r) => Some(r),
            Node::Catalog(_) => None,
        }
    }

    pub fn as_node_ref(&self) -> NodeRef<'_> {
        match self {
            Node::Catalog(c) => NodeRef::Catalog(c),
            Node::Resource(r) => NodeRef::Resource(r),
        }
    }

    /// Check the mandatory relations of this node (and its subtree).
    pub fn validate(&self) -> Result<()> {
        self.validate_at("i-object-metadata")
    }

    fn validate_at(&self, location: &str) -> Result<()> {
        match self {
            Node::Catalog(c) => {
                c.check_metadata(location)?;
                for (index, item) in c.items.iter().enumerate() {
                    item.validate_at(&format!("{location}.items[{index}]"))?;
                }
                Ok(())
            }
            Node::Resource(r) => {
                require(&r.metadata, IS_CONTENT_TYPE, location)?;
                at_most_once(&r.metadata, IS_CONTENT_TYPE, location)?;
                require(&r.metadata, HAS_DESCRIPTION, location)
            }
        }
    }

    fn set_href(&mut self, href: String) {
        match self {
            Node::Catalog(c) => c.href = Some(href),
            Node::Resource(r) => r.href = Some(href),
        }
    }
}

/// A borrowed view of either node variant.
///
/// Path lookups return this so that the root catalogue (which is a plain
/// [`Catalog`], not a [`Node`]) and any descendant can be handed back through
/// one type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Catalog(&'a Catalog),
    Resource(&'a Resource),
}

impl<'a> NodeRef<'a> {
    pub fn metadata(self) -> &'a MetadataList {
        match self {
            NodeRef::Catalog(c) => &c.metadata,
            NodeRef::Resource(r) => &r.metadata,
        }
    }

    pub fn values(self, rel: &str) -> Vec<&'a str> {
        self.metadata().values(rel)
    }

    pub fn href(self) -> Option<&'a str> {
        match self {
            NodeRef::Catalog(c) => c.href.as_deref(),
            NodeRef::Resource(r) => r.href.as_deref(),
        }
    }

    pub fn description(self) -> Option<&'a str> {
        self.metadata().first(HAS_DESCRIPTION)
    }

    pub fn children(self) -> &'a [Node] {
        match self {
            NodeRef::Catalog(c) => &c.items,
            NodeRef::Resource(_) => &[],
        }
    }

    pub fn as_catalog(self) -> Option<&'a Catalog> {
        match self {
            NodeRef::Catalog(c) => Some(c),
            NodeRef::Resource(_) => None,
        }
    }
}

impl<'a> From<&'a Catalog> for NodeRef<'a> {
    fn from(catalog: &'a Catalog) -> Self {
        NodeRef::Catalog(catalog)
    }
}

impl<'a> From<&'a Node> for NodeRef<'a> {
    fn from(node: &'a Node) -> Self {
        node.as_node_ref()
    }
}

fn at_most_once(metadata: &MetadataList, rel: &'static str, location: &str) -> Result<()> {
    if metadata.values(rel).len() > 1 {
        return Err(HypercatError::DuplicateRelation {
            rel,
            location: location.to_string(),
        });
    }
    Ok(())
}

fn require(metadata: &MetadataList, rel: &'static str, location: &str) -> Result<()> {
    if metadata.first(rel).is_none() {
        return Err(HypercatError::MissingRelation {
            rel,
            location: location.to_string(),
        });
    }
    Ok(())
}
