//! Path lookup over catalogue trees.

use crate::types::{Catalog, Node, NodeRef};

/// Resolve a slash-separated `path` below `node`, matching each segment
/// against the values of relation `rel` on the direct children.
///
/// `""` and `"/"` resolve to `node` itself. At each level the first child
/// whose `rel` values contain the segment is taken; there is no backtracking
/// if a later segment then fails to match, so same-named siblings shadow each
/// other. A trailing slash is ignored.
///
/// # Examples
///
/// ```
/// use hypercat::v1::{Catalog, query};
///
/// let bottom = Catalog::new("Bottom").with_relation("name", "bottom");
/// let middle = Catalog::new("Middle")
///     .with_relation("name", "middle")
///     .with_item(bottom, "http://example.com/bottom");
/// let top = Catalog::new("Top").with_item(middle, "http://example.com/middle");
///
/// let found = query::find_by_path((&top).into(), "name", "/middle/bottom").unwrap();
/// assert_eq!(found.description(), Some("Bottom"));
/// assert!(query::find_by_path((&top).into(), "name", "/bottom").is_none());
/// ```
pub fn find_by_path<'a>(node: NodeRef<'a>, rel: &str, path: &str) -> Option<NodeRef<'a>> {
    if path.is_empty() || path == "/" {
        return Some(node);
    }
    let path = path.strip_prefix('/').unwrap_or(path);
    let (front, rest) = path.split_once('/').unwrap_or((path, ""));

    node.children()
        .iter()
        .find(|child| child.values(rel).contains(&front))
        .and_then(|child| find_by_path(child.as_node_ref(), rel, rest))
}

/// Every direct item whose content type is `content_type`.
pub fn items_with_content_type<'a>(catalog: &'a Catalog, content_type: &str) -> Vec<&'a Node> {
    catalog
        .items()
        .iter()
        .filter(|item| item.content_type() == Some(content_type))
        .collect()
}

impl Catalog {
    /// See [`find_by_path`].
    pub fn find_by_path(&self, rel: &str, path: &str) -> Option<NodeRef<'_>> {
        find_by_path(NodeRef::Catalog(self), rel, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Resource;
    use crate::vocab::CATALOGUE_TYPE;

    fn three_levels() -> Catalog {
        let mut top = Catalog::new("Top").with_relation("name", "top");
        let middle = top.add_item(
            Catalog::new("Middle").with_relation("name", "middle"),
            "http://example.com/middle",
        );
        middle.as_catalog_mut().unwrap().add_item(
            Catalog::new("Bottom").with_relation("name", "bottom"),
            "http://example.com/bottom",
        );
        top
    }

    #[test]
    fn test_root_path_returns_self() {
        let top = three_levels();
        for path in ["", "/"] {
            let found = top.find_by_path("name", path).unwrap();
            assert_eq!(found.values("name"), vec!["top"]);
        }
    }

    #[test]
    fn test_find_middle_with_trailing_slash() {
        let top = three_levels();
        let found = top.find_by_path("name", "/middle/").unwrap();
        assert_eq!(found.values("name"), vec!["middle"]);
        assert_eq!(found.href(), Some("http://example.com/middle"));
    }

    #[test]
    fn test_find_bottom() {
        let top = three_levels();
        let found = top.find_by_path("name", "/middle/bottom").unwrap();
        assert_eq!(found.values("name"), vec!["bottom"]);
        assert!(found.as_catalog().is_some());
    }

    #[test]
    fn test_path_without_leading_slash() {
        let top = three_levels();
        assert!(top.find_by_path("name", "middle/bottom").is_some());
    }

    #[test]
    fn test_unmatched_segment_is_none() {
        let top = three_levels();
        assert!(top.find_by_path("name", "/nowhere").is_none());
        assert!(top.find_by_path("name", "/middle/nowhere").is_none());
        assert!(top.find_by_path("other-rel", "/middle").is_none());
    }

    #[test]
    fn test_only_one_leading_slash_stripped() {
        let top = three_levels();
        assert!(top.find_by_path("name", "//middle").is_none());
    }

    #[test]
    fn test_first_match_wins_without_backtracking() {
        let mut top = Catalog::new("Top");
        top.add_item(
            Catalog::new("A").with_relation("name", "dup"),
            "http://a",
        );
        let second = top.add_item(
            Catalog::new("B").with_relation("name", "dup"),
            "http://b",
        );
        second.as_catalog_mut().unwrap().add_item(
            Resource::new("leaf", "text/plain").with_relation("name", "leaf"),
            "http://leaf",
        );

        assert_eq!(top.find_by_path("name", "/dup").unwrap().description(), Some("A"));
        assert!(top.find_by_path("name", "/dup/leaf").is_none());
    }

    #[test]
    fn test_matches_any_repeated_value() {
        let top = Catalog::new("Top").with_item(
            Resource::new("r", "text/plain")
                .with_relation("name", "alias-one")
                .with_relation("name", "alias-two"),
            "http://r",
        );
        assert!(top.find_by_path("name", "/alias-two").is_some());
    }

    #[test]
    fn test_path_below_resource_is_none() {
        let top = Catalog::new("Top").with_item(
            Resource::new("r", "text/plain").with_relation("name", "r"),
            "http://r",
        );
        assert!(top.find_by_path("name", "/r").is_some());
        assert!(top.find_by_path("name", "/r/deeper").is_none());
    }

    #[test]
    fn test_items_with_content_type() {
        let top = three_levels().with_item(Resource::new("r", "text/plain"), "http://r");
        assert_eq!(items_with_content_type(&top, CATALOGUE_TYPE).len(), 1);
        assert_eq!(items_with_content_type(&top, "text/plain").len(), 1);
        assert!(items_with_content_type(&top, "image/png").is_empty());
    }
}
