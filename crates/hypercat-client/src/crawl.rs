//! Depth-first crawling of remote catalogue hierarchies.
//!
//! A catalogue document only lists its direct items, so the crawler fetches
//! one document per catalogue it discovers. Hierarchies are assumed to be
//! trees; a depth limit stops runaway walks over cyclic ones.

use hypercat::v1::{MetadataList, Node, ParseOptions, parse_with};
use tracing::{debug, warn};

use crate::client::HypercatClient;
use crate::error::Result;

pub const SENML_TYPE: &str = "application/senml+json";
pub const SENML_UNIT: &str = "urn:X-senml:u";
/// SenML unit for energy, in joules.
pub const ENERGY_UNIT: &str = "J";
pub const SUPPORTS_QUERY: &str = "urn:X-tsbiot:rels:supports:query";
pub const OPENIOT_QUERY: &str = "urn:X-tsbiot:query:openiot:v1";

pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Source of documents for the crawler.
pub trait Fetch {
    fn fetch_text(&self, url: &str) -> Result<String>;
}

impl Fetch for HypercatClient {
    fn fetch_text(&self, url: &str) -> Result<String> {
        self.get(url)
    }
}

/// Whether a resource serves SenML time series in `unit` and answers
/// OpenIoT range queries.
pub fn is_queryable(metadata: &MetadataList, unit: &str) -> bool {
    metadata.contains(hypercat::vocab::IS_CONTENT_TYPE, SENML_TYPE)
        && metadata.contains(SENML_UNIT, unit)
        && metadata.contains(SUPPORTS_QUERY, OPENIOT_QUERY)
}

pub struct Crawler<'f, F: Fetch + ?Sized> {
    fetcher: &'f F,
    max_depth: usize,
}

impl<'f, F: Fetch + ?Sized> Crawler<'f, F> {
    pub fn new(fetcher: &'f F) -> Self {
        Self {
            fetcher,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Maximum number of catalogue levels below the start URL to follow.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Walk every catalogue reachable from `url`, calling `visit` on each
    /// resource accepted by `filter`. Results come back in document order,
    /// depth first. Any fetch or parse failure aborts the crawl.
    pub fn crawl<T>(
        &self,
        url: &str,
        mut filter: impl FnMut(&MetadataList) -> bool,
        mut visit: impl FnMut(&str, &MetadataList) -> T,
    ) -> Result<Vec<T>> {
        let mut found = Vec::new();
        self.walk(url, 0, &mut filter, &mut visit, &mut found)?;
        Ok(found)
    }

    fn walk<T>(
        &self,
        url: &str,
        depth: usize,
        filter: &mut dyn FnMut(&MetadataList) -> bool,
        visit: &mut dyn FnMut(&str, &MetadataList) -> T,
        found: &mut Vec<T>,
    ) -> Result<()> {
        debug!(url, depth, "crawling catalogue");
        let text = self.fetcher.fetch_text(url)?;
        let options = ParseOptions {
            restore_catalogs: true,
            ..ParseOptions::default()
        };
        let catalog = parse_with(&text, options)?;

        for item in catalog.items() {
            let Some(href) = item.href() else {
                continue;
            };
            match item {
                Node::Catalog(_) if depth >= self.max_depth => {
                    warn!(href, depth, "depth limit reached, not following catalogue");
                }
                Node::Catalog(_) => self.walk(href, depth + 1, filter, visit, found)?,
                Node::Resource(resource) => {
                    if filter(resource.metadata()) {
                        found.push(visit(href, resource.metadata()));
                    }
                }
            }
        }
        Ok(())
    }
}
