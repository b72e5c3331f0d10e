//! Network side of HyperCat: fetch and publish catalogues on a remote host,
//! crawl a live hierarchy, and aggregate SenML energy readings.
//!
//! # Example: list every queryable energy meter under a catalogue
//!
//! ```no_run
//! use hypercat_client::{ClientConfig, Crawler, HypercatClient, crawl};
//!
//! let client = HypercatClient::new(ClientConfig {
//!     key: Some("my-access-key".into()),
//!     ..ClientConfig::default()
//! })?;
//! let meters = Crawler::new(&client).crawl(
//!     "http://example.com/cat",
//!     |m| crawl::is_queryable(m, crawl::ENERGY_UNIT),
//!     |href, _| href.to_string(),
//! )?;
//! println!("{meters:?}");
//! # Ok::<(), hypercat_client::ClientError>(())
//! ```

pub mod client;
pub mod crawl;
pub mod error;
pub mod readings;

pub use client::{ClientConfig, DEFAULT_TIMEOUT, HypercatClient};
pub use crawl::{Crawler, Fetch};
pub use error::{ClientError, Result};
