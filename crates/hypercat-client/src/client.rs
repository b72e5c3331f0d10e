//! Blocking HTTP transport for catalogue hosts.
//!
//! Access keys follow the HyperCat convention: the key is sent as the
//! basic-auth username with an empty password. Catalogue URLs carry no
//! structure of their own; the hierarchy lives entirely in the documents.

use std::time::Duration;

use hypercat::v1::{Catalog, parse};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info};

use crate::error::{ClientError, Result};

/// Generous, since some hosts compute rollups on the fly.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Body a catalogue host returns after a successful POST.
const CREATED: &str = "Created";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Access key, sent as the basic-auth username.
    pub key: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Fetches, publishes and deletes catalogues on a remote host.
pub struct HypercatClient {
    client: Client,
    key: Option<String>,
}

impl HypercatClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            key: config.key,
        })
    }

    /// GET `url` and return the body.
    pub fn get(&self, url: &str) -> Result<String> {
        info!(url, authenticated = self.key.is_some(), "GET");
        let response = self.authorize(self.client.get(url)).send()?;
        read_body(url, response)
    }

    /// GET `url` and parse it as a catalogue.
    pub fn fetch_catalog(&self, url: &str) -> Result<Catalog> {
        Ok(parse(&self.get(url)?)?)
    }

    /// POST `catalog` to `url`. The host must answer `Created`.
    ///
    /// Hosts refuse to replace an existing catalogue this way; see
    /// [`HypercatClient::create`].
    pub fn post(&self, url: &str, catalog: &Catalog) -> Result<()> {
        let payload = catalog.to_json()?;
        info!(url, bytes = payload.len(), "POST");
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload);
        let body = read_body(url, self.authorize(request).send()?)?;
        expect_body(url, CREATED, body)
    }

    /// DELETE the catalogue at `url`. The host answers with an empty body.
    pub fn delete(&self, url: &str) -> Result<()> {
        info!(url, "DELETE");
        let body = read_body(url, self.authorize(self.client.delete(url)).send()?)?;
        expect_body(url, "", body)
    }

    /// Publish `catalog` at `url`, deleting whatever is there first when
    /// `replace` is set. A failed delete is ignored: usually nothing was
    /// there yet.
    pub fn create(&self, url: &str, catalog: &Catalog, replace: bool) -> Result<()> {
        if replace && let Err(e) = self.delete(url) {
            debug!(url, error = %e, "delete before create failed, continuing");
        }
        self.post(url, catalog)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.key {
            Some(key) => request.basic_auth(key, None::<&str>),
            None => request,
        }
    }
}

fn read_body(url: &str, response: Response) -> Result<String> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound(url.to_string()));
    }
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(ClientError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.text()?)
}

fn expect_body(url: &str, expected: &'static str, body: String) -> Result<()> {
    if body == expected {
        Ok(())
    } else {
        Err(ClientError::UnexpectedResponse {
            url: url.to_string(),
            expected,
            body: body.chars().take(20).collect(),
        })
    }
}
