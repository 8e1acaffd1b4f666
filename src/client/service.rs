//! Client service calling the upstream item server.
//!
//! # Responsibilities
//! - Own the one long-lived HTTP client handle
//! - Build the item URI with a percent-encoded `query` parameter
//! - Issue the GET, log the status, decode the body
//!
//! # Design Decisions
//! - The HTTP client is built by the caller and passed in (composition root)
//! - The upstream status is logged, never branched on
//! - The service holds no per-request state and is shared via Arc

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::client::types::{ClientError, ClientResult, Item};
use crate::config::UpstreamConfig;

/// Everything but RFC 3986 unreserved characters is escaped, so a space
/// becomes `%20` and `&`, `=`, `+`, `#` cannot split the parameter.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Service behind the `/api/client` routes.
#[derive(Debug, Clone)]
pub struct ClientService {
    http: reqwest::Client,
    item_url: Url,
}

impl ClientService {
    /// Build the HTTP client described by the upstream configuration.
    pub fn build_http_client(config: &UpstreamConfig) -> ClientResult<reqwest::Client> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        builder.build().map_err(ClientError::Build)
    }

    /// Create the service around an existing client handle.
    pub fn new(http: reqwest::Client, config: &UpstreamConfig) -> ClientResult<Self> {
        let mut item_url = Url::parse(&config.base_url).map_err(|source| ClientError::InvalidUrl {
            url: config.base_url.clone(),
            source,
        })?;

        // Append rather than replace, so a base URL with a path prefix keeps it.
        let path = format!(
            "{}{}",
            item_url.path().trim_end_matches('/'),
            config.item_path
        );
        item_url.set_path(&path);
        item_url.set_query(None);

        Ok(Self { http, item_url })
    }

    /// Target URI for an item lookup.
    ///
    /// An absent query still emits the bare `query` key.
    pub fn item_uri(&self, query: Option<&str>) -> Url {
        let mut uri = self.item_url.clone();
        match query {
            Some(value) => {
                let encoded = utf8_percent_encode(value, QUERY_VALUE);
                uri.set_query(Some(&format!("query={encoded}")));
            }
            None => uri.set_query(Some("query")),
        }
        uri
    }

    /// Fetch one item from the upstream.
    ///
    /// Returns `None` when the upstream answers with an empty body or `null`.
    pub async fn get_call_object(&self, query: Option<&str>) -> ClientResult<Option<Item>> {
        let uri = self.item_uri(query);
        tracing::info!(uri = %uri, "Calling upstream");

        let response = self.http.get(uri).send().await?;
        let status = response.status();
        tracing::info!(status = %status, "Upstream responded");

        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        Ok(serde_json::from_slice(&body)?)
    }

    /// Not implemented upstream; always absent.
    pub fn get_call_list(&self) -> Option<Vec<Item>> {
        None
    }

    /// Not implemented upstream; always absent.
    pub fn post_call(&self, _query: Option<&str>) -> Option<Item> {
        None
    }

    /// Not implemented upstream; always absent.
    pub fn exchange_call(&self, _token: &str) -> Option<Vec<Item>> {
        None
    }
}
