//! HTTP client returning page bodies as HTML text.

use anyhow::{Context, Result};
use log::debug;
use reqwest::{Client, header};

use super::status::check_status;

/// Browser user agent sent with every page request. The site serves full
/// markup only to browser-identified clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// HTTP client for fetching site pages.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Performs a GET request and returns the response body.
    #[tracing::instrument(skip(self))]
    pub async fn get_html(&self, url: &str) -> Result<String> {
        debug!("GET {}...", url);

        let response = self
            .client
            .get(url)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .with_context(|| format!("making request to {}", url))?;

        check_status(response.status(), url)?;

        response
            .text()
            .await
            .with_context(|| format!("reading response body from {}", url))
    }

    /// Performs a GET request with query parameters and returns the
    /// response body.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_html_with_query(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
        debug!("GET {} with query {:?}...", url, query);

        let response = self
            .client
            .get(url)
            .query(query)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .with_context(|| format!("making request to {}", url))?;

        check_status(response.status(), url)?;

        response
            .text()
            .await
            .with_context(|| format!("reading response body from {}", url))
    }
}
