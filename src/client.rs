//! Client for reading package metadata from the site.

use anyhow::{Result, bail};
use log::debug;
use scraper::Html;

use crate::error::ErrorList;
use crate::http::HttpClient;
use crate::model::{
    ImportedBy, Imports, License, Package, SearchResults, Versions,
};
use crate::repohost;
use crate::scrape;

/// Base URL used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://pkg.go.dev";

/// Hard ceiling on search page fetches, so pagination terminates even
/// when the continuation signals misfire.
const MAX_SEARCH_PAGES: usize = 10;

/// Read-only client for the package documentation site.
///
/// Configuration is fixed at construction. The client holds no mutable
/// state, so one instance can serve concurrent call sites.
#[derive(Clone)]
pub struct Client {
    http: HttpClient,
    base_url: String,
}

impl Client {
    /// Creates a client against the production site.
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL.
    pub fn with_base_url(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            http: HttpClient::new(client),
            base_url: base_url.to_string(),
        }
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches a package page and extracts its metadata.
    ///
    /// Field-level problems with the page are gathered into an
    /// [`ErrorList`]; when any occurred the whole call fails rather than
    /// returning a partially trusted record.
    #[tracing::instrument(skip(self))]
    pub async fn describe_package(&self, package: &str) -> Result<Package> {
        let url = format!("{}/{}", self.base_url, package);
        debug!("Fetching package page from {}...", url);

        let body = self.http.get_html(&url).await?;
        let doc = Html::parse_document(&body);
        let (record, errs) = scrape::parse_package_page(&doc, package, &self.base_url);
        if !errs.is_empty() {
            return Err(errs.into());
        }
        Ok(record)
    }

    /// Fetches the versions tab and extracts the grouped version history.
    #[tracing::instrument(skip(self))]
    pub async fn versions(&self, package: &str) -> Result<Versions> {
        let url = format!("{}/{}", self.base_url, package);
        debug!("Fetching versions page from {}...", url);

        let body = self
            .http
            .get_html_with_query(&url, &[("tab", "versions")])
            .await?;
        let doc = Html::parse_document(&body);
        let (versions, errs) = scrape::parse_versions_page(&doc, package);
        if !errs.is_empty() {
            return Err(errs.into());
        }
        Ok(versions)
    }

    /// Runs a search and aggregates results across pages, never returning
    /// more than `limit` results.
    ///
    /// Pages are fetched one at a time because the decision to continue
    /// depends on the previous page's content: an explicit result-range
    /// header ends the loop once its upper bound reaches `limit` or the
    /// grand total; without a header, a page without snippets ends it. Any
    /// fetch failure discards the partial results and fails the call.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str, limit: usize) -> Result<SearchResults> {
        let mut results = SearchResults::default();
        let mut errs = ErrorList::new();

        let url = format!("{}/search", self.base_url);
        let mut should_continue = true;
        let mut page = 1;

        while should_continue && results.results.len() < limit && page <= MAX_SEARCH_PAGES {
            debug!("Fetching search page {} from {}...", page, url);

            let body = match self
                .http
                .get_html_with_query(&url, &[("q", query), ("page", &page.to_string())])
                .await
            {
                Ok(body) => body,
                Err(e) => {
                    errs.push(e.context(format!("visiting search page {}", page)));
                    break;
                }
            };

            let doc = Html::parse_document(&body);
            let parsed = scrape::parse_search_page(&doc, limit - results.results.len());
            results.results.extend(parsed.results);
            errs.extend(parsed.errors);

            should_continue = match parsed.range {
                Some(range) => range.upper < limit && range.upper != range.total,
                None => parsed.found_snippets,
            };
            page += 1;
        }

        if !errs.is_empty() {
            return Err(errs.into());
        }
        Ok(results)
    }

    /// Fetches the imported-by tab and collects the importer list.
    #[tracing::instrument(skip(self))]
    pub async fn imported_by(&self, package: &str) -> Result<ImportedBy> {
        let url = format!("{}/{}", self.base_url, package);
        debug!("Fetching imported-by page from {}...", url);

        let body = self
            .http
            .get_html_with_query(&url, &[("tab", "importedby")])
            .await?;
        let doc = Html::parse_document(&body);
        Ok(scrape::parse_imported_by_page(&doc, package))
    }

    /// Import graph lookup. Not implemented yet; always returns no data.
    #[tracing::instrument(skip(self))]
    pub async fn imports(&self, package: &str) -> Result<Option<Imports>> {
        debug!("imports not implemented, returning no data for {}", package);
        Ok(None)
    }

    /// License text lookup. Not implemented yet; always returns no data.
    #[tracing::instrument(skip(self))]
    pub async fn licenses(&self, package: &str) -> Result<Option<Vec<License>>> {
        debug!("licenses not implemented, returning no data for {}", package);
        Ok(None)
    }

    /// Best-effort short description of a repository, from its hosting
    /// site's landing page.
    pub async fn repo_description(&self, repo_url: &str) -> Option<String> {
        repohost::fetch_description(&self.http, repo_url).await
    }

    /// Replaces a package's synopsis with its repository description.
    ///
    /// Fails only for the two top-level reasons a caller can act on: the
    /// package lists no repository, or no description could be obtained.
    #[tracing::instrument(skip(self, package))]
    pub async fn enrich_synopsis(&self, package: &mut Package) -> Result<()> {
        if package.repository.is_empty() {
            bail!("no repository URL available for {}", package.package);
        }

        let Some(description) = self.repo_description(&package.repository).await else {
            bail!(
                "could not fetch description from repository {}",
                package.repository
            );
        };

        package.synopsis = repohost::clip_description(&description);
        Ok(())
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}
