//! HTTP page source for the CMS JSON API.

use std::time::Duration;

use async_trait::async_trait;
use folio_core::{ConfigProvider, Error, Result};
use folio_model::{ApiErrorBody, Page, PageListing};
use reqwest::header::ACCEPT;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::source::PageSource;

/// Path of the page listing endpoint, relative to the base URL.
pub const PAGES_ENDPOINT: &str = "api/v2/pages/";

/// Path of the page-by-slug endpoint, relative to the base URL.
pub const PAGE_BY_SLUG_ENDPOINT: &str = "api/v2/page-by-slug/";

/// Page source backed by the CMS HTTP API.
///
/// Each call issues exactly one GET request. There is no retry and no
/// caching; a timeout applies only if one was configured.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    base: Url,
    client: reqwest::Client,
}

impl HttpPageSource {
    /// Creates a source for the CMS at `base_url` with no request timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Creates a source with an optional per-request timeout.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base = normalize_base(base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("HTTP client: {e}")))?;

        Ok(Self { base, client })
    }

    /// Creates a source from a configuration provider.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::with_timeout(&config.api_base_url()?, config.request_timeout())
    }

    /// The normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// URL of the page-by-slug endpoint for `slug`.
    pub fn page_by_slug_url(&self, slug: &str) -> Result<Url> {
        let mut url = self.endpoint(PAGE_BY_SLUG_ENDPOINT)?;
        url.query_pairs_mut().append_pair("slug", slug);
        Ok(url)
    }

    /// URL of the listing endpoint for `page_type`, requesting all fields.
    pub fn list_pages_url(&self, page_type: &str) -> Result<Url> {
        let mut url = self.endpoint(PAGES_ENDPOINT)?;
        url.query_pairs_mut()
            .append_pair("type", page_type)
            .append_pair("fields", "*");
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| Error::config(format!("Invalid endpoint {path}: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Error::fetch_with_source(format!("GET {url}"), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            tracing::debug!(%url, status = status.as_u16(), %message, "CMS error response");
            if status == StatusCode::NOT_FOUND {
                return Err(Error::not_found(message));
            }
            return Err(Error::http(status.as_u16(), message));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::fetch_with_source(format!("Failed to decode response from {url}"), e))
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn page_by_slug(&self, slug: &str) -> Result<Page> {
        if slug.trim().is_empty() {
            return Err(Error::invalid_data("slug parameter is required"));
        }
        let url = self.page_by_slug_url(slug)?;
        self.get_json(url).await
    }

    async fn list_pages(&self, page_type: &str) -> Result<PageListing> {
        let url = self.list_pages_url(page_type)?;
        let listing: PageListing = self.get_json(url).await?;
        tracing::debug!(
            page_type,
            returned = listing.items.len(),
            total = listing.meta.total_count,
            "listed pages"
        );
        Ok(listing)
    }
}

/// Parse and normalize the base URL so relative joins append to its path.
fn normalize_base(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url.trim())
        .map_err(|e| Error::config(format!("Invalid API base URL '{base_url}': {e}")))?;

    if url.cannot_be_a_base() {
        return Err(Error::config(format!(
            "API base URL '{base_url}' cannot be used as a base"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    Ok(url)
}

/// Error text from a `{"error": ...}` body, falling back to the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        })
}
