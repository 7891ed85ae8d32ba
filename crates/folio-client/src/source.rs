//! Page source abstraction.

use std::path::Path;

use async_trait::async_trait;
use folio_core::{Error, Result};
use folio_model::{ListingMeta, Page, PageListing};
use serde_json::Value;

/// Where pages come from.
///
/// This trait allows swapping the live CMS for fixtures without changing the
/// view or rendering code.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch one page by slug.
    async fn page_by_slug(&self, slug: &str) -> Result<Page>;

    /// List pages of a model type, e.g. `home.HomePage`.
    async fn list_pages(&self, page_type: &str) -> Result<PageListing>;
}

/// In-memory page source.
///
/// Backs offline rendering of exported page JSON and doubles as a fixture in
/// tests.
#[derive(Debug, Clone, Default)]
pub struct StaticPageSource {
    pages: Vec<Page>,
}

impl StaticPageSource {
    /// Creates a source serving the given pages.
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// Creates a source serving a single page.
    pub fn with_page(page: Page) -> Self {
        Self::new(vec![page])
    }

    /// Parses a JSON document holding either one page or a listing envelope.
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| Error::serialization(format!("page JSON: {e}")))?;

        if value.get("items").is_some_and(Value::is_array) {
            let listing: PageListing = serde_json::from_value(value)
                .map_err(|e| Error::serialization(format!("page listing: {e}")))?;
            return Ok(Self::new(listing.items));
        }

        let page: Page = serde_json::from_value(value)
            .map_err(|e| Error::serialization(format!("page: {e}")))?;
        Ok(Self::with_page(page))
    }

    /// Reads and parses a JSON file (see [`StaticPageSource::from_json`]).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::from_json(&raw)
    }

    /// The pages held by this source, in order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Slug of the first page that has one.
    pub fn first_slug(&self) -> Option<&str> {
        self.pages.iter().find_map(Page::slug)
    }
}

#[async_trait]
impl PageSource for StaticPageSource {
    async fn page_by_slug(&self, slug: &str) -> Result<Page> {
        self.pages
            .iter()
            .find(|page| page.slug() == Some(slug))
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Page with slug \"{slug}\" not found")))
    }

    async fn list_pages(&self, page_type: &str) -> Result<PageListing> {
        let items: Vec<Page> = self
            .pages
            .iter()
            .filter(|page| {
                page.meta
                    .as_ref()
                    .and_then(|m| m.page_type.as_deref())
                    .is_some_and(|t| t == page_type)
            })
            .cloned()
            .collect();

        Ok(PageListing {
            meta: ListingMeta {
                total_count: items.len() as u64,
            },
            items,
        })
    }
}
