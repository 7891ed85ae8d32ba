//! Page records served by the CMS API.
//!
//! The same [`Page`] type decodes both API shapes:
//!
//! - `GET /api/v2/page-by-slug/?slug=..`: every field at the top level.
//! - `GET /api/v2/pages/?type=..&fields=*`: listing items, where `slug` and
//!   the publication metadata live under `meta`.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use folio_core::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::image::{empty_as_none, text_or_none, ImageRef};
use crate::section::{parse_sections, sections_from_blocks, Section, SectionPolicy};

/// A page as returned by the CMS.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page id.
    #[serde(default)]
    pub id: Option<u64>,

    /// Page title.
    pub title: String,

    /// Slug, when sent at the top level.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub slug: Option<String>,

    /// Tree path, e.g. `/home/about-us/`.
    #[serde(default)]
    pub url_path: Option<String>,

    /// Title override for the HTML `<title>`.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub seo_title: Option<String>,

    /// Meta description.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub search_description: Option<String>,

    /// Whether the page is published.
    #[serde(default)]
    pub live: Option<bool>,

    /// Whether a draft newer than the live revision exists.
    #[serde(default)]
    pub has_unpublished_changes: Option<bool>,

    /// First publication timestamp (ISO-8601).
    #[serde(default)]
    pub first_published_at: Option<String>,

    /// Latest publication timestamp (ISO-8601).
    #[serde(default)]
    pub last_published_at: Option<String>,

    /// Hero heading.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub hero_title: Option<String>,

    /// Hero sub-heading.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub hero_subtitle: Option<String>,

    /// Hero background image.
    #[serde(default)]
    pub hero_image: Option<ImageRef>,

    /// Hero call-to-action text.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub hero_cta_text: Option<String>,

    /// Hero call-to-action target.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub hero_cta_url: Option<String>,

    /// About block heading.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub about_title: Option<String>,

    /// About block body, rich HTML. Untrusted: sanitized before display.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub about_content: Option<String>,

    /// Rich-text body of simple HTML pages. Untrusted: sanitized before display.
    #[serde(default, deserialize_with = "text_or_none")]
    pub body: Option<String>,

    /// The serialized section list.
    #[serde(default)]
    pub content_sections: SectionsField,

    /// Trail from the site root to this page, inclusive.
    #[serde(default)]
    pub breadcrumbs: Vec<Breadcrumb>,

    /// Listing metadata (listing endpoint only).
    #[serde(default)]
    pub meta: Option<PageMeta>,

    /// Every other field the CMS sent.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Page {
    /// The page slug, from the top level or the listing metadata.
    pub fn slug(&self) -> Option<&str> {
        self.slug
            .as_deref()
            .or_else(|| self.meta.as_ref().and_then(|m| m.slug.as_deref()))
    }

    /// Title to use for the HTML document.
    pub fn document_title(&self) -> &str {
        self.seo_title.as_deref().unwrap_or(&self.title)
    }

    /// Whether any hero field is set.
    pub fn has_hero(&self) -> bool {
        self.hero_title.is_some()
            || self.hero_subtitle.is_some()
            || self.hero_image_url().is_some()
            || self.hero_cta_text.is_some()
    }

    /// Whether the about block has anything to show.
    pub fn has_about(&self) -> bool {
        self.about_title.is_some() || self.about_content.is_some()
    }

    /// Hero image URL, if displayable.
    pub fn hero_image_url(&self) -> Option<&str> {
        self.hero_image.as_ref().and_then(ImageRef::url)
    }

    /// Alt text for the hero image; empty when the image is decorative.
    pub fn hero_image_alt(&self) -> &str {
        self.hero_image
            .as_ref()
            .and_then(ImageRef::alt)
            .unwrap_or_default()
    }

    /// First publication time, from the top level or the listing metadata.
    pub fn first_published(&self) -> Option<DateTime<FixedOffset>> {
        self.first_published_at
            .as_deref()
            .or_else(|| {
                self.meta
                    .as_ref()
                    .and_then(|m| m.first_published_at.as_deref())
            })
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
    }

    /// Latest publication time.
    pub fn last_published(&self) -> Option<DateTime<FixedOffset>> {
        self.last_published_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
    }

    /// Parse `content_sections` into typed sections.
    pub fn sections(&self, policy: SectionPolicy) -> Result<Vec<Section>> {
        self.content_sections.parse(policy)
    }
}

/// `content_sections` as it arrives on the wire.
///
/// Usually a JSON-encoded string that needs a second parse; the native
/// stream-field serialization (an inline array) is accepted too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionsField {
    /// Absent or `null`.
    #[default]
    Empty,
    /// JSON-encoded array.
    Encoded(String),
    /// Inline array of blocks.
    Inline(Vec<Value>),
    /// Anything else; rejected when parsed.
    Other(Value),
}

impl SectionsField {
    /// Parse into typed sections, preserving order.
    pub fn parse(&self, policy: SectionPolicy) -> Result<Vec<Section>> {
        match self {
            Self::Empty => Ok(Vec::new()),
            Self::Encoded(raw) => parse_sections(raw, policy),
            Self::Inline(blocks) => sections_from_blocks(blocks.clone(), policy),
            Self::Other(value) => Err(folio_core::Error::section_parse(format!(
                "content_sections must be a JSON array or string, got {}",
                json_kind(value)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One step of a page's breadcrumb trail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Ancestor page title.
    #[serde(default)]
    pub title: String,
    /// Public URL; unrouted pages have none.
    #[serde(default)]
    pub url: Option<String>,
    /// Ancestor slug.
    #[serde(default)]
    pub slug: Option<String>,
}

/// Metadata attached to listing items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Page model, e.g. `home.HomePage`.
    #[serde(default, rename = "type")]
    pub page_type: Option<String>,
    /// API URL of the page detail.
    #[serde(default)]
    pub detail_url: Option<String>,
    /// Public URL of the page.
    #[serde(default)]
    pub html_url: Option<String>,
    /// Page slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// First publication timestamp (ISO-8601).
    #[serde(default)]
    pub first_published_at: Option<String>,
}

/// Envelope of the page listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageListing {
    /// Listing metadata.
    #[serde(default)]
    pub meta: ListingMeta,
    /// Pages in CMS order.
    #[serde(default)]
    pub items: Vec<Page>,
}

/// Listing metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingMeta {
    /// Total matching pages on the server.
    #[serde(default)]
    pub total_count: u64,
}

/// Error body returned by the page-by-slug endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable message.
    pub error: String,
}
