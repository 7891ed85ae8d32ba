//! Content sections: the tagged union carried in a page's `content_sections`.
//!
//! Each section arrives as `{"type": "<kind>", "value": {...}}`. The `value`
//! shape is fully determined by the `type`, which is why [`Section`] is an
//! adjacently tagged enum with one payload struct per kind.
//!
//! Parsing is two-staged: the list itself must be a JSON array of objects
//! with a string `type` (otherwise the whole list is rejected), and then each
//! element is typed individually so that unknown kinds can be skipped and
//! mismatched payloads handled according to a [`SectionPolicy`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use folio_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::image::{empty_as_none, ImageRef};

// ============================================================================
// Section union
// ============================================================================

/// One block of page content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Section {
    /// Headline numbers.
    StatsSection(StatsSection),
    /// A list of outbound links.
    LinksSection(LinksSection),
    /// Boxes of rich content.
    ContentBoxes(ContentBoxes),
    /// Project showcase cards.
    ProjectHighlights(ProjectHighlights),
    /// News article teasers.
    NewsSection(NewsSection),
    /// Raw HTML authored in the CMS.
    CustomHtml(String),
}

impl Section {
    /// The discriminator of this section.
    pub fn kind(&self) -> SectionKind {
        match self {
            Self::StatsSection(_) => SectionKind::Stats,
            Self::LinksSection(_) => SectionKind::Links,
            Self::ContentBoxes(_) => SectionKind::ContentBoxes,
            Self::ProjectHighlights(_) => SectionKind::ProjectHighlights,
            Self::NewsSection(_) => SectionKind::News,
            Self::CustomHtml(_) => SectionKind::CustomHtml,
        }
    }
}

/// Known section discriminators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// `stats_section`
    Stats,
    /// `links_section`
    Links,
    /// `content_boxes`
    ContentBoxes,
    /// `project_highlights`
    ProjectHighlights,
    /// `news_section`
    News,
    /// `custom_html`
    CustomHtml,
}

impl SectionKind {
    /// All known kinds, in declaration order.
    pub const ALL: [SectionKind; 6] = [
        Self::Stats,
        Self::Links,
        Self::ContentBoxes,
        Self::ProjectHighlights,
        Self::News,
        Self::CustomHtml,
    ];

    /// The wire value of the `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stats => "stats_section",
            Self::Links => "links_section",
            Self::ContentBoxes => "content_boxes",
            Self::ProjectHighlights => "project_highlights",
            Self::News => "news_section",
            Self::CustomHtml => "custom_html",
        }
    }

    /// Short, CSS-friendly name (`stats`, `content-boxes`, ...).
    pub fn css_name(&self) -> &'static str {
        match self {
            Self::Stats => "stats",
            Self::Links => "links",
            Self::ContentBoxes => "content-boxes",
            Self::ProjectHighlights => "project-highlights",
            Self::News => "news",
            Self::CustomHtml => "custom-html",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::invalid_data(format!("Unknown section type: {s}")))
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// `stats_section` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSection {
    /// Optional heading.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub title: Option<String>,
    /// Stats in display order.
    pub stats: Vec<Stat>,
}

/// A single headline number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    /// The figure, kept as text (`"500+"`, `"24/7"`).
    pub number: String,
    /// What the figure counts.
    pub label: String,
    /// Optional supporting text.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
}

/// `links_section` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinksSection {
    /// Optional heading.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub title: Option<String>,
    /// Links in display order.
    pub links: Vec<LinkItem>,
}

/// A single outbound link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkItem {
    /// Target URL.
    pub url: String,
    /// Link text.
    pub title: String,
    /// Icon class or emoji.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub icon: Option<String>,
    /// Optional supporting text.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
}

/// `content_boxes` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBoxes {
    /// Optional heading.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub title: Option<String>,
    /// Boxes in display order.
    pub boxes: Vec<ContentBox>,
}

/// A box of rich content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBox {
    /// Optional illustration.
    #[serde(default)]
    pub image: Option<ImageRef>,
    /// Box heading.
    pub title: String,
    /// Rich HTML body. Untrusted: sanitized before display.
    pub content: String,
    /// Optional call-to-action target.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub link_url: Option<String>,
    /// Optional call-to-action text.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub link_text: Option<String>,
}

impl ContentBox {
    /// Image URL, if the box has a displayable image.
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_ref().and_then(ImageRef::url)
    }

    /// Image alt text, falling back to the title.
    pub fn image_alt(&self) -> &str {
        self.image
            .as_ref()
            .and_then(ImageRef::alt)
            .unwrap_or(&self.title)
    }
}

/// `project_highlights` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectHighlights {
    /// Section heading.
    pub section_title: String,
    /// Projects in display order.
    pub projects: Vec<Project>,
}

/// A showcased project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Optional screenshot or logo.
    #[serde(default)]
    pub image: Option<ImageRef>,
    /// Project name.
    pub title: String,
    /// Plain-text description.
    pub description: String,
    /// Technology or topic tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Optional link to the project.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub link_url: Option<String>,
    /// Optional link text.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub link_text: Option<String>,
}

impl Project {
    /// Image URL, if the project has a displayable image.
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_ref().and_then(ImageRef::url)
    }

    /// Image alt text, falling back to the title.
    pub fn image_alt(&self) -> &str {
        self.image
            .as_ref()
            .and_then(ImageRef::alt)
            .unwrap_or(&self.title)
    }
}

/// `news_section` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsSection {
    /// Section heading.
    pub section_title: String,
    /// Articles in display order.
    pub articles: Vec<NewsArticle>,
}

/// A news teaser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    /// Optional teaser image.
    #[serde(default)]
    pub image: Option<ImageRef>,
    /// Headline.
    pub title: String,
    /// Plain-text summary.
    pub summary: String,
    /// Publication date as an ISO-8601 string.
    pub date: String,
    /// Optional category label.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category: Option<String>,
    /// Optional link to the full article.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub link_url: Option<String>,
}

impl NewsArticle {
    /// Image URL, if the article has a displayable image.
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_ref().and_then(ImageRef::url)
    }

    /// Image alt text, falling back to the title.
    pub fn image_alt(&self) -> &str {
        self.image
            .as_ref()
            .and_then(ImageRef::alt)
            .unwrap_or(&self.title)
    }

    /// Publication date, if `date` is an ISO-8601 date or datetime.
    pub fn published_on(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.date)
    }
}

/// Parse an ISO-8601 date (`2025-03-01`) or datetime, with or without offset.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

// ============================================================================
// Parsing
// ============================================================================

/// How to treat a known section whose payload does not match its type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SectionPolicy {
    /// Skip the section and log a warning.
    #[default]
    Lenient,
    /// Fail the whole parse.
    Strict,
}

impl SectionPolicy {
    /// Policy from a `strict` flag.
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Lenient
        }
    }
}

/// Parse a JSON-encoded `content_sections` string.
///
/// A blank string is an empty list. Anything that is not a JSON array fails
/// with [`Error::SectionParse`].
pub fn parse_sections(raw: &str, policy: SectionPolicy) -> Result<Vec<Section>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let blocks: Vec<Value> = serde_json::from_str(raw)
        .map_err(|e| Error::section_parse(format!("content_sections is not a JSON array: {e}")))?;
    sections_from_blocks(blocks, policy)
}

/// Type a list of raw `{type, value}` blocks, preserving order.
///
/// Blocks with an unrecognized `type` are skipped. A block that is not an
/// object with a string `type` fails the whole list.
pub fn sections_from_blocks(blocks: Vec<Value>, policy: SectionPolicy) -> Result<Vec<Section>> {
    let mut sections = Vec::with_capacity(blocks.len());

    for (index, block) in blocks.into_iter().enumerate() {
        let type_name = block
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::section_parse(format!("block {index} has no string `type` field"))
            })?;

        let kind = match type_name.parse::<SectionKind>() {
            Ok(kind) => kind,
            Err(_) => {
                tracing::debug!(index, type_name, "skipping unrecognized section type");
                continue;
            }
        };

        match Section::deserialize(&block) {
            Ok(section) => sections.push(section),
            Err(e) => match policy {
                SectionPolicy::Strict => {
                    return Err(Error::section_parse(format!(
                        "block {index} ({kind}) has an invalid value: {e}"
                    )));
                }
                SectionPolicy::Lenient => {
                    tracing::warn!(index, %kind, error = %e, "skipping malformed section");
                }
            },
        }
    }

    Ok(sections)
}
