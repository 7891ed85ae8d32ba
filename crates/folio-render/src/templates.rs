//! Askama templates for pages and content sections.
//!
//! Plain-text fields are escaped by askama. Rich-text fields go through the
//! `sanitize` filter and link targets through the `href` filter.

use askama::Template;
use folio_model::{ContentBoxes, LinksSection, NewsSection, Page, ProjectHighlights, StatsSection};

// ============================================================================
// Sections
// ============================================================================

#[derive(Template)]
#[template(path = "sections/stats.html")]
pub(crate) struct StatsTemplate<'a> {
    pub section: &'a StatsSection,
}

#[derive(Template)]
#[template(path = "sections/links.html")]
pub(crate) struct LinksTemplate<'a> {
    pub section: &'a LinksSection,
}

#[derive(Template)]
#[template(path = "sections/content_boxes.html")]
pub(crate) struct ContentBoxesTemplate<'a> {
    pub section: &'a ContentBoxes,
}

#[derive(Template)]
#[template(path = "sections/project_highlights.html")]
pub(crate) struct ProjectHighlightsTemplate<'a> {
    pub section: &'a ProjectHighlights,
}

#[derive(Template)]
#[template(path = "sections/news.html")]
pub(crate) struct NewsTemplate<'a> {
    pub section: &'a NewsSection,
}

/// `html` is written unescaped; callers decide whether it was sanitized.
#[derive(Template)]
#[template(path = "sections/custom_html.html")]
pub(crate) struct CustomHtmlTemplate<'a> {
    pub html: &'a str,
}

// ============================================================================
// Pages
// ============================================================================

#[derive(Template)]
#[template(path = "page.html")]
pub(crate) struct PageTemplate<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub slug: &'a str,
    pub page: &'a Page,
    pub about_html: Option<String>,
    pub body_html: Option<String>,
    pub sections_html: String,
}

/// Shown while a page is loading or after its fetch failed.
#[derive(Template)]
#[template(path = "empty.html")]
pub(crate) struct EmptyTemplate<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub slug: &'a str,
    pub loading: bool,
}

mod filters {
    use crate::sanitize::{safe_href, sanitize_rich_text};
    use folio_model::parse_iso_date;

    /// Replace script-capable link targets with `#`.
    pub fn href<T: std::fmt::Display>(url: T) -> ::askama::Result<String> {
        let url = url.to_string();
        Ok(safe_href(&url).to_string())
    }

    /// Sanitize editor-authored HTML.
    pub fn sanitize<T: std::fmt::Display>(html: T) -> ::askama::Result<String> {
        Ok(sanitize_rich_text(&html.to_string()))
    }

    /// `2024-03-15` becomes `March 15, 2024`; anything unparseable is kept.
    pub fn news_date<T: std::fmt::Display>(raw: T) -> ::askama::Result<String> {
        let raw = raw.to_string();
        Ok(match parse_iso_date(&raw) {
            Some(date) => date.format("%B %-d, %Y").to_string(),
            None => raw,
        })
    }
}
