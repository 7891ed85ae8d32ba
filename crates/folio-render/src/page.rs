//! Whole-page rendering.

use askama::Template;
use folio_client::{PageView, ViewState};
use folio_core::{Error, Result};
use folio_model::Page;

use crate::dispatch::render_sections;
use crate::options::RenderOptions;
use crate::sanitize::sanitize_rich_text;
use crate::templates::{EmptyTemplate, PageTemplate};

/// Document title used when there is no page to take one from.
const FALLBACK_TITLE: &str = "Folio";

/// Render a page: breadcrumbs, hero, about block, body, then content
/// sections in order.
///
/// A malformed `content_sections` list fails the render.
pub fn render_page(page: &Page, options: &RenderOptions) -> Result<String> {
    let sections = page.sections(options.policy)?;
    let sections_html = render_sections(&sections, options)?;
    let about_html = page.about_content.as_deref().map(sanitize_rich_text);
    let body_html = page.body.as_deref().map(sanitize_rich_text);

    let template = PageTemplate {
        title: page.document_title(),
        description: page.search_description.as_deref(),
        slug: page.slug().unwrap_or_default(),
        page,
        about_html,
        body_html,
        sections_html,
    };
    template
        .render()
        .map_err(|e| Error::render(format!("page template: {e}")))
}

/// Render a page view in whatever state it is in.
///
/// Loading and unavailable views render the empty state, never an error.
pub fn render_view(view: &PageView, options: &RenderOptions) -> Result<String> {
    match view.state() {
        ViewState::Ready(page) => render_page(page, options),
        ViewState::Loading => render_empty(view.slug(), true),
        ViewState::Unavailable => render_empty(view.slug(), false),
    }
}

fn render_empty(slug: &str, loading: bool) -> Result<String> {
    EmptyTemplate {
        title: FALLBACK_TITLE,
        description: None,
        slug,
        loading,
    }
    .render()
    .map_err(|e| Error::render(format!("empty template: {e}")))
}
