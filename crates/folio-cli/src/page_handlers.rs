//! Handler functions for page CLI commands.
//!
//! These functions implement `folio page`, `folio list` and `folio render`.
//! Each handler builds its output as a string first so it can be written to
//! stdout or to a file.

use std::path::Path;

use folio_client::{PageSource, PageView, StaticPageSource};
use folio_core::{Error, Result};
use folio_model::PageListing;
use folio_render::{render_page, render_view, RenderOptions};

// ============================================================================
// Option types
// ============================================================================

/// Options for `folio page`.
#[derive(Debug, Clone)]
pub struct PageOptions {
    /// Page slug.
    pub slug: String,
    /// Output file; stdout when unset.
    pub output: Option<String>,
    /// Emit the page JSON instead of HTML.
    pub json: bool,
}

/// Options for `folio render`.
#[derive(Debug, Clone)]
pub struct RenderFileOptions {
    /// Page JSON file.
    pub file: String,
    /// Page to pick from a listing file.
    pub slug: Option<String>,
    /// Output file; stdout when unset.
    pub output: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Fetch one page and print its HTML (or JSON).
///
/// HTML output always succeeds once the fetch has settled: an unavailable
/// page renders the empty state. JSON output needs the page itself, so a
/// failed fetch is an error there.
pub async fn handle_page<S: PageSource + ?Sized>(
    source: &S,
    options: PageOptions,
    render_options: &RenderOptions,
) -> Result<()> {
    let content = if options.json {
        page_json(source, &options.slug).await?
    } else {
        page_html(source, &options.slug, render_options).await?
    };
    write_output(options.output.as_deref(), &content)
}

/// List pages of `page_type`.
pub async fn handle_list<S: PageSource + ?Sized>(source: &S, page_type: &str) -> Result<()> {
    let listing = source.list_pages(page_type).await?;
    print!("{}", format_listing(page_type, &listing));
    Ok(())
}

/// Render a page JSON file without touching the network.
pub async fn handle_render(
    options: RenderFileOptions,
    render_options: &RenderOptions,
) -> Result<()> {
    let html = render_file(&options.file, options.slug.as_deref(), render_options).await?;
    write_output(options.output.as_deref(), &html)
}

// ============================================================================
// Output builders
// ============================================================================

async fn page_html<S: PageSource + ?Sized>(
    source: &S,
    slug: &str,
    render_options: &RenderOptions,
) -> Result<String> {
    let view = PageView::load(source, slug).await;
    if view.is_unavailable() {
        eprintln!("Page \"{slug}\" is unavailable; rendering the empty state.");
    }
    render_view(&view, render_options)
}

async fn page_json<S: PageSource + ?Sized>(source: &S, slug: &str) -> Result<String> {
    let page = source.page_by_slug(slug).await?;
    let mut json = serde_json::to_string_pretty(&page)
        .map_err(|e| Error::serialization(format!("page JSON: {e}")))?;
    json.push('\n');
    Ok(json)
}

async fn render_file(
    file: impl AsRef<Path>,
    slug: Option<&str>,
    render_options: &RenderOptions,
) -> Result<String> {
    let file = file.as_ref();
    let source = StaticPageSource::from_file(file)?;
    let page = match slug {
        Some(slug) => source.page_by_slug(slug).await?,
        None => source
            .pages()
            .first()
            .cloned()
            .ok_or_else(|| Error::invalid_data(format!("{} holds no pages", file.display())))?,
    };
    tracing::info!(file = %file.display(), title = %page.title, "rendering page file");
    render_page(&page, render_options)
}

fn format_listing(page_type: &str, listing: &PageListing) -> String {
    let mut out = format!(
        "{} page(s) of type {page_type} ({} total)\n",
        listing.items.len(),
        listing.meta.total_count
    );
    for page in &listing.items {
        let id = page.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into());
        out.push_str(&format!(
            "  {id:>5}  {:<24}  {}\n",
            page.slug().unwrap_or("-"),
            page.title
        ));
    }
    out
}

fn write_output(output: Option<&str>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content).map_err(|e| Error::io_with_path(e, path))?;
            eprintln!("Wrote {path}");
        }
        None => print!("{content}"),
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
