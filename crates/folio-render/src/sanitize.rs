//! Sanitization boundary for CMS-authored HTML and URLs.
//!
//! Rich-text fields and `custom_html` blocks come from editors, not from
//! this code, so they pass through [`sanitize_rich_text`] before being
//! written unescaped. Plain-text fields are escaped by the templates.

/// URL schemes that never reach an `href` or `src`.
const BLOCKED_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:"];

/// Strip scripts, event handlers and other unsafe markup from rich HTML.
///
/// Links keep their targets and get `rel="noopener noreferrer"`.
pub fn sanitize_rich_text(html: &str) -> String {
    ammonia::clean(html)
}

/// Returns `url` unless it uses a script-capable scheme, in which case `#`.
pub fn safe_href(url: &str) -> &str {
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .flat_map(char::to_lowercase)
        .collect();

    if BLOCKED_SCHEMES
        .iter()
        .any(|scheme| normalized.starts_with(scheme))
    {
        tracing::warn!(url, "blocked unsafe link target");
        return "#";
    }
    url.trim()
}
