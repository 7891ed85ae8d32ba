//! Folio Render: turns pages and content sections into HTML.
//!
//! # Key Abstractions
//!
//! - [`render_section`]: one section to one `cms-section` region
//! - [`render_sections`]: an ordered list of sections
//! - [`render_page`]: a full page document
//! - [`render_view`]: a page view, including its empty state
//! - [`RenderOptions`]: section policy and `custom_html` trust

pub mod dispatch;
pub mod options;
pub mod page;
pub mod sanitize;
mod templates;

pub use dispatch::{render_content_sections, render_section, render_sections};
pub use options::RenderOptions;
pub use page::{render_page, render_view};
pub use sanitize::{safe_href, sanitize_rich_text};
