//! Folio Client: fetches pages from the CMS JSON API.
//!
//! # Key Abstractions
//!
//! - [`PageSource`]: where pages come from
//! - [`HttpPageSource`]: the live CMS over HTTP
//! - [`StaticPageSource`]: pages held in memory or loaded from a JSON file
//! - [`PageView`]: the settled result of a single page load

pub mod client;
pub mod source;
pub mod view;

pub use client::{HttpPageSource, PAGES_ENDPOINT, PAGE_BY_SLUG_ENDPOINT};
pub use source::{PageSource, StaticPageSource};
pub use view::{PageView, ViewState};
