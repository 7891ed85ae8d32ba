//! Folio Model: the page and content-section data model.
//!
//! # Modules
//!
//! - [`page`]: Page records, the listing envelope, and API error bodies
//! - [`section`]: The content-section union and its parsing rules
//! - [`image`]: Image references

pub mod image;
pub mod page;
pub mod section;

pub use image::{ImageMeta, ImageRef};
pub use page::{
    ApiErrorBody, Breadcrumb, ListingMeta, Page, PageListing, PageMeta, SectionsField,
};
pub use section::{
    parse_iso_date, parse_sections, sections_from_blocks, ContentBox, ContentBoxes, LinkItem,
    LinksSection, NewsArticle, NewsSection, Project, ProjectHighlights, Section, SectionKind,
    SectionPolicy, Stat, StatsSection,
};
