//! Page view state: the result of one page load.
//!
//! A view starts out [`ViewState::Loading`], and a single fetch moves it to
//! either [`ViewState::Ready`] or [`ViewState::Unavailable`]. Fetch failures
//! are logged here and never surface as errors; callers render the empty
//! state instead.

use folio_core::Result;
use folio_model::Page;

use crate::source::PageSource;

/// Load state of a page view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// The fetch has not completed.
    Loading,
    /// The page was fetched.
    Ready(Box<Page>),
    /// The fetch failed; there is no data to show.
    Unavailable,
}

/// A page view bound to one slug.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    slug: String,
    state: ViewState,
}

impl PageView {
    /// Creates a view that has not loaded yet.
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            state: ViewState::Loading,
        }
    }

    /// Fetches `slug` from `source` once and returns the settled view.
    pub async fn load<S>(source: &S, slug: &str) -> Self
    where
        S: PageSource + ?Sized,
    {
        let mut view = Self::new(slug);
        let result = source.page_by_slug(slug).await;
        view.settle(result);
        view
    }

    /// Applies a fetch result to this view.
    ///
    /// Errors move the view to [`ViewState::Unavailable`] and are logged.
    pub fn settle(&mut self, result: Result<Page>) {
        self.state = match result {
            Ok(page) => {
                tracing::info!(slug = %self.slug, title = %page.title, "page loaded");
                ViewState::Ready(Box::new(page))
            }
            Err(e) => {
                tracing::error!(slug = %self.slug, error = %e, "failed to load page");
                ViewState::Unavailable
            }
        };
    }

    /// The slug this view was created for.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Current state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Whether the fetch is still outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading)
    }

    /// Whether the fetch failed.
    pub fn is_unavailable(&self) -> bool {
        matches!(self.state, ViewState::Unavailable)
    }

    /// The loaded page, if any.
    pub fn page(&self) -> Option<&Page> {
        match &self.state {
            ViewState::Ready(page) => Some(page),
            _ => None,
        }
    }
}
