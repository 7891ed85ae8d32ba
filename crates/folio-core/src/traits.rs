//! Core traits for Folio configuration.
//!
//! [`ConfigProvider`] abstracts where the CMS lives and how requests to it
//! behave, so the client and CLI crates never depend on a concrete
//! configuration file format.

use std::time::Duration;

use crate::Result;

/// Trait for site-specific configuration.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across tasks
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use folio_core::traits::ConfigProvider;
/// use folio_core::Result;
///
/// #[derive(Clone)]
/// struct StagingConfig;
///
/// impl ConfigProvider for StagingConfig {
///     fn project_name(&self) -> &str {
///         "staging-site"
///     }
///
///     fn api_base_url(&self) -> Result<String> {
///         Ok("https://cms.staging.example.com".to_string())
///     }
///
///     fn request_timeout(&self) -> Option<Duration> {
///         Some(Duration::from_secs(5))
///     }
/// }
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Base URL of the CMS, e.g. `http://localhost:8000`.
    ///
    /// The API paths (`/api/v2/...`) are appended to this URL.
    ///
    /// # Errors
    ///
    /// Returns an error if no usable base URL is configured.
    fn api_base_url(&self) -> Result<String>;

    /// Per-request timeout. `None` means requests wait indefinitely.
    fn request_timeout(&self) -> Option<Duration> {
        None
    }
}
