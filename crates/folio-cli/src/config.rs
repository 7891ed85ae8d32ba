//! Configuration for the `folio` CLI.
//!
//! Provides the [`FolioConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `FOLIO_CONFIG` environment variable
//! 3. XDG default: `~/.config/folio/config.toml`
//! 4. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use confyg::{env, Confygery};
use folio_core::traits::ConfigProvider;
use folio_core::{Error, Result};
use folio_render::RenderOptions;
use serde::{Deserialize, Serialize};

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "FOLIO_CONFIG";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the `folio` CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Project name, used for env var prefixes and default paths.
    pub project_name: String,

    /// CMS API configuration.
    pub api: ApiConfig,

    /// Rendering configuration.
    pub render: RenderConfig,
}

/// Where the CMS lives and how to talk to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the CMS.
    pub base_url: String,

    /// Page type listed by `folio list` when `--type` is not given.
    pub home_page_type: String,

    /// Per-request timeout in seconds. No timeout when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Rendering behaviour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Fail on malformed section payloads instead of skipping them.
    pub strict: bool,

    /// Emit `custom_html` blocks without sanitizing them.
    pub trust_custom_html: bool,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            project_name: "folio".to_string(),
            api: ApiConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            home_page_type: "home.HomePage".to_string(),
            timeout_secs: None,
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl FolioConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config file");
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("FOLIO");
        env_opts.add_section("api");
        env_opts.add_section("render");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        resolve_path(explicit, std::env::var(CONFIG_ENV_VAR).ok())
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("folio").join("config.toml"))
    }

    /// Rendering options derived from the `[render]` section.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::default()
            .with_strict(self.render.strict)
            .with_trusted_custom_html(self.render.trust_custom_html)
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into environment variable pairs with `FOLIO_` prefix.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, "FOLIO", &mut vars);
        Ok(vars)
    }
}

fn resolve_path(explicit: Option<&str>, from_env: Option<String>) -> Option<PathBuf> {
    explicit
        .map(PathBuf::from)
        .or_else(|| from_env.filter(|p| !p.is_empty()).map(PathBuf::from))
        .or_else(FolioConfig::default_config_path)
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for FolioConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn api_base_url(&self) -> Result<String> {
        let url = self.api.base_url.trim();
        if url.is_empty() {
            return Err(Error::config("api.base_url is not set"));
        }
        Ok(url.to_string())
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.api.timeout_secs.map(Duration::from_secs)
    }
}

// ============================================================================
// Helper: flatten TOML to env vars
// ============================================================================

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use folio_model::SectionPolicy;
    use std::collections::HashMap;

    #[test]
    fn test_folio_config_default() {
        let config = FolioConfig::default();
        assert_eq!(config.project_name, "folio");
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.home_page_type, "home.HomePage");
        assert!(config.api.timeout_secs.is_none());
        assert!(!config.render.strict);
        assert!(!config.render.trust_custom_html);
    }

    #[test]
    fn test_folio_config_from_toml() {
        let config: FolioConfig = toml::from_str(
            r#"
                project_name = "acme-site"

                [api]
                base_url = "https://cms.acme.test"
                timeout_secs = 10

                [render]
                strict = true
            "#,
        )
        .unwrap();
        assert_eq!(config.project_name, "acme-site");
        assert_eq!(config.api.base_url, "https://cms.acme.test");
        assert_eq!(config.api.home_page_type, "home.HomePage");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
        assert!(config.render.strict);
        assert!(!config.render.trust_custom_html);
    }

    #[test]
    fn test_folio_config_toml_round_trip() {
        let config = FolioConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("project_name = \"folio\""));
        assert!(toml_str.contains("[api]"));
        assert!(toml_str.contains("[render]"));
        assert!(!toml_str.contains("timeout_secs"));

        let parsed: FolioConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_folio_config_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                project_name = "loaded"
                [api]
                base_url = "http://cms.internal:9000"
            "#,
        )
        .unwrap();

        let config = FolioConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.project_name, "loaded");
        assert_eq!(config.api_base_url().unwrap(), "http://cms.internal:9000");
    }

    #[test]
    fn test_folio_config_load_missing_file_uses_defaults() {
        let config = FolioConfig::load(Some("/nonexistent/folio.toml")).unwrap();
        assert_eq!(config.project_name, "folio");
        assert_eq!(config.api.home_page_type, "home.HomePage");
    }

    #[test]
    fn test_resolve_path_priority() {
        assert_eq!(
            resolve_path(Some("/explicit.toml"), Some("/env.toml".into())),
            Some(PathBuf::from("/explicit.toml"))
        );
        assert_eq!(
            resolve_path(None, Some("/env.toml".into())),
            Some(PathBuf::from("/env.toml"))
        );
        assert_eq!(resolve_path(None, None), FolioConfig::default_config_path());
        assert_eq!(
            resolve_path(None, Some(String::new())),
            FolioConfig::default_config_path()
        );
    }

    #[test]
    fn test_default_config_path_shape() {
        if let Some(path) = FolioConfig::default_config_path() {
            assert!(path.ends_with("folio/config.toml"));
        }
    }

    #[test]
    fn test_config_provider() {
        let config = FolioConfig::default();
        assert_eq!(config.project_name(), "folio");
        assert_eq!(config.api_base_url().unwrap(), "http://localhost:8000");
        assert!(config.request_timeout().is_none());

        let blank = FolioConfig {
            api: ApiConfig {
                base_url: "  ".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(blank.api_base_url(), Err(Error::Config(_))));
    }

    #[test]
    fn test_render_options() {
        let config = FolioConfig {
            render: RenderConfig {
                strict: true,
                trust_custom_html: true,
            },
            ..Default::default()
        };
        let options = config.render_options();
        assert_eq!(options.policy, SectionPolicy::Strict);
        assert!(options.trust_custom_html);
        assert_eq!(
            FolioConfig::default().render_options(),
            RenderOptions::default()
        );
    }

    #[test]
    fn test_folio_config_to_env_vars() {
        let vars = FolioConfig::default().to_env_vars().unwrap();
        let map: HashMap<_, _> = vars.into_iter().collect();
        assert_eq!(map.get("FOLIO_PROJECT_NAME").unwrap(), "folio");
        assert_eq!(
            map.get("FOLIO_API_BASE_URL").unwrap(),
            "http://localhost:8000"
        );
        assert_eq!(map.get("FOLIO_RENDER_STRICT").unwrap(), "false");
        assert!(!map.contains_key("FOLIO_API_TIMEOUT_SECS"));
    }

    #[test]
    fn test_folio_config_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FolioConfig>();
    }
}
