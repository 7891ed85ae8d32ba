//! FolioCli application.
//!
//! Ties configuration, logging and the page source together and dispatches
//! parsed [`CliArgs`] to the command handlers.

use std::sync::Arc;

use folio_client::HttpPageSource;
use folio_core::traits::ConfigProvider;
use folio_core::Result;
use folio_render::RenderOptions;
use tracing_subscriber::EnvFilter;

use crate::cli::{BaseCommand, CliArgs};
use crate::config::FolioConfig;
use crate::config_handlers;
use crate::page_handlers::{self, PageOptions, RenderFileOptions};

// ============================================================================
// FolioCli
// ============================================================================

/// CLI application parameterized over a config provider.
pub struct FolioCli<C: ConfigProvider> {
    name: String,
    config: Arc<C>,
    version: String,
    render_options: RenderOptions,
    home_page_type: String,
}

impl FolioCli<FolioConfig> {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = FolioConfig::load(args.config.as_deref())?;
        let render_options = config.render_options();
        let home_page_type = config.api.home_page_type.clone();
        Ok(Self::new(name, config)
            .with_render_options(render_options)
            .with_home_page_type(home_page_type))
    }
}

impl<C: ConfigProvider> FolioCli<C> {
    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: C) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
            render_options: RenderOptions::default(),
            home_page_type: "home.HomePage".to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Set the page type listed when `--type` is not given.
    pub fn with_home_page_type(mut self, page_type: impl Into<String>) -> Self {
        self.home_page_type = page_type.into();
        self
    }

    /// Get a reference to the config provider.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be installed (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(BaseCommand::Page { slug, output, json }) => {
                let source = self.page_source()?;
                let options = PageOptions { slug, output, json };
                page_handlers::handle_page(&source, options, &self.render_options).await
            }
            Some(BaseCommand::List { page_type }) => {
                let source = self.page_source()?;
                let page_type = page_type.unwrap_or_else(|| self.home_page_type.clone());
                page_handlers::handle_list(&source, &page_type).await
            }
            Some(BaseCommand::Render { file, slug, output }) => {
                let options = RenderFileOptions { file, slug, output };
                page_handlers::handle_render(options, &self.render_options).await
            }
            Some(BaseCommand::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(BaseCommand::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            None => {
                println!("{} {}: use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }

    fn page_source(&self) -> Result<HttpPageSource> {
        tracing::debug!(project = self.config.project_name(), "connecting to CMS");
        HttpPageSource::from_config(&*self.config)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Clone)]
    struct TestConfig {
        base_url: String,
    }

    impl ConfigProvider for TestConfig {
        fn project_name(&self) -> &str {
            "test-site"
        }

        fn api_base_url(&self) -> Result<String> {
            Ok(self.base_url.clone())
        }
    }

    fn test_config(base_url: &str) -> TestConfig {
        TestConfig {
            base_url: base_url.to_string(),
        }
    }

    #[test]
    fn test_folio_cli_new() {
        let cli = FolioCli::new("folio", test_config("http://cms.test"));
        assert_eq!(cli.name, "folio");
        assert_eq!(cli.config().project_name(), "test-site");
        assert_eq!(cli.home_page_type, "home.HomePage");
    }

    #[test]
    fn test_folio_cli_builders() {
        let options = RenderOptions::default().with_strict(true);
        let cli = FolioCli::new("folio", test_config("http://cms.test"))
            .with_version("9.9.9")
            .with_render_options(options)
            .with_home_page_type("blog.BlogIndexPage");
        assert_eq!(cli.version, "9.9.9");
        assert_eq!(cli.render_options, options);
        assert_eq!(cli.home_page_type, "blog.BlogIndexPage");
    }

    #[tokio::test]
    async fn test_run_version_command() {
        let cli = FolioCli::new("folio", test_config("http://cms.test")).with_version("0.1.0");
        let args = CliArgs::parse_from(["folio", "version"]);
        assert!(cli.run(args).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_no_command() {
        let cli = FolioCli::new("folio", test_config("http://cms.test"));
        let args = CliArgs::parse_from(["folio"]);
        assert!(cli.run(args).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_page_command_unavailable_still_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/page-by-slug/"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("home.html");
        let cli = FolioCli::new("folio", test_config(&server.uri()));
        let args = CliArgs::parse_from(["folio", "page", "home", "-o", out.to_str().unwrap()]);

        cli.run(args).await.unwrap();
        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.contains("page--empty"));
    }

    #[tokio::test]
    async fn test_run_list_uses_home_page_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/pages/"))
            .and(query_param("type", "blog.BlogIndexPage"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meta": {"total_count": 0},
                "items": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let cli = FolioCli::new("folio", test_config(&server.uri()))
            .with_home_page_type("blog.BlogIndexPage");
        let args = CliArgs::parse_from(["folio", "list"]);
        assert!(cli.run(args).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_render_command() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("page.json");
        let out = dir.path().join("page.html");
        std::fs::write(
            &file,
            json!({"title": "Offline", "content_sections": [
                {"type": "custom_html", "value": "<p>inline</p>"}
            ]})
            .to_string(),
        )
        .unwrap();

        let cli = FolioCli::new("folio", test_config("http://cms.test"));
        let args = CliArgs::parse_from([
            "folio",
            "render",
            file.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ]);
        cli.run(args).await.unwrap();

        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.contains("<p>inline</p>"));
    }

    #[tokio::test]
    async fn test_run_page_bad_base_url_is_config_error() {
        let cli = FolioCli::new("folio", test_config("not a url"));
        let args = CliArgs::parse_from(["folio", "page", "home"]);
        let err = cli.run(args).await.unwrap_err();
        assert!(matches!(err, folio_core::Error::Config(_)));
    }

    #[test]
    fn test_init_logging_is_repeatable() {
        let cli = FolioCli::new("folio", test_config("http://cms.test"));
        cli.init_logging(false, false);
        cli.init_logging(true, false);
        cli.init_logging(false, true);
    }

    #[test]
    fn test_folio_cli_from_args_with_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                project_name = "from-file"
                [api]
                home_page_type = "landing.LandingPage"
                [render]
                trust_custom_html = true
            "#,
        )
        .unwrap();

        let args = CliArgs::parse_from(["folio", "--config", path.to_str().unwrap()]);
        let cli = FolioCli::from_args("folio", &args).unwrap();
        assert_eq!(cli.config().project_name(), "from-file");
        assert_eq!(cli.home_page_type, "landing.LandingPage");
        assert!(cli.render_options.trust_custom_html);
    }
}
