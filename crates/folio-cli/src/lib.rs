//! Folio CLI: fetch and render CMS pages from the command line.
//!
//! # Key Abstractions
//!
//! - [`FolioCli`]: the application, parameterized over a config provider
//! - [`FolioConfig`]: file/env/default configuration loaded with `confyg`
//! - [`CliArgs`]: clap-derived arguments and subcommands

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod page_handlers;

pub use app::FolioCli;
pub use cli::{BaseCommand, CliArgs, ConfigAction, ConfigCommand};
pub use config::{ApiConfig, FolioConfig, RenderConfig};
