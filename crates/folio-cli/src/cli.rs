//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments for `folio`.
#[derive(Parser, Debug)]
#[command(name = "folio", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "FOLIO_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<BaseCommand>,
}

/// Commands understood by `folio`.
#[derive(Subcommand, Debug)]
pub enum BaseCommand {
    /// Fetch one page from the CMS and render it.
    Page {
        /// Page slug.
        slug: String,

        /// Write the output to a file instead of stdout.
        #[arg(short, long)]
        output: Option<String>,

        /// Print the page JSON instead of HTML.
        #[arg(long)]
        json: bool,
    },

    /// List pages of a model type.
    List {
        /// Page model type (defaults to `api.home_page_type`).
        #[arg(short = 't', long = "type")]
        page_type: Option<String>,
    },

    /// Render a page JSON file without contacting the CMS.
    Render {
        /// Page JSON file: a single page or a listing envelope.
        file: String,

        /// Slug of the page to render when the file holds several.
        #[arg(short, long)]
        slug: Option<String>,

        /// Write the HTML to a file instead of stdout.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Print the effective configuration as TOML.
    Show,

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
