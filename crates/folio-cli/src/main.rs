//! `folio` binary entry point.

use clap::Parser;
use folio_cli::{CliArgs, FolioCli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let cli = FolioCli::from_args("folio", &args)?;
    cli.run(args).await?;
    Ok(())
}
