use clap::Parser;
use linkshelf::cli::Cli;
use linkshelf::logging::init_logging;
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    init_logging(cli.verbose);
    debug!("Starting linkshelf v{}", env!("CARGO_PKG_VERSION"));

    cli.run().await?;

    Ok(())
}
