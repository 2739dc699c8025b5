use anyhow::Result;
use clap::Parser;
use hucha::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    hucha::init_tracing();
    let cli = Cli::parse();
    cli.run().await
}
