use anyhow::Result;
use clap::Parser;
use pseudolang_studio::cli;
use pseudolang_studio::model::RunStatus;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Cli::parse();
    match cli::run(args).await {
        // A failed run already printed its Error:-prefixed output slot.
        Ok(RunStatus::Failed) => std::process::exit(1),
        Ok(_) => Ok(()),
        Err(e) => Err(e),
    }
}
