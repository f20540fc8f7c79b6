use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yt_transcriber::cli::Cli;
use yt_transcriber::config::Settings;
use yt_transcriber::pipeline::BatchRunner;
use yt_transcriber::supadata::SupadataClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "yt_transcriber=debug"
    } else {
        "yt_transcriber=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load()?;

    // The credential is the one piece of configuration the run cannot start
    // without; everything after this point degrades per-item instead.
    let api_key = match Settings::api_key() {
        Ok(key) => key,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let language = cli
        .language
        .clone()
        .unwrap_or_else(|| settings.fetch.default_language.clone());

    println!(
        "YouTube Transcript Fetcher - Processing {}",
        settings.input.csv_path.display()
    );
    println!("{}", "=".repeat(60));

    let client = SupadataClient::new(api_key)?;
    let runner = BatchRunner::new(settings, Box::new(client));
    runner.run(&language).await?;

    Ok(())
}
