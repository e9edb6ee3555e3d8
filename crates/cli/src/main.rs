mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use paddyscan_client::ScannerConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "paddyscan")]
#[command(about = "Diagnose paddy images with a remote classifier and browse past predictions", long_about = None)]
struct Cli {
    /// Service base URL (overrides PADDYSCAN_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// History items per page (overrides PADDYSCAN_PAGE_SIZE)
    #[arg(long, global = true)]
    page_size: Option<usize>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify an image, then show the refreshed history
    Predict { path: PathBuf },
    /// Show one page of prediction history
    History {
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        page: i64,
    },
    /// Download a stored image
    Image {
        image_id: String,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Check that the service is reachable
    Health,
}

impl Cli {
    fn config(&self) -> ScannerConfig {
        let mut config = ScannerConfig::from_env();
        if let Some(url) = &self.api_url {
            config = config.with_base_url(url.clone());
        }
        if let Some(page_size) = self.page_size {
            config = config.with_page_size(page_size);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config();

    match cli.command {
        Commands::Predict { path } => commands::predict::run(config, &path).await,
        Commands::History { page } => commands::history::run(config, page).await,
        Commands::Image { image_id, output } => {
            commands::image::run(config, &image_id, &output).await
        },
        Commands::Health => commands::health::run(config).await,
    }
}
