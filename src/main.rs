use anyhow::Context;
use clap::Parser;
use docdb_console::api::HttpCatalogApi;
use docdb_console::config::{AppConfig, Overrides};
use docdb_console::logic::Console;
use docdb_console::tui::App;
use env_logger::{Builder, Target};
use log::{info, LevelFilter};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "docdb-console")]
#[command(about = "Terminal admin console for a document database")]
struct Cli {
    /// Base URL of the catalog API
    #[arg(long)]
    base_url: Option<String>,
    /// Database to select once the database list has loaded
    #[arg(long)]
    default_db: Option<String>,
    /// Documents per page (10, 25, 50 or 100)
    #[arg(long)]
    page_size: Option<u32>,
    /// Config file, without extension
    #[arg(long)]
    config: Option<String>,
    #[arg(long, default_value = "docdb-console.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // The terminal belongs to the UI, so logs go to a file.
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("cannot open log file {}", cli.log_file.display()))?;
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("reqwest", LevelFilter::Warn)
        .parse_default_env()
        .target(Target::Pipe(Box::new(log_file)))
        .init();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply(Overrides {
        base_url: cli.base_url,
        default_database: cli.default_db,
        page_size: cli.page_size,
    });
    let page_size = config.page_size()?;
    info!(
        "console starting: api={} default_db={:?} page_size={}",
        config.api.base_url,
        config.default_database(),
        page_size
    );

    let api = HttpCatalogApi::new(&config.api.base_url, config.timeout())?;
    let console = Console::new(config.default_database(), page_size);

    App::new(console, Arc::new(api)).run().await
}
