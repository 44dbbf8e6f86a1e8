use clap::Parser;
use colored::*;
use gitrank_viewer::app::{self, HELP};
use gitrank_viewer::cli::Cli;
use gitrank_viewer::render::TerminalScreen;
use gitrank_viewer::source::{source_for_root, DataSource};
use gitrank_viewer::{i18n, LeaderboardViewModel};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    // Logs go to stderr so they don't interleave with the rendered list
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    i18n::validate()?;
    let config = cli.viewer_config()?;
    let source: Arc<dyn DataSource> = Arc::from(source_for_root(
        &cli.data_root,
        Duration::from_secs(cli.timeout_secs),
    )?);

    info!(
        data_root = %cli.data_root,
        lang = %config.lang,
        category = %config.category,
        page_size = config.items_per_page,
        "Starting viewer"
    );

    let vm = LeaderboardViewModel::new(config)?;
    let mut screen = TerminalScreen;

    if cli.once {
        app::run_once(vm, source.as_ref(), &mut screen).await;
        return Ok(());
    }

    println!("{}", HELP.dimmed());
    let input = BufReader::new(tokio::io::stdin());
    app::run(vm, source, input, &mut screen).await?;

    println!("{}", "Bye".dimmed());
    Ok(())
}
