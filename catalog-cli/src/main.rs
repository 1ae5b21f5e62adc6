use anyhow::Result;
use clap::Parser;
use log::debug;

use catalog_cli::cli::commands::{bulk_delete, inspect, template};
use catalog_cli::cli::{Cli, Commands};
use catalog_cli::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    debug!(
        "API base URL: {}",
        config.api.base_url.as_deref().unwrap_or("<unset>")
    );

    match cli.command {
        Commands::BulkDelete(args) => bulk_delete::handle_bulk_delete_command(args, config).await,
        Commands::Inspect(args) => inspect::handle_inspect_command(args, config),
        Commands::Template(args) => template::handle_template_command(args, config),
    }
}

/// Quiet by default so log lines don't interleave with the progress bar
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "catalog_cli=debug" } else { "off" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
