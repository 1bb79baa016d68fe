// Entrypoint for the CLI application.
// - Keeps `main` small: load settings, build the API client and hand it to
//   either the one-shot runner or the interactive menu.
// - Logs go to stderr so they never mix with rendered results.

use clap::Parser;
use insightbrain_cli::{api::ApiClient, config::{Cli, Config}, ui};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; flags and the real environment still apply.
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let cfg = Config::from(&cli);
    let api = ApiClient::new(&cfg)?;
    tracing::debug!(api_url = %api.base_url(), out_dir = %cfg.out_dir.display(), "starting");

    match &cli.query {
        Some(query) => {
            let ok = ui::run_once(&api, &cfg, query, cli.mode.into(), cli.save)?;
            if !ok {
                std::process::exit(1);
            }
        }
        None => ui::main_menu(&api, &cfg)?,
    }
    Ok(())
}

/// `RUST_LOG` controls verbosity; defaults to warnings only.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
