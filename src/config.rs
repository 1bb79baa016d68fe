// Runtime configuration for the CLI.
//
// Everything the client needs to know about its environment comes in
// through here: the backend base URL, where saved reports go, and the
// optional one-shot query. Values are read from flags first, then from the
// environment (a `.env` file is loaded by `main` before parsing).

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::api::Mode;

/// Base URL used when neither `--api-url` nor `INSIGHTBRAIN_API_URL` is set.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Command line flags.
#[derive(Parser, Debug, Clone)]
#[command(name = "insightbrain", version, about = "Research summarizer client")]
pub struct Cli {
    /// Base URL of the research backend.
    #[arg(long, env = "INSIGHTBRAIN_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Directory where downloaded reports are written.
    #[arg(long, env = "INSIGHTBRAIN_OUT_DIR")]
    pub out_dir: Option<PathBuf>,

    /// Run a single research query and exit instead of starting the menu.
    #[arg(long)]
    pub query: Option<String>,

    /// Research mode for `--query`.
    #[arg(long, value_enum, default_value_t = ModeArg::Quick)]
    pub mode: ModeArg,

    /// Save the PDF report when running with `--query`.
    #[arg(long)]
    pub save: bool,
}

/// Flag spelling of [`Mode`].
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Quick,
    Deep,
}

impl From<ModeArg> for Mode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Quick => Mode::Quick,
            ModeArg::Deep => Mode::Deep,
        }
    }
}

/// Resolved settings shared by the API client and the UI.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub out_dir: PathBuf,
}

impl Config {
    /// Build a config for the given backend URL, saving reports to the
    /// default output directory.
    pub fn new(api_url: impl Into<String>) -> Self {
        Config {
            api_url: normalize_base_url(&api_url.into()),
            out_dir: default_out_dir(),
        }
    }
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        let mut cfg = Config::new(cli.api_url.clone());
        if let Some(dir) = &cli.out_dir {
            cfg.out_dir = dir.clone();
        }
        cfg
    }
}

/// Strip whitespace and trailing slashes so endpoint paths can be appended
/// with a plain `format!`.
fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// The user's download directory if the platform has one, else the
/// current directory.
fn default_out_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}
