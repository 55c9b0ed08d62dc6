use clap::Parser;
use std::path::PathBuf;

/// Launch options. Every flag can also come from the environment or a
/// `.env` file in the working directory.
#[derive(Debug, Clone, Parser)]
#[command(name = "security-dash", version, about = "Security dashboard over pre-computed CIC-IDS datasets")]
pub struct Config {
    /// Directory holding the CSV tables, stats.json and the model files
    #[arg(long, env = "DASH_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    #[arg(long, env = "DASH_BIND", default_value = "127.0.0.1")]
    pub bind: String,

    #[arg(long, env = "DASH_PORT", default_value_t = 8080)]
    pub port: u16,

    /// HTTP worker threads
    #[arg(long, env = "DASH_WORKERS", default_value_t = 1)]
    pub workers: usize,
}

impl Config {
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Config::parse()
    }
}
