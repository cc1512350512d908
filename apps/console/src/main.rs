mod command;
mod config;
mod render;
mod repl;
mod router;
mod screen;
#[cfg(test)]
mod test_support;
mod views;

use std::path::PathBuf;

use clap::Parser;
use dotenv::dotenv;
use tracing::info;

use qd_client::{ClientConfig, HttpQueryDocsClient};

use crate::config::{AppConfig, BASE_URL_ENV, DEFAULT_CONFIG_PATH};
use crate::repl::Console;
use crate::router::Page;

/// Operator console for the QueryDocs document chat service.
#[derive(Debug, Parser)]
#[command(name = "qd-console", version, about)]
struct Cli {
    /// YAML config file (defaults to configs/default.yaml when present)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Backend base URL, overrides API_BASE_URL and the config file
    #[arg(long)]
    base_url: Option<String>,

    /// Page shown first: chat, upload, documents, history, exceptions
    #[arg(long, short)]
    page: Option<Page>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let explicit = cli.config.is_some();
    let path = cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut cfg = AppConfig::load(&path, explicit)?;
    cfg.apply_overrides(std::env::var(BASE_URL_ENV).ok(), cli.base_url);
    cfg.validate()?;

    init_tracing(&cfg.log.level);

    let client = HttpQueryDocsClient::new(ClientConfig {
        base_url: cfg.api.base_url.clone(),
    });
    info!(base_url = %client.base_url(), "qd-console starting");

    let console = Console::new(client, cfg.view_settings(), cli.page.unwrap_or_default());
    repl::run(console, cfg.renderer()).await
}

// stdout 留给界面，日志写 stderr
fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = Registry::default().with(filter).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber).ok();
}
