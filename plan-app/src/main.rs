use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use plan_app::config::AppConfig;
use plan_app::report::Report;
use plan_app::{app, logging};

const DEFAULT_CONFIG: &str = "business-plan.toml";

/// Financial planning worksheets for a small business.
///
/// Opens the stored plan and prints its three-year summary statement and
/// dashboard.
#[derive(Debug, Parser)]
struct Cli {
    /// TOML configuration file. `business-plan.toml` is read when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Storage backend, overriding `[storage] backend`.
    #[arg(long)]
    backend: Option<String>,

    /// Database path or `:memory:`, overriding `[storage] path`.
    #[arg(long)]
    db: Option<String>,

    /// Log level or filter directive, overriding `[logging] level`.
    #[arg(long)]
    log_level: Option<String>,

    /// Append logs to this file, overriding `[logging] file`.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG);
                if default.exists() {
                    AppConfig::load(&default)?
                } else {
                    AppConfig::default()
                }
            }
        };

        if let Some(backend) = &self.backend {
            config.storage.backend = backend.clone();
        }
        if let Some(db) = &self.db {
            config.storage.path = db.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = Some(level.clone());
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log = logging::init();

    let cli = Cli::parse();
    let config = cli.load_config()?;
    log.apply(&config.logging).context("cannot apply logging settings")?;
    debug!(?config, "configuration loaded");

    let mut plan = app::open_plan(&config).await?;
    app::drain_notices(&mut plan);

    let (summary, dashboard) = (plan.summary(), plan.dashboard());
    print!("{}", Report::new(&summary, &dashboard));

    Ok(())
}
