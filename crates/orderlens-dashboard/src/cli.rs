//! Command line interface

use crate::server;
use crate::state::AppState;
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use orderlens_common::{init_logging, Dataset, DateRange};
use orderlens_config::{Config, ConfigLoader};
use orderlens_graphs::{ChartKind, ImageFormat};
use orderlens_i18n::I18nManager;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Explore an e-commerce orders dataset
#[derive(Parser, Debug)]
#[command(name = "orderlens", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Orders CSV, overrides the configured dataset path
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error), overrides the configured one
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the interactive dashboard over HTTP
    Serve {
        /// Listen address, overrides the configured one
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },

    /// Write every chart and a JSON summary to a directory
    Render {
        /// Output directory, created when missing
        #[arg(short, long, default_value = "charts")]
        out: PathBuf,

        /// First day of the range (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last day of the range (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Image format of the charts
        #[arg(short, long, default_value = "svg")]
        format: ImageFormat,
    },

    /// Print the aggregates for a range as JSON
    Summary {
        /// First day of the range (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last day of the range (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
    },
}

impl Cli {
    /// Load the configuration and apply command line overrides
    pub fn load_config(&self) -> Result<Config> {
        let mut config = ConfigLoader::load(self.config.as_deref())?;
        self.apply_overrides(&mut config)?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut Config) -> Result<()> {
        if let Some(data) = &self.data {
            config.dataset.path = data.display().to_string();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Command::Serve { bind: Some(bind) } = &self.command {
            config.server.bind = bind.to_string();
        }
        config
            .validate_all()
            .context("Invalid configuration after command line overrides")?;
        Ok(())
    }
}

/// Build the shared state: dataset and translations
pub fn load_state(config: Config) -> Result<AppState> {
    let dataset = Dataset::load(&config.dataset.path).map_err(|e| {
        error!(path = %config.dataset.path, error = %e, "Failed to load dataset");
        anyhow!(e)
    })?;

    let i18n = I18nManager::from_code(&config.dashboard.locale)?;
    Ok(AppState::new(dataset, config, i18n))
}

/// Render every chart plus `summary.json` into `out`, returning the written paths
pub fn export(
    state: &AppState,
    range: DateRange,
    out: &Path,
    format: ImageFormat,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory {}", out.display()))?;

    let data = state.compute(range);
    let renderer = state.renderer();
    let mut written = Vec::with_capacity(ChartKind::ALL.len() + 1);

    for kind in ChartKind::ALL {
        let path = out.join(format!("{}.{}", kind.slug(), format.extension()));
        renderer.render_chart_to_file(kind, &data, &path)?;
        written.push(path);
    }

    let summary = out.join("summary.json");
    std::fs::write(&summary, state.summary_json(range)?)?;
    written.push(summary);

    info!(directory = %out.display(), files = written.len(), %range, "Charts exported");
    Ok(written)
}

/// Execute the parsed command against a loaded configuration
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let bind: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", config.server.bind))?;
    let state = load_state(config)?;

    match cli.command {
        Command::Serve { .. } => server::serve(state, bind).await,
        Command::Render {
            out,
            start,
            end,
            format,
        } => {
            let range = state.resolve_range(start, end);
            let written = export(&state, range, &out, format)?;
            for path in written {
                println!("{}", path.display());
            }
            Ok(())
        }
        Command::Summary { start, end } => {
            let range = state.resolve_range(start, end);
            println!("{}", state.summary_json(range)?);
            Ok(())
        }
    }
}

/// Start logging from the configuration
pub fn init_tracing(config: &Config) -> Result<()> {
    init_logging(config.logging.to_logging_config())
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
