use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use findash_core::{Month, project};
use findash_ingest::{BalanceExtractor, PdfExtractBackend};
use findash_store::SeriesStore;
use std::fs;
use std::path::{Path, PathBuf};

mod config;
mod logging;
mod render;
mod session;
mod state;

use config::Config;
use session::Dashboard;

#[derive(Parser, Debug)]
#[command(name = "findash", version, about = "Track a bank balance from monthly statement PDFs")]
struct Cli {
    /// Balance CSV to use instead of the configured one
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the balance from a statement and record it
    Ingest {
        /// Statement PDF
        pdf: PathBuf,

        /// Statement month (Jan..Dec)
        #[arg(long)]
        month: Option<String>,

        /// Statement year (4 digits)
        #[arg(long)]
        year: Option<String>,
    },

    /// Extract the balance from a statement without recording it
    Extract {
        /// Statement PDF
        pdf: PathBuf,
    },

    /// Print the recorded balances
    Show {
        /// Emit the chart projection as JSON
        #[arg(long)]
        json: bool,
    },

    /// Config file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
    /// Print the config file path
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    logging::init(&cfg.log.level);

    match cli.command {
        Command::Ingest { pdf, month, year } => {
            ingest(&cfg, cli.data.as_deref(), &pdf, month.as_deref(), year.as_deref())?;
        }

        Command::Extract { pdf } => {
            let bytes = read_pdf(&pdf)?;
            let extractor = BalanceExtractor::new(PdfExtractBackend::new()).with_settings(cfg.stream);
            match extractor.extract(&bytes) {
                Ok(found) => println!("{:.2} (layout: {})", found.balance, found.layout),
                Err(e) => bail!("{}: {}", pdf.display(), e),
            }
        }

        Command::Show { json } => {
            let path = cfg.data_path(cli.data.as_deref())?;
            let series = SeriesStore::open(&path)
                .load()
                .with_context(|| format!("loading {}", path.display()))?;
            let chart = project(&series, &cfg.chart);
            if json {
                println!("{}", serde_json::to_string_pretty(&chart)?);
            } else {
                print!("{}", render::chart_table(&chart));
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Path => println!("{}", config::config_path()?.display()),
        },
    }

    Ok(())
}

fn read_pdf(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        bail!("PDF not found: {}", path.display());
    }
    fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn ingest(
    cfg: &Config,
    data: Option<&Path>,
    pdf: &Path,
    month: Option<&str>,
    year: Option<&str>,
) -> Result<()> {
    let path = cfg.data_path(data)?;
    let extractor = BalanceExtractor::new(PdfExtractBackend::new()).with_settings(cfg.stream);
    let store = SeriesStore::open(&path);
    let mut dash = Dashboard::open(extractor, store, cfg.chart.clone())
        .with_context(|| format!("loading {}", path.display()))?;

    let bytes = read_pdf(pdf)?;
    tracing::debug!(pdf = %pdf.display(), bytes = bytes.len(), "read statement");
    let note = dash.receive_upload(bytes);
    tracing::info!("{note}");

    let outcome = dash.submit(month, year);
    if let Some(msg) = outcome.error {
        if msg == session::NO_PERIOD {
            let months: Vec<&str> = Month::ALL.iter().map(|m| m.abbrev()).collect();
            bail!("{msg} (--month {} --year YYYY)", months.join("|"));
        }
        bail!("{msg}");
    }

    if let Some(point) = outcome.stored {
        println!(
            "Recorded {} for {} in {} ({} points)\n",
            findash_core::format_currency(point.balance),
            point.date.format("%b %Y"),
            path.display(),
            dash.series().len()
        );
    }
    print!("{}", render::chart_table(&outcome.chart));
    Ok(())
}
