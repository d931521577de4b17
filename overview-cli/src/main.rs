use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use overview_core::{Category, OverviewError};
use overview_finance::build_overview;
use overview_ingest::load_statement_folder;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod debug;
mod render;
mod state;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("OVERVIEW_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "overview",
    version,
    long_version = LONG_VERSION,
    about = "Monthly spending report from bank statement exports"
)]
struct Cli {
    /// Folder of Scotiabank / BMO CSV exports (default from config)
    #[arg(long, global = true)]
    statements: Option<PathBuf>,

    /// HTML report to write (default from config)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Config file (default: ~/.overview/config.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write the computed tables as JSON
    #[arg(long, global = true)]
    dump_json: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Produce the report, then list the rows of some categories by date
    Debug {
        /// Category names or `all` (default: misc)
        categories: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // checked before any work so a typo costs nothing
    let selection = match &cli.command {
        Some(Command::Debug { categories }) => match debug::select_categories(categories) {
            Ok(selection) => Some(selection),
            Err(e) => {
                let name = match e.downcast_ref::<OverviewError>() {
                    Some(OverviewError::UnknownCategory(name)) => name.clone(),
                    _ => e.to_string(),
                };
                eprintln!("{}", debug::usage(&name));
                std::process::exit(2);
            }
        },
        None => None,
    };

    run(&cli, selection.as_deref())
}

fn run(cli: &Cli, selection: Option<&[Category]>) -> Result<()> {
    let cfg = config::load_config(cli.config.as_deref())?;
    let statements = cli.statements.clone().unwrap_or_else(|| cfg.paths.statements.clone());
    let output = cli.output.clone().unwrap_or_else(|| cfg.paths.output.clone());

    ensure_writable(&output)?;
    if let Some(p) = &cli.dump_json {
        ensure_writable(p)?;
    }
    let rules = cfg.report_rules()?;

    let txns = load_statement_folder(&statements)
        .with_context(|| format!("loading statements from {}", statements.display()))?;
    let today = Local::now().date_naive();
    let overview = build_overview(&txns, &rules, today);

    let html = render::render_document(&overview.report);
    fs::write(&output, html).with_context(|| format!("write {}", output.display()))?;
    info!(path = %output.display(), "output document written");

    if let Some(p) = &cli.dump_json {
        let json = serde_json::to_string_pretty(&overview.report).context("serialize report")?;
        fs::write(p, json).with_context(|| format!("write {}", p.display()))?;
        info!(path = %p.display(), "tables dumped");
    }

    if let Some(selection) = selection {
        debug::write_listing(&mut io::stdout().lock(), &overview.categorized, selection)?;
    }

    Ok(())
}

/// The folder that will hold `path` must accept a new file, and `path` itself
/// must not be a directory. Writability is tested by creating a scratch file
/// next to the output; it is removed on drop.
fn ensure_writable(path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if path.is_dir() || !dir.is_dir() {
        return Err(OverviewError::UnwritableOutput(path.to_path_buf()).into());
    }
    if let Err(e) = tempfile::NamedTempFile::new_in(dir) {
        tracing::debug!(dir = %dir.display(), error = %e, "scratch file refused");
        return Err(OverviewError::UnwritableOutput(path.to_path_buf()).into());
    }
    Ok(())
}
