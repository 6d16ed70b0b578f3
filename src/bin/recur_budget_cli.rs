use std::{path::PathBuf, process};

use chrono::{Datelike, Local};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use recur_budget::{
    config::{Config, ConfigManager},
    core::AllocationEngine,
    init,
    report::{self, BudgetReport, TextOptions},
    storage::{CsvRuleSource, RuleSource},
    utils::build_info,
    BudgetError,
};

#[derive(Debug, Parser)]
#[command(
    name = "recur_budget_cli",
    version,
    about = "Monthly budget breakdown from recurring transaction rules"
)]
struct Cli {
    /// Configuration file (defaults to $RECUR_BUDGET_CONFIG, then the platform config dir).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Allocate the rules in a delimited file into the months of a year.
    Report {
        /// Rules file with a header row.
        rules: PathBuf,
        /// Budget year; defaults to the current year.
        #[arg(short, long)]
        year: Option<i32>,
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// List every occurrence under its category.
        #[arg(long)]
        details: bool,
        /// Skip malformed rules instead of aborting.
        #[arg(long)]
        skip_invalid: bool,
        /// Disable ANSI styling.
        #[arg(long)]
        no_color: bool,
    },
    /// Write the default configuration file.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print compile-time build metadata.
    BuildInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => print!("{output}"),
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }
}

/// Produces the complete output before anything is printed so failures
/// never leave a partial report on stdout.
fn run(cli: Cli) -> Result<String, BudgetError> {
    let manager = ConfigManager::resolve(cli.config)?;
    match cli.command {
        Command::Report {
            rules,
            year,
            format,
            details,
            skip_invalid,
            no_color,
        } => {
            let mut config = manager.load()?;
            if skip_invalid {
                config.skip_invalid_rules = true;
            }
            if no_color {
                config.ui_color_enabled = false;
            }
            let year = year.unwrap_or_else(|| Local::now().year());
            report_for(&config, rules, year, format, details)
        }
        Command::InitConfig { force } => {
            if manager.path().exists() && !force {
                return Err(BudgetError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    manager.path().display()
                )));
            }
            manager.save(&Config::default())?;
            Ok(format!("Wrote {}\n", manager.path().display()))
        }
        Command::BuildInfo => Ok(format!("{}\n", build_info::current())),
    }
}

fn report_for(
    config: &Config,
    rules_path: PathBuf,
    year: i32,
    format: Format,
    details: bool,
) -> Result<String, BudgetError> {
    let source = CsvRuleSource::new(rules_path, config.rule_loader()?);
    let rules = source.load_rules()?;
    let engine = AllocationEngine::for_year(year)?;
    let periods = engine.compute(&rules)?;
    info!(year, rules = rules.len(), "computed budget");

    let snapshot = BudgetReport::from_periods(year, &periods)?;
    match format {
        Format::Json => Ok(format!("{}\n", report::render_json(&snapshot)?)),
        Format::Text => Ok(report::render_text(
            &snapshot,
            &config.formatter(),
            TextOptions {
                details,
                color: config.ui_color_enabled,
            },
        )),
    }
}
