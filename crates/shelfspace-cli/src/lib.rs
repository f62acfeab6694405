//! Command-line front end for the report exporter
//!
//! `main.rs` only installs logging and calls [`run`]; everything else lives
//! here so the commands can be driven from tests.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use shelfspace_export::{DirectoryTarget, ExportConfig, ExportFormat, TabularExporter};
use shelfspace_reports::{
    export_report, DateRange, DateScope, FixtureSource, ReportFilters, ReportKind,
};
use tracing::debug;

/// Seed used when `--seed` is not given
pub const DEFAULT_SEED: u64 = 42;

fn report_arg() -> Arg {
    Arg::new("report")
        .long("report")
        .short('r')
        .required(true)
        .value_parser(value_parser!(ReportKind))
        .help("Report to use (point-in-time, historical, measurement-frequency, risk)")
}

/// Argument definitions
#[must_use]
pub fn command() -> Command {
    Command::new("shelfspace")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Export space-planning reports as CSV or Excel-named files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("export")
                .about("Export a report to a directory")
                .arg(report_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .default_value("csv")
                        .value_parser(value_parser!(ExportFormat))
                        .help("Output format: csv or excel"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .default_value(".")
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory to write the export into"),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_parser(value_parser!(NaiveDate))
                        .conflicts_with_all(["from", "to"])
                        .help("Snapshot date (YYYY-MM-DD) for point-in-time reports"),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .requires("to")
                        .value_parser(value_parser!(NaiveDate))
                        .help("Range start (YYYY-MM-DD)"),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .requires("from")
                        .value_parser(value_parser!(NaiveDate))
                        .help("Range end (YYYY-MM-DD)"),
                )
                .arg(
                    Arg::new("store")
                        .long("store")
                        .help("Store slug, e.g. store-a"),
                )
                .arg(
                    Arg::new("concept")
                        .long("concept")
                        .help("Concept slug, e.g. concept-b"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .default_value("42")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for sample data"),
                )
                .arg(
                    Arg::new("rows")
                        .long("rows")
                        .value_parser(value_parser!(usize))
                        .help("Number of sample rows to generate"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML file with export settings"),
                )
                .arg(
                    Arg::new("no-clobber")
                        .long("no-clobber")
                        .action(ArgAction::SetTrue)
                        .help("Fail instead of replacing an existing file"),
                ),
        )
        .subcommand(
            Command::new("schema")
                .about("Print a report's header line")
                .arg(report_arg()),
        )
        .subcommand(Command::new("reports").about("List available reports"))
}

/// Run the parsed command, writing results to `out`
///
/// `today` dates exports whose filters pin no date.
///
/// # Errors
/// Any failure loading configuration, fetching or saving
pub fn run(matches: &ArgMatches, today: NaiveDate, out: &mut dyn Write) -> Result<()> {
    match matches.subcommand() {
        Some(("export", args)) => run_export(args, today, out),
        Some(("schema", args)) => {
            let kind = selected_report(args)?;
            writeln!(out, "{}", kind.fields().join(","))?;
            Ok(())
        }
        Some(("reports", _)) => {
            for kind in ReportKind::ALL {
                let scope = match kind.date_scope() {
                    DateScope::Single => "date",
                    DateScope::Range => "from/to",
                    DateScope::None => "-",
                };
                writeln!(out, "{:<24}{:<32}{}", kind.slug(), kind.title(), scope)?;
            }
            Ok(())
        }
        Some((other, _)) => anyhow::bail!("unknown command: {other}"),
        None => anyhow::bail!("no command given"),
    }
}

fn selected_report(args: &ArgMatches) -> Result<ReportKind> {
    args.get_one::<ReportKind>("report")
        .copied()
        .context("--report is required")
}

fn run_export(args: &ArgMatches, today: NaiveDate, out: &mut dyn Write) -> Result<()> {
    let kind = selected_report(args)?;
    let format = args
        .get_one::<ExportFormat>("format")
        .copied()
        .unwrap_or(ExportFormat::Csv);
    let dir = args
        .get_one::<PathBuf>("out")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));

    let config = match args.get_one::<PathBuf>("config") {
        Some(path) => load_config(path)?,
        None => ExportConfig::default(),
    };
    let filters = filters_from(args)?;

    let seed = args.get_one::<u64>("seed").copied().unwrap_or(DEFAULT_SEED);
    let mut source = FixtureSource::new(seed, today);
    if let Some(rows) = args.get_one::<usize>("rows") {
        source = source.with_rows(*rows);
    }

    let mut target = DirectoryTarget::new(dir);
    if args.get_flag("no-clobber") {
        target = target.no_clobber();
    }
    let exporter = TabularExporter::with_config(config, target);

    let receipt = export_report(&exporter, &source, kind, &filters, format, today)
        .with_context(|| format!("failed to export {kind} report"))?;
    debug!("Saved {} bytes, digest {}", receipt.bytes, receipt.digest.short());
    writeln!(out, "{}", receipt.location)?;
    Ok(())
}

fn filters_from(args: &ArgMatches) -> Result<ReportFilters> {
    let mut filters = ReportFilters::new();
    if let Some(date) = args.get_one::<NaiveDate>("date") {
        filters = filters.with_date(*date);
    }
    if let (Some(from), Some(to)) = (
        args.get_one::<NaiveDate>("from"),
        args.get_one::<NaiveDate>("to"),
    ) {
        filters = filters.with_range(DateRange::new(*from, *to)?);
    }
    if let Some(store) = args.get_one::<String>("store") {
        filters = filters.with_store(store.as_str());
    }
    if let Some(concept) = args.get_one::<String>("concept") {
        filters = filters.with_concept(concept.as_str());
    }
    Ok(filters)
}

/// Read an [`ExportConfig`] from a TOML file
///
/// # Errors
/// Unreadable file or invalid TOML
pub fn load_config(path: &Path) -> Result<ExportConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    ExportConfig::from_toml_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))
}
