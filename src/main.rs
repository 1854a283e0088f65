use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser};
use tracing::{debug, error};

use txwatch::error::UNKNOWN_EXIT_CODE;
use txwatch::logging::init_logging;
use txwatch::{EventExtractor, FileSource, Overrides, Probe, ProbeError, Report, Settings};

#[derive(Parser, Debug)]
#[command(name = "check-tx-time")]
#[command(about = "Check average transaction time in seconds")]
struct Args {
    /// Warning threshold in seconds
    #[arg(long)]
    warning: Option<f64>,

    /// Critical threshold in seconds
    #[arg(long)]
    critical: Option<f64>,

    /// Trailing window to analyze, in seconds
    #[arg(long)]
    time_period: Option<u64>,

    /// Log to retrieve transactions from. The default is syslog
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Application tag that marks transaction lines
    #[arg(long)]
    application: Option<String>,

    /// Settings file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also write a JSON report of the run to this file
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Increase diagnostic output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            warning: self.warning,
            critical: self.critical,
            time_period: self.time_period,
            log_file: self.log_file.clone(),
            application: self.application.clone(),
        }
    }
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // Help and parse failures both go to stdout with the unknown code.
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => print!("{}", err),
                _ => println!("{}", err.render()),
            }
            process::exit(UNKNOWN_EXIT_CODE);
        }
    };

    init_logging(args.verbose);
    debug!(?args, "parsed arguments");

    let code = match run(&args) {
        Ok(report) => {
            if let Some(export_path) = &args.export {
                if let Err(e) = report.export(export_path) {
                    error!("{}", e);
                }
            }
            println!("{}", report.status_line());
            report.exit_code()
        }
        Err(err) => report_failure(&err),
    };

    process::exit(code);
}

/// Load settings, read the log and classify it.
fn run(args: &Args) -> Result<Report> {
    let settings = Settings::load(args.config.as_deref(), &args.overrides())
        .context("loading settings")?
        .resolve()?;
    debug!(?settings, "resolved settings");

    let extractor = EventExtractor::new(&settings.application)?;
    let probe = Probe::new(extractor, settings.thresholds, settings.window);
    let mut source = FileSource::new(&settings.log_file);

    let report = probe
        .run(&mut source, Local::now().naive_local())
        .with_context(|| format!("analyzing {}", settings.log_file.display()))?;
    Ok(report)
}

/// Print what the supervisor should see for a failed run and pick the exit code.
fn report_failure(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ProbeError>() {
        Some(probe_err) if probe_err.is_usage() => {
            error!("{:#}", err);
            println!("{}", Args::command().render_help());
            probe_err.exit_code()
        }
        Some(probe_err) => {
            error!("{:#}", err);
            println!("{}", probe_err);
            probe_err.exit_code()
        }
        None => {
            error!("{:#}", err);
            println!("UNKNOWN - {}", err);
            UNKNOWN_EXIT_CODE
        }
    }
}
