//! CLI entrypoint for `lockwise-audit`.
//!
//! Finds the newest password export, audits it, prints the findings, and
//! writes a report file when there is anything to report. With no flags the
//! working directory plus the user's download and desktop directories are
//! searched and the report lands in the working directory.
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use log::{LevelFilter, error};
use lockwise::{
    engine::{AuditOptions, Engine},
    export::{persist_report, save_findings_csv},
    finding::Finding,
    io::{DEFAULT_FRAGMENT, LoadError, default_search_dirs, locate_export},
    report::{REPORT_FILE_NAME, render_report, render_terminal},
};

#[derive(Parser, Debug)]
#[command(
    name = "lockwise-audit",
    version,
    about = "Audit a password-manager CSV export for hygiene issues"
)]
struct Args {
    /// Fragment the export file name must contain
    #[arg(long = "fragment", default_value = DEFAULT_FRAGMENT)]
    fragment: String,

    /// Directory to search for the export (repeatable; replaces the defaults)
    #[arg(long = "search-dir")]
    search_dirs: Vec<PathBuf>,

    /// Directory the report is written to (default: working directory)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Leave URLs that could not be parsed out of duplicate grouping
    #[arg(long = "skip-unparsed-domains")]
    skip_unparsed_domains: bool,

    /// Also write findings to a timestamped CSV next to the report
    #[arg(long = "csv")]
    csv: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Control color output (auto, always, never)
    #[arg(long = "color", value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Suppress progress and findings on stdout (report is still written)
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .try_init();
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);
    match args.color {
        ColorChoice::Always => {
            colored::control::set_override(true);
        }
        ColorChoice::Never => {
            colored::control::set_override(false);
        }
        ColorChoice::Auto => {}
    }

    let search_dirs = if args.search_dirs.is_empty() {
        default_search_dirs()
    } else {
        args.search_dirs.clone()
    };
    let export_path = match locate_export(&args.fragment, &search_dirs) {
        Ok(p) => p,
        Err(e) => {
            error!("exiting: {}", e);
            std::process::exit(2);
        }
    };
    log::info!("using export {}", export_path.display());

    let mut engine = Engine::with_options(AuditOptions {
        group_unparsed_domains: !args.skip_unparsed_domains,
    });
    if let Err(e) = engine.load_from_file_path(&export_path) {
        match e {
            LoadError::Open { .. } => error!("failed to read export: {}", e),
            _ => error!("failed to parse {}: {}", export_path.display(), e),
        }
        std::process::exit(3);
    }

    if !args.quiet {
        if let Some(stats) = engine.load_stats {
            println!(
                "Loaded {} login(s) from {} ({} sync row(s) skipped)",
                engine.logins.len(),
                export_path.display(),
                stats.sentinel_skipped
            );
        }
        println!("Beginning password validation...");
    }
    let findings = engine.audit();
    log::info!(
        "{} finding(s) covering {} row(s)",
        findings.len(),
        findings.iter().map(Finding::len).sum::<usize>()
    );
    if !args.quiet {
        let out = render_terminal(&findings);
        if !out.is_empty() {
            println!("{}", out);
        }
        println!("{}", "Password validation complete!".bold().green());
    }

    let Some(report) = render_report(&findings) else {
        return;
    };
    let outdir = match args.output {
        Some(dir) => dir,
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let report_path = outdir.join(REPORT_FILE_NAME);
    if !args.quiet {
        println!("Writing report to {}...", report_path.display());
    }
    if let Err(e) = persist_report(&report, &report_path) {
        error!("failed to write {}: {:#}", report_path.display(), e);
        std::process::exit(4);
    }

    if args.csv {
        let ts = chrono::Local::now().format("%Y.%m.%d_%H.%M.%S");
        let csv = outdir.join(format!("lockwise_findings_{}.csv", ts));
        if let Err(e) = save_findings_csv(&findings, &csv) {
            error!("failed to write {}: {:#}", csv.display(), e);
            std::process::exit(5);
        }
    }
    if !args.quiet {
        println!("Done.");
    }
}
