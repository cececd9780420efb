//! `lizlint scan`: runs Lizard over files and reports findings.

use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use tracing::{debug, error, info, warn};

use lizlint_core::{
    Language, LizlintConfig, ScanLimits, ScanReport, Scanner, TextDocument, analyze_output,
    scanner_arguments,
};

use crate::cli::{Cli, LimitArgs, ScanArgs};
use crate::output::output_results;

/// Findings for one scanned file.
pub struct FileReport {
    pub path: PathBuf,
    pub report: ScanReport,
}

pub fn run_scan(cli: &Cli, args: &ScanArgs) -> Result<bool> {
    let mut config = match &cli.config {
        Some(path) => LizlintConfig::from_file(path).into_diagnostic()?,
        None => find_config()?,
    };
    config.limits = merge_limits(&config, &args.limits)?;
    if let Some(executable) = &args.executable {
        config.executable = executable.clone();
    }

    if config.limits.is_disabled() {
        warn!("No limits are enabled; nothing will be reported");
    }

    let reports = match &args.report {
        Some(report) => vec![read_saved_report(report, &args.files, &config.limits)?],
        None => args
            .files
            .iter()
            .filter(|path| is_scannable(path))
            .map(|path| scan_file(path, &config))
            .collect::<Result<Vec<_>>>()?,
    };

    for file in &reports {
        for warning in &file.report.warnings {
            warn!("{}: {}", file.path.display(), warning);
        }
    }

    output_results(&reports, args.format)
}

pub fn find_config() -> Result<LizlintConfig> {
    if let Some(path) = LizlintConfig::discover(".") {
        info!("Using config: {}", path.display());
        return LizlintConfig::from_file(&path).into_diagnostic();
    }

    info!("No config file found, using defaults");
    Ok(LizlintConfig::new())
}

/// Applies command-line limits over the configured ones.
///
/// A whitelist from the config file is resolved against the config
/// directory; one from the command line is used as given.
fn merge_limits(config: &LizlintConfig, args: &LimitArgs) -> Result<ScanLimits> {
    let base = &config.limits;
    let mut builder = ScanLimits::builder()
        .ccn(args.ccn.or(base.ccn()).unwrap_or(0))
        .length(args.length.or(base.length()).unwrap_or(0))
        .arguments(args.arguments.or(base.arguments()).unwrap_or(0))
        .modified(args.modified().unwrap_or(base.modified()));

    let whitelist = match &args.whitelist {
        Some(path) => Some(path.clone()),
        None => config
            .whitelist_path()
            .map(|path| path.display().to_string()),
    };
    if let Some(whitelist) = whitelist {
        builder = builder.whitelist(whitelist);
    }

    let extensions: &[String] = if args.extensions.is_empty() {
        base.extensions()
    } else {
        &args.extensions
    };
    for extension in extensions {
        builder = builder.extension(extension.clone());
    }

    builder.build().into_diagnostic()
}

/// Only C++ sources are handed to the scanner.
fn is_scannable(path: &Path) -> bool {
    if Language::from_path(path).is_some() {
        return true;
    }
    warn!("Skipping {}: not a C++ source", path.display());
    false
}

fn read_source(path: &Path) -> Result<TextDocument> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e))?;
    Ok(TextDocument::new(text))
}

fn scan_file(path: &Path, config: &LizlintConfig) -> Result<FileReport> {
    debug!("Scanning {}", path.display());
    let document = read_source(path)?;

    let args = scanner_arguments(&config.limits, Some(path));
    let output = Scanner::new(config.executable.as_str())
        .run(&args)
        .into_diagnostic()?;

    if let Some(message) = output.exception_message() {
        error!("Lizard failed; here's the exception message:\n{}", message);
    }

    Ok(FileReport {
        path: path.to_path_buf(),
        report: analyze_output(&output.stdout, &config.limits, &document),
    })
}

fn read_saved_report(report: &Path, files: &[PathBuf], limits: &ScanLimits) -> Result<FileReport> {
    let [path] = files else {
        return Err(miette::miette!(
            "--report applies to exactly one file, got {}",
            files.len()
        ));
    };

    let document = read_source(path)?;
    let output = std::fs::read_to_string(report)
        .map_err(|e| miette::miette!("Failed to read {}: {}", report.display(), e))?;

    Ok(FileReport {
        path: path.clone(),
        report: analyze_output(&output, limits, &document),
    })
}
