//! # lizlint_core
//!
//! Core engine for lizlint, an editor integration for the Lizard
//! code-complexity scanner.
//!
//! This crate provides:
//! - The report line parser (`parse_line`)
//! - The diagnostic builder and range resolution
//! - Scan limits and configuration loading
//! - Scanner argument construction and the process runner
//!
//! ## Example
//!
//! ```rust,ignore
//! use lizlint_core::{ScanLimits, TextDocument, analyze_output};
//!
//! let limits = ScanLimits::builder().ccn(10).build()?;
//! let document = TextDocument::new(std::fs::read_to_string("a.cpp")?);
//! let report = analyze_output(&lizard_stdout, &limits, &document);
//! for finding in &report.findings {
//!     println!("{}: {}", finding.range.start.line + 1, finding.message);
//! }
//! ```

mod builder;
pub mod command;
mod config;
mod diagnostic;
pub mod document;
mod error;
pub mod language;
mod limits;
mod record;
mod report;
mod resolve;
pub mod scanner;

pub use builder::build_findings;
pub use command::scanner_arguments;
pub use config::LizlintConfig;
pub use diagnostic::{Finding, Metric, SOURCE, Severity};
pub use document::{DocumentView, Position, Range, TextDocument};
pub use error::LizlintError;
pub use language::Language;
pub use limits::{ScanLimits, ScanLimitsBuilder};
pub use record::{FunctionRecord, GLOBAL_SCOPE, ReportLine, parse_line};
pub use report::{ScanReport, analyze_output};
pub use resolve::resolve_range;
pub use scanner::{ScanOutput, Scanner};
