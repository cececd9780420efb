//! Parsing of Lizard report lines.
//!
//! With `--warnings_only`, Lizard prints one line per function over a limit:
//!
//! ```text
//! src/a.cpp:10:1: ns::Widget::draw has 5 NLOC, 12 CCN, 20 token, 2 PARAM, 8 length
//! ```
//!
//! Older releases print `warning:` in place of the column. Both shapes are
//! accepted.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Qualified name Lizard uses for file-level code.
pub const GLOBAL_SCOPE: &str = "*global*";

const WARNING_PREFIX: &str = "WARNING";
const IGNORABLE_SUFFIX: &str = "!!!!!";

static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<path>.+?):(?P<line>\d+):(?:\s*(?:\d+|warning):)? (?P<name>.+?) has (?P<metrics>.+)$",
    )
    .expect("valid report line pattern")
});

static NLOC: LazyLock<Regex> = LazyLock::new(|| metric_pattern("NLOC"));
static CCN: LazyLock<Regex> = LazyLock::new(|| metric_pattern("CCN"));
static TOKEN: LazyLock<Regex> = LazyLock::new(|| metric_pattern("token"));
static PARAM: LazyLock<Regex> = LazyLock::new(|| metric_pattern("PARAM"));
static LENGTH: LazyLock<Regex> = LazyLock::new(|| metric_pattern("length"));

fn metric_pattern(label: &str) -> Regex {
    Regex::new(&format!(r"\b(\d+) {label}\b")).expect("valid metric pattern")
}

/// Metrics Lizard reported for one function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionRecord {
    /// Function name with namespace and class qualifiers.
    pub qualified_name: String,
    /// Function name without qualifiers.
    pub display_name: String,
    /// Source line (0-indexed).
    pub line: u32,
    /// Non-comment lines of code.
    pub nloc: u32,
    /// Cyclomatic complexity.
    pub ccn: u32,
    /// Token count.
    pub tokens: u32,
    /// Parameter count.
    pub parameters: u32,
    /// Length in lines.
    pub length: u32,
}

impl FunctionRecord {
    /// Creates a record with all metrics set to zero.
    pub fn new(qualified_name: impl Into<String>, line: u32) -> Self {
        let qualified_name = qualified_name.into();
        Self {
            display_name: display_name(&qualified_name).to_string(),
            qualified_name,
            line,
            nloc: 0,
            ccn: 0,
            tokens: 0,
            parameters: 0,
            length: 0,
        }
    }

    /// Returns true if this record describes file-level code.
    pub fn is_global(&self) -> bool {
        self.qualified_name == GLOBAL_SCOPE
    }
}

/// Classification of one line of scanner output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    /// A function over one or more limits.
    Function(FunctionRecord),
    /// An advisory printed by the scanner, already formatted for display.
    Warning(String),
    /// A blank line or a notice that needs no attention.
    Ignored,
    /// A line that matches neither shape.
    Unparseable(String),
}

/// Parses one line of scanner output.
pub fn parse_line(line: &str) -> ReportLine {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() {
        return ReportLine::Ignored;
    }

    if line.starts_with(WARNING_PREFIX) {
        if line.ends_with(IGNORABLE_SUFFIX) {
            return ReportLine::Ignored;
        }
        return ReportLine::Warning(format_warning(line));
    }

    match parse_function(line) {
        Some(record) => ReportLine::Function(record),
        None => ReportLine::Unparseable(line.to_string()),
    }
}

fn parse_function(line: &str) -> Option<FunctionRecord> {
    let captures = LINE_PATTERN.captures(line)?;

    let line_number: u32 = captures["line"].parse().ok()?;
    // operator overloads come through tokenized, e.g. `operator [ ]`
    let qualified_name: String = captures["name"]
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if display_name(&qualified_name).is_empty() {
        return None;
    }

    let metrics = &captures["metrics"];
    Some(FunctionRecord {
        nloc: extract_metric(&NLOC, metrics),
        ccn: extract_metric(&CCN, metrics),
        tokens: extract_metric(&TOKEN, metrics),
        parameters: extract_metric(&PARAM, metrics),
        length: extract_metric(&LENGTH, metrics),
        ..FunctionRecord::new(qualified_name, line_number.saturating_sub(1))
    })
}

fn extract_metric(pattern: &Regex, metrics: &str) -> u32 {
    pattern
        .captures(metrics)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0)
}

fn format_warning(line: &str) -> String {
    let message = line
        .strip_prefix("WARNING: ")
        .unwrap_or(line)
        .trim();
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Derives the unqualified name shown in messages.
pub fn display_name(qualified_name: &str) -> &str {
    if qualified_name == GLOBAL_SCOPE {
        return qualified_name;
    }
    match qualified_name.rfind(':') {
        Some(index) => &qualified_name[index + 1..],
        None => qualified_name,
    }
}
