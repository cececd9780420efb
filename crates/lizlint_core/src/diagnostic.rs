//! Finding types produced by the diagnostic builder.

use serde::{Deserialize, Serialize};

use crate::document::Range;
use crate::record::FunctionRecord;

/// Source tag attached to every finding.
pub const SOURCE: &str = "Lizard";

/// Severity level for findings. Limit violations are always warnings.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Warning,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
        }
    }
}

/// A metric that can exceed a configured limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    /// Cyclomatic complexity.
    #[serde(rename = "CCN")]
    Ccn,
    /// Function length in lines.
    #[serde(rename = "Function Length")]
    Length,
    /// Parameter count.
    #[serde(rename = "Parameter Count")]
    Parameters,
}

impl Metric {
    /// All metrics, in the order findings are emitted.
    pub const ALL: [Metric; 3] = [Metric::Ccn, Metric::Length, Metric::Parameters];

    /// Category code reported with the finding.
    pub const fn code(self) -> &'static str {
        match self {
            Metric::Ccn => "CCN",
            Metric::Length => "Function Length",
            Metric::Parameters => "Parameter Count",
        }
    }

    /// Noun used in finding messages.
    pub const fn noun(self) -> &'static str {
        match self {
            Metric::Ccn => "CCN",
            Metric::Length => "length",
            Metric::Parameters => "parameters",
        }
    }

    /// Reads this metric from a parsed record.
    pub const fn value_of(self, record: &FunctionRecord) -> u32 {
        match self {
            Metric::Ccn => record.ccn,
            Metric::Length => record.length,
            Metric::Parameters => record.parameters,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A threshold violation anchored to a source range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Finding {
    /// The metric that exceeded its limit.
    pub category: Metric,

    /// The finding message.
    pub message: String,

    /// Severity level.
    #[serde(default)]
    pub severity: Severity,

    /// Range in the scanned document.
    pub range: Range,

    /// Tool that produced the finding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Finding {
    /// Creates a new warning finding without a source tag.
    pub fn new(category: Metric, message: impl Into<String>, range: Range) -> Self {
        Self {
            category,
            message: message.into(),
            severity: Severity::Warning,
            range,
            source: None,
        }
    }

    /// Sets the source tag.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Position;

    #[test]
    fn test_finding_new_is_warning_without_source() {
        let finding = Finding::new(Metric::Ccn, "too complex", Range::point(0, 0));
        assert_eq!(finding.severity, Severity::Warning);
        assert_eq!(finding.source, None);
    }

    #[test]
    fn test_metric_codes() {
        assert_eq!(Metric::Ccn.code(), "CCN");
        assert_eq!(Metric::Length.code(), "Function Length");
        assert_eq!(Metric::Parameters.code(), "Parameter Count");
        assert_eq!(Metric::Parameters.to_string(), "Parameter Count");
    }

    #[test]
    fn test_finding_serialization() {
        let finding = Finding::new(
            Metric::Length,
            "run has 80 length; the maximum is 50.",
            Range::new(Position::new(3, 5), Position::new(3, 8)),
        )
        .with_source(SOURCE);
        let json = serde_json::to_value(&finding).unwrap();

        assert_eq!(json["category"], "Function Length");
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["source"], "Lizard");
        assert_eq!(json["range"]["start"]["line"], 3);
        assert_eq!(json["range"]["end"]["character"], 8);
    }
}
