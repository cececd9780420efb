//! Threshold evaluation for parsed records.

use crate::diagnostic::{Finding, Metric};
use crate::document::{DocumentView, Position, Range};
use crate::limits::ScanLimits;
use crate::record::FunctionRecord;
use crate::resolve::resolve_range;

/// Builds one finding for every metric of `record` that exceeds its limit.
///
/// Metrics are checked independently, so a single function can produce up
/// to three findings. A value equal to the limit is not a violation.
pub fn build_findings<D: DocumentView + ?Sized>(
    record: &FunctionRecord,
    limits: &ScanLimits,
    document: &D,
) -> Vec<Finding> {
    let violations: Vec<(Metric, u32, u32)> = Metric::ALL
        .into_iter()
        .filter_map(|metric| {
            let limit = limits.limit(metric)?;
            let value = metric.value_of(record);
            (value > limit).then_some((metric, value, limit))
        })
        .collect();

    if violations.is_empty() {
        return Vec::new();
    }

    let range = if record.is_global() {
        whole_document(document)
    } else {
        resolve_range(record.line, &record.display_name, document)
    };

    violations
        .into_iter()
        .map(|(metric, value, limit)| {
            Finding::new(metric, message(record, metric, value, limit), range)
        })
        .collect()
}

fn message(record: &FunctionRecord, metric: Metric, value: u32, limit: u32) -> String {
    let subject = if record.is_global() {
        "The global scope"
    } else {
        record.display_name.as_str()
    };
    format!(
        "{} has {} {}; the maximum is {}.",
        subject,
        value,
        metric.noun(),
        limit
    )
}

fn whole_document<D: DocumentView + ?Sized>(document: &D) -> Range {
    Range::new(
        Position::new(0, 0),
        Position::new(document.line_count().saturating_sub(1), 0),
    )
}
