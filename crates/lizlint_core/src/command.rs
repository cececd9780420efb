//! Scanner command-line construction.

use std::path::Path;

use crate::limits::ScanLimits;

/// Flag that restricts the report to functions over a limit.
pub const WARNINGS_ONLY: &str = "--warnings_only";

/// Builds the scanner arguments for `limits`, ending with `target` if given.
///
/// Disabled limits are omitted so the scanner falls back to its own
/// defaults for them.
pub fn scanner_arguments(limits: &ScanLimits, target: Option<&Path>) -> Vec<String> {
    let mut args = vec![WARNINGS_ONLY.to_string()];

    if limits.modified() {
        args.push("--modified".to_string());
    }
    if let Some(ccn) = limits.ccn() {
        args.push(format!("--CCN={}", ccn));
    }
    if let Some(length) = limits.length() {
        args.push(format!("--length={}", length));
    }
    if let Some(arguments) = limits.arguments() {
        args.push(format!("--arguments={}", arguments));
    }
    if let Some(whitelist) = limits.whitelist() {
        args.push(format!("--whitelist={}", whitelist));
    }
    for extension in limits.extensions() {
        args.push(format!("--extension={}", extension));
    }
    if let Some(target) = target {
        args.push(target.display().to_string());
    }

    args
}
