//! Scan limits.

use serde::{Deserialize, Serialize};

use crate::LizlintError;
use crate::diagnostic::Metric;

/// Thresholds and filters for one scan.
///
/// A threshold of zero, or an absent one, disables the check for that
/// metric. Values are validated once at construction and never change
/// afterwards; a configuration change produces a new `ScanLimits`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScanLimits", into = "RawScanLimits")]
pub struct ScanLimits {
    ccn: Option<u32>,
    length: Option<u32>,
    arguments: Option<u32>,
    modified: bool,
    whitelist: Option<String>,
    extensions: Vec<String>,
}

/// Serialized form, matching the `lizard` settings section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScanLimits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ccn: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    arguments: Option<u32>,
    #[serde(default)]
    modified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    whitelist: Option<String>,
    #[serde(default)]
    extensions: Vec<String>,
}

impl TryFrom<RawScanLimits> for ScanLimits {
    type Error = LizlintError;

    fn try_from(raw: RawScanLimits) -> Result<Self, Self::Error> {
        let mut builder = ScanLimits::builder().modified(raw.modified);
        if let Some(ccn) = raw.ccn {
            builder = builder.ccn(ccn);
        }
        if let Some(length) = raw.length {
            builder = builder.length(length);
        }
        if let Some(arguments) = raw.arguments {
            builder = builder.arguments(arguments);
        }
        if let Some(whitelist) = raw.whitelist {
            builder = builder.whitelist(whitelist);
        }
        for extension in raw.extensions {
            builder = builder.extension(extension);
        }
        builder.build()
    }
}

impl From<ScanLimits> for RawScanLimits {
    fn from(limits: ScanLimits) -> Self {
        Self {
            ccn: limits.ccn,
            length: limits.length,
            arguments: limits.arguments,
            modified: limits.modified,
            whitelist: limits.whitelist,
            extensions: limits.extensions,
        }
    }
}

impl ScanLimits {
    /// Starts building a set of limits.
    pub fn builder() -> ScanLimitsBuilder {
        ScanLimitsBuilder::default()
    }

    /// Cyclomatic complexity limit, if enabled.
    pub fn ccn(&self) -> Option<u32> {
        self.ccn
    }

    /// Function length limit, if enabled.
    pub fn length(&self) -> Option<u32> {
        self.length
    }

    /// Parameter count limit, if enabled.
    pub fn arguments(&self) -> Option<u32> {
        self.arguments
    }

    /// Limit for the given metric, if enabled.
    pub fn limit(&self, metric: Metric) -> Option<u32> {
        match metric {
            Metric::Ccn => self.ccn,
            Metric::Length => self.length,
            Metric::Parameters => self.arguments,
        }
    }

    /// Whether the modified CCN variant is requested.
    pub fn modified(&self) -> bool {
        self.modified
    }

    /// Path of the whitelist file passed to the scanner.
    pub fn whitelist(&self) -> Option<&str> {
        self.whitelist.as_deref()
    }

    /// Additional extension filters, in configuration order.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Returns true if no metric would ever produce a finding.
    pub fn is_disabled(&self) -> bool {
        Metric::ALL.iter().all(|m| self.limit(*m).is_none())
    }
}

/// Builder for [`ScanLimits`].
#[derive(Debug, Clone, Default)]
pub struct ScanLimitsBuilder {
    ccn: u32,
    length: u32,
    arguments: u32,
    modified: bool,
    whitelist: Option<String>,
    extensions: Vec<String>,
}

impl ScanLimitsBuilder {
    /// Sets the cyclomatic complexity limit. Zero disables it.
    pub fn ccn(mut self, limit: u32) -> Self {
        self.ccn = limit;
        self
    }

    /// Sets the function length limit. Zero disables it.
    pub fn length(mut self, limit: u32) -> Self {
        self.length = limit;
        self
    }

    /// Sets the parameter count limit. Zero disables it.
    pub fn arguments(mut self, limit: u32) -> Self {
        self.arguments = limit;
        self
    }

    /// Counts a whole switch statement as one branch.
    pub fn modified(mut self, modified: bool) -> Self {
        self.modified = modified;
        self
    }

    /// Sets the whitelist file. An empty path clears it.
    pub fn whitelist(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.whitelist = (!path.trim().is_empty()).then_some(path);
        self
    }

    /// Appends an extension filter.
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extensions.push(extension.into());
        self
    }

    /// Validates and builds the limits.
    pub fn build(self) -> Result<ScanLimits, LizlintError> {
        if let Some(position) = self.extensions.iter().position(|e| e.trim().is_empty()) {
            return Err(LizlintError::config(format!(
                "Extension filter #{} is empty",
                position + 1
            )));
        }

        Ok(ScanLimits {
            ccn: enabled(self.ccn),
            length: enabled(self.length),
            arguments: enabled(self.arguments),
            modified: self.modified,
            whitelist: self.whitelist,
            extensions: self.extensions,
        })
    }
}

fn enabled(limit: u32) -> Option<u32> {
    (limit > 0).then_some(limit)
}
