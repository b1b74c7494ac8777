//! Output formatters
//!
//! Provides trait-based output formatting for harness reports.

pub mod json;
pub mod text;

use crate::error::Result;
use crate::harness::HarnessReport;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a finished harness run
    fn format(&self, report: &HarnessReport) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "text" => Some(Box::new(text::TextFormatter)),
        "json" => Some(Box::new(json::JsonFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    vec![
        FormatInfo {
            name: "text".to_string(),
            description: "Exceedance percentage on one line".to_string(),
        },
        FormatInfo {
            name: "json".to_string(),
            description: "Full report as JSON".to_string(),
        },
    ]
}

#[cfg(test)]
pub(crate) fn sample_report() -> HarnessReport {
    HarnessReport {
        test: "runs".to_string(),
        source: "device".to_string(),
        sample_size: 1000,
        threshold: 1.96,
        repetitions: 500,
        evaluated: 500,
        skipped: 0,
        exceeded: 27,
    }
}
