//! Plain text output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::harness::HarnessReport;

/// Text formatter - the exceedance rate as `<percentage>%`
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Exceedance percentage on one line"
    }

    fn format(&self, report: &HarnessReport) -> Result<String> {
        Ok(report.to_string())
    }
}
