//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::harness::HarnessReport;
use serde::Serialize;

/// JSON formatter - outputs the full report as pretty-printed JSON
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a HarnessReport,
    percentage: f64,
}

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full report as JSON"
    }

    fn format(&self, report: &HarnessReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(&JsonReport {
            report,
            percentage: report.percentage(),
        })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::sample_report;

    #[test]
    fn test_json_format() {
        let output = JsonFormatter.format(&sample_report()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["test"], "runs");
        assert_eq!(parsed["source"], "device");
        assert_eq!(parsed["repetitions"], 500);
        assert_eq!(parsed["exceeded"], 27);
        assert_eq!(parsed["percentage"], 5.4);
    }

    #[test]
    fn test_json_report_round_trips() {
        let output = JsonFormatter.format(&sample_report()).unwrap();
        let report: HarnessReport = serde_json::from_str(&output).unwrap();
        assert_eq!(report, sample_report());
    }
}
