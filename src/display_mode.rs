//! Report rendering for the terminal
//!
//! JSON mode writes the wire format; pretty mode writes a coloured summary
//! for people reading the output directly.

use crate::batch::BatchOutcome;
use crate::cli::OutputFormat;
use crate::errors::Result;
use crate::fusion::RiskLevel;
use crate::ranges::{ReferenceRangeTable, Tier};
use crate::report::RiskReport;
use colored::{ColoredString, Colorize};

/// Renders reports in the selected format
#[derive(Debug, Clone, Copy)]
pub struct DisplayMode {
    format: OutputFormat,
}

impl DisplayMode {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render one report
    pub fn render_report(&self, report: &RiskReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string(report)?),
            OutputFormat::Pretty => Ok(pretty_report(report)),
        }
    }

    /// Render batch outcomes
    pub fn render_batch(&self, outcomes: &[BatchOutcome]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string(outcomes)?),
            OutputFormat::Pretty => {
                let blocks: Vec<String> = outcomes
                    .iter()
                    .enumerate()
                    .map(|(i, outcome)| match outcome {
                        BatchOutcome::Ok(report) => format!("#{}\n{}", i + 1, pretty_report(report)),
                        BatchOutcome::Error(failure) => format!(
                            "#{}\n{} {}: {}",
                            i + 1,
                            "Error".red().bold(),
                            failure.kind,
                            failure.message
                        ),
                    })
                    .collect();
                Ok(blocks.join("\n\n"))
            }
        }
    }

    /// Render the reference range table
    pub fn render_ranges(&self, table: &ReferenceRangeTable) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(table.ranges())?),
            OutputFormat::Pretty => {
                let mut lines = Vec::new();
                for range in table.ranges() {
                    lines.push(format!(
                        "{} ({})",
                        range.biomarker.display_name().bold(),
                        range.biomarker.unit()
                    ));
                    for boundary in range.ordered() {
                        lines.push(format!(
                            "  {:<10} {:<12} +{:<3} {}",
                            boundary.bound.to_string(),
                            tier_label(boundary.tier),
                            boundary.weight,
                            boundary.message
                        ));
                    }
                }
                Ok(lines.join("\n"))
            }
        }
    }
}

fn level_label(level: RiskLevel) -> ColoredString {
    let label = level.label();
    match level {
        RiskLevel::Minimal | RiskLevel::Low => label.green().bold(),
        RiskLevel::Moderate => label.yellow().bold(),
        RiskLevel::High | RiskLevel::VeryHigh => label.red().bold(),
    }
}

fn tier_label(tier: Tier) -> ColoredString {
    match tier {
        Tier::Healthy => tier.as_str().green(),
        Tier::Borderline => tier.as_str().yellow(),
        Tier::HighRisk => tier.as_str().red(),
    }
}

fn pretty_report(report: &RiskReport) -> String {
    let mut lines = vec![format!(
        "Risk: {} ({}/100, rules {}, model {:.0}%)",
        level_label(report.risk_level),
        report.risk_value,
        report.rule_score,
        report.model_probability * 100.0
    )];

    for finding in &report.findings {
        let marker = match finding.tier {
            Tier::Healthy => "✓".green(),
            Tier::Borderline => "!".yellow(),
            Tier::HighRisk => "✗".red(),
        };
        lines.push(format!("  {} {}", marker, finding.message));
    }

    if !report.potential_diseases.is_empty() {
        let tags: Vec<&str> = report.potential_diseases.iter().map(|t| t.label()).collect();
        lines.push(format!("Potential conditions: {}", tags.join(", ")));
    }
    lines.push(report.recommendation.clone());
    lines.join("\n")
}
