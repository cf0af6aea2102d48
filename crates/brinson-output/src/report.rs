//! Monthly Markdown report assembly.

use crate::summary::{PeriodSummary, UnitSummary};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Number of units shown in the highlight sections.
const HIGHLIGHT_COUNT: usize = 3;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A required builder field was not set.
    #[error("Missing report field: {0}")]
    MissingField(&'static str),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A rendered-ready monthly attribution report.
#[derive(Debug, Clone)]
pub struct MonthlyReport {
    summary: PeriodSummary,
    commentary: String,
    window_days: i64,
}

impl MonthlyReport {
    /// The attribution summary backing the report.
    pub fn summary(&self) -> &PeriodSummary {
        &self.summary
    }

    /// Render the report as Markdown.
    pub fn render(&self) -> String {
        let top: Vec<&UnitSummary> = self.summary.top_contributors(HIGHLIGHT_COUNT).iter().collect();
        let top = render_ranked(&top, "No positive contributors in this period.");
        let bottom = render_ranked(
            &self.summary.bottom_detractors(HIGHLIGHT_COUNT),
            "No negative detractors in this period.",
        );

        format!(
            "# Monthly Performance Attribution Summary\n\
             \n\
             **Period:** {start} to {end}\n\
             \n\
             ## Overview\n\
             \n\
             This report summarizes sector-level performance attribution for the most recent \
             {days}-day period in the dataset. Excess return is measured as portfolio return \
             minus benchmark return, decomposed into allocation, selection, and interaction \
             effects.\n\
             \n\
             ## Top Contributing Sectors (by Excess Return)\n\
             \n\
             {top}\n\
             \n\
             ## Largest Detracting Sectors (by Excess Return)\n\
             \n\
             {bottom}\n\
             \n\
             ## AI-Generated Attribution Commentary\n\
             \n\
             {commentary}\n",
            start = self.summary.window_start,
            end = self.summary.window_end,
            days = self.window_days,
            top = top,
            bottom = bottom,
            commentary = self.commentary,
        )
    }

    /// Write the rendered report to a file.
    pub fn write_to(&self, path: &Path) -> Result<(), ReportError> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

fn render_ranked(units: &[&UnitSummary], fallback: &str) -> String {
    if units.is_empty() {
        return fallback.to_string();
    }

    units
        .iter()
        .map(|u| format!("- {}: {:.4}", u.unit, u.excess_return))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builder for the monthly report.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    summary: Option<PeriodSummary>,
    commentary: Option<String>,
    window_days: Option<i64>,
}

impl ReportBuilder {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attribution summary.
    pub fn summary(mut self, summary: PeriodSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Set the commentary text (persisted verbatim).
    pub fn commentary(mut self, commentary: impl Into<String>) -> Self {
        self.commentary = Some(commentary.into());
        self
    }

    /// Set the reporting window length in days (defaults to 30).
    pub const fn window_days(mut self, days: i64) -> Self {
        self.window_days = Some(days);
        self
    }

    /// Build the report.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::MissingField` when summary or commentary is
    /// unset; a report is never assembled from partial inputs.
    pub fn build(self) -> Result<MonthlyReport, ReportError> {
        Ok(MonthlyReport {
            summary: self.summary.ok_or(ReportError::MissingField("summary"))?,
            commentary: self
                .commentary
                .ok_or(ReportError::MissingField("commentary"))?,
            window_days: self.window_days.unwrap_or(30),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn summary(units: Vec<UnitSummary>) -> PeriodSummary {
        PeriodSummary {
            window_start: NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(),
            window_end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            units,
        }
    }

    fn unit(name: &str, excess: f64) -> UnitSummary {
        UnitSummary {
            unit: name.to_string(),
            allocation_effect: excess / 2.0,
            selection_effect: excess / 4.0,
            interaction_effect: excess / 4.0,
            excess_return: excess,
        }
    }

    #[test]
    fn test_render_sections() {
        let report = ReportBuilder::new()
            .summary(summary(vec![
                unit("Energy", 0.0123),
                unit("Financials", -0.0045),
            ]))
            .commentary("Generated commentary body.")
            .build()
            .unwrap();

        let md = report.render();
        assert!(md.starts_with("# Monthly Performance Attribution Summary"));
        assert!(md.contains("**Period:** 2023-12-01 to 2023-12-31"));
        assert!(md.contains("## Overview"));
        assert!(md.contains("30-day period"));
        assert!(md.contains("## Top Contributing Sectors (by Excess Return)"));
        assert!(md.contains("- Energy: 0.0123"));
        assert!(md.contains("## Largest Detracting Sectors (by Excess Return)"));
        assert!(md.contains("- Financials: -0.0045"));
        assert!(md.contains("## AI-Generated Attribution Commentary"));
        assert!(md.contains("Generated commentary body."));
    }

    #[test]
    fn test_render_fallback_lines() {
        let report = ReportBuilder::new()
            .summary(summary(Vec::new()))
            .commentary("c")
            .build()
            .unwrap();

        let md = report.render();
        assert!(md.contains("No positive contributors in this period."));
        assert!(md.contains("No negative detractors in this period."));
    }

    #[test]
    fn test_custom_window_days() {
        let report = ReportBuilder::new()
            .summary(summary(vec![unit("Energy", 0.01)]))
            .commentary("c")
            .window_days(90)
            .build()
            .unwrap();

        assert!(report.render().contains("90-day period"));
    }

    #[test]
    fn test_build_requires_summary_and_commentary() {
        assert!(matches!(
            ReportBuilder::new().commentary("c").build(),
            Err(ReportError::MissingField("summary"))
        ));
        assert!(matches!(
            ReportBuilder::new().summary(summary(Vec::new())).build(),
            Err(ReportError::MissingField("commentary"))
        ));
    }
}
