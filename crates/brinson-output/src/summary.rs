//! Period summarization of long-form attribution tables.
//!
//! Filters observations to a reporting window, aggregates the three effects
//! and excess return by unit, and ranks units by summed excess return.

use brinson::SectorObservation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Errors that can occur during summarization.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The reporting window matched no observations. Fatal for report
    /// generation: no empty or default summary is ever produced.
    #[error("No observations between {start} and {end}")]
    EmptyWindow {
        /// Window start date (inclusive).
        start: NaiveDate,
        /// Window end date (inclusive).
        end: NaiveDate,
    },
}

/// One unit/date contribution row fed to the summarizer.
///
/// The unit is a plain string key, so any long-form effect table (sector- or
/// security-keyed) can be summarized.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRecord {
    /// Grouping key (sector name or security identifier).
    pub unit: String,

    /// Observation date.
    pub date: NaiveDate,

    /// Allocation effect for this row.
    pub allocation_effect: f64,

    /// Selection effect for this row.
    pub selection_effect: f64,

    /// Interaction effect for this row.
    pub interaction_effect: f64,

    /// Excess return for this row.
    pub excess_return: f64,
}

impl From<&SectorObservation> for SummaryRecord {
    fn from(obs: &SectorObservation) -> Self {
        Self {
            unit: obs.sector.clone(),
            date: obs.date,
            allocation_effect: obs.allocation_effect,
            selection_effect: obs.selection_effect,
            interaction_effect: obs.interaction_effect,
            excess_return: obs.excess_return,
        }
    }
}

/// Summed effects for one unit over the reporting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSummary {
    /// Grouping key.
    pub unit: String,

    /// Summed allocation effect.
    pub allocation_effect: f64,

    /// Summed selection effect.
    pub selection_effect: f64,

    /// Summed interaction effect.
    pub interaction_effect: f64,

    /// Summed excess return.
    pub excess_return: f64,
}

/// Aggregate attribution summary over a reporting window.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    /// Window start date (inclusive).
    pub window_start: NaiveDate,

    /// Window end date (inclusive).
    pub window_end: NaiveDate,

    /// Per-unit sums, descending by summed excess return (ties broken by
    /// unit name so rendering is deterministic).
    pub units: Vec<UnitSummary>,
}

impl PeriodSummary {
    /// The `n` units with the largest summed excess return, best first.
    ///
    /// Truncated without padding when fewer than `n` units exist.
    pub fn top_contributors(&self, n: usize) -> &[UnitSummary] {
        &self.units[..n.min(self.units.len())]
    }

    /// The `n` units with the smallest summed excess return, worst first.
    ///
    /// Truncated without padding when fewer than `n` units exist.
    pub fn bottom_detractors(&self, n: usize) -> Vec<&UnitSummary> {
        let n = n.min(self.units.len());
        self.units[self.units.len() - n..].iter().rev().collect()
    }

    /// Render the summary as a fixed-width text table.
    ///
    /// The rendering is deterministic for a given summary and is the payload
    /// embedded in the commentary prompt.
    pub fn to_text_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{:<26} {:>14} {:>14} {:>14} {:>14}\n",
            "Unit", "Allocation", "Selection", "Interaction", "Excess Return"
        ));
        output.push_str(&"-".repeat(86));
        output.push('\n');

        for unit in &self.units {
            output.push_str(&format!(
                "{:<26} {:>14.6} {:>14.6} {:>14.6} {:>14.6}\n",
                unit.unit,
                unit.allocation_effect,
                unit.selection_effect,
                unit.interaction_effect,
                unit.excess_return
            ));
        }

        output
    }
}

impl fmt::Display for PeriodSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Attribution summary {} to {} ({} units)",
            self.window_start,
            self.window_end,
            self.units.len()
        )
    }
}

/// Aggregate records within the inclusive `[window_start, window_end]`
/// window, summing effects by unit and ranking by summed excess return.
///
/// # Errors
///
/// Returns `SummaryError::EmptyWindow` when the window matches no records.
pub fn summarize_window(
    records: impl IntoIterator<Item = SummaryRecord>,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Result<PeriodSummary, SummaryError> {
    let mut by_unit: HashMap<String, UnitSummary> = HashMap::new();

    for record in records {
        if record.date < window_start || record.date > window_end {
            continue;
        }

        let entry = by_unit
            .entry(record.unit.clone())
            .or_insert_with(|| UnitSummary {
                unit: record.unit.clone(),
                allocation_effect: 0.0,
                selection_effect: 0.0,
                interaction_effect: 0.0,
                excess_return: 0.0,
            });
        entry.allocation_effect += record.allocation_effect;
        entry.selection_effect += record.selection_effect;
        entry.interaction_effect += record.interaction_effect;
        entry.excess_return += record.excess_return;
    }

    if by_unit.is_empty() {
        return Err(SummaryError::EmptyWindow {
            start: window_start,
            end: window_end,
        });
    }

    let mut units: Vec<UnitSummary> = by_unit.into_values().collect();
    units.sort_by(|a, b| {
        b.excess_return
            .partial_cmp(&a.excess_return)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.unit.cmp(&b.unit))
    });

    Ok(PeriodSummary {
        window_start,
        window_end,
        units,
    })
}
