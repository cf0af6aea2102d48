//! Long-form observation rows persisted as flat files.
//!
//! Field order on these structs is the CSV column order; the tables are the
//! sole handoff between the synthesizer and the report pipeline.

use crate::attribution::ReturnObservation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One sector-level attribution row: a (sector, date) pair with raw
/// returns/weights and the derived effect columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorObservation {
    /// Observation date.
    pub date: NaiveDate,

    /// Sector name (e.g. "Information Technology").
    pub sector: String,

    /// Proxy ETF ticker for the sector (e.g. "XLK").
    pub etf: String,

    /// Benchmark daily return of the sector.
    pub benchmark_return: f64,

    /// Portfolio daily return of the sector.
    pub portfolio_return: f64,

    /// Benchmark weight of the sector.
    pub benchmark_weight: f64,

    /// Portfolio weight of the sector.
    pub portfolio_weight: f64,

    /// Portfolio return minus benchmark return.
    pub excess_return: f64,

    /// Portfolio weight minus benchmark weight.
    pub active_weight: f64,

    /// Allocation effect for this row.
    pub allocation_effect: f64,

    /// Selection effect for this row.
    pub selection_effect: f64,

    /// Interaction effect for this row.
    pub interaction_effect: f64,
}

impl SectorObservation {
    /// Build a row from raw inputs, deriving the effect columns.
    pub fn new(
        date: NaiveDate,
        sector: impl Into<String>,
        etf: impl Into<String>,
        obs: ReturnObservation,
    ) -> Self {
        let fx = obs.effects();

        Self {
            date,
            sector: sector.into(),
            etf: etf.into(),
            benchmark_return: obs.benchmark_return,
            portfolio_return: obs.portfolio_return,
            benchmark_weight: obs.benchmark_weight,
            portfolio_weight: obs.portfolio_weight,
            excess_return: fx.excess_return,
            active_weight: fx.active_weight,
            allocation_effect: fx.allocation_effect,
            selection_effect: fx.selection_effect,
            interaction_effect: fx.interaction_effect,
        }
    }
}

/// One security-level attribution row: a (security, date) pair with the
/// security's own return alongside the date's portfolio/benchmark totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityObservation {
    /// Observation date.
    pub date: NaiveDate,

    /// Security ticker.
    pub security: String,

    /// Daily return of the security.
    pub security_return: f64,

    /// Portfolio weight of the security.
    pub portfolio_weight: f64,

    /// Benchmark weight of the security within the holding set.
    pub benchmark_weight: f64,

    /// Total portfolio return on this date.
    pub portfolio_return_total: f64,

    /// Total benchmark return on this date.
    pub benchmark_return_total: f64,

    /// Total portfolio return minus total benchmark return.
    pub excess_return_total: f64,

    /// Portfolio weight minus benchmark weight.
    pub active_weight: f64,

    /// Selection contribution: `benchmark_weight * (security_return - benchmark_return_total)`.
    pub selection_contribution: f64,
}

impl SecurityObservation {
    /// Build a row from raw inputs, deriving the contribution columns.
    pub fn new(
        date: NaiveDate,
        security: impl Into<String>,
        security_return: f64,
        portfolio_weight: f64,
        benchmark_weight: f64,
        portfolio_return_total: f64,
        benchmark_return_total: f64,
    ) -> Self {
        Self {
            date,
            security: security.into(),
            security_return,
            portfolio_weight,
            benchmark_weight,
            portfolio_return_total,
            benchmark_return_total,
            excess_return_total: portfolio_return_total - benchmark_return_total,
            active_weight: portfolio_weight - benchmark_weight,
            selection_contribution: benchmark_weight * (security_return - benchmark_return_total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sector_observation_derivation() {
        let row = SectorObservation::new(
            date(2023, 6, 1),
            "Energy",
            "XLE",
            ReturnObservation::new(0.012, 0.012, 0.11, 0.10),
        );

        // Portfolio and benchmark returns match, so only allocation survives.
        assert!((row.excess_return).abs() < 1e-12);
        assert!((row.selection_effect).abs() < 1e-12);
        assert!((row.interaction_effect).abs() < 1e-12);
        assert!((row.allocation_effect - 0.01 * 0.012).abs() < 1e-12);
        assert!((row.active_weight - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_security_observation_derivation() {
        let row = SecurityObservation::new(
            date(2023, 6, 1),
            "AAPL",
            0.02,
            0.15,
            0.125,
            0.011,
            0.009,
        );

        assert!((row.excess_return_total - 0.002).abs() < 1e-12);
        assert!((row.active_weight - 0.025).abs() < 1e-12);
        assert!((row.selection_contribution - 0.125 * (0.02 - 0.009)).abs() < 1e-12);
    }
}
