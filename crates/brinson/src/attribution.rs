//! Closed-form Brinson effect arithmetic.
//!
//! This module provides the per-row decomposition of a unit's excess return
//! into allocation, selection, and interaction effects. The arithmetic is
//! pure and elementwise: every observation is decomposed independently with
//! no cross-row state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw return and weight inputs for a single unit on a single date.
///
/// Returns are daily fractional returns; weights are fractions of the
/// portfolio/benchmark, each weight set summing to 1.0 across units for a
/// given date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnObservation {
    /// Portfolio return of the unit on this date.
    pub portfolio_return: f64,

    /// Benchmark return of the unit on this date.
    pub benchmark_return: f64,

    /// Weight of the unit in the portfolio.
    pub portfolio_weight: f64,

    /// Weight of the unit in the benchmark.
    pub benchmark_weight: f64,
}

impl ReturnObservation {
    /// Create a new observation from the four raw fields.
    pub const fn new(
        portfolio_return: f64,
        benchmark_return: f64,
        portfolio_weight: f64,
        benchmark_weight: f64,
    ) -> Self {
        Self {
            portfolio_return,
            benchmark_return,
            portfolio_weight,
            benchmark_weight,
        }
    }

    /// Decompose this observation into Brinson effects.
    pub fn effects(&self) -> BrinsonEffects {
        BrinsonEffects::from_observation(self)
    }
}

/// Three-term Brinson decomposition of a single observation.
///
/// The three effects do not form a residual-free identity against
/// `excess_return`: their sum reduces algebraically to
/// `portfolio_weight * portfolio_return - benchmark_weight * benchmark_return`,
/// and callers must not assume any other reconciliation.
///
/// Total and defined for all finite inputs; `NaN` inputs propagate to `NaN`
/// effects and never panic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrinsonEffects {
    /// Portfolio return minus benchmark return.
    pub excess_return: f64,

    /// Portfolio weight minus benchmark weight.
    pub active_weight: f64,

    /// Contribution from over/under-weighting the unit: `active_weight * benchmark_return`.
    pub allocation_effect: f64,

    /// Contribution from the unit's return differing from benchmark: `benchmark_weight * excess_return`.
    pub selection_effect: f64,

    /// Cross-term between allocation and selection: `active_weight * excess_return`.
    pub interaction_effect: f64,
}

impl BrinsonEffects {
    /// Compute the decomposition for one observation.
    ///
    /// # Examples
    ///
    /// ```
    /// use brinson::{BrinsonEffects, ReturnObservation};
    ///
    /// let obs = ReturnObservation::new(0.02, 0.01, 0.40, 0.33);
    /// let effects = BrinsonEffects::from_observation(&obs);
    ///
    /// assert!((effects.excess_return - 0.01).abs() < 1e-12);
    /// assert!((effects.active_weight - 0.07).abs() < 1e-12);
    /// ```
    pub fn from_observation(obs: &ReturnObservation) -> Self {
        let excess_return = obs.portfolio_return - obs.benchmark_return;
        let active_weight = obs.portfolio_weight - obs.benchmark_weight;

        Self {
            excess_return,
            active_weight,
            allocation_effect: active_weight * obs.benchmark_return,
            selection_effect: obs.benchmark_weight * excess_return,
            interaction_effect: active_weight * excess_return,
        }
    }

    /// Sum of the three effect terms.
    pub fn total(&self) -> f64 {
        self.allocation_effect + self.selection_effect + self.interaction_effect
    }
}

impl fmt::Display for BrinsonEffects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "allocation: {:.4}, selection: {:.4}, interaction: {:.4} (excess: {:.4})",
            self.allocation_effect, self.selection_effect, self.interaction_effect, self.excess_return
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_effect_formulas() {
        let obs = ReturnObservation::new(0.02, 0.01, 0.40, 0.33);
        let fx = obs.effects();

        assert_relative_eq!(fx.excess_return, 0.01, epsilon = 1e-12);
        assert_relative_eq!(fx.active_weight, 0.07, epsilon = 1e-12);
        assert_relative_eq!(fx.allocation_effect, 0.07 * 0.01, epsilon = 1e-12);
        assert_relative_eq!(fx.selection_effect, 0.33 * 0.01, epsilon = 1e-12);
        assert_relative_eq!(fx.interaction_effect, 0.07 * 0.01, epsilon = 1e-12);
    }

    #[rstest]
    #[case(0.02, 0.01, 0.40, 0.33)]
    #[case(-0.015, 0.007, 0.10, 0.10)]
    #[case(0.0, 0.0, 0.25, 0.25)]
    #[case(0.031, -0.022, 0.05, 0.12)]
    #[case(-0.9, 0.9, 1.0, 0.0)]
    fn test_three_term_identity(
        #[case] pr: f64,
        #[case] br: f64,
        #[case] pw: f64,
        #[case] bw: f64,
    ) {
        let fx = ReturnObservation::new(pr, br, pw, bw).effects();
        // allocation + selection + interaction reduces to pw*pr - bw*br.
        assert_relative_eq!(fx.total(), pw * pr - bw * br, epsilon = 1e-9);
    }

    #[test]
    fn test_nan_propagates() {
        let fx = ReturnObservation::new(f64::NAN, 0.01, 0.4, 0.33).effects();
        assert!(fx.excess_return.is_nan());
        assert!(fx.selection_effect.is_nan());
        assert!(fx.interaction_effect.is_nan());
        // active_weight does not involve the NaN return.
        assert_relative_eq!(fx.active_weight, 0.07, epsilon = 1e-12);
    }

    #[test]
    fn test_display() {
        let fx = ReturnObservation::new(0.02, 0.01, 0.40, 0.33).effects();
        let text = format!("{}", fx);
        assert!(text.contains("allocation"));
        assert!(text.contains("selection"));
    }
}
