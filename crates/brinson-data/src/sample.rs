//! Seeded synthesis of the long-form attribution sample tables.

use crate::error::{DataError, Result};
use crate::series::{PriceSeries, common_dates, daily_returns};
use brinson::{ReturnObservation, SectorEtfUniverse, SectorObservation, SecurityObservation};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

/// Tilt seed for the sector-level sample.
pub const SECTOR_TILT_SEED: u64 = 42;

/// Tilt seed for the security-level sample.
pub const SECURITY_TILT_SEED: u64 = 7;

/// Tilt standard deviation for the sector-level sample (+/- 2% tilts).
pub const SECTOR_TILT_SIGMA: f64 = 0.02;

/// Tilt standard deviation for the security-level sample (+/- 1% tilts).
pub const SECURITY_TILT_SIGMA: f64 = 0.01;

/// Options controlling the randomized portfolio tilts.
#[derive(Debug, Clone, Copy)]
pub struct SampleOptions {
    /// RNG seed for the tilt draws.
    pub seed: u64,

    /// Standard deviation of the Normal tilt around equal weight.
    pub tilt_sigma: f64,
}

impl SampleOptions {
    /// Options for the sector-level sample.
    pub const fn sector() -> Self {
        Self {
            seed: SECTOR_TILT_SEED,
            tilt_sigma: SECTOR_TILT_SIGMA,
        }
    }

    /// Options for the security-level sample.
    pub const fn security() -> Self {
        Self {
            seed: SECURITY_TILT_SEED,
            tilt_sigma: SECURITY_TILT_SIGMA,
        }
    }
}

/// Equal-weight base perturbed by independent seeded Normal tilts, then
/// renormalized to sum to 1.0.
///
/// Tilts are drawn in slice order, so a fixed seed reproduces the same
/// weights for the same unit set.
pub fn tilted_weights(n: usize, options: SampleOptions) -> Result<Vec<f64>> {
    if n == 0 {
        return Err(DataError::Synthesis("Empty unit set".to_string()));
    }

    let base = 1.0 / n as f64;
    let normal = Normal::new(0.0, options.tilt_sigma)
        .map_err(|e| DataError::Synthesis(format!("Bad tilt sigma: {}", e)))?;
    let mut rng = StdRng::seed_from_u64(options.seed);

    let mut weights: Vec<f64> = (0..n).map(|_| base + normal.sample(&mut rng)).collect();

    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(DataError::Synthesis(format!(
            "Degenerate tilt draw: weights sum to {}",
            total
        )));
    }

    for w in &mut weights {
        *w /= total;
    }

    Ok(weights)
}

/// Build the sector-level observation table from sector ETF price series.
///
/// One row per (sector, date) over the dates common to every series, with the
/// first aligned date excluded. Portfolio and benchmark returns are both the
/// sector ETF's daily return; the benchmark is equal-weight across the
/// surviving sector set and the portfolio applies the seeded tilts.
pub fn sector_sample(
    series: &[PriceSeries],
    universe: &SectorEtfUniverse,
    options: SampleOptions,
) -> Result<Vec<SectorObservation>> {
    let sectors = series
        .iter()
        .map(|s| {
            universe
                .sector(&s.symbol)
                .ok_or_else(|| DataError::Synthesis(format!("Unknown sector ETF: {}", s.symbol)))
        })
        .collect::<Result<Vec<_>>>()?;

    let dates = common_dates(series.iter());
    let portfolio_weights = tilted_weights(series.len(), options)?;
    let benchmark_weight = 1.0 / series.len() as f64;

    let mut rows = Vec::new();

    for ((s, sector), portfolio_weight) in series.iter().zip(&sectors).zip(&portfolio_weights) {
        for (date, ret) in daily_returns(s, &dates)? {
            rows.push(SectorObservation::new(
                date,
                sector.name(),
                s.symbol.as_str(),
                ReturnObservation::new(ret, ret, *portfolio_weight, benchmark_weight),
            ));
        }
    }

    Ok(rows)
}

/// Build the security-level observation table from holding and benchmark series.
///
/// Holdings and benchmark are aligned on their common dates. The per-date
/// portfolio total return is the tilted-weight dot product of holding
/// returns; the benchmark total return is the benchmark series' daily
/// return. Benchmark weights are equal-weight within the holding set.
pub fn security_sample(
    holdings: &[PriceSeries],
    benchmark: &PriceSeries,
    options: SampleOptions,
) -> Result<Vec<SecurityObservation>> {
    if holdings.is_empty() {
        return Err(DataError::Synthesis("Empty holding set".to_string()));
    }

    let dates = common_dates(holdings.iter().chain(std::iter::once(benchmark)));

    let holding_returns = holdings
        .iter()
        .map(|s| daily_returns(s, &dates))
        .collect::<Result<Vec<_>>>()?;
    let benchmark_returns = daily_returns(benchmark, &dates)?;

    let portfolio_weights = tilted_weights(holdings.len(), options)?;
    let benchmark_weight = 1.0 / holdings.len() as f64;

    // Per-date portfolio total return across holdings.
    let portfolio_totals: Vec<f64> = (0..benchmark_returns.len())
        .map(|j| {
            holding_returns
                .iter()
                .zip(&portfolio_weights)
                .map(|(rets, w)| w * rets[j].1)
                .sum()
        })
        .collect();

    let mut rows = Vec::new();

    for ((s, rets), portfolio_weight) in
        holdings.iter().zip(&holding_returns).zip(&portfolio_weights)
    {
        for (j, (date, ret)) in rets.iter().enumerate() {
            rows.push(SecurityObservation::new(
                *date,
                s.symbol.as_str(),
                *ret,
                *portfolio_weight,
                benchmark_weight,
                portfolio_totals[j],
                benchmark_returns[j].1,
            ));
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::PricePoint;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, d).unwrap()
    }

    fn series(symbol: &str, closes: &[f64]) -> PriceSeries {
        PriceSeries::new(
            symbol,
            closes
                .iter()
                .enumerate()
                .map(|(i, &close)| PricePoint {
                    date: date(i as u32 + 1),
                    close,
                })
                .collect(),
        )
    }

    #[test]
    fn test_tilted_weights_sum_to_one() {
        let weights = tilted_weights(10, SampleOptions::sector()).unwrap();
        assert_eq!(weights.len(), 10);
        assert_relative_eq!(weights.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tilted_weights_deterministic_under_seed() {
        let a = tilted_weights(8, SampleOptions::security()).unwrap();
        let b = tilted_weights(8, SampleOptions::security()).unwrap();
        assert_eq!(a, b);

        let c = tilted_weights(
            8,
            SampleOptions {
                seed: 99,
                ..SampleOptions::security()
            },
        )
        .unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_tilted_weights_empty_set() {
        assert!(matches!(
            tilted_weights(0, SampleOptions::sector()),
            Err(DataError::Synthesis(_))
        ));
    }

    #[test]
    fn test_sector_sample() {
        let universe = SectorEtfUniverse::new();
        let etfs = vec![
            series("XLE", &[100.0, 102.0, 101.0]),
            series("XLK", &[200.0, 198.0, 204.0]),
        ];

        let rows = sector_sample(&etfs, &universe, SampleOptions::sector()).unwrap();

        // Two units, three common dates, first date excluded.
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().any(|r| r.sector == "Energy"));
        assert!(rows.iter().any(|r| r.sector == "Information Technology"));

        // Per-date weights sum to 1.0 for both weight sets.
        let mut by_date: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
        for row in &rows {
            let entry = by_date.entry(row.date).or_insert((0.0, 0.0));
            entry.0 += row.benchmark_weight;
            entry.1 += row.portfolio_weight;
        }
        for (bench, port) in by_date.values() {
            assert_relative_eq!(*bench, 1.0, epsilon = 1e-9);
            assert_relative_eq!(*port, 1.0, epsilon = 1e-9);
        }

        // Portfolio and benchmark returns are both the ETF return.
        let xle_first = rows.iter().find(|r| r.etf == "XLE").unwrap();
        assert_eq!(xle_first.date, date(2));
        assert_relative_eq!(xle_first.benchmark_return, 0.02, epsilon = 1e-12);
        assert_relative_eq!(xle_first.portfolio_return, 0.02, epsilon = 1e-12);
        assert_relative_eq!(xle_first.excess_return, 0.0, epsilon = 1e-12);
        assert_relative_eq!(
            xle_first.allocation_effect,
            xle_first.active_weight * 0.02,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_sector_sample_rejects_unknown_etf() {
        let universe = SectorEtfUniverse::new();
        let etfs = vec![series("SPY", &[100.0, 101.0])];

        assert!(matches!(
            sector_sample(&etfs, &universe, SampleOptions::sector()),
            Err(DataError::Synthesis(_))
        ));
    }

    #[test]
    fn test_security_sample_totals() {
        let holdings = vec![
            series("AAPL", &[100.0, 110.0, 99.0]),
            series("MSFT", &[50.0, 51.0, 51.0]),
        ];
        let benchmark = series("SPY", &[400.0, 404.0, 402.0]);

        let rows = security_sample(&holdings, &benchmark, SampleOptions::security()).unwrap();
        assert_eq!(rows.len(), 4);

        let weights: Vec<f64> = {
            let mut seen = Vec::new();
            for row in &rows {
                if !seen.iter().any(|(s, _)| *s == row.security) {
                    seen.push((row.security.clone(), row.portfolio_weight));
                }
            }
            seen.into_iter().map(|(_, w)| w).collect()
        };
        assert_relative_eq!(weights.iter().sum::<f64>(), 1.0, epsilon = 1e-9);

        // Portfolio total on the first return date is the weight dot product.
        let expected = weights[0] * 0.10 + weights[1] * 0.02;
        let first = rows.iter().find(|r| r.date == date(2)).unwrap();
        assert_relative_eq!(first.portfolio_return_total, expected, epsilon = 1e-12);
        assert_relative_eq!(first.benchmark_return_total, 0.01, epsilon = 1e-12);
        assert_relative_eq!(
            first.excess_return_total,
            expected - 0.01,
            epsilon = 1e-12
        );

        // Benchmark weights are equal-weight within the holding set.
        for row in &rows {
            assert_relative_eq!(row.benchmark_weight, 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_security_sample_empty_holdings() {
        let benchmark = series("SPY", &[400.0, 404.0]);
        assert!(matches!(
            security_sample(&[], &benchmark, SampleOptions::security()),
            Err(DataError::Synthesis(_))
        ));
    }
}
