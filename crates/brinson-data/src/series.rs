//! Price series extraction, alignment, and daily returns.

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::{BTreeSet, HashMap};

/// A single adjusted close observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    /// Observation date.
    pub date: NaiveDate,

    /// Adjusted closing price.
    pub close: f64,
}

/// Daily adjusted close series for one symbol, sorted ascending by date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    /// Ticker symbol the series belongs to.
    pub symbol: String,

    /// Price points, ascending by date.
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Create a series, sorting the points ascending by date.
    pub fn new(symbol: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);

        Self {
            symbol: symbol.into(),
            points,
        }
    }

    /// Extract a series from a quote frame with `date` and `adjusted_close` columns.
    pub fn from_quote_frame(symbol: &str, df: &DataFrame) -> Result<Self> {
        // Read the Date column back through its string rendering.
        let dates = df.column("date")?.cast(&DataType::String)?;
        let dates = dates.str()?;
        let closes = df.column("adjusted_close")?.f64()?;

        let mut points = Vec::with_capacity(df.height());

        for i in 0..df.height() {
            let date = dates
                .get(i)
                .ok_or_else(|| DataError::Parse("Missing date".to_string()))?;
            let close = closes
                .get(i)
                .ok_or_else(|| DataError::Parse("Missing adjusted_close".to_string()))?;
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|e| DataError::Parse(format!("Bad date '{}': {}", date, e)))?;

            points.push(PricePoint { date, close });
        }

        if points.is_empty() {
            return Err(DataError::MissingData {
                symbol: symbol.to_string(),
                reason: "Empty price history".to_string(),
            });
        }

        Ok(Self::new(symbol, points))
    }

    /// Dates covered by this series.
    pub fn dates(&self) -> BTreeSet<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }
}

/// Dates present in every given series, ascending.
///
/// Returns an empty vector when called with no series.
pub fn common_dates<'a>(series: impl IntoIterator<Item = &'a PriceSeries>) -> Vec<NaiveDate> {
    let mut iter = series.into_iter();

    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut common = first.dates();
    for s in iter {
        let dates = s.dates();
        common.retain(|d| dates.contains(d));
    }

    common.into_iter().collect()
}

/// Daily fractional returns of a series over the given aligned dates.
///
/// The first aligned date has no defined return and is excluded; at least two
/// aligned dates are required.
///
/// # Errors
///
/// Returns `DataError::MissingData` when fewer than two aligned dates are
/// given or the series lacks a price on one of them.
pub fn daily_returns(series: &PriceSeries, dates: &[NaiveDate]) -> Result<Vec<(NaiveDate, f64)>> {
    if dates.len() < 2 {
        return Err(DataError::MissingData {
            symbol: series.symbol.clone(),
            reason: "Fewer than two aligned dates".to_string(),
        });
    }

    let by_date: HashMap<NaiveDate, f64> =
        series.points.iter().map(|p| (p.date, p.close)).collect();

    let closes = dates
        .iter()
        .map(|d| {
            by_date.get(d).copied().ok_or_else(|| DataError::MissingData {
                symbol: series.symbol.clone(),
                reason: format!("No price on {}", d),
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    Ok(dates
        .windows(2)
        .zip(closes.windows(2))
        .map(|(d, c)| (d[1], c[1] / c[0] - 1.0))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, d).unwrap()
    }

    fn series(symbol: &str, rows: &[(u32, f64)]) -> PriceSeries {
        PriceSeries::new(
            symbol,
            rows.iter()
                .map(|&(d, close)| PricePoint {
                    date: date(d),
                    close,
                })
                .collect(),
        )
    }

    fn quote_frame(symbol: &str, rows: &[(&str, f64)]) -> DataFrame {
        let symbols = vec![symbol; rows.len()];
        let dates: Vec<&str> = rows.iter().map(|(d, _)| *d).collect();
        let closes: Vec<f64> = rows.iter().map(|(_, c)| *c).collect();

        let df = DataFrame::new(vec![
            Series::new("symbol".into(), symbols).into(),
            Series::new("date".into(), dates).into(),
            Series::new("adjusted_close".into(), closes).into(),
        ])
        .unwrap();

        df.lazy()
            .with_column(col("date").cast(DataType::Date))
            .collect()
            .unwrap()
    }

    #[test]
    fn test_from_quote_frame() {
        let df = quote_frame("XLK", &[("2023-06-01", 100.0), ("2023-06-02", 101.5)]);
        let series = PriceSeries::from_quote_frame("XLK", &df).unwrap();

        assert_eq!(series.symbol, "XLK");
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0].date, date(1));
        assert_relative_eq!(series.points[1].close, 101.5);
    }

    #[test]
    fn test_new_sorts_by_date() {
        let s = series("XLE", &[(3, 90.0), (1, 100.0), (2, 95.0)]);
        let dates: Vec<NaiveDate> = s.points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![date(1), date(2), date(3)]);
    }

    #[test]
    fn test_common_dates_intersection() {
        let a = series("A", &[(1, 1.0), (2, 1.0), (3, 1.0), (4, 1.0)]);
        let b = series("B", &[(2, 1.0), (3, 1.0), (4, 1.0), (5, 1.0)]);
        let c = series("C", &[(1, 1.0), (3, 1.0), (4, 1.0)]);

        assert_eq!(common_dates([&a, &b, &c]), vec![date(3), date(4)]);
        assert_eq!(
            common_dates(std::iter::empty::<&PriceSeries>()),
            Vec::<NaiveDate>::new()
        );
    }

    #[test]
    fn test_daily_returns() {
        let s = series("A", &[(1, 100.0), (2, 102.0), (3, 96.9)]);
        let dates = vec![date(1), date(2), date(3)];

        let rets = daily_returns(&s, &dates).unwrap();
        assert_eq!(rets.len(), 2);
        assert_eq!(rets[0].0, date(2));
        assert_relative_eq!(rets[0].1, 0.02, epsilon = 1e-12);
        assert_relative_eq!(rets[1].1, 96.9 / 102.0 - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_daily_returns_requires_two_dates() {
        let s = series("A", &[(1, 100.0)]);
        let result = daily_returns(&s, &[date(1)]);
        assert!(matches!(result, Err(DataError::MissingData { .. })));
    }

    #[test]
    fn test_daily_returns_missing_price() {
        let s = series("A", &[(1, 100.0), (3, 99.0)]);
        let result = daily_returns(&s, &[date(1), date(2), date(3)]);
        assert!(matches!(result, Err(DataError::MissingData { .. })));
    }
}
