//! Quote data fetching from Yahoo Finance.

use crate::error::{DataError, Result};
use crate::series::PriceSeries;
use chrono::{DateTime, Utc};
use polars::prelude::*;
use std::time::Duration;
use tokio::time::sleep;
use yahoo_finance_api as yahoo;

/// Yahoo Finance quote provider with rate limiting.
pub struct YahooQuoteProvider {
    provider: yahoo::YahooConnector,
    rate_limit_delay: Duration,
}

impl std::fmt::Debug for YahooQuoteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooQuoteProvider")
            .field("rate_limit_delay", &self.rate_limit_delay)
            .finish_non_exhaustive()
    }
}

impl YahooQuoteProvider {
    /// Create a new Yahoo Finance quote provider with default rate limiting (1 req/sec).
    pub fn new() -> Self {
        Self {
            provider: yahoo::YahooConnector::new().expect("Failed to create Yahoo connector"),
            rate_limit_delay: Duration::from_millis(1000),
        }
    }

    /// Create a new Yahoo Finance quote provider with custom rate limiting.
    pub fn with_rate_limit(rate_limit_delay: Duration) -> Self {
        Self {
            provider: yahoo::YahooConnector::new().expect("Failed to create Yahoo connector"),
            rate_limit_delay,
        }
    }

    /// Fetch adjusted close data for a single symbol.
    ///
    /// # Arguments
    /// * `symbol` - The ticker symbol (e.g., "XLK")
    /// * `start` - Start date for the data
    /// * `end` - End date for the data
    ///
    /// # Returns
    /// A Polars DataFrame with columns: symbol, date, adjusted_close
    pub async fn fetch_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<DataFrame> {
        // Validate date range
        if start > end {
            return Err(DataError::InvalidDateRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }

        // Validate symbol
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        // Convert chrono DateTime to time::OffsetDateTime
        let start_time = time::OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;
        let end_time = time::OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;

        // Fetch data from Yahoo Finance
        let response = self
            .provider
            .get_quote_history(symbol, start_time, end_time)
            .await?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::YahooApi(e.to_string()))?;

        if quotes.is_empty() {
            return Err(DataError::MissingData {
                symbol: symbol.to_string(),
                reason: "No data returned from Yahoo Finance".to_string(),
            });
        }

        // Convert to DataFrame
        let timestamps: Vec<i64> = quotes.iter().map(|q| q.timestamp).collect();
        let adj_closes: Vec<f64> = quotes.iter().map(|q| q.adjclose).collect();
        let symbols: Vec<&str> = vec![symbol; timestamps.len()];

        let df = DataFrame::new(vec![
            Series::new("symbol".into(), symbols).into(),
            Series::new("timestamp".into(), timestamps).into(),
            Series::new("adjusted_close".into(), adj_closes).into(),
        ])?;

        // Convert timestamp to date
        let df = df
            .lazy()
            .with_column(
                (col("timestamp") * lit(1_000_000_000))
                    .cast(DataType::Datetime(TimeUnit::Nanoseconds, None))
                    .cast(DataType::Date)
                    .alias("date"),
            )
            .select(&[col("symbol"), col("date"), col("adjusted_close")])
            .collect()?;

        // Apply rate limiting
        sleep(self.rate_limit_delay).await;

        Ok(df)
    }

    /// Fetch adjusted close series for a set of symbols.
    ///
    /// Fetches sequentially, one request per symbol. A symbol whose retrieval
    /// fails or yields no usable history is dropped with a warning on stderr,
    /// never fabricated; the dropped tickers are returned alongside the
    /// surviving series so callers can surface them.
    ///
    /// # Errors
    ///
    /// Returns `DataError::MissingData` when no symbol yields any data.
    pub async fn fetch_universe(
        &self,
        symbols: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(Vec<PriceSeries>, Vec<String>)> {
        let mut series = Vec::new();
        let mut skipped = Vec::new();

        for symbol in symbols {
            match self.fetch_quotes(symbol, start, end).await {
                Ok(df) => match PriceSeries::from_quote_frame(symbol, &df) {
                    Ok(s) => series.push(s),
                    Err(e) => {
                        eprintln!("Warning: Unusable price data for {}: {}", symbol, e);
                        skipped.push(symbol.clone());
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to fetch data for {}: {}", symbol, e);
                    skipped.push(symbol.clone());
                }
            }
        }

        if series.is_empty() {
            return Err(DataError::MissingData {
                symbol: "universe".to_string(),
                reason: "No data fetched for any symbol".to_string(),
            });
        }

        Ok((series, skipped))
    }
}

impl Default for YahooQuoteProvider {
    fn default() -> Self {
        Self::new()
    }
}
