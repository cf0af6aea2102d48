//! Large-cap holding set measured against a broad-market benchmark.

/// Default holding tickers for the security-level sample.
const DEFAULT_HOLDINGS: &[&str] = &["AAPL", "MSFT", "AMZN", "TSLA", "JNJ", "XOM", "JPM", "NVDA"];

/// Default broad-market benchmark ticker.
const DEFAULT_BENCHMARK: &str = "SPY";

/// A small large-cap portfolio plus the benchmark it is measured against.
#[derive(Debug, Clone)]
pub struct LargeCapUniverse {
    holdings: Vec<String>,
    benchmark: String,
}

impl LargeCapUniverse {
    /// Create the default large-cap universe (eight holdings, SPY benchmark).
    pub fn new() -> Self {
        Self {
            holdings: DEFAULT_HOLDINGS.iter().map(|s| s.to_string()).collect(),
            benchmark: DEFAULT_BENCHMARK.to_string(),
        }
    }

    /// Create a universe with custom holdings and benchmark.
    pub fn with_holdings(holdings: Vec<String>, benchmark: impl Into<String>) -> Self {
        Self {
            holdings,
            benchmark: benchmark.into(),
        }
    }

    /// Get the holding tickers, in universe order.
    pub fn holdings(&self) -> &[String] {
        &self.holdings
    }

    /// Get the benchmark ticker.
    pub fn benchmark(&self) -> &str {
        &self.benchmark
    }
}

impl Default for LargeCapUniverse {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_universe() {
        let universe = LargeCapUniverse::new();

        assert_eq!(universe.holdings().len(), 8);
        assert_eq!(universe.benchmark(), "SPY");
        assert!(universe.holdings().iter().any(|s| s == "NVDA"));
    }

    #[test]
    fn test_custom_holdings() {
        let universe =
            LargeCapUniverse::with_holdings(vec!["KO".to_string(), "PEP".to_string()], "IVV");

        assert_eq!(universe.holdings(), &["KO".to_string(), "PEP".to_string()]);
        assert_eq!(universe.benchmark(), "IVV");
    }
}
