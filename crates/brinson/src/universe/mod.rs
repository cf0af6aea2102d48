//! Universe management for the attribution reporter.
//!
//! This module provides the reporting universes: the SPDR sector ETF set
//! used as sector proxies, and the large-cap holding set measured against
//! a broad-market benchmark.

pub mod largecap;
pub mod sectors;

pub use largecap::LargeCapUniverse;
pub use sectors::{Sector, SectorEtfUniverse};

/// Trait for instrument universes.
pub trait Universe {
    /// Get all symbols in the universe.
    fn symbols(&self) -> Vec<String>;

    /// Check if a symbol is in the universe.
    fn contains(&self, symbol: &str) -> bool {
        self.symbols().contains(&symbol.to_string())
    }

    /// Get the number of constituents.
    fn size(&self) -> usize {
        self.symbols().len()
    }
}

impl Universe for SectorEtfUniverse {
    fn symbols(&self) -> Vec<String> {
        self.symbols()
    }
}

impl Universe for LargeCapUniverse {
    fn symbols(&self) -> Vec<String> {
        self.holdings().iter().map(|s| s.to_string()).collect()
    }
}
