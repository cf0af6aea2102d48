//! SPDR sector ETF proxies for sector-level attribution.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Equity sectors proxied by the ten SPDR sector ETFs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    /// Consumer Discretionary
    ConsumerDiscretionary,

    /// Consumer Staples
    ConsumerStaples,

    /// Energy
    Energy,

    /// Financials
    Financials,

    /// Health Care
    HealthCare,

    /// Industrials
    Industrials,

    /// Materials
    Materials,

    /// Information Technology
    InformationTechnology,

    /// Utilities
    Utilities,

    /// Real Estate
    RealEstate,
}

impl Sector {
    /// Returns all sectors, in the fixed ordering used for weight assignment.
    pub fn all() -> Vec<Self> {
        vec![
            Self::ConsumerDiscretionary,
            Self::ConsumerStaples,
            Self::Energy,
            Self::Financials,
            Self::HealthCare,
            Self::Industrials,
            Self::Materials,
            Self::InformationTechnology,
            Self::Utilities,
            Self::RealEstate,
        ]
    }

    /// Returns the proxy ETF ticker for the sector.
    pub const fn etf(&self) -> &'static str {
        match self {
            Self::ConsumerDiscretionary => "XLY",
            Self::ConsumerStaples => "XLP",
            Self::Energy => "XLE",
            Self::Financials => "XLF",
            Self::HealthCare => "XLV",
            Self::Industrials => "XLI",
            Self::Materials => "XLB",
            Self::InformationTechnology => "XLK",
            Self::Utilities => "XLU",
            Self::RealEstate => "XLRE",
        }
    }

    /// Returns the full sector name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ConsumerDiscretionary => "Consumer Discretionary",
            Self::ConsumerStaples => "Consumer Staples",
            Self::Energy => "Energy",
            Self::Financials => "Financials",
            Self::HealthCare => "Health Care",
            Self::Industrials => "Industrials",
            Self::Materials => "Materials",
            Self::InformationTechnology => "Information Technology",
            Self::Utilities => "Utilities",
            Self::RealEstate => "Real Estate",
        }
    }

    /// Parse a sector from its proxy ETF ticker.
    pub fn from_etf(ticker: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.etf() == ticker)
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The sector proxy universe: all ten SPDR sector ETFs.
#[derive(Debug, Clone)]
pub struct SectorEtfUniverse {
    sectors: Vec<Sector>,
    etf_to_sector: HashMap<&'static str, Sector>,
}

impl SectorEtfUniverse {
    /// Create the full sector universe.
    pub fn new() -> Self {
        let sectors = Sector::all();
        let etf_to_sector = sectors.iter().map(|s| (s.etf(), *s)).collect();

        Self {
            sectors,
            etf_to_sector,
        }
    }

    /// Get all sectors, in universe order.
    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    /// Get all proxy ETF tickers, in universe order.
    pub fn symbols(&self) -> Vec<String> {
        self.sectors.iter().map(|s| s.etf().to_string()).collect()
    }

    /// Get the sector for a proxy ETF ticker.
    pub fn sector(&self, etf: &str) -> Option<Sector> {
        self.etf_to_sector.get(etf).copied()
    }
}

impl Default for SectorEtfUniverse {
    fn default() -> Self {
        Self::new()
    }
}
