#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/brinson/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod sample;
pub mod series;
pub mod yahoo;

pub use error::{DataError, Result};
pub use sample::{SampleOptions, sector_sample, security_sample, tilted_weights};
pub use series::{PricePoint, PriceSeries, common_dates, daily_returns};
pub use yahoo::YahooQuoteProvider;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
