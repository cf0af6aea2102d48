#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/brinson/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod report;
pub mod summary;

pub use export::{
    ExportError, read_sector_observations, read_security_observations, write_sector_observations,
    write_security_observations,
};
pub use report::{MonthlyReport, ReportBuilder, ReportError};
pub use summary::{PeriodSummary, SummaryError, SummaryRecord, UnitSummary, summarize_window};
