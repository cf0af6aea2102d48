//! CSV export and import of the long-form observation tables.
//!
//! The flat files written here are the sole handoff between the synthesizer
//! and the report pipeline. Column order follows the observation struct
//! field order; a header row is always written and expected.

use brinson::{SectorObservation, SecurityObservation};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn read_rows<R: Read, T: DeserializeOwned>(reader: R) -> Result<Vec<T>, ExportError> {
    let mut rdr = csv::Reader::from_reader(reader);
    rdr.deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(Into::into)
}

/// Write sector observations as CSV.
pub fn write_sector_observations<W: Write>(
    writer: W,
    rows: &[SectorObservation],
) -> Result<(), ExportError> {
    write_rows(writer, rows)
}

/// Read sector observations from CSV.
pub fn read_sector_observations<R: Read>(reader: R) -> Result<Vec<SectorObservation>, ExportError> {
    read_rows(reader)
}

/// Write security observations as CSV.
pub fn write_security_observations<W: Write>(
    writer: W,
    rows: &[SecurityObservation],
) -> Result<(), ExportError> {
    write_rows(writer, rows)
}

/// Read security observations from CSV.
pub fn read_security_observations<R: Read>(
    reader: R,
) -> Result<Vec<SecurityObservation>, ExportError> {
    read_rows(reader)
}

/// Write sector observations to a CSV file.
pub fn write_sector_observations_to_path(
    path: &Path,
    rows: &[SectorObservation],
) -> Result<(), ExportError> {
    write_sector_observations(File::create(path)?, rows)
}

/// Read sector observations from a CSV file.
pub fn read_sector_observations_from_path(
    path: &Path,
) -> Result<Vec<SectorObservation>, ExportError> {
    read_sector_observations(File::open(path)?)
}

/// Write security observations to a CSV file.
pub fn write_security_observations_to_path(
    path: &Path,
    rows: &[SecurityObservation],
) -> Result<(), ExportError> {
    write_security_observations(File::create(path)?, rows)
}

/// Read security observations from a CSV file.
pub fn read_security_observations_from_path(
    path: &Path,
) -> Result<Vec<SecurityObservation>, ExportError> {
    read_security_observations(File::open(path)?)
}
