//! Delimited dataset loading with header validation.
//!
//! A [`Dataset`] is read once and never mutated afterwards. Callers share it
//! behind an `Arc` and every scoring pass works from the same rows.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, RiskError};
use crate::record::{parse_cell, Record};
use crate::schema::{self, FEATURE_COLUMNS, ID_COLUMN, IP_COLUMN};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// Header columns in source order.
    pub columns: Vec<String>,
    /// Rows in source order.
    pub records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset from already-parsed records (used by tests and embedders).
    pub fn from_records(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    /// Dataset carrying the full v1 header, for records built in code.
    pub fn with_schema_columns(records: Vec<Record>) -> Self {
        let columns = schema::required_columns().map(str::to_owned).collect();
        Self::from_records(columns, records)
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let dataset = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            records = dataset.len(),
            columns = dataset.columns.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// Read a CSV stream with a header row.
    ///
    /// The header is validated against the v1 schema before any row is parsed,
    /// so a missing column is reported even for an empty file.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();
        let required: Vec<&str> = schema::required_columns().collect();
        check_columns(&columns, &required)?;

        let mut records = Vec::new();
        let mut seen = HashSet::new();

        for (idx, row) in rdr.records().enumerate() {
            let row = row?;
            // Header is line 1.
            let line = idx + 2;
            let mut record = Record::new("");

            for (column, cell) in columns.iter().zip(row.iter()) {
                if column == ID_COLUMN {
                    record.id = cell.to_owned();
                } else if column == IP_COLUMN {
                    if !cell.is_empty() {
                        record.ip = Some(cell.to_owned());
                    }
                } else if FEATURE_COLUMNS.contains(&column.as_str()) {
                    let value = parse_cell(cell).ok_or_else(|| RiskError::InvalidValue {
                        row: line,
                        column: column.clone(),
                        value: cell.to_owned(),
                    })?;
                    record.values.insert(column.clone(), value);
                } else if let Some(value) = parse_cell(cell) {
                    record.values.insert(column.clone(), value);
                } else {
                    record.attributes.insert(column.clone(), cell.to_owned());
                }
            }

            if record.id.is_empty() {
                return Err(RiskError::InvalidValue {
                    row: line,
                    column: ID_COLUMN.to_owned(),
                    value: String::new(),
                });
            }
            if !seen.insert(record.id.clone()) {
                return Err(RiskError::DuplicateId(record.id));
            }
            records.push(record);
        }

        debug!(records = records.len(), "parsed dataset rows");
        Ok(Self { columns, records })
    }

    /// Check that every column in `required` is present in the header.
    pub fn validate_schema(&self, required: &[&str]) -> Result<()> {
        check_columns(&self.columns, required)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn check_columns(columns: &[String], required: &[&str]) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|r| !columns.iter().any(|c| c == *r))
        .map(|r| (*r).to_owned())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(RiskError::Schema { missing })
    }
}
