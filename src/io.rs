//! # Price Table Ingestion
//!
//! $$
//! \text{CSV} \to \{\text{numeric columns}\} \to P \in \mathbb R_{>0}^{T\times N}
//! $$
//!
//! Loads a price table from CSV, keeping only the numeric columns in their
//! original order. Date or ticker columns are skipped.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use csv::StringRecord;
use tracing::debug;

use crate::data::PriceMatrix;
use crate::data::prices::MIN_ASSETS;
use crate::error::Result;
use crate::error::RiskError;

/// Read a price table from a CSV file with a header row.
pub fn read_price_csv<P: AsRef<Path>>(path: P) -> Result<PriceMatrix> {
  let file = File::open(path.as_ref())?;
  debug!(path = %path.as_ref().display(), "reading price table");
  parse_price_csv(file)
}

/// Parse a price table from any CSV reader with a header row.
///
/// A column is numeric when every non-empty cell parses as a float and at
/// least one cell is non-empty. An empty cell inside a numeric column is a
/// [`RiskError::MissingValue`].
pub fn parse_price_csv<R: Read>(reader: R) -> Result<PriceMatrix> {
  let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
  let headers = rdr.headers()?.clone();
  let records = rdr.records().collect::<std::result::Result<Vec<StringRecord>, _>>()?;

  let mut columns: Vec<(String, Vec<f64>)> = Vec::new();
  for (j, name) in headers.iter().enumerate() {
    match numeric_column(&records, j) {
      Some(cells) => {
        let mut series = Vec::with_capacity(cells.len());
        for (row, cell) in cells.into_iter().enumerate() {
          let value = cell.ok_or_else(|| RiskError::MissingValue {
            row,
            column: name.to_string(),
          })?;
          series.push(value);
        }
        columns.push((name.to_string(), series));
      }
      None => debug!(column = name, "skipping non-numeric column"),
    }
  }

  if columns.len() < MIN_ASSETS {
    return Err(RiskError::InsufficientColumns {
      required: MIN_ASSETS,
      found: columns.len(),
    });
  }

  PriceMatrix::from_columns(columns)
}

// `None` if the column is not numeric; otherwise each cell, `None` where empty.
fn numeric_column(records: &[StringRecord], j: usize) -> Option<Vec<Option<f64>>> {
  let mut cells = Vec::with_capacity(records.len());
  let mut any_value = false;
  for record in records {
    let raw = record.get(j).unwrap_or("");
    if raw.is_empty() {
      cells.push(None);
      continue;
    }
    let value = raw.parse::<f64>().ok()?;
    any_value = true;
    cells.push(Some(value));
  }
  any_value.then_some(cells)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keeps_numeric_columns_in_order() {
    let csv = "date,AAA,ticker,BBB\n2024-01-02,10.0,x,20\n2024-01-03,10.5,y,19.5\n2024-01-04,10.2,z,19.9\n";
    let prices = parse_price_csv(csv.as_bytes()).unwrap();
    assert_eq!(prices.assets(), &["AAA".to_string(), "BBB".to_string()]);
    assert_eq!(prices.n_observations(), 3);
    assert_eq!(prices.values()[[1, 1]], 19.5);
  }

  #[test]
  fn single_numeric_column_is_insufficient() {
    let csv = "date,AAA\n2024-01-02,10\n2024-01-03,11\n";
    assert!(matches!(
      parse_price_csv(csv.as_bytes()),
      Err(RiskError::InsufficientColumns {
        required: 2,
        found: 1
      })
    ));
  }

  #[test]
  fn empty_cell_is_missing_value() {
    let csv = "AAA,BBB\n10,20\n,21\n11,22\n";
    match parse_price_csv(csv.as_bytes()) {
      Err(RiskError::MissingValue { row, column }) => {
        assert_eq!(row, 1);
        assert_eq!(column, "AAA");
      }
      other => panic!("unexpected result {other:?}"),
    }
  }

  #[test]
  fn ragged_rows_surface_csv_error() {
    let csv = "AAA,BBB\n10,20\n11\n";
    assert!(matches!(
      parse_price_csv(csv.as_bytes()),
      Err(RiskError::Csv(_))
    ));
  }

  #[test]
  fn missing_file_is_io_error() {
    assert!(matches!(
      read_price_csv("/nonexistent/prices.csv"),
      Err(RiskError::Io(_))
    ));
  }
}
