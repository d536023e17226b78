//! Bulk import of investments from CSV
//!
//! Required columns (matched case-insensitively): Location, Name,
//! Asset Type, Amount, Return Rate. Validation is all-or-nothing: a single
//! bad row fails the whole import.

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{info, warn};
use std::fs::File;
use std::path::Path;

use super::{AssetType, Category, NewInvestment};
use crate::error::{ImportError, PlannerError, Result};

/// Columns every import file must carry, in reporting order
pub const REQUIRED_COLUMNS: [&str; 5] = ["Location", "Name", "Asset Type", "Amount", "Return Rate"];

/// Header positions of the required columns
struct ColumnMap {
    location: usize,
    name: usize,
    asset_type: usize,
    amount: usize,
    return_rate: usize,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> std::result::Result<Self, ImportError> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(column))
        };
        let positions: Vec<Option<usize>> = REQUIRED_COLUMNS.iter().map(|c| find(*c)).collect();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .zip(&positions)
            .filter(|(_, pos)| pos.is_none())
            .map(|(name, _)| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }

        // All present at this point
        let at = |i: usize| positions[i].unwrap_or_default();
        Ok(Self {
            location: at(0),
            name: at(1),
            asset_type: at(2),
            amount: at(3),
            return_rate: at(4),
        })
    }
}

/// Load investments from a CSV file
pub fn load_investments<P: AsRef<Path>>(path: P) -> Result<Vec<NewInvestment>> {
    let file = File::open(path.as_ref())?;
    let rows = load_investments_from_reader(file)?;
    info!("Loaded {} investments from {}", rows.len(), path.as_ref().display());
    Ok(rows)
}

/// Load investments from any reader (file, string buffer, request body)
pub fn load_investments_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<NewInvestment>> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let records: Vec<StringRecord> = csv_reader
        .records()
        .collect::<std::result::Result<_, csv::Error>>()?;

    if records.is_empty() {
        return Err(ImportError::Empty.into());
    }
    let columns = ColumnMap::from_headers(&headers)?;

    let mut investments = Vec::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        let row = idx + 1;
        if let Some(investment) = parse_row(row, record, &columns)? {
            investments.push(investment);
        }
    }

    Ok(investments)
}

/// Parse one data row; `Ok(None)` means the row is skipped
fn parse_row(
    row: usize,
    record: &StringRecord,
    columns: &ColumnMap,
) -> std::result::Result<Option<NewInvestment>, PlannerError> {
    let field = |idx: usize| cell(record, idx);

    let name = field(columns.name);
    let amount_raw = field(columns.amount);
    if name.is_empty() || amount_raw.is_empty() {
        warn!("Skipping import row {}: missing name or amount", row);
        return Ok(None);
    }

    let location = field(columns.location);
    let category = Category::from_location(location).ok_or_else(|| ImportError::UnknownLocation {
        row,
        value: location.to_string(),
    })?;

    let amount = parse_number(row, "Amount", amount_raw)?;
    if amount == 0.0 {
        warn!("Skipping import row {}: zero amount", row);
        return Ok(None);
    }
    let return_rate = parse_number(row, "Return Rate", field(columns.return_rate))?;

    Ok(Some(
        NewInvestment::new(
            category,
            name,
            AssetType::parse(field(columns.asset_type)),
            amount,
            return_rate,
        )
        .with_type(name),
    ))
}

fn cell(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("").trim()
}

fn parse_number(row: usize, column: &'static str, raw: &str) -> std::result::Result<f64, ImportError> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ImportError::NotANumber {
            row,
            column,
            value: raw.to_string(),
        })
}
