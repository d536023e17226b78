//! Error types for portfolio editing, bulk import and file I/O
//!
//! Numeric degenerate cases (zero total assets, zero horizon) are not errors;
//! they resolve to fallback values inside the projection module.

use thiserror::Error;

use crate::portfolio::Category;

/// Errors raised by the planner library
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Investment not found: {0}")]
    EntryNotFound(String),

    #[error("Investment {id} is not in category {expected}")]
    WrongCategory { id: String, expected: Category },

    #[error("Invalid amount for {field}: {value}")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("Invalid return rate: {0}")]
    InvalidRate(f64),

    #[error("Duplicate investment id: {0}")]
    DuplicateId(String),

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validation failures for a bulk import; the portfolio is left untouched
#[derive(Debug, Error, PartialEq)]
pub enum ImportError {
    #[error("File is empty")]
    Empty,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Row {row}: unknown location '{value}' (expected US, India or Property)")]
    UnknownLocation { row: usize, value: String },

    #[error("Row {row}: {column} is not a number: '{value}'")]
    NotANumber {
        row: usize,
        column: &'static str,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, PlannerError>;
