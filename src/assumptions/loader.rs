//! File-based assumption loader
//!
//! Loads the asset return table from CSV and projection parameters from
//! JSON, both from data/ by default.

use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::ProjectionParameters;
use crate::error::{PlannerError, Result};
use crate::portfolio::AssetType;

/// Default path to the assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data";

/// Return table file name inside the assumptions directory
pub const ASSET_RETURNS_FILE: &str = "asset_returns.csv";

/// Parameters file name inside the assumptions directory
pub const PARAMETERS_FILE: &str = "parameters.json";

/// Load asset return rates from `asset_returns.csv`
/// Returns Vec<(asset_type, whole_percent_rate)> in file order
pub fn load_asset_returns(path: &Path) -> Result<Vec<(AssetType, f64)>> {
    let file = File::open(path.join(ASSET_RETURNS_FILE))?;
    load_asset_returns_from_reader(file)
}

pub fn load_asset_returns_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<(AssetType, f64)>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rates = Vec::new();
    for result in reader.records() {
        let record = result?;
        let (label, raw_rate) = match (record.get(0), record.get(1)) {
            (Some(label), Some(rate)) => (label, rate),
            _ => {
                return Err(PlannerError::InvalidParameter {
                    name: "asset return rate",
                    reason: format!("row {:?} needs asset_type and return_rate", record),
                })
            }
        };
        let asset_type = AssetType::parse(label);
        let rate: f64 = raw_rate
            .parse()
            .map_err(|_| PlannerError::InvalidParameter {
                name: "asset return rate",
                reason: format!("'{}' for {}", raw_rate, asset_type),
            })?;
        rates.push((asset_type, rate));
    }

    Ok(rates)
}

/// Load projection parameters from `parameters.json`
pub fn load_parameters(path: &Path) -> Result<ProjectionParameters> {
    let file = File::open(path.join(PARAMETERS_FILE))?;
    let parameters: ProjectionParameters = serde_json::from_reader(BufReader::new(file))?;
    parameters.validate()?;
    Ok(parameters)
}

/// Everything read from an assumptions directory
pub struct LoadedAssumptions {
    pub asset_returns: Vec<(AssetType, f64)>,
    pub parameters: ProjectionParameters,
}

impl LoadedAssumptions {
    /// Load all assumptions from the default path
    pub fn load_default() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load all assumptions from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let loaded = Self {
            asset_returns: load_asset_returns(path)?,
            parameters: load_parameters(path)?,
        };
        info!(
            "Loaded {} asset return rates from {}",
            loaded.asset_returns.len(),
            path.display()
        );
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_assumptions() {
        let result = LoadedAssumptions::load_default();
        assert!(result.is_ok(), "Failed to load assumptions: {:?}", result.err());

        let loaded = result.unwrap();
        assert!(loaded.asset_returns.len() >= 7);
        assert!(loaded
            .asset_returns
            .iter()
            .any(|(t, r)| *t == AssetType::Stocks && *r == 8.0));
        assert_eq!(loaded.parameters.years_to_retirement, 15);
    }

    #[test]
    fn test_asset_returns_from_reader() {
        let csv = "asset_type,return_rate\nStocks,9.5\nCrypto,15\n";
        let rates = load_asset_returns_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(rates[0], (AssetType::Stocks, 9.5));
        assert_eq!(rates[1], (AssetType::Other("Crypto".into()), 15.0));
    }

    #[test]
    fn test_bad_rate_rejected() {
        let csv = "asset_type,return_rate\nStocks,high\n";
        let err = load_asset_returns_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidParameter { .. }));
    }
}
