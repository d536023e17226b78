//! Planning assumptions: projection parameters and default asset returns

mod returns;
pub mod loader;

pub use returns::{AssetReturnTable, FALLBACK_RETURN_RATE};
pub use loader::LoadedAssumptions;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PlannerError, Result};
use crate::report::format::compound_factor;

/// Longest planning horizon accepted by `ProjectionParameters::validate`
pub const MAX_YEARS_TO_RETIREMENT: u32 = 100;

/// Externally supplied inputs to the projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionParameters {
    /// Retirement goal in today's money
    pub retirement_goal: f64,

    /// Planning horizon in whole years
    pub years_to_retirement: u32,

    /// Annual inflation in whole percent (3.0 = 3%)
    pub inflation_rate: f64,

    /// Contribution already planned each year
    #[serde(default)]
    pub yearly_contribution: f64,
}

impl Default for ProjectionParameters {
    fn default() -> Self {
        Self {
            retirement_goal: 5_000_000.0,
            years_to_retirement: 15,
            inflation_rate: 3.0,
            yearly_contribution: 0.0,
        }
    }
}

impl ProjectionParameters {
    /// Cumulative inflation multiplier after `year` years
    pub fn inflation_factor(&self, year: u32) -> f64 {
        compound_factor(1.0 + self.inflation_rate / 100.0, year)
    }

    /// Goal expressed in money of the horizon year
    pub fn inflation_adjusted_goal(&self) -> f64 {
        self.retirement_goal * self.inflation_factor(self.years_to_retirement)
    }

    pub fn validate(&self) -> Result<()> {
        non_negative("retirementGoal", self.retirement_goal)?;
        non_negative("yearlyContribution", self.yearly_contribution)?;
        if self.years_to_retirement > MAX_YEARS_TO_RETIREMENT {
            return Err(PlannerError::InvalidParameter {
                name: "yearsToRetirement",
                reason: format!(
                    "{} exceeds the maximum of {} years",
                    self.years_to_retirement, MAX_YEARS_TO_RETIREMENT
                ),
            });
        }
        if !self.inflation_rate.is_finite() || self.inflation_rate <= -100.0 {
            return Err(PlannerError::InvalidParameter {
                name: "inflationRate",
                reason: format!("{} is out of range", self.inflation_rate),
            });
        }
        Ok(())
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(PlannerError::InvalidParameter {
            name,
            reason: format!("{} must be a non-negative number", value),
        });
    }
    Ok(())
}

/// Container for all planning assumptions
#[derive(Debug, Clone, Default)]
pub struct Assumptions {
    pub parameters: ProjectionParameters,
    pub returns: AssetReturnTable,
}

impl Assumptions {
    /// Built-in defaults
    pub fn default_planning() -> Self {
        Self::default()
    }

    pub fn with_parameters(parameters: ProjectionParameters) -> Self {
        Self {
            parameters,
            returns: AssetReturnTable::default(),
        }
    }

    /// Load assumptions from the default location (data/)
    pub fn from_files() -> Result<Self> {
        Self::from_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load assumptions from a specific directory
    pub fn from_path(path: &Path) -> Result<Self> {
        let loaded = LoadedAssumptions::load_from(path)?;

        Ok(Self {
            parameters: loaded.parameters,
            returns: AssetReturnTable::from_loaded(&loaded.asset_returns),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_inflation_adjusted_goal() {
        let params = ProjectionParameters::default();
        // 5,000,000 * 1.03^15
        assert_relative_eq!(params.inflation_adjusted_goal(), 7_789_837.0, max_relative = 1e-6);
    }

    #[test]
    fn test_inflation_factor_year_zero() {
        let params = ProjectionParameters::default();
        assert_eq!(params.inflation_factor(0), 1.0);
    }

    #[test]
    fn test_validate() {
        assert!(ProjectionParameters::default().validate().is_ok());

        let negative_goal = ProjectionParameters {
            retirement_goal: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            negative_goal.validate(),
            Err(PlannerError::InvalidParameter { name: "retirementGoal", .. })
        ));

        let nan_inflation = ProjectionParameters {
            inflation_rate: f64::NAN,
            ..Default::default()
        };
        assert!(nan_inflation.validate().is_err());
    }

    #[test]
    fn test_validate_horizon_limit() {
        let at_limit = ProjectionParameters {
            years_to_retirement: MAX_YEARS_TO_RETIREMENT,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());

        let too_long = ProjectionParameters {
            years_to_retirement: 3_000_000_000,
            ..Default::default()
        };
        assert!(matches!(
            too_long.validate(),
            Err(PlannerError::InvalidParameter { name: "yearsToRetirement", .. })
        ));
        // Factor stays monotone even past the validated range
        assert!(too_long.inflation_factor(3_000_000_000) > too_long.inflation_factor(1));
    }

    #[test]
    fn test_parameters_json() {
        let json = r#"{"retirementGoal": 1000000, "yearsToRetirement": 10, "inflationRate": 2.5}"#;
        let params: ProjectionParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.years_to_retirement, 10);
        assert_eq!(params.yearly_contribution, 0.0);
    }

    #[test]
    fn test_load_from_files() {
        let assumptions = Assumptions::from_files().expect("Failed to load assumptions");
        assert_eq!(assumptions.parameters, ProjectionParameters::default());
        assert_eq!(assumptions.returns.default_rate(&crate::portfolio::AssetType::Stocks), 8.0);
    }
}
