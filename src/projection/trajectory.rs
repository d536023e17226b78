//! Projection output structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::solver::SavingsRequirement;
use crate::assumptions::ProjectionParameters;
use crate::portfolio::{AssetType, Category};

/// One year of the projected trajectory
///
/// Money values are rounded to whole currency units for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub year: u32,
    /// Holdings plus accumulated savings, nominal
    pub total_assets: f64,
    /// `total_assets` in today's money
    pub real_value: f64,
    /// Goal inflated to this year
    pub target_goal: f64,
    /// Accumulated contributions and required savings
    pub additional_savings: f64,
    /// `(1 + inflation)^year`, unrounded
    pub inflation_factor: f64,
    pub by_category: BTreeMap<Category, f64>,
    pub by_asset_type: BTreeMap<AssetType, f64>,
}

impl ProjectionPoint {
    /// Value of a named chart series at this year
    ///
    /// Names are `totalAssets`, `realValue`, `targetGoal`,
    /// `additionalSavings`, asset type keys (`PrivateEquity`, `401K`, ...)
    /// and legacy category keys (`usInvestments`, `indiaInvestments`, `property`).
    pub fn series_value(&self, name: &str) -> Option<f64> {
        match name {
            "totalAssets" => Some(self.total_assets),
            "realValue" => Some(self.real_value),
            "targetGoal" => Some(self.target_goal),
            "additionalSavings" => Some(self.additional_savings),
            _ => self
                .by_asset_type
                .iter()
                .find(|(t, _)| t.series_key() == name)
                .map(|(_, v)| *v)
                .or_else(|| {
                    self.by_category
                        .iter()
                        .find(|(c, _)| c.series_key() == name)
                        .map(|(_, v)| *v)
                }),
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub parameters: ProjectionParameters,

    /// Goal, shortfall and required savings
    pub savings: SavingsRequirement,

    /// Years 0..=N in order
    pub points: Vec<ProjectionPoint>,
}

impl ProjectionResult {
    pub fn real_goal(&self) -> f64 {
        self.savings.real_goal
    }

    pub fn weighted_average_return(&self) -> f64 {
        self.savings.weighted_return
    }

    pub fn required_annual_savings(&self) -> f64 {
        self.savings.required_annual_savings
    }

    pub fn final_point(&self) -> Option<&ProjectionPoint> {
        self.points.last()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let last = self.points.last();
        let final_total_assets = last.map(|p| p.total_assets).unwrap_or(0.0);
        let final_target_goal = last.map(|p| p.target_goal).unwrap_or(0.0);

        ProjectionSummary {
            years: self.parameters.years_to_retirement,
            current_assets: self.savings.current_assets,
            real_goal: self.savings.real_goal,
            weighted_average_return: self.savings.weighted_return,
            required_annual_savings: self.savings.required_annual_savings,
            final_total_assets,
            final_real_value: last.map(|p| p.real_value).unwrap_or(0.0),
            final_additional_savings: last.map(|p| p.additional_savings).unwrap_or(0.0),
            goal_met: final_total_assets >= final_target_goal,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub years: u32,
    pub current_assets: f64,
    pub real_goal: f64,
    pub weighted_average_return: f64,
    pub required_annual_savings: f64,
    pub final_total_assets: f64,
    pub final_real_value: f64,
    pub final_additional_savings: f64,
    pub goal_met: bool,
}
