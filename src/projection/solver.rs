//! Required-savings solver
//!
//! Inverts the future value of an ordinary annuity to find the yearly
//! payment that closes the gap between the inflation-adjusted goal and the
//! projected value of current holdings.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::assumptions::ProjectionParameters;
use crate::portfolio::InvestmentEntry;
use crate::report::format::compound_factor;

/// Solver output for one snapshot and parameter set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsRequirement {
    /// Goal inflated to the horizon year
    pub real_goal: f64,
    pub current_assets: f64,
    /// Holdings compounded at their own rates to the horizon
    pub projected_future_value: f64,
    /// `real_goal - projected_future_value`; negative means surplus
    pub shortfall: f64,
    pub weighted_return: f64,
    /// Extra yearly savings on top of the planned contribution, never negative
    pub required_annual_savings: f64,
}

/// Solve for the additional annual savings needed to reach the goal
pub fn solve(
    entries: &[InvestmentEntry],
    parameters: &ProjectionParameters,
    weighted_return: f64,
) -> SavingsRequirement {
    let years = parameters.years_to_retirement;
    let real_goal = parameters.inflation_adjusted_goal();
    let projected_future_value = projected_future_value(entries, years);
    let shortfall = real_goal - projected_future_value;

    SavingsRequirement {
        real_goal,
        current_assets: entries.iter().map(|e| e.amount).sum(),
        projected_future_value,
        shortfall,
        weighted_return,
        required_annual_savings: required_annual_savings(
            shortfall,
            weighted_return,
            years,
            parameters.yearly_contribution,
        ),
    }
}

/// Sum of each holding compounded at its own rate for `years`
pub fn projected_future_value(entries: &[InvestmentEntry], years: u32) -> f64 {
    entries.iter().map(|e| e.future_value(years)).sum()
}

/// Annuity payment closing `shortfall` over `years`, less the planned contribution
///
/// A zero-year horizon leaves no compounding period, so the whole shortfall
/// is due now. A zero rate spreads the shortfall evenly over the years.
pub fn required_annual_savings(
    shortfall: f64,
    weighted_return: f64,
    years: u32,
    yearly_contribution: f64,
) -> f64 {
    let payment = if years == 0 {
        debug!("Zero-year horizon: required savings is the full shortfall");
        shortfall
    } else {
        let denominator = compound_factor(1.0 + weighted_return, years) - 1.0;
        if denominator == 0.0 {
            debug!("Zero weighted return: spreading shortfall over {} years", years);
            shortfall / years as f64
        } else {
            shortfall * weighted_return / denominator
        }
    };

    (payment - yearly_contribution).max(0.0)
}
