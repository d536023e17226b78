//! Core projection engine for year-by-year asset growth

use log::{debug, info};

use super::aggregation::{asset_type_totals, category_totals, weighted_average_return};
use super::solver::solve;
use super::state::ProjectionState;
use super::trajectory::{ProjectionPoint, ProjectionResult};
use crate::assumptions::{Assumptions, MAX_YEARS_TO_RETIREMENT};
use crate::portfolio::InvestmentEntry;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Round money values in each point to whole currency units
    pub round_points: bool,

    /// Fill per-category and per-asset-type breakdowns
    pub detailed_output: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            round_points: true,
            detailed_output: true,
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given assumptions and config
    pub fn new(assumptions: Assumptions, config: ProjectionConfig) -> Self {
        Self { assumptions, config }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Run the projection for a snapshot of holdings
    ///
    /// The weighted return is fixed at its snapshot value for every year,
    /// even though the asset mix drifts as holdings compound.
    pub fn project(&self, entries: &[InvestmentEntry]) -> ProjectionResult {
        let parameters = &self.assumptions.parameters;
        let weighted_return = weighted_average_return(entries);
        let savings = solve(entries, parameters, weighted_return);
        let annual_deposit = parameters.yearly_contribution + savings.required_annual_savings;

        debug!(
            "Projecting {} holdings over {} years (weighted return {:.4}, deposit {:.2})",
            entries.len(),
            parameters.years_to_retirement,
            weighted_return,
            annual_deposit
        );

        let mut state = ProjectionState::from_entries(entries);
        let capacity = parameters.years_to_retirement.min(MAX_YEARS_TO_RETIREMENT) as usize + 1;
        let mut points = Vec::with_capacity(capacity);
        loop {
            points.push(self.calculate_year(entries, &state));
            if state.year >= parameters.years_to_retirement {
                break;
            }
            state.advance_year(entries, annual_deposit, weighted_return);
        }

        info!(
            "Projection complete: {} points, required annual savings {:.2}",
            points.len(),
            savings.required_annual_savings
        );

        ProjectionResult {
            parameters: parameters.clone(),
            savings,
            points,
        }
    }

    /// Build the output point for the state's current year
    fn calculate_year(&self, entries: &[InvestmentEntry], state: &ProjectionState) -> ProjectionPoint {
        let parameters = &self.assumptions.parameters;
        let total_assets = state.total_assets();
        let inflation_factor = parameters.inflation_factor(state.year);
        let real_value = total_assets / inflation_factor;
        let target_goal = parameters.retirement_goal * inflation_factor;

        let (mut by_category, mut by_asset_type) = if self.config.detailed_output {
            (
                category_totals(state.holdings(entries)),
                asset_type_totals(state.holdings(entries), &self.assumptions.returns),
            )
        } else {
            Default::default()
        };
        by_category.values_mut().for_each(|v| *v = self.display(*v));
        by_asset_type.values_mut().for_each(|v| *v = self.display(*v));

        ProjectionPoint {
            year: state.year,
            total_assets: self.display(total_assets),
            real_value: self.display(real_value),
            target_goal: self.display(target_goal),
            additional_savings: self.display(state.cumulative_savings),
            inflation_factor,
            by_category,
            by_asset_type,
        }
    }

    fn display(&self, value: f64) -> f64 {
        if self.config.round_points {
            value.round()
        } else {
            value
        }
    }
}

/// Project a snapshot with default engine settings
pub fn project(entries: &[InvestmentEntry], assumptions: &Assumptions) -> ProjectionResult {
    ProjectionEngine::new(assumptions.clone(), ProjectionConfig::default()).project(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::ProjectionParameters;
    use crate::portfolio::{AssetType, Category, NewInvestment, Portfolio};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn single_entry(amount: f64, rate: f64) -> Portfolio {
        let mut portfolio = Portfolio::new();
        portfolio
            .add(NewInvestment::new(Category::Us, "Fund", AssetType::Stocks, amount, rate))
            .unwrap();
        portfolio
    }

    fn params(goal: f64, years: u32, inflation: f64, contribution: f64) -> Assumptions {
        Assumptions::with_parameters(ProjectionParameters {
            retirement_goal: goal,
            years_to_retirement: years,
            inflation_rate: inflation,
            yearly_contribution: contribution,
        })
    }

    #[test]
    fn test_projection_runs() {
        let portfolio = Portfolio::sample();
        let result = project(portfolio.entries(), &Assumptions::default_planning());

        assert_eq!(result.points.len(), 16);
        let first = &result.points[0];
        assert_eq!(first.year, 0);
        assert_eq!(first.total_assets, 500_000.0);
        assert_eq!(first.real_value, 500_000.0);
        assert_eq!(first.target_goal, 5_000_000.0);
        assert_eq!(first.additional_savings, 0.0);
        assert_eq!(first.by_category[&Category::Us], 300_000.0);
        assert_eq!(first.by_asset_type[&AssetType::RealEstate], 200_000.0);
    }

    #[test]
    fn test_final_year_reaches_goal() {
        // Deposits compound one extra year in the trajectory, so the
        // final year overshoots the goal by the savings pot's last growth
        let portfolio = Portfolio::sample();
        let result = project(portfolio.entries(), &Assumptions::default_planning());
        let last = result.final_point().unwrap();
        let r = result.weighted_average_return();

        assert_eq!(last.year, 15);
        assert_relative_eq!(last.target_goal, result.real_goal().round());
        assert!(result.summary().goal_met);
        let expected = result.savings.projected_future_value + result.savings.shortfall * (1.0 + r);
        assert_relative_eq!(last.total_assets, expected.round(), max_relative = 1e-6);
    }

    #[test]
    fn test_single_entry_growth_matches_future_value() {
        let portfolio = single_entry(100_000.0, 8.0);
        // Goal already met: no savings stream
        let result = project(portfolio.entries(), &params(0.0, 15, 3.0, 0.0));

        assert_eq!(result.required_annual_savings(), 0.0);
        assert_eq!(result.points[1].total_assets, 108_000.0);
        assert_eq!(result.points[3].total_assets, 125_971.0);
        assert_eq!(result.points[15].total_assets, 317_217.0);
        assert_eq!(result.points[15].additional_savings, 0.0);
    }

    #[test]
    fn test_contribution_deposited_before_growth() {
        let portfolio = single_entry(0.0, 0.0);
        let engine = ProjectionEngine::new(
            params(0.0, 2, 0.0, 1_000.0),
            ProjectionConfig {
                round_points: false,
                detailed_output: false,
            },
        );
        let result = engine.project(portfolio.entries());

        // Zero total assets: weighted return falls back to 5%
        assert_eq!(result.weighted_average_return(), 0.05);
        assert_relative_eq!(result.points[1].additional_savings, 1_050.0);
        assert_relative_eq!(result.points[2].additional_savings, 2_152.5);
        assert!(result.points[2].by_category.is_empty());
    }

    #[test]
    fn test_zero_year_horizon() {
        let portfolio = Portfolio::sample();
        let result = project(portfolio.entries(), &params(1_000_000.0, 0, 3.0, 100_000.0));

        assert_eq!(result.points.len(), 1);
        assert_eq!(result.real_goal(), 1_000_000.0);
        // shortfall 500k less 100k planned contribution
        assert_relative_eq!(result.required_annual_savings(), 400_000.0);
    }

    #[test]
    fn test_real_value_deflates() {
        let portfolio = single_entry(100_000.0, 0.0);
        let result = project(portfolio.entries(), &params(0.0, 10, 3.0, 0.0));
        let last = result.final_point().unwrap();
        assert_eq!(last.total_assets, 100_000.0);
        assert_eq!(last.real_value, (100_000.0 / 1.03f64.powi(10)).round());
        assert_relative_eq!(last.inflation_factor, 1.03f64.powi(10));
    }

    #[test]
    fn test_empty_portfolio() {
        let result = project(&[], &Assumptions::default_planning());
        assert_eq!(result.points.len(), 16);
        assert_eq!(result.weighted_average_return(), 0.05);
        assert!(result.required_annual_savings() > 0.0);
        assert!(result.points[0].by_asset_type.values().all(|v| *v == 0.0));
    }

    #[test]
    fn test_series_value_lookup() {
        let portfolio = Portfolio::sample();
        let result = project(portfolio.entries(), &Assumptions::default_planning());
        let first = &result.points[0];
        assert_eq!(first.series_value("totalAssets"), Some(500_000.0));
        assert_eq!(first.series_value("401K"), Some(150_000.0));
        assert_eq!(first.series_value("indiaInvestments"), Some(200_000.0));
        assert_eq!(first.series_value("nope"), None);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_projection_length_and_order(
            years in 0u32..60,
            amount in 0.0f64..1e7,
            rate in 0.0f64..20.0,
            inflation in 0.0f64..10.0,
        ) {
            let portfolio = single_entry(amount, rate);
            let result = project(portfolio.entries(), &params(2_000_000.0, years, inflation, 0.0));
            prop_assert_eq!(result.points.len(), years as usize + 1);
            for (i, point) in result.points.iter().enumerate() {
                prop_assert_eq!(point.year, i as u32);
            }
        }

        #[test]
        fn prop_projection_is_deterministic(
            years in 0u32..40,
            goal in 0.0f64..1e8,
            contribution in 0.0f64..1e5,
        ) {
            let portfolio = Portfolio::sample();
            let assumptions = params(goal, years, 3.0, contribution);
            let first = serde_json::to_string(&project(portfolio.entries(), &assumptions)).unwrap();
            let second = serde_json::to_string(&project(portfolio.entries(), &assumptions)).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
