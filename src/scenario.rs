//! Scenario runner for batch what-if projections
//!
//! Holds one immutable portfolio snapshot and return table, then projects
//! it under many parameter sets. Each run is an independent pure call, so
//! batches fan out across threads with rayon.

use log::info;
use rayon::prelude::*;
use std::ops::RangeInclusive;

use crate::assumptions::{AssetReturnTable, Assumptions, ProjectionParameters};
use crate::portfolio::InvestmentEntry;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};

/// Pre-loaded scenario runner for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(portfolio.entries().to_vec(), AssetReturnTable::default());
///
/// for inflation in [2.0, 3.0, 4.0] {
///     let params = ProjectionParameters { inflation_rate: inflation, ..Default::default() };
///     let result = runner.run(&params);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    entries: Vec<InvestmentEntry>,
    returns: AssetReturnTable,
    config: ProjectionConfig,
}

impl ScenarioRunner {
    pub fn new(entries: Vec<InvestmentEntry>, returns: AssetReturnTable) -> Self {
        Self {
            entries,
            returns,
            config: ProjectionConfig::default(),
        }
    }

    /// Override the engine config used for every run
    pub fn with_config(mut self, config: ProjectionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn entries(&self) -> &[InvestmentEntry] {
        &self.entries
    }

    /// Project the snapshot under one parameter set
    pub fn run(&self, parameters: &ProjectionParameters) -> ProjectionResult {
        let assumptions = Assumptions {
            parameters: parameters.clone(),
            returns: self.returns.clone(),
        };
        ProjectionEngine::new(assumptions, self.config.clone()).project(&self.entries)
    }

    /// Project every parameter set in parallel; output order matches input
    pub fn run_batch(&self, scenarios: &[ProjectionParameters]) -> Vec<ProjectionResult> {
        info!("Running {} scenarios over {} holdings", scenarios.len(), self.entries.len());
        scenarios.par_iter().map(|p| self.run(p)).collect()
    }

    /// Vary only the horizon, keeping the other parameters fixed
    pub fn sweep_years(&self, base: &ProjectionParameters, years: RangeInclusive<u32>) -> Vec<ProjectionResult> {
        let scenarios: Vec<ProjectionParameters> = years
            .map(|y| ProjectionParameters {
                years_to_retirement: y,
                ..base.clone()
            })
            .collect();
        self.run_batch(&scenarios)
    }
}
