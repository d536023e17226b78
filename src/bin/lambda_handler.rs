//! AWS Lambda handler for retirement projections
//!
//! Accepts a portfolio and projection parameters as JSON and returns the
//! full year-by-year projection. Invalid input is reported in the
//! response's `error` field rather than failing the invocation.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use retirement_planner::{
    assumptions::{Assumptions, ProjectionParameters},
    portfolio::{NewInvestment, Portfolio, PortfolioSnapshot},
    projection::{ProjectionResult, ProjectionSummary},
    project,
};

/// Input for one projection
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRequest {
    /// Holdings to project; ignored when `snapshot` is given
    #[serde(default)]
    pub investments: Vec<NewInvestment>,

    /// Previously saved portfolio snapshot
    #[serde(default)]
    pub snapshot: Option<PortfolioSnapshot>,

    /// Defaults to a 5M goal over 15 years at 3% inflation
    #[serde(default)]
    pub parameters: ProjectionParameters,

    /// Use the demonstration portfolio when no holdings are supplied
    #[serde(default)]
    pub use_sample: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    pub holding_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ProjectionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ProjectionResult>,
    pub execution_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProjectionResponse {
    fn failure(message: String, start: std::time::Instant) -> Self {
        warn!("Rejected projection request: {}", message);
        Self {
            holding_count: 0,
            summary: None,
            result: None,
            execution_time_ms: start.elapsed().as_millis() as u64,
            error: Some(message),
        }
    }
}

fn build_portfolio(request: ProjectionRequest) -> retirement_planner::Result<Portfolio> {
    if let Some(snapshot) = request.snapshot {
        return Portfolio::from_snapshot(snapshot);
    }
    if request.investments.is_empty() && request.use_sample {
        return Ok(Portfolio::sample());
    }
    let mut portfolio = Portfolio::new();
    portfolio.replace_all(request.investments)?;
    Ok(portfolio)
}

async fn handler(event: LambdaEvent<ProjectionRequest>) -> Result<ProjectionResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    if let Err(e) = request.parameters.validate() {
        return Ok(ProjectionResponse::failure(e.to_string(), start));
    }
    let assumptions = Assumptions::with_parameters(request.parameters.clone());

    let portfolio = match build_portfolio(request) {
        Ok(p) => p,
        Err(e) => return Ok(ProjectionResponse::failure(e.to_string(), start)),
    };

    let result = project(portfolio.entries(), &assumptions);
    info!(
        "Projected {} holdings over {} years",
        portfolio.len(),
        assumptions.parameters.years_to_retirement
    );

    Ok(ProjectionResponse {
        holding_count: portfolio.len(),
        summary: Some(result.summary()),
        result: Some(result),
        execution_time_ms: start.elapsed().as_millis() as u64,
        error: None,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
