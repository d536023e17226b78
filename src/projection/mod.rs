//! Projection engine: aggregation, required-savings solver and
//! year-by-year trajectory

pub mod aggregation;
pub mod solver;
mod state;
mod engine;
mod trajectory;

pub use aggregation::{aggregate, weighted_average_return, PortfolioTotals, FALLBACK_WEIGHTED_RETURN};
pub use solver::{required_annual_savings, solve, SavingsRequirement};
pub use state::ProjectionState;
pub use engine::{project, ProjectionConfig, ProjectionEngine};
pub use trajectory::{ProjectionPoint, ProjectionResult, ProjectionSummary};
