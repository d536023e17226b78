//! Retirement Planner - deterministic projection engine for personal portfolios
//!
//! This library provides:
//! - Investment records partitioned by location (US, India, Property)
//! - Portfolio aggregation and amount-weighted average return
//! - Required annual savings to reach an inflation-adjusted goal
//! - Year-by-year projection of nominal and real asset values
//! - CSV import/export and chart-ready series
//! - Parallel what-if batches over parameter sets

pub mod error;
pub mod portfolio;
pub mod assumptions;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{ImportError, PlannerError, Result};
pub use portfolio::{AssetType, Category, InvestmentEntry, NewInvestment, Portfolio};
pub use assumptions::{AssetReturnTable, Assumptions, ProjectionParameters};
pub use projection::{project, ProjectionEngine, ProjectionPoint, ProjectionResult};
pub use scenario::ScenarioRunner;
