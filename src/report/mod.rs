//! Reporting adapters: formatting, CSV export and chart data
//!
//! Nothing here computes projection figures; it only shapes existing
//! results for display or serialization.

pub mod format;
pub mod export;
pub mod chart;

pub use format::{format_currency, format_currency_value, format_percentage, future_value, FUTURE_VALUE_HORIZONS};
pub use export::{export_all, investment_table, totals_row, InvestmentTableRow};
pub use chart::{
    asset_type_allocation, category_allocation, chart_series, AllocationSlice, ChartSeries, SeriesVisibility,
};
