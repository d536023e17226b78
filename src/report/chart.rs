//! Chart-ready series extraction and allocation slices

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::assumptions::AssetReturnTable;
use crate::portfolio::{Category, InvestmentEntry};
use crate::projection::aggregation::{asset_type_totals, category_totals, principal, total_assets};
use crate::projection::ProjectionResult;

const VISIBLE_BY_DEFAULT: [&str; 6] = [
    "totalAssets",
    "targetGoal",
    "additionalSavings",
    "PrivateEquity",
    "Stocks",
    "RealEstate",
];

const HIDDEN_BY_DEFAULT: [&str; 7] = [
    "CashDeposit",
    "Cash",
    "401K",
    "Bonus",
    "usInvestments",
    "indiaInvestments",
    "property",
];

/// Series name to visibility flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesVisibility(BTreeMap<String, bool>);

impl Default for SeriesVisibility {
    fn default() -> Self {
        let flags = VISIBLE_BY_DEFAULT
            .iter()
            .map(|name| (name.to_string(), true))
            .chain(HIDDEN_BY_DEFAULT.iter().map(|name| (name.to_string(), false)))
            .collect();
        Self(flags)
    }
}

impl SeriesVisibility {
    pub fn is_visible(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    pub fn set(&mut self, name: impl Into<String>, visible: bool) {
        self.0.insert(name.into(), visible);
    }

    /// Flip a series, returning its new state; unknown names start hidden
    pub fn toggle(&mut self, name: &str) -> bool {
        let flag = self.0.entry(name.to_string()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn visible(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter(|(_, v)| **v).map(|(k, _)| k.as_str())
    }
}

/// One plotted line: `(year, value)` pairs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<(u32, f64)>,
}

/// Extract every visible series that the projection can supply
pub fn chart_series(result: &ProjectionResult, visibility: &SeriesVisibility) -> Vec<ChartSeries> {
    visibility
        .visible()
        .filter_map(|name| {
            let points: Option<Vec<(u32, f64)>> = result
                .points
                .iter()
                .map(|p| p.series_value(name).map(|v| (p.year, v)))
                .collect();
            points.map(|points| ChartSeries {
                name: name.to_string(),
                points,
            })
        })
        .filter(|s| !s.points.is_empty())
        .collect()
}

/// One pie slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub name: String,
    pub value: f64,
    /// Share of the pie in percent
    pub percentage: f64,
}

/// Per-category allocation, zero slices omitted
pub fn category_allocation(entries: &[InvestmentEntry]) -> Vec<AllocationSlice> {
    let total = total_assets(entries);
    category_totals(principal(entries))
        .into_iter()
        .filter(|(_, value)| *value > 0.0)
        .map(|(category, value)| slice(category_slice_name(category), value, total))
        .collect()
}

/// Per-asset-type allocation, zero slices omitted
pub fn asset_type_allocation(entries: &[InvestmentEntry], table: &AssetReturnTable) -> Vec<AllocationSlice> {
    let total = total_assets(entries);
    asset_type_totals(principal(entries), table)
        .into_iter()
        .filter(|(_, value)| *value > 0.0)
        .map(|(asset_type, value)| slice(asset_type.label().to_string(), value, total))
        .collect()
}

fn category_slice_name(category: Category) -> String {
    match category {
        Category::Us => "US Investments".to_string(),
        Category::India => "India Investments".to_string(),
        Category::Property => "Property".to_string(),
    }
}

fn slice(name: String, value: f64, total: f64) -> AllocationSlice {
    AllocationSlice {
        name,
        value,
        percentage: if total > 0.0 { value / total * 100.0 } else { 0.0 },
    }
}
