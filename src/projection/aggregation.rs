//! Portfolio aggregation: totals, allocations and weighted average return

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::assumptions::AssetReturnTable;
use crate::portfolio::{AssetType, Category, InvestmentEntry};

/// Weighted return used when the portfolio holds nothing (fraction)
pub const FALLBACK_WEIGHTED_RETURN: f64 = 0.05;

/// Aggregate view of a portfolio snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    pub total_assets: f64,
    pub by_category: BTreeMap<Category, f64>,
    pub by_asset_type: BTreeMap<AssetType, f64>,
    /// Fraction, e.g. 0.08 for 8%
    pub weighted_average_return: f64,
}

/// Aggregate a snapshot of entries at their principal amounts
pub fn aggregate(entries: &[InvestmentEntry], table: &AssetReturnTable) -> PortfolioTotals {
    PortfolioTotals {
        total_assets: total_assets(entries),
        by_category: category_totals(principal(entries)),
        by_asset_type: asset_type_totals(principal(entries), table),
        weighted_average_return: weighted_average_return(entries),
    }
}

/// Pair each entry with its principal amount
pub fn principal(entries: &[InvestmentEntry]) -> impl Iterator<Item = (&InvestmentEntry, f64)> {
    entries.iter().map(|e| (e, e.amount))
}

pub fn total_assets(entries: &[InvestmentEntry]) -> f64 {
    entries.iter().map(|e| e.amount).sum()
}

/// Subtotal per category; every partition is present, empty ones at zero
pub fn category_totals<'a, I>(holdings: I) -> BTreeMap<Category, f64>
where
    I: IntoIterator<Item = (&'a InvestmentEntry, f64)>,
{
    let mut totals: BTreeMap<Category, f64> = Category::ALL.iter().map(|c| (*c, 0.0)).collect();
    for (entry, amount) in holdings {
        *totals.entry(entry.category).or_insert(0.0) += amount;
    }
    totals
}

/// Subtotal per asset type
///
/// Every type in the return table is present (zero if unheld); types held
/// but missing from the table are added so the subtotals cover all assets.
pub fn asset_type_totals<'a, I>(holdings: I, table: &AssetReturnTable) -> BTreeMap<AssetType, f64>
where
    I: IntoIterator<Item = (&'a InvestmentEntry, f64)>,
{
    let mut totals: BTreeMap<AssetType, f64> = table.asset_types().map(|t| (t.clone(), 0.0)).collect();
    for (entry, amount) in holdings {
        *totals.entry(entry.asset_type.clone()).or_insert(0.0) += amount;
    }
    totals
}

/// Amount-weighted mean return as a fraction
///
/// Exactly 0.05 when total assets are zero.
pub fn weighted_average_return(entries: &[InvestmentEntry]) -> f64 {
    let total = total_assets(entries);
    if total == 0.0 {
        return FALLBACK_WEIGHTED_RETURN;
    }

    entries
        .iter()
        .map(|e| (e.amount / total) * (e.return_rate / 100.0))
        .sum()
}

/// Recompute every entry's allocation against the current total
///
/// Allocations are zeroed when the total is zero.
pub fn apply_allocations(entries: &mut [InvestmentEntry]) {
    let total = total_assets(entries);
    for entry in entries.iter_mut() {
        entry.allocation = if total > 0.0 {
            entry.amount / total * 100.0
        } else {
            0.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::Portfolio;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn entry(id: &str, category: Category, asset_type: AssetType, amount: f64, rate: f64) -> InvestmentEntry {
        InvestmentEntry {
            id: id.into(),
            name: id.into(),
            entry_type: String::new(),
            asset_type,
            amount,
            return_rate: rate,
            allocation: 0.0,
            category,
        }
    }

    #[test]
    fn test_sample_aggregation() {
        let portfolio = Portfolio::sample();
        let totals = aggregate(portfolio.entries(), &AssetReturnTable::default());

        assert_relative_eq!(totals.total_assets, 500_000.0);
        assert_relative_eq!(totals.by_category[&Category::Us], 300_000.0);
        assert_relative_eq!(totals.by_category[&Category::India], 200_000.0);
        assert_eq!(totals.by_category[&Category::Property], 0.0);
        assert_relative_eq!(totals.by_asset_type[&AssetType::Retirement], 150_000.0);
        assert_eq!(totals.by_asset_type[&AssetType::PrivateEquity], 0.0);

        // (100k*8 + 150k*7 + 50k*1.5 + 200k*5) / 500k / 100
        assert_relative_eq!(totals.weighted_average_return, 0.0585, epsilon = 1e-12);
    }

    #[test]
    fn test_category_totals_sum_to_total() {
        let portfolio = Portfolio::sample();
        let totals = aggregate(portfolio.entries(), &AssetReturnTable::default());
        let sum: f64 = totals.by_category.values().sum();
        assert_relative_eq!(sum, totals.total_assets);
    }

    #[test]
    fn test_unlisted_asset_type_included() {
        let entries = vec![entry("a", Category::Us, AssetType::Other("Gold".into()), 10.0, 3.0)];
        let totals = asset_type_totals(principal(&entries), &AssetReturnTable::default());
        assert_eq!(totals[&AssetType::Other("Gold".into())], 10.0);
        assert_eq!(totals.len(), 8);
    }

    #[test]
    fn test_weighted_return_fallback() {
        assert_eq!(weighted_average_return(&[]), 0.05);

        let zeros = vec![entry("a", Category::Us, AssetType::Stocks, 0.0, 8.0)];
        assert_eq!(weighted_average_return(&zeros), 0.05);
    }

    #[test]
    fn test_allocations_zero_total() {
        let mut entries = vec![
            entry("a", Category::Us, AssetType::Stocks, 0.0, 8.0),
            entry("b", Category::India, AssetType::Cash, 0.0, 1.5),
        ];
        entries[0].allocation = 55.0;
        apply_allocations(&mut entries);
        assert!(entries.iter().all(|e| e.allocation == 0.0));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_allocations_sum_to_100(amounts in proptest::collection::vec(0.0f64..1e7, 1..12)) {
            prop_assume!(amounts.iter().sum::<f64>() > 0.0);
            let mut entries: Vec<InvestmentEntry> = amounts
                .iter()
                .enumerate()
                .map(|(i, a)| entry(&format!("e{i}"), Category::ALL[i % 3], AssetType::Stocks, *a, 8.0))
                .collect();
            apply_allocations(&mut entries);
            let sum: f64 = entries.iter().map(|e| e.allocation).sum();
            prop_assert!((sum - 100.0).abs() < 1e-9, "allocation sum {}", sum);
        }

        #[test]
        fn prop_weighted_return_within_rate_bounds(
            holdings in proptest::collection::vec((1.0f64..1e6, 0.0f64..20.0), 1..10)
        ) {
            let entries: Vec<InvestmentEntry> = holdings
                .iter()
                .enumerate()
                .map(|(i, (a, r))| entry(&format!("e{i}"), Category::Us, AssetType::Stocks, *a, *r))
                .collect();
            let min = holdings.iter().map(|(_, r)| *r).fold(f64::INFINITY, f64::min) / 100.0;
            let max = holdings.iter().map(|(_, r)| *r).fold(f64::NEG_INFINITY, f64::max) / 100.0;
            let weighted = weighted_average_return(&entries);
            prop_assert!(weighted >= min - 1e-12 && weighted <= max + 1e-12);
        }
    }
}
