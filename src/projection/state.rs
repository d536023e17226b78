//! Working state carried from one projection year to the next

use crate::portfolio::InvestmentEntry;

/// Balances at a point in the projection
///
/// `amounts` runs parallel to the entry slice the state was built from.
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current year index (0 = today)
    pub year: u32,

    /// Working balance of each holding, unrounded
    pub amounts: Vec<f64>,

    /// Contributions plus required savings, compounded at the weighted return
    pub cumulative_savings: f64,
}

impl ProjectionState {
    /// Initialize state from holdings at their principal
    pub fn from_entries(entries: &[InvestmentEntry]) -> Self {
        Self {
            year: 0,
            amounts: entries.iter().map(|e| e.amount).collect(),
            cumulative_savings: 0.0,
        }
    }

    /// Pair each entry with its working balance
    pub fn holdings<'a>(
        &'a self,
        entries: &'a [InvestmentEntry],
    ) -> impl Iterator<Item = (&'a InvestmentEntry, f64)> + 'a {
        entries.iter().zip(self.amounts.iter().copied())
    }

    /// Sum of working balances, excluding accumulated savings
    pub fn invested_total(&self) -> f64 {
        self.amounts.iter().sum()
    }

    pub fn total_assets(&self) -> f64 {
        self.invested_total() + self.cumulative_savings
    }

    /// Advance one year
    ///
    /// Each holding grows at its own rate. The year's deposit is added to
    /// savings before the savings pot grows at the weighted return.
    pub fn advance_year(&mut self, entries: &[InvestmentEntry], annual_deposit: f64, weighted_return: f64) {
        for (amount, entry) in self.amounts.iter_mut().zip(entries) {
            *amount *= entry.growth_factor();
        }
        self.cumulative_savings = (self.cumulative_savings + annual_deposit) * (1.0 + weighted_return);
        self.year += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::Portfolio;
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_state() {
        let portfolio = Portfolio::sample();
        let state = ProjectionState::from_entries(portfolio.entries());
        assert_eq!(state.year, 0);
        assert_relative_eq!(state.total_assets(), 500_000.0);
        assert_eq!(state.cumulative_savings, 0.0);
    }

    #[test]
    fn test_advance_year() {
        let portfolio = Portfolio::sample();
        let entries = portfolio.entries();
        let mut state = ProjectionState::from_entries(entries);

        state.advance_year(entries, 1_000.0, 0.05);
        assert_eq!(state.year, 1);
        assert_relative_eq!(state.amounts[0], 108_000.0);
        assert_relative_eq!(state.amounts[3], 210_000.0);
        assert_relative_eq!(state.cumulative_savings, 1_050.0);

        state.advance_year(entries, 1_000.0, 0.05);
        // (1050 + 1000) * 1.05
        assert_relative_eq!(state.cumulative_savings, 2_152.5);
    }
}
