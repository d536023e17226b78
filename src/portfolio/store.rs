//! In-memory investment store with add/remove/update/move operations
//!
//! Every mutation recomputes the derived allocation percentages so the
//! store never holds stale allocations.

use log::{debug, info};
use std::collections::HashSet;

use super::data::{AssetType, Category, InvestmentEntry, NewInvestment};
use super::loader::load_investments_from_reader;
use crate::assumptions::AssetReturnTable;
use crate::error::{PlannerError, Result};
use crate::projection::aggregation::apply_allocations;

/// A single field edit on an existing entry
#[derive(Debug, Clone, PartialEq)]
pub enum EntryUpdate {
    Name(String),
    Amount(f64),
    ReturnRate(f64),
    /// Also resets the return rate to the table default for the new type
    AssetType(AssetType),
    Category(Category),
}

/// Unified collection of investments across all category partitions
#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    entries: Vec<InvestmentEntry>,
    next_id: u64,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing entries, keeping their ids
    ///
    /// Rejects negative or non-finite amounts, non-finite rates and
    /// repeated ids.
    pub fn with_entries(entries: Vec<InvestmentEntry>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            check_amount("amount", entry.amount)?;
            check_rate(entry.return_rate)?;
            if !seen.insert(entry.id.as_str()) {
                return Err(PlannerError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(Self::from_checked(entries))
    }

    fn from_checked(entries: Vec<InvestmentEntry>) -> Self {
        let mut portfolio = Self {
            next_id: entries.len() as u64,
            entries,
        };
        portfolio.refresh();
        portfolio
    }

    /// Demonstration portfolio used on first start and by reset
    pub fn sample() -> Self {
        let entries = vec![
            sample_entry("us1", "US Stock Fund", "Stock Fund", AssetType::Stocks, 100_000.0, 8.0, Category::Us),
            sample_entry("us2", "401K", "401K", AssetType::Retirement, 150_000.0, 7.0, Category::Us),
            sample_entry("us3", "Savings Account", "Savings", AssetType::Cash, 50_000.0, 1.5, Category::Us),
            sample_entry("in1", "Property Investment", "Property", AssetType::RealEstate, 200_000.0, 5.0, Category::India),
        ];
        Self::from_checked(entries)
    }

    pub fn entries(&self) -> &[InvestmentEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&InvestmentEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries of one partition, in insertion order
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &InvestmentEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn total_assets(&self) -> f64 {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Add a new entry and return its generated id
    pub fn add(&mut self, new: NewInvestment) -> Result<String> {
        check_amount("amount", new.amount)?;
        check_rate(new.return_rate)?;

        let id = self.generate_id(new.category);
        let entry_type = new.entry_type.unwrap_or_else(|| new.name.clone());
        self.entries.push(InvestmentEntry {
            id: id.clone(),
            name: new.name,
            entry_type,
            asset_type: new.asset_type,
            amount: new.amount,
            return_rate: new.return_rate,
            allocation: 0.0,
            category: new.category,
        });
        self.refresh();
        debug!("Added investment {}", id);
        Ok(id)
    }

    /// Remove an entry by id
    pub fn remove(&mut self, id: &str) -> Result<InvestmentEntry> {
        let idx = self.index_of(id)?;
        let removed = self.entries.remove(idx);
        self.refresh();
        debug!("Removed investment {}", id);
        Ok(removed)
    }

    /// Apply a single field edit
    pub fn update(&mut self, id: &str, update: EntryUpdate, table: &AssetReturnTable) -> Result<()> {
        let idx = self.index_of(id)?;
        match update {
            EntryUpdate::Name(name) => self.entries[idx].name = name,
            EntryUpdate::Amount(amount) => {
                check_amount("amount", amount)?;
                self.entries[idx].amount = amount;
            }
            EntryUpdate::ReturnRate(rate) => {
                check_rate(rate)?;
                self.entries[idx].return_rate = rate;
            }
            EntryUpdate::AssetType(asset_type) => {
                let entry = &mut self.entries[idx];
                entry.return_rate = table.default_rate(&asset_type);
                entry.asset_type = asset_type;
            }
            EntryUpdate::Category(category) => self.entries[idx].category = category,
        }
        self.refresh();
        Ok(())
    }

    /// Move an entry between partitions; fails if it is not in `from`
    pub fn move_entry(&mut self, id: &str, from: Category, to: Category) -> Result<()> {
        let idx = self.index_of(id)?;
        if self.entries[idx].category != from {
            return Err(PlannerError::WrongCategory {
                id: id.to_string(),
                expected: from,
            });
        }
        self.entries[idx].category = to;
        debug!("Moved investment {} from {} to {}", id, from, to);
        Ok(())
    }

    /// Scale holdings so they sum to `new_total`
    ///
    /// With a zero current total the new total is split evenly across the
    /// non-empty partitions, then evenly across entries within each.
    pub fn rescale_total(&mut self, new_total: f64) -> Result<()> {
        check_amount("total", new_total)?;
        if self.entries.is_empty() {
            return Ok(());
        }

        let current = self.total_assets();
        if current > 0.0 {
            let ratio = new_total / current;
            for entry in &mut self.entries {
                entry.amount *= ratio;
            }
        } else {
            let populated: Vec<Category> = Category::ALL
                .into_iter()
                .filter(|c| self.entries.iter().any(|e| e.category == *c))
                .collect();
            let per_category = new_total / populated.len() as f64;
            for category in populated {
                let count = self.in_category(category).count() as f64;
                for entry in self.entries.iter_mut().filter(|e| e.category == category) {
                    entry.amount = per_category / count;
                }
            }
        }
        self.refresh();
        Ok(())
    }

    /// Discard all entries and restore the demonstration data
    pub fn reset_to_sample(&mut self) {
        *self = Self::sample();
        info!("Portfolio reset to sample data");
    }

    /// Replace every entry at once, assigning fresh ids
    pub fn replace_all(&mut self, new_entries: Vec<NewInvestment>) -> Result<()> {
        for new in &new_entries {
            check_amount("amount", new.amount)?;
            check_rate(new.return_rate)?;
        }
        self.entries.clear();
        self.next_id = 0;
        for new in new_entries {
            self.add(new)?;
        }
        Ok(())
    }

    /// Bulk-import CSV rows, replacing all entries only if every row validates
    pub fn import_from_reader<R: std::io::Read>(&mut self, reader: R) -> Result<usize> {
        let rows = load_investments_from_reader(reader)?;
        let count = rows.len();
        self.replace_all(rows)?;
        info!("Imported {} investments", count);
        Ok(count)
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| PlannerError::EntryNotFound(id.to_string()))
    }

    fn generate_id(&mut self, category: Category) -> String {
        loop {
            self.next_id += 1;
            let id = format!("{}{}", category.id_prefix(), self.next_id);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn refresh(&mut self) {
        apply_allocations(&mut self.entries);
    }
}

fn sample_entry(
    id: &str,
    name: &str,
    entry_type: &str,
    asset_type: AssetType,
    amount: f64,
    return_rate: f64,
    category: Category,
) -> InvestmentEntry {
    InvestmentEntry {
        id: id.to_string(),
        name: name.to_string(),
        entry_type: entry_type.to_string(),
        asset_type,
        amount,
        return_rate,
        allocation: 0.0,
        category,
    }
}

fn check_amount(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(PlannerError::InvalidAmount { field, value });
    }
    Ok(())
}

fn check_rate(value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(PlannerError::InvalidRate(value));
    }
    Ok(())
}
