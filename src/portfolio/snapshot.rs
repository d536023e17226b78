//! Snapshot record exchanged with the persistence layer
//!
//! Keeps the three-collection layout (one array per category) that saved
//! portfolios use, plus the time of the last save.

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::{AssetType, Category, InvestmentEntry, Portfolio};
use crate::error::Result;

/// Stored form of an entry; the category is implied by the owning array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredInvestment {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub entry_type: String,
    pub asset_type: AssetType,
    pub amount: f64,
    pub return_rate: f64,
    #[serde(default)]
    pub allocation: f64,
}

impl StoredInvestment {
    fn from_entry(entry: &InvestmentEntry) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            entry_type: entry.entry_type.clone(),
            asset_type: entry.asset_type.clone(),
            amount: entry.amount,
            return_rate: entry.return_rate,
            allocation: entry.allocation,
        }
    }

    fn into_entry(self, category: Category) -> InvestmentEntry {
        InvestmentEntry {
            id: self.id,
            name: self.name,
            entry_type: self.entry_type,
            asset_type: self.asset_type,
            amount: self.amount,
            return_rate: self.return_rate,
            allocation: self.allocation,
            category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    #[serde(default)]
    pub us_investments: Vec<StoredInvestment>,
    #[serde(default)]
    pub india_investments: Vec<StoredInvestment>,
    #[serde(default)]
    pub property_investments: Vec<StoredInvestment>,
    pub last_updated: DateTime<Utc>,
}

impl PortfolioSnapshot {
    fn partition_mut(&mut self, category: Category) -> &mut Vec<StoredInvestment> {
        match category {
            Category::Us => &mut self.us_investments,
            Category::India => &mut self.india_investments,
            Category::Property => &mut self.property_investments,
        }
    }

    /// Read a snapshot from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let snapshot: Self = serde_json::from_reader(BufReader::new(file))?;
        info!(
            "Loaded snapshot from {} (last updated {})",
            path.as_ref().display(),
            snapshot.last_updated
        );
        Ok(snapshot)
    }

    /// Write the snapshot as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        info!("Saved snapshot to {}", path.as_ref().display());
        Ok(())
    }
}

impl Portfolio {
    /// Snapshot of the current entries, stamped with the current time
    pub fn to_snapshot(&self) -> PortfolioSnapshot {
        self.to_snapshot_at(Utc::now())
    }

    pub fn to_snapshot_at(&self, last_updated: DateTime<Utc>) -> PortfolioSnapshot {
        let mut snapshot = PortfolioSnapshot {
            us_investments: Vec::new(),
            india_investments: Vec::new(),
            property_investments: Vec::new(),
            last_updated,
        };
        for entry in self.entries() {
            snapshot
                .partition_mut(entry.category)
                .push(StoredInvestment::from_entry(entry));
        }
        snapshot
    }

    /// Rebuild a store from a snapshot; allocations are recomputed
    ///
    /// Fails on invalid amounts or rates and on ids repeated anywhere in
    /// the snapshot.
    pub fn from_snapshot(snapshot: PortfolioSnapshot) -> Result<Self> {
        let mut entries = Vec::new();
        let partitions = [
            (Category::Us, snapshot.us_investments),
            (Category::India, snapshot.india_investments),
            (Category::Property, snapshot.property_investments),
        ];
        for (category, stored) in partitions {
            entries.extend(stored.into_iter().map(|s| s.into_entry(category)));
        }
        Portfolio::with_entries(entries)
    }
}
