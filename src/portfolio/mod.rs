//! Investment records, the entry store, snapshots and bulk import

mod data;
mod store;
mod snapshot;
pub mod loader;

pub use data::{AssetType, Category, InvestmentEntry, NewInvestment};
pub use store::{EntryUpdate, Portfolio};
pub use snapshot::{PortfolioSnapshot, StoredInvestment};
pub use loader::{load_investments, load_investments_from_reader, REQUIRED_COLUMNS};
