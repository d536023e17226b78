//! Investment entry data structures

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::report::format::future_value;

/// Category partition an investment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Us,
    India,
    Property,
}

impl Category {
    /// All partitions in display order
    pub const ALL: [Category; 3] = [Category::Us, Category::India, Category::Property];

    /// Location label used in imports and exports
    pub fn label(&self) -> &'static str {
        match self {
            Category::Us => "US",
            Category::India => "India",
            Category::Property => "Property",
        }
    }

    /// Prefix for generated entry ids
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Category::Us => "us",
            Category::India => "india",
            Category::Property => "property",
        }
    }

    /// Legacy chart series name for this partition
    pub fn series_key(&self) -> &'static str {
        match self {
            Category::Us => "usInvestments",
            Category::India => "indiaInvestments",
            Category::Property => "property",
        }
    }

    /// Parse a location label (case-insensitive)
    pub fn from_location(location: &str) -> Option<Self> {
        match location.trim().to_ascii_lowercase().as_str() {
            "us" => Some(Category::Us),
            "india" => Some(Category::India),
            "property" => Some(Category::Property),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Asset classification used to look up default return rates
///
/// Serialized as its display label so it can key JSON maps.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssetType {
    PrivateEquity,
    Stocks,
    RealEstate,
    CashDeposit,
    Cash,
    /// 401K and other retirement accounts
    Retirement,
    Bonus,
    /// User-extended asset type
    Other(String),
}

impl AssetType {
    /// Built-in asset types in table order
    pub fn builtin() -> [AssetType; 7] {
        [
            AssetType::PrivateEquity,
            AssetType::Stocks,
            AssetType::RealEstate,
            AssetType::CashDeposit,
            AssetType::Cash,
            AssetType::Retirement,
            AssetType::Bonus,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            AssetType::PrivateEquity => "Private Equity",
            AssetType::Stocks => "Stocks",
            AssetType::RealEstate => "Real Estate",
            AssetType::CashDeposit => "Cash Deposit",
            AssetType::Cash => "Cash",
            AssetType::Retirement => "401K",
            AssetType::Bonus => "Bonus",
            AssetType::Other(name) => name,
        }
    }

    /// Chart series key: the label with whitespace removed
    pub fn series_key(&self) -> String {
        self.label().split_whitespace().collect()
    }

    /// Parse a label (case-insensitive, runs of whitespace collapsed);
    /// unknown labels become `Other`
    pub fn parse(label: &str) -> Self {
        let normalized = label.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_ascii_lowercase().as_str() {
            "private equity" | "privateequity" => AssetType::PrivateEquity,
            "stocks" | "stock" => AssetType::Stocks,
            "real estate" | "realestate" => AssetType::RealEstate,
            "cash deposit" | "cashdeposit" => AssetType::CashDeposit,
            "cash" => AssetType::Cash,
            "401k" | "retirement" => AssetType::Retirement,
            "bonus" => AssetType::Bonus,
            _ => AssetType::Other(normalized),
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for AssetType {
    fn from(label: String) -> Self {
        AssetType::parse(&label)
    }
}

impl From<&str> for AssetType {
    fn from(label: &str) -> Self {
        AssetType::parse(label)
    }
}

impl From<AssetType> for String {
    fn from(asset_type: AssetType) -> Self {
        asset_type.label().to_string()
    }
}

/// A single investment holding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentEntry {
    /// Unique identifier, fixed at creation
    pub id: String,

    /// Display label
    pub name: String,

    /// Free-form holding type ("Stock Fund", "Savings", ...)
    #[serde(rename = "type", default)]
    pub entry_type: String,

    pub asset_type: AssetType,

    /// Principal amount (non-negative)
    pub amount: f64,

    /// Expected annual return in whole percent (8.0 = 8%)
    pub return_rate: f64,

    /// Share of total assets in percent, derived by the store
    #[serde(default)]
    pub allocation: f64,

    pub category: Category,
}

impl InvestmentEntry {
    /// Annual growth multiplier, `1 + rate/100`
    pub fn growth_factor(&self) -> f64 {
        1.0 + self.return_rate / 100.0
    }

    /// Value of this holding after `years` of compounding at its own rate
    pub fn future_value(&self, years: u32) -> f64 {
        future_value(self.amount, self.return_rate, years)
    }
}

/// Fields for a new investment; id and allocation are assigned by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestment {
    pub name: String,
    #[serde(rename = "type", default)]
    pub entry_type: Option<String>,
    pub asset_type: AssetType,
    pub amount: f64,
    pub return_rate: f64,
    pub category: Category,
}

impl NewInvestment {
    pub fn new(
        category: Category,
        name: impl Into<String>,
        asset_type: AssetType,
        amount: f64,
        return_rate: f64,
    ) -> Self {
        Self {
            name: name.into(),
            entry_type: None,
            asset_type,
            amount,
            return_rate,
            category,
        }
    }

    /// Set the free-form holding type label
    pub fn with_type(mut self, entry_type: impl Into<String>) -> Self {
        self.entry_type = Some(entry_type.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_location() {
        assert_eq!(Category::from_location("US"), Some(Category::Us));
        assert_eq!(Category::from_location(" india "), Some(Category::India));
        assert_eq!(Category::from_location("PROPERTY"), Some(Category::Property));
        assert_eq!(Category::from_location("Canada"), None);
    }

    #[test]
    fn test_asset_type_parse() {
        assert_eq!(AssetType::parse("Real Estate"), AssetType::RealEstate);
        assert_eq!(AssetType::parse("401K"), AssetType::Retirement);
        assert_eq!(AssetType::parse("Retirement"), AssetType::Retirement);
        assert_eq!(AssetType::parse("crypto"), AssetType::Other("crypto".into()));
    }

    #[test]
    fn test_asset_type_parse_collapses_whitespace() {
        assert_eq!(AssetType::parse("Real  Estate"), AssetType::RealEstate);
        assert_eq!(AssetType::parse("private\tequity"), AssetType::PrivateEquity);
        let gold = AssetType::parse("  Gold   Bars ");
        assert_eq!(gold, AssetType::Other("Gold Bars".into()));
        assert_eq!(gold.series_key(), "GoldBars");
    }

    #[test]
    fn test_asset_type_series_key() {
        assert_eq!(AssetType::PrivateEquity.series_key(), "PrivateEquity");
        assert_eq!(AssetType::Retirement.series_key(), "401K");
        assert_eq!(AssetType::Other("Gold Bars".into()).series_key(), "GoldBars");
    }

    #[test]
    fn test_asset_type_serializes_as_label() {
        let json = serde_json::to_string(&AssetType::CashDeposit).unwrap();
        assert_eq!(json, "\"Cash Deposit\"");
        let back: AssetType = serde_json::from_str("\"Private Equity\"").unwrap();
        assert_eq!(back, AssetType::PrivateEquity);
    }

    #[test]
    fn test_entry_future_value() {
        let entry = InvestmentEntry {
            id: "us1".into(),
            name: "Fund".into(),
            entry_type: "Stock Fund".into(),
            asset_type: AssetType::Stocks,
            amount: 100_000.0,
            return_rate: 8.0,
            allocation: 0.0,
            category: Category::Us,
        };
        assert!((entry.future_value(1) - 108_000.0).abs() < 1e-6);
        assert!((entry.growth_factor() - 1.08).abs() < 1e-12);
    }
}
