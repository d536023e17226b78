//! Default annual return rates by asset type

use crate::portfolio::AssetType;

/// Return used for asset types missing from the table (whole percent)
pub const FALLBACK_RETURN_RATE: f64 = 5.0;

/// Asset type → default expected annual return (whole percent)
///
/// Built-in types are always present; user-extended types can be added.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetReturnTable {
    rates: Vec<(AssetType, f64)>,
}

impl AssetReturnTable {
    /// Create from loaded CSV data, on top of the built-in defaults
    pub fn from_loaded(rates: &[(AssetType, f64)]) -> Self {
        let mut table = Self::default();
        for (asset_type, rate) in rates {
            table.set_rate(asset_type.clone(), *rate);
        }
        table
    }

    /// Default rate for an asset type, falling back to 5%
    pub fn default_rate(&self, asset_type: &AssetType) -> f64 {
        self.rates
            .iter()
            .find(|(t, _)| t == asset_type)
            .map(|(_, rate)| *rate)
            .unwrap_or(FALLBACK_RETURN_RATE)
    }

    /// Insert or override the rate for an asset type
    pub fn set_rate(&mut self, asset_type: AssetType, rate: f64) {
        match self.rates.iter_mut().find(|(t, _)| *t == asset_type) {
            Some(slot) => slot.1 = rate,
            None => self.rates.push((asset_type, rate)),
        }
    }

    /// Asset types in table order
    pub fn asset_types(&self) -> impl Iterator<Item = &AssetType> {
        self.rates.iter().map(|(t, _)| t)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for AssetReturnTable {
    fn default() -> Self {
        Self {
            rates: vec![
                (AssetType::PrivateEquity, 12.0),
                (AssetType::Stocks, 8.0),
                (AssetType::RealEstate, 5.0),
                (AssetType::CashDeposit, 2.0),
                (AssetType::Cash, 1.5),
                (AssetType::Retirement, 7.0),
                (AssetType::Bonus, 0.0),
            ],
        }
    }
}
