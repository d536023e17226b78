//! CSV export of parameters, current holdings and the yearly breakdown

use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::format::{future_value, FUTURE_VALUE_HORIZONS};
use crate::error::Result;
use crate::portfolio::{Category, InvestmentEntry};
use crate::projection::ProjectionResult;

pub const PARAMETERS_FILE: &str = "parameters.csv";
pub const INVESTMENTS_FILE: &str = "current_investments.csv";
pub const BREAKDOWN_FILE: &str = "year_by_year.csv";

/// One line of the investment table with fixed-horizon future values
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentTableRow {
    pub location: String,
    pub name: String,
    pub asset_type: String,
    pub amount: f64,
    pub return_rate: f64,
    /// Parallel to `FUTURE_VALUE_HORIZONS`
    pub future_values: [f64; 5],
}

impl InvestmentTableRow {
    pub fn from_entry(entry: &InvestmentEntry) -> Self {
        Self {
            location: entry.category.label().to_string(),
            name: entry.name.clone(),
            asset_type: entry.asset_type.label().to_string(),
            amount: entry.amount,
            return_rate: entry.return_rate,
            future_values: FUTURE_VALUE_HORIZONS.map(|y| future_value(entry.amount, entry.return_rate, y)),
        }
    }
}

/// Rows ordered US, India, Property, keeping entry order within a category
pub fn investment_table(entries: &[InvestmentEntry]) -> Vec<InvestmentTableRow> {
    Category::ALL
        .iter()
        .flat_map(|c| entries.iter().filter(move |e| e.category == *c))
        .map(InvestmentTableRow::from_entry)
        .collect()
}

/// Column sums; the return rate is the amount-weighted average
pub fn totals_row(rows: &[InvestmentTableRow]) -> InvestmentTableRow {
    let amount: f64 = rows.iter().map(|r| r.amount).sum();
    let return_rate = if amount > 0.0 {
        rows.iter().map(|r| r.amount * r.return_rate).sum::<f64>() / amount
    } else {
        0.0
    };
    let mut future_values = [0.0; 5];
    for row in rows {
        for (total, value) in future_values.iter_mut().zip(row.future_values) {
            *total += value;
        }
    }

    InvestmentTableRow {
        location: "Total".to_string(),
        name: String::new(),
        asset_type: String::new(),
        amount,
        return_rate,
        future_values,
    }
}

/// Parameter, Value, Notes
pub fn write_parameters<W: Write>(writer: W, result: &ProjectionResult) -> Result<()> {
    let params = &result.parameters;
    let savings = &result.savings;
    let rows: [(&str, f64, &str); 8] = [
        ("Current Total Assets", savings.current_assets, "Total current investments"),
        ("Retirement Goal", params.retirement_goal, "Target amount"),
        ("Years to Retirement", params.years_to_retirement as f64, "Planning horizon"),
        ("Inflation Rate", params.inflation_rate, "Annual inflation rate (%)"),
        ("Required Annual Savings", savings.required_annual_savings, "Additional savings needed per year"),
        ("Yearly Contribution", params.yearly_contribution, "Planned annual contribution"),
        ("Inflation-Adjusted Goal", savings.real_goal, "Goal adjusted for inflation"),
        (
            "Weighted Average Return",
            savings.weighted_return * 100.0,
            "Portfolio weighted average return (%)",
        ),
    ];

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Parameter", "Value", "Notes"])?;
    for (name, value, notes) in rows {
        let value = value.to_string();
        wtr.write_record([name, value.as_str(), notes])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Location, Name, Asset Type, Amount, Return Rate, then one column per horizon
pub fn write_investments<W: Write>(writer: W, entries: &[InvestmentEntry]) -> Result<()> {
    let mut header = vec![
        "Location".to_string(),
        "Name".to_string(),
        "Asset Type".to_string(),
        "Amount".to_string(),
        "Return Rate".to_string(),
    ];
    header.extend(FUTURE_VALUE_HORIZONS.iter().map(|y| horizon_label(*y)));

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&header)?;
    for row in investment_table(entries) {
        let mut record = vec![
            row.location,
            row.name,
            row.asset_type,
            row.amount.to_string(),
            row.return_rate.to_string(),
        ];
        record.extend(row.future_values.iter().map(|v| format!("{:.2}", v)));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Year, Total Assets, Real Value, Additional Savings, Inflation Factor, Notes
pub fn write_year_by_year<W: Write>(writer: W, result: &ProjectionResult) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "Year",
        "Total Assets",
        "Real Value",
        "Additional Savings",
        "Inflation Factor",
        "Notes",
    ])?;
    for point in &result.points {
        let notes = if point.year == 0 { "Initial Year" } else { "Projected" };
        wtr.write_record([
            point.year.to_string(),
            point.total_assets.to_string(),
            point.real_value.to_string(),
            point.additional_savings.to_string(),
            format!("{:.6}", point.inflation_factor),
            notes.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write all three documents into `dir`, returning the created paths
pub fn export_all(dir: &Path, entries: &[InvestmentEntry], result: &ProjectionResult) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let parameters = dir.join(PARAMETERS_FILE);
    write_parameters(File::create(&parameters)?, result)?;

    let investments = dir.join(INVESTMENTS_FILE);
    write_investments(File::create(&investments)?, entries)?;

    let breakdown = dir.join(BREAKDOWN_FILE);
    write_year_by_year(File::create(&breakdown)?, result)?;

    info!("Exported report to {}", dir.display());
    Ok(vec![parameters, investments, breakdown])
}

fn horizon_label(years: u32) -> String {
    if years == 1 {
        "1 Year".to_string()
    } else {
        format!("{} Years", years)
    }
}
