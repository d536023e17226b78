//! Retirement planner CLI
//!
//! Command-line interface for projecting a portfolio to a retirement goal

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use retirement_planner::{
    assumptions::Assumptions,
    portfolio::{load_investments, Portfolio, PortfolioSnapshot},
    project,
    report::{export_all, format_currency, format_percentage, investment_table, totals_row},
};

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "Project investments forward and size the savings needed for a retirement goal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a projection and print the year-by-year table
    Project {
        #[command(flatten)]
        source: PortfolioSource,

        #[command(flatten)]
        params: ParameterArgs,

        /// Print the full result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Import holdings from CSV and save them as a snapshot
    ///
    /// Required columns: Location, Name, Asset Type, Amount, Return Rate
    Import {
        /// CSV file to import
        csv: PathBuf,

        /// Snapshot file to write
        #[arg(short, long, default_value = "portfolio.json")]
        output: PathBuf,
    },
    /// Write parameters, holdings and yearly breakdown as CSV files
    Export {
        #[command(flatten)]
        source: PortfolioSource,

        #[command(flatten)]
        params: ParameterArgs,

        /// Output directory
        #[arg(short, long, default_value = "report")]
        out_dir: PathBuf,
    },
    /// Write the demonstration portfolio as a snapshot
    Sample {
        #[arg(short, long, default_value = "portfolio.json")]
        output: PathBuf,
    },
}

/// Where holdings come from; the sample portfolio when neither is given
#[derive(Args)]
struct PortfolioSource {
    /// Portfolio snapshot JSON
    #[arg(short, long, conflicts_with = "import")]
    portfolio: Option<PathBuf>,

    /// Holdings CSV
    #[arg(short, long)]
    import: Option<PathBuf>,
}

impl PortfolioSource {
    fn load(&self) -> Result<Portfolio> {
        if let Some(path) = &self.portfolio {
            let snapshot = PortfolioSnapshot::load(path)
                .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
            let portfolio = Portfolio::from_snapshot(snapshot)
                .with_context(|| format!("Invalid snapshot {}", path.display()))?;
            return Ok(portfolio);
        }
        if let Some(path) = &self.import {
            let rows = load_investments(path).with_context(|| format!("Failed to import {}", path.display()))?;
            let mut portfolio = Portfolio::new();
            portfolio.replace_all(rows)?;
            return Ok(portfolio);
        }
        Ok(Portfolio::sample())
    }
}

#[derive(Args)]
struct ParameterArgs {
    /// Directory holding parameters.json and asset_returns.csv
    #[arg(short, long)]
    assumptions: Option<PathBuf>,

    /// Retirement goal in today's money
    #[arg(long)]
    goal: Option<f64>,

    /// Years to retirement
    #[arg(long)]
    years: Option<u32>,

    /// Annual inflation in percent
    #[arg(long)]
    inflation: Option<f64>,

    /// Planned yearly contribution
    #[arg(long)]
    contribution: Option<f64>,
}

impl ParameterArgs {
    fn load(&self) -> Result<Assumptions> {
        let mut assumptions = match &self.assumptions {
            Some(dir) => Assumptions::from_path(dir)
                .with_context(|| format!("Failed to load assumptions from {}", dir.display()))?,
            None => Assumptions::default_planning(),
        };

        let params = &mut assumptions.parameters;
        if let Some(goal) = self.goal {
            params.retirement_goal = goal;
        }
        if let Some(years) = self.years {
            params.years_to_retirement = years;
        }
        if let Some(inflation) = self.inflation {
            params.inflation_rate = inflation;
        }
        if let Some(contribution) = self.contribution {
            params.yearly_contribution = contribution;
        }
        params.validate()?;

        Ok(assumptions)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Project { source, params, json } => run_project(&source, &params, json),
        Commands::Import { csv, output } => run_import(&csv, &output),
        Commands::Export { source, params, out_dir } => run_export(&source, &params, &out_dir),
        Commands::Sample { output } => {
            Portfolio::sample()
                .to_snapshot()
                .save(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Sample portfolio written to {}", output.display());
            Ok(())
        }
    }
}

fn run_project(source: &PortfolioSource, params: &ParameterArgs, json: bool) -> Result<()> {
    let portfolio = source.load()?;
    let assumptions = params.load()?;
    let result = project(portfolio.entries(), &assumptions);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let p = &assumptions.parameters;
    let summary = result.summary();

    println!("Retirement Planner v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");

    println!("Holdings:");
    println!(
        "{:<10} {:<24} {:<16} {:>14} {:>8} {:>14}",
        "Location", "Name", "Asset Type", "Amount", "Return", "15 Years"
    );
    println!("{}", "-".repeat(91));
    let rows = investment_table(portfolio.entries());
    for row in rows.iter().chain(std::iter::once(&totals_row(&rows))) {
        println!(
            "{:<10} {:<24} {:<16} {:>14} {:>8} {:>14}",
            row.location,
            row.name,
            row.asset_type,
            format_currency(row.amount),
            format_percentage(row.return_rate),
            format_currency(row.future_values[4]),
        );
    }
    println!();

    println!("Parameters:");
    println!("  Retirement goal:         {}", format_currency(p.retirement_goal));
    println!("  Years to retirement:     {}", p.years_to_retirement);
    println!("  Inflation rate:          {}", format_percentage(p.inflation_rate));
    println!("  Yearly contribution:     {}", format_currency(p.yearly_contribution));
    println!();

    println!("Results:");
    println!("  Inflation-adjusted goal: {}", format_currency(summary.real_goal));
    println!(
        "  Weighted avg return:     {}",
        format_percentage(summary.weighted_average_return * 100.0)
    );
    println!("  Required annual savings: {}", format_currency(summary.required_annual_savings));
    println!();

    println!(
        "{:>4} {:>16} {:>16} {:>16} {:>16}",
        "Year", "Total Assets", "Real Value", "Target Goal", "Add. Savings"
    );
    println!("{}", "-".repeat(72));
    for point in &result.points {
        println!(
            "{:>4} {:>16} {:>16} {:>16} {:>16}",
            point.year,
            format_currency(point.total_assets),
            format_currency(point.real_value),
            format_currency(point.target_goal),
            format_currency(point.additional_savings),
        );
    }
    println!();

    println!(
        "Final nominal assets {} ({} in today's money); goal {}",
        format_currency(summary.final_total_assets),
        format_currency(summary.final_real_value),
        if summary.goal_met { "met" } else { "not met" }
    );

    Ok(())
}

fn run_import(csv: &Path, output: &Path) -> Result<()> {
    let file = std::fs::File::open(csv).with_context(|| format!("Failed to open {}", csv.display()))?;
    let mut portfolio = Portfolio::new();
    let count = portfolio
        .import_from_reader(file)
        .with_context(|| format!("Failed to import {}", csv.display()))?;

    portfolio
        .to_snapshot()
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Imported {} investments; total {}", count, format_currency(portfolio.total_assets()));
    println!("Snapshot written to {}", output.display());
    Ok(())
}

fn run_export(source: &PortfolioSource, params: &ParameterArgs, out_dir: &Path) -> Result<()> {
    let portfolio = source.load()?;
    let assumptions = params.load()?;
    let result = project(portfolio.entries(), &assumptions);

    let paths = export_all(out_dir, portfolio.entries(), &result)
        .with_context(|| format!("Failed to export to {}", out_dir.display()))?;
    for path in paths {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
