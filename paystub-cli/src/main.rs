use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use paystub_cli::{render, request};
use paystub_core::{
    BracketMode, EstimatorOptions, FilingStatus, HealthPlan, PayStubInput, PayStubWorksheet,
    TaxYearConfig,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Pay stub and tax estimator.
///
/// Simulates a pay stub for a salary and a set of benefit elections,
/// using builtin 2025 tax tables or a JSON replacement set. Inputs come
/// from the flags below or from a JSON request file.
#[derive(Debug, Parser)]
#[command(name = "paystub", version)]
struct Cli {
    /// JSON request file; when given, the election flags are ignored.
    #[arg(long)]
    input: Option<PathBuf>,

    /// JSON tax-table file replacing the builtin 2025 tables.
    #[arg(long)]
    tax_tables: Option<PathBuf>,

    /// Annual gross income.
    #[arg(long, required_unless_present = "input")]
    gross: Option<Decimal>,

    /// Paychecks per year (24 = semi-monthly).
    #[arg(long, default_value = "24")]
    pay_periods: u32,

    /// Health plan tier, by display name (e.g. "COVA Care").
    #[arg(long, default_value = "COVA Care")]
    health_plan: String,

    /// Annual 403(b) contribution.
    #[arg(long = "annual-403b", default_value = "0")]
    annual_403b: Decimal,

    /// Treat the 403(b) as Roth.
    #[arg(long = "roth-403b")]
    roth_403b: bool,

    /// Annual 457(b) contribution.
    #[arg(long = "annual-457b", default_value = "0")]
    annual_457b: Decimal,

    /// Treat the 457(b) as Roth.
    #[arg(long = "roth-457b")]
    roth_457b: bool,

    /// Annual HSA contribution.
    #[arg(long, default_value = "0")]
    hsa: Decimal,

    /// Annual brokerage contribution.
    #[arg(long, default_value = "0")]
    brokerage: Decimal,

    /// Pension rate as a fraction of gross; defaults to the table value (0.05).
    #[arg(long)]
    pension_rate: Option<Decimal>,

    /// Parking deduction per paycheck.
    #[arg(long, default_value = "0")]
    parking: Decimal,

    /// Filing status code: S, MFJ or HOH.
    #[arg(long, default_value = "S")]
    filing_status: String,

    /// Children qualifying for the federal child tax credit.
    #[arg(long, default_value = "0")]
    children: u32,

    /// Annualize deductions and apply the standard deduction instead of
    /// taxing each paycheck directly.
    #[arg(long)]
    annualized: bool,

    /// Leave the brokerage contribution off the stub and out of the
    /// savings aggregate.
    #[arg(long)]
    no_brokerage: bool,

    /// Emit the full result as JSON instead of the formatted stub.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn to_input(&self) -> Result<PayStubInput> {
        let Some(gross) = self.gross else {
            bail!("--gross is required unless a request file is given");
        };
        let Some(health_plan) = HealthPlan::parse(&self.health_plan) else {
            bail!(
                "unknown health plan '{}'; valid tiers: {}",
                self.health_plan,
                HealthPlan::ALL.map(|p| p.as_str()).join(", ")
            );
        };
        let Some(filing_status) = FilingStatus::parse(&self.filing_status) else {
            bail!(
                "unknown filing status '{}'; valid codes: {}",
                self.filing_status,
                FilingStatus::ALL.map(|s| s.as_str()).join(", ")
            );
        };

        Ok(PayStubInput {
            gross_annual_income: gross,
            pay_periods_per_year: self.pay_periods,
            health_plan,
            annual_403b: self.annual_403b,
            roth_403b: self.roth_403b,
            annual_457b: self.annual_457b,
            roth_457b: self.roth_457b,
            annual_hsa: self.hsa,
            annual_brokerage: self.brokerage,
            pension_rate: self.pension_rate,
            parking_per_paycheck: self.parking,
            filing_status,
            qualifying_children: self.children,
        })
    }
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = match &cli.tax_tables {
        Some(path) => request::load_tax_tables(path)?,
        None => TaxYearConfig::year_2025(),
    };
    debug!(tax_year = config.tax_year, "tax tables ready");

    let input = match &cli.input {
        Some(path) => request::load_request(path)?,
        None => cli.to_input()?,
    };

    let options = EstimatorOptions {
        bracket_mode: if cli.annualized {
            BracketMode::Annualized
        } else {
            BracketMode::PerPaycheck
        },
        include_brokerage: !cli.no_brokerage,
    };

    let worksheet = PayStubWorksheet::new(&config, options);
    let result = worksheet
        .calculate(&input)
        .context("pay stub computation failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result.rounded())?);
    } else {
        print!("{}", render::render(&input, &result));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn gross_is_required_without_a_request_file() {
        let parsed = Cli::try_parse_from(["paystub"]);

        assert!(parsed.is_err());
    }

    #[test]
    fn request_file_lifts_the_gross_requirement() {
        let parsed = Cli::try_parse_from(["paystub", "--input", "request.json"]);

        assert!(parsed.is_ok());
    }

    #[test]
    fn elections_default_to_zero() {
        let cli = Cli::try_parse_from(["paystub", "--gross", "100000"]).unwrap();

        let input = cli.to_input().unwrap();

        assert_eq!(input.gross_annual_income, dec!(100000));
        assert_eq!(input.annual_403b, dec!(0));
        assert_eq!(input.annual_457b, dec!(0));
        assert_eq!(input.annual_hsa, dec!(0));
        assert_eq!(input.annual_brokerage, dec!(0));
        assert_eq!(input.parking_per_paycheck, dec!(0));
        assert_eq!(input.qualifying_children, 0);
    }
}
