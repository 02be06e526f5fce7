//! Integration tests that exercise the JSON loaders against on-disk
//! fixture files.
//!
//! These complement the unit tests inside request.rs (which use inline
//! string literals) by verifying the full read-from-disk path.

use std::path::PathBuf;

use paystub_cli::request;
use paystub_core::{EstimatorOptions, FilingStatus, HealthPlan, PayStubWorksheet};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn sample_request_loads_from_disk() {
    let input = request::load_request(&fixture("sample_request.json"))
        .expect("fixture request should load without error");

    assert_eq!(input.gross_annual_income, dec!(145125));
    assert_eq!(input.pay_periods_per_year, 24);
    assert_eq!(input.health_plan, HealthPlan::CovaCare);
    assert_eq!(input.filing_status, FilingStatus::Single);
    // Absent optional fields take their defaults.
    assert_eq!(input.annual_brokerage, dec!(0));
    assert_eq!(input.pension_rate, None);
}

#[test]
fn sample_tables_load_and_validate() {
    let config = request::load_tax_tables(&fixture("sample_tables.json"))
        .expect("fixture tables should load without error");

    assert_eq!(config.tax_year, 2030);
    assert_eq!(
        config.health_plan_costs[&HealthPlan::CovaCare],
        dec!(55.00)
    );
}

#[test]
fn loaded_tables_drive_the_worksheet() {
    let config = request::load_tax_tables(&fixture("sample_tables.json")).unwrap();
    let input = request::load_request(&fixture("sample_request.json")).unwrap();

    let worksheet = PayStubWorksheet::new(&config, EstimatorOptions::default());
    let result = worksheet.calculate(&input).unwrap();

    // Premium comes from the loaded table, not the builtin one.
    assert_eq!(result.per_paycheck.pretax.health_premium, dec!(55.00));
    // Flat 4% state schedule on the per-check taxable amount.
    assert_eq!(
        result.per_paycheck.state_tax,
        result.per_paycheck.taxable_income * dec!(0.04)
    );
}

#[test]
fn malformed_tables_are_rejected_at_load() {
    let err = request::load_tax_tables(&fixture("bad_tables.json")).unwrap_err();

    assert!(err.to_string().contains("malformed tax tables"));
}

#[test]
fn missing_tables_file_reports_the_path() {
    let err = request::load_tax_tables(&fixture("no_such_tables.json")).unwrap_err();

    assert!(err.to_string().contains("no_such_tables.json"));
}
