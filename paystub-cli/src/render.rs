//! Plain-text rendering of a computed pay stub.
//!
//! Presentation only; all figures come from the core result, rounded
//! through its display projection.

use std::fmt::Write;

use paystub_core::{PayStubInput, PayStubResult};
use rust_decimal::Decimal;

/// Format decimal as currency string.
fn fmt_currency(val: Decimal) -> String {
    format!("${:.2}", val)
}

/// Format a fraction of 1 as a percentage.
fn fmt_percent(rate: Decimal) -> String {
    format!("{:.2}%", rate * Decimal::ONE_HUNDRED)
}

fn line(
    out: &mut String,
    label: &str,
    value: String,
) {
    // 34 columns of label keeps the amounts aligned.
    let _ = writeln!(out, "  {label:<34}{value:>14}");
}

/// Renders the stub the way it reads on paper: per-paycheck lines first,
/// then the annual summary.
pub fn render(
    input: &PayStubInput,
    result: &PayStubResult,
) -> String {
    let r = result.rounded();
    let check = &r.per_paycheck;
    let annual = &r.annual;
    let mut out = String::new();

    let _ = writeln!(out, "Per-Paycheck Summary");
    line(&mut out, "Gross Pay:", fmt_currency(check.gross));
    line(
        &mut out,
        &format!("Health Plan ({}):", input.health_plan.as_str()),
        format!("-{}", fmt_currency(check.pretax.health_premium)),
    );
    line(
        &mut out,
        "Parking Deduction:",
        format!("-{}", fmt_currency(check.pretax.parking)),
    );
    line(
        &mut out,
        "Pension Contribution:",
        format!("-{}", fmt_currency(check.pretax.pension)),
    );
    if !check.pretax.hsa.is_zero() {
        line(
            &mut out,
            "HSA Contribution:",
            format!("-{}", fmt_currency(check.pretax.hsa)),
        );
    }
    if input.roth_403b {
        line(
            &mut out,
            "403(b) Roth Contribution (post-tax):",
            format!("-{}", fmt_currency(check.posttax.roth_403b)),
        );
    } else {
        line(
            &mut out,
            "403(b) Pre-Tax Contribution:",
            format!("-{}", fmt_currency(check.pretax.plan_403b)),
        );
    }
    if input.roth_457b {
        line(
            &mut out,
            "457(b) Roth Contribution (post-tax):",
            format!("-{}", fmt_currency(check.posttax.roth_457b)),
        );
    } else {
        line(
            &mut out,
            "457(b) Pre-Tax Contribution:",
            format!("-{}", fmt_currency(check.pretax.plan_457b)),
        );
    }
    if !check.posttax.brokerage.is_zero() {
        line(
            &mut out,
            "Brokerage Contribution (post-tax):",
            format!("-{}", fmt_currency(check.posttax.brokerage)),
        );
    }
    line(
        &mut out,
        "Total Pre-Tax Deductions:",
        fmt_currency(check.pretax_total),
    );
    line(
        &mut out,
        "Total Post-Tax Deductions:",
        fmt_currency(check.posttax_total),
    );
    line(&mut out, "Taxable Income:", fmt_currency(check.taxable_income));
    line(&mut out, "Federal Tax:", fmt_currency(check.federal_tax));
    line(&mut out, "State Tax:", fmt_currency(check.state_tax));
    line(&mut out, "FICA:", fmt_currency(check.fica));
    line(&mut out, "Medicare:", fmt_currency(check.medicare));
    line(
        &mut out,
        "Estimated Net Pay:",
        fmt_currency(check.net_pay),
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Annual Summary");
    line(&mut out, "Total Net Pay:", fmt_currency(annual.net_pay));
    line(
        &mut out,
        "Monthly Take-Home (Estimate):",
        fmt_currency(annual.monthly_take_home),
    );
    line(
        &mut out,
        "Total Savings Contributions:",
        fmt_currency(annual.total_savings),
    );
    line(&mut out, "Savings Rate:", fmt_percent(annual.savings_rate));
    line(
        &mut out,
        "Effective Tax Rate:",
        fmt_percent(annual.effective_tax_rate),
    );
    line(
        &mut out,
        "Federal Tax Without Elections:",
        fmt_currency(annual.baseline_federal_tax),
    );
    line(
        &mut out,
        "Tax Savings From Elections:",
        fmt_currency(annual.tax_savings),
    );

    out
}
