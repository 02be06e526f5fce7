//! Pay stub simulation worksheet.
//!
//! This module computes a simulated semi-monthly pay stub and the
//! estimated tax picture behind it: how benefit elections (retirement
//! contributions, health plan tier, HSA, Roth vs. pre-tax treatment)
//! change take-home pay and tax owed.
//!
//! # Stub structure
//!
//! | Line | Description |
//! |------|-------------|
//! | 1    | Gross pay per paycheck (annual gross ÷ pay periods) |
//! | 2    | Pre-tax deductions: pension, health premium, parking, HSA, non-Roth 403(b)/457(b) |
//! | 3    | Taxable income (Line 1 − Line 2, floored at zero) |
//! | 4    | Federal tax from the marginal schedule, less the child credit |
//! | 5    | State tax from the regional marginal schedule |
//! | 6    | FICA (flat rate on gross, no wage cap) |
//! | 7    | Medicare (flat rate on gross, no surtax) |
//! | 8    | Post-tax deductions: Roth 403(b)/457(b), brokerage |
//! | 9    | Net pay (Line 1 − Lines 2, 4, 5, 6, 7, 8) |
//!
//! The annual block aggregates Line 9 across pay periods and adds the
//! savings rate, effective tax rate, and a no-election federal baseline.
//!
//! # Bracket modes
//!
//! Two deliberately different computations are offered (see
//! [`BracketMode`]): applying the schedules directly to the reduced
//! per-paycheck amount approximates payroll withholding; annualizing
//! first and applying the standard deduction approximates the actual
//! return. Neither is a bug; they answer different questions.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paystub_core::{FilingStatus, HealthPlan, TaxYearConfig};
//! use paystub_core::calculations::{EstimatorOptions, PayStubInput, PayStubWorksheet};
//!
//! let config = TaxYearConfig::year_2025();
//! let input = PayStubInput {
//!     gross_annual_income: dec!(145125),
//!     pay_periods_per_year: 24,
//!     health_plan: HealthPlan::CovaCare,
//!     annual_403b: dec!(18000),
//!     roth_403b: false,
//!     annual_457b: dec!(18000),
//!     roth_457b: false,
//!     annual_hsa: dec!(0),
//!     annual_brokerage: dec!(0),
//!     pension_rate: None,
//!     parking_per_paycheck: dec!(46.00),
//!     filing_status: FilingStatus::Single,
//!     qualifying_children: 0,
//! };
//!
//! let worksheet = PayStubWorksheet::new(&config, EstimatorOptions::default());
//! let result = worksheet.calculate(&input).unwrap();
//!
//! assert_eq!(result.per_paycheck.taxable_income, dec!(4147.03125));
//! assert_eq!(result.per_paycheck.net_pay, dec!(3175.33125));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::brackets::{apply_child_credit, marginal_tax};
use crate::calculations::common::{max, round_half_up, round_rate};
use crate::calculations::deductions::{
    classify_contributions, PosttaxComponents, PretaxComponents,
};
use crate::models::{FilingStatus, HealthPlan, TaxBracket, TaxYearConfig};

/// Errors that can occur while computing a pay stub.
///
/// Every variant names the offending field; the worksheet never clamps
/// or defaults a bad input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayStubError {
    /// Gross annual income is negative.
    #[error("gross annual income is negative: {0}")]
    NegativeIncome(Decimal),

    /// Pay periods per year is zero.
    #[error("pay periods per year must be positive")]
    ZeroPayPeriods,

    /// A contribution or deduction amount is negative.
    #[error("{field} is negative: {amount}")]
    NegativeContribution {
        field: &'static str,
        amount: Decimal,
    },

    /// The pension rate override is outside the [0, 1] range.
    #[error("pension rate {0} is outside [0, 1]")]
    PensionRateOutOfRange(Decimal),

    /// The selected health plan has no premium in the configured table.
    #[error("no premium configured for health plan {}", .0.as_str())]
    HealthPlanNotCovered(HealthPlan),

    /// The filing status has no federal bracket schedule configured.
    #[error("no federal bracket schedule for filing status {}", .0.as_str())]
    MissingFederalSchedule(FilingStatus),

    /// The filing status has no standard deduction configured
    /// (annualized mode only).
    #[error("no standard deduction for filing status {}", .0.as_str())]
    MissingStandardDeduction(FilingStatus),
}

/// How the bracket schedules are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BracketMode {
    /// Apply the schedules directly to the reduced per-paycheck amount.
    /// No standard deduction; approximates payroll withholding.
    #[default]
    PerPaycheck,

    /// Annualize pre-tax deductions, subtract the standard deduction for
    /// the filing status, tax the annual amount, and divide the result
    /// back across pay periods. Approximates the actual return.
    Annualized,
}

/// Variant flags collapsed into one parameterized model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatorOptions {
    pub bracket_mode: BracketMode,

    /// Whether the brokerage amount appears as a post-tax stub line and
    /// counts toward the savings aggregate. It never affects taxable
    /// income either way.
    pub include_brokerage: bool,
}

impl Default for EstimatorOptions {
    fn default() -> Self {
        Self {
            bracket_mode: BracketMode::PerPaycheck,
            include_brokerage: true,
        }
    }
}

/// One estimation request.
///
/// Contribution amounts are annual totals; parking is the one
/// per-paycheck figure (it is billed per check, not per year).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayStubInput {
    /// Gross annual income before any deduction.
    pub gross_annual_income: Decimal,

    /// Paychecks per year; 24 for semi-monthly payroll.
    pub pay_periods_per_year: u32,

    /// Selected health plan tier.
    pub health_plan: HealthPlan,

    /// Annual 403(b) contribution.
    pub annual_403b: Decimal,

    /// Treat the 403(b) as Roth (post-tax).
    #[serde(default)]
    pub roth_403b: bool,

    /// Annual 457(b) contribution.
    pub annual_457b: Decimal,

    /// Treat the 457(b) as Roth (post-tax).
    #[serde(default)]
    pub roth_457b: bool,

    /// Annual HSA contribution; always pre-tax.
    #[serde(default)]
    pub annual_hsa: Decimal,

    /// Annual brokerage contribution; always post-tax.
    #[serde(default)]
    pub annual_brokerage: Decimal,

    /// Pension contribution as a fraction of gross; `None` uses the
    /// configured default (5%).
    #[serde(default)]
    pub pension_rate: Option<Decimal>,

    /// Pre-tax parking deduction per paycheck.
    pub parking_per_paycheck: Decimal,

    /// Filing status; selects the federal schedule and, in annualized
    /// mode, the standard deduction.
    pub filing_status: FilingStatus,

    /// Children qualifying for the federal child tax credit.
    #[serde(default)]
    pub qualifying_children: u32,
}

impl PayStubInput {
    /// Rejects inputs the computation must not see; nothing is clamped.
    fn validate(&self) -> Result<(), PayStubError> {
        if self.gross_annual_income < Decimal::ZERO {
            return Err(PayStubError::NegativeIncome(self.gross_annual_income));
        }
        if self.pay_periods_per_year == 0 {
            return Err(PayStubError::ZeroPayPeriods);
        }
        for (field, amount) in [
            ("annual_403b", self.annual_403b),
            ("annual_457b", self.annual_457b),
            ("annual_hsa", self.annual_hsa),
            ("annual_brokerage", self.annual_brokerage),
            ("parking_per_paycheck", self.parking_per_paycheck),
        ] {
            if amount < Decimal::ZERO {
                return Err(PayStubError::NegativeContribution { field, amount });
            }
        }
        if let Some(rate) = self.pension_rate {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(PayStubError::PensionRateOutOfRange(rate));
            }
        }
        Ok(())
    }
}

/// The per-paycheck block of the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaycheckBreakdown {
    pub gross: Decimal,

    /// Pre-tax components and their total.
    pub pretax: PretaxComponents,
    pub pretax_total: Decimal,

    /// Post-tax components and their total.
    pub posttax: PosttaxComponents,
    pub posttax_total: Decimal,

    /// In per-paycheck mode, gross less pre-tax deductions; in
    /// annualized mode, the per-check share of annual taxable income.
    pub taxable_income: Decimal,

    /// Federal tax after the child credit.
    pub federal_tax: Decimal,
    pub state_tax: Decimal,
    pub fica: Decimal,
    pub medicare: Decimal,
    pub net_pay: Decimal,
}

/// The annual block of the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualSummary {
    pub net_pay: Decimal,
    pub monthly_take_home: Decimal,

    /// All retirement, HSA and pension contributions for the year,
    /// plus brokerage when included; Roth treatment does not remove an
    /// amount from savings.
    pub total_savings: Decimal,
    pub savings_rate: Decimal,

    /// (federal + state + FICA + Medicare) annualized, over gross.
    pub effective_tax_rate: Decimal,

    /// Annual federal tax with the elective 403(b)/457(b)/HSA amounts
    /// zeroed; pension, premium and parking stay deducted because they
    /// are not elective.
    pub baseline_federal_tax: Decimal,

    /// Baseline minus actual annual federal tax.
    pub tax_savings: Decimal,
}

/// Result of one pay stub computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayStubResult {
    pub per_paycheck: PaycheckBreakdown,
    pub annual: AnnualSummary,
}

impl PayStubResult {
    /// Copy of the result with currency fields rounded half-up to two
    /// places and rates to four, for display. Computation keeps full
    /// precision; only callers rendering output should use this.
    pub fn rounded(&self) -> Self {
        let p = &self.per_paycheck;
        let a = &self.annual;
        Self {
            per_paycheck: PaycheckBreakdown {
                gross: round_half_up(p.gross),
                pretax: PretaxComponents {
                    pension: round_half_up(p.pretax.pension),
                    health_premium: round_half_up(p.pretax.health_premium),
                    parking: round_half_up(p.pretax.parking),
                    hsa: round_half_up(p.pretax.hsa),
                    plan_403b: round_half_up(p.pretax.plan_403b),
                    plan_457b: round_half_up(p.pretax.plan_457b),
                },
                pretax_total: round_half_up(p.pretax_total),
                posttax: PosttaxComponents {
                    roth_403b: round_half_up(p.posttax.roth_403b),
                    roth_457b: round_half_up(p.posttax.roth_457b),
                    brokerage: round_half_up(p.posttax.brokerage),
                },
                posttax_total: round_half_up(p.posttax_total),
                taxable_income: round_half_up(p.taxable_income),
                federal_tax: round_half_up(p.federal_tax),
                state_tax: round_half_up(p.state_tax),
                fica: round_half_up(p.fica),
                medicare: round_half_up(p.medicare),
                net_pay: round_half_up(p.net_pay),
            },
            annual: AnnualSummary {
                net_pay: round_half_up(a.net_pay),
                monthly_take_home: round_half_up(a.monthly_take_home),
                total_savings: round_half_up(a.total_savings),
                savings_rate: round_rate(a.savings_rate),
                effective_tax_rate: round_rate(a.effective_tax_rate),
                baseline_federal_tax: round_half_up(a.baseline_federal_tax),
                tax_savings: round_half_up(a.tax_savings),
            },
        }
    }
}

/// Tax lines for one computation, internal to `calculate`.
///
/// The annual figures are the exact ones. A per-check line obtained by
/// dividing an annual figure can be rounded at `Decimal`'s 28-digit
/// limit when the division does not terminate, so annual aggregates
/// must come from these fields and never from a per-check line
/// multiplied back up.
struct TaxLines {
    taxable_income: Decimal,
    federal_tax: Decimal,
    state_tax: Decimal,
    federal_annual: Decimal,
    state_annual: Decimal,
    baseline_federal_annual: Decimal,
}

/// Calculator for simulated pay stubs.
///
/// Borrows a validated [`TaxYearConfig`]; the worksheet itself never
/// re-validates the tables. One instance serves any number of requests
/// concurrently (nothing here mutates).
#[derive(Debug, Clone)]
pub struct PayStubWorksheet<'a> {
    config: &'a TaxYearConfig,
    options: EstimatorOptions,
}

impl<'a> PayStubWorksheet<'a> {
    pub fn new(
        config: &'a TaxYearConfig,
        options: EstimatorOptions,
    ) -> Self {
        Self { config, options }
    }

    /// Computes the full pay stub for one request.
    ///
    /// This is the single boundary operation: a structured input record
    /// in, a structured result record out, no partial results.
    ///
    /// # Errors
    ///
    /// Returns [`PayStubError`] naming the offending field when the
    /// input is invalid or a table lookup has no entry.
    pub fn calculate(
        &self,
        input: &PayStubInput,
    ) -> Result<PayStubResult, PayStubError> {
        input.validate()?;

        let periods = Decimal::from(input.pay_periods_per_year);
        let gross_per_paycheck = input.gross_annual_income / periods;

        let health_premium = *self
            .config
            .health_plan_costs
            .get(&input.health_plan)
            .ok_or(PayStubError::HealthPlanNotCovered(input.health_plan))?;

        let pension_rate = input
            .pension_rate
            .unwrap_or(self.config.default_pension_rate);
        let pension = gross_per_paycheck * pension_rate;

        let brokerage_annual = if self.options.include_brokerage {
            input.annual_brokerage
        } else {
            Decimal::ZERO
        };

        let pools = classify_contributions(
            pension,
            health_premium,
            input.parking_per_paycheck,
            input.annual_hsa / periods,
            input.annual_403b / periods,
            input.roth_403b,
            input.annual_457b / periods,
            input.roth_457b,
            brokerage_annual / periods,
        );
        let pretax_total = pools.pretax.total();
        let posttax_total = pools.posttax.total();

        // Baseline deductions: everything that is not an election.
        let fixed_pretax = pension + health_premium + input.parking_per_paycheck;

        let taxes = match self.options.bracket_mode {
            BracketMode::PerPaycheck => self.per_paycheck_taxes(
                input,
                gross_per_paycheck,
                pretax_total,
                fixed_pretax,
                periods,
            )?,
            BracketMode::Annualized => {
                self.annualized_taxes(input, pretax_total, fixed_pretax, periods)?
            }
        };

        let fica = gross_per_paycheck * self.config.fica_rate;
        let medicare = gross_per_paycheck * self.config.medicare_rate;

        let net_pay = gross_per_paycheck
            - pretax_total
            - taxes.federal_tax
            - taxes.state_tax
            - fica
            - medicare
            - posttax_total;

        debug!(
            mode = ?self.options.bracket_mode,
            %gross_per_paycheck,
            taxable = %taxes.taxable_income,
            %net_pay,
            "pay stub computed"
        );

        let annual = self.annual_summary(
            input,
            &taxes,
            net_pay,
            fica,
            medicare,
            periods,
            pension_rate,
            brokerage_annual,
        );

        Ok(PayStubResult {
            per_paycheck: PaycheckBreakdown {
                gross: gross_per_paycheck,
                pretax: pools.pretax,
                pretax_total,
                posttax: pools.posttax,
                posttax_total,
                taxable_income: taxes.taxable_income,
                federal_tax: taxes.federal_tax,
                state_tax: taxes.state_tax,
                fica,
                medicare,
                net_pay,
            },
            annual,
        })
    }

    fn federal_schedule(
        &self,
        status: FilingStatus,
    ) -> Result<&[TaxBracket], PayStubError> {
        self.config
            .federal_brackets
            .get(&status)
            .map(Vec::as_slice)
            .ok_or(PayStubError::MissingFederalSchedule(status))
    }

    /// Withholding-style taxes: schedules applied to the per-paycheck
    /// taxable amount, no standard deduction. The annual child credit is
    /// applied to the annualized federal figure and divided back, so the
    /// credit floor holds for the year as a whole.
    fn per_paycheck_taxes(
        &self,
        input: &PayStubInput,
        gross_per_paycheck: Decimal,
        pretax_total: Decimal,
        fixed_pretax: Decimal,
        periods: Decimal,
    ) -> Result<TaxLines, PayStubError> {
        let schedule = self.federal_schedule(input.filing_status)?;

        let taxable_income = max(gross_per_paycheck - pretax_total, Decimal::ZERO);
        let federal_annual = apply_child_credit(
            marginal_tax(schedule, taxable_income) * periods,
            input.qualifying_children,
            self.config.child_tax_credit,
        );
        let state_tax = marginal_tax(&self.config.state_brackets, taxable_income);

        let baseline_taxable = max(gross_per_paycheck - fixed_pretax, Decimal::ZERO);
        let baseline_federal_annual = apply_child_credit(
            marginal_tax(schedule, baseline_taxable) * periods,
            input.qualifying_children,
            self.config.child_tax_credit,
        );

        Ok(TaxLines {
            taxable_income,
            federal_tax: federal_annual / periods,
            state_tax,
            federal_annual,
            state_annual: state_tax * periods,
            baseline_federal_annual,
        })
    }

    /// Return-style taxes: pre-tax deductions annualized into AGI, the
    /// standard deduction applied, annual schedules run, and the result
    /// divided back across pay periods.
    fn annualized_taxes(
        &self,
        input: &PayStubInput,
        pretax_total: Decimal,
        fixed_pretax: Decimal,
        periods: Decimal,
    ) -> Result<TaxLines, PayStubError> {
        let schedule = self.federal_schedule(input.filing_status)?;
        let deduction = *self
            .config
            .standard_deductions
            .get(&input.filing_status)
            .ok_or(PayStubError::MissingStandardDeduction(input.filing_status))?;

        let agi = input.gross_annual_income - pretax_total * periods;
        let taxable_annual = max(agi - deduction, Decimal::ZERO);
        let federal_annual = apply_child_credit(
            marginal_tax(schedule, taxable_annual),
            input.qualifying_children,
            self.config.child_tax_credit,
        );
        let state_annual = marginal_tax(&self.config.state_brackets, taxable_annual);

        let baseline_agi = input.gross_annual_income - fixed_pretax * periods;
        let baseline_taxable = max(baseline_agi - deduction, Decimal::ZERO);
        let baseline_federal_annual = apply_child_credit(
            marginal_tax(schedule, baseline_taxable),
            input.qualifying_children,
            self.config.child_tax_credit,
        );

        Ok(TaxLines {
            taxable_income: taxable_annual / periods,
            federal_tax: federal_annual / periods,
            state_tax: state_annual / periods,
            federal_annual,
            state_annual,
            baseline_federal_annual,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn annual_summary(
        &self,
        input: &PayStubInput,
        taxes: &TaxLines,
        net_pay: Decimal,
        fica: Decimal,
        medicare: Decimal,
        periods: Decimal,
        pension_rate: Decimal,
        brokerage_annual: Decimal,
    ) -> AnnualSummary {
        let annual_net = net_pay * periods;

        let total_savings = input.annual_403b
            + input.annual_457b
            + input.annual_hsa
            + input.gross_annual_income * pension_rate
            + brokerage_annual;

        let (savings_rate, effective_tax_rate) = if input.gross_annual_income.is_zero() {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            (
                total_savings / input.gross_annual_income,
                (taxes.federal_annual + taxes.state_annual + (fica + medicare) * periods)
                    / input.gross_annual_income,
            )
        };

        AnnualSummary {
            net_pay: annual_net,
            monthly_take_home: annual_net / Decimal::from(12),
            total_savings,
            savings_rate,
            effective_tax_rate,
            baseline_federal_tax: taxes.baseline_federal_annual,
            tax_savings: taxes.baseline_federal_annual - taxes.federal_annual,
        }
    }
}
