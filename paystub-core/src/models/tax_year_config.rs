use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{FilingStatus, HealthPlan, TaxBracket};

/// Errors raised when a tax-year configuration fails validation.
///
/// These are configuration-load failures, not per-request failures:
/// a config is validated once when loaded and then shared read-only.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxTableError {
    /// A bracket schedule has no entries.
    #[error("{table} bracket schedule is empty")]
    EmptySchedule { table: String },

    /// The first bracket of a schedule does not start at zero.
    #[error("{table} bracket schedule must start at zero, first floor is {floor}")]
    FirstFloorNotZero { table: String, floor: Decimal },

    /// Bracket floors are not strictly increasing.
    #[error("{table} bracket floors must be strictly increasing: {prev} then {next}")]
    NonIncreasingFloor {
        table: String,
        prev: Decimal,
        next: Decimal,
    },

    /// A marginal rate is outside the [0, 1] range.
    #[error("{table} bracket rate {rate} is outside [0, 1]")]
    RateOutOfRange { table: String, rate: Decimal },

    /// Marginal rates decrease between consecutive brackets.
    #[error("{table} bracket rates must be non-decreasing: {prev} then {next}")]
    DecreasingRate {
        table: String,
        prev: Decimal,
        next: Decimal,
    },

    /// No federal bracket schedule for a selectable filing status.
    #[error("no federal bracket schedule for filing status {0:?}")]
    MissingFederalSchedule(FilingStatus),

    /// No standard deduction for a selectable filing status.
    #[error("no standard deduction for filing status {0:?}")]
    MissingStandardDeduction(FilingStatus),

    /// A standard deduction amount is negative.
    #[error("standard deduction for {status:?} is negative: {amount}")]
    NegativeStandardDeduction {
        status: FilingStatus,
        amount: Decimal,
    },

    /// No premium for a selectable health plan tier.
    #[error("no premium for health plan {0:?}")]
    MissingHealthPlanPremium(HealthPlan),

    /// A health plan premium is negative.
    #[error("premium for {plan:?} is negative: {amount}")]
    NegativePremium { plan: HealthPlan, amount: Decimal },

    /// The per-child tax credit amount is negative.
    #[error("child tax credit is negative: {0}")]
    NegativeChildCredit(Decimal),

    /// A flat payroll rate is outside the [0, 1] range.
    #[error("{name} rate {rate} is outside [0, 1]")]
    PayrollRateOutOfRange { name: &'static str, rate: Decimal },
}

/// All jurisdiction- and year-specific reference data for the estimator.
///
/// Passed explicitly into [`PayStubWorksheet`](crate::PayStubWorksheet)
/// so multiple tax years can coexist; nothing here is global state.
/// The whole struct is serde-deserializable so a replacement table set
/// can be loaded from JSON when the yearly figures change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,

    /// Federal marginal schedules, one per filing status.
    pub federal_brackets: BTreeMap<FilingStatus, Vec<TaxBracket>>,

    /// The one regional schedule modeled (Virginia); not status-dependent.
    pub state_brackets: Vec<TaxBracket>,

    /// Annual standard deduction, applied in annualized mode only.
    pub standard_deductions: BTreeMap<FilingStatus, Decimal>,

    /// Fixed per-paycheck premium for each selectable tier.
    /// A tier missing from this table is an error, never a free plan.
    pub health_plan_costs: BTreeMap<HealthPlan, Decimal>,

    /// Nonrefundable federal credit per qualifying child.
    pub child_tax_credit: Decimal,

    /// Social security payroll rate, applied flat to gross (no wage cap).
    pub fica_rate: Decimal,

    /// Medicare payroll rate, applied flat to gross (no surtax).
    pub medicare_rate: Decimal,

    /// Pension contribution rate used when the input does not override it.
    pub default_pension_rate: Decimal,
}

impl TaxYearConfig {
    /// Builtin 2025 reference tables.
    pub fn year_2025() -> Self {
        let federal_brackets = BTreeMap::from([
            (
                FilingStatus::Single,
                vec![
                    TaxBracket::new(dec!(0), dec!(0.10)),
                    TaxBracket::new(dec!(11925), dec!(0.12)),
                    TaxBracket::new(dec!(48475), dec!(0.22)),
                    TaxBracket::new(dec!(103350), dec!(0.24)),
                ],
            ),
            (
                FilingStatus::MarriedFilingJointly,
                vec![
                    TaxBracket::new(dec!(0), dec!(0.10)),
                    TaxBracket::new(dec!(23850), dec!(0.12)),
                    TaxBracket::new(dec!(96950), dec!(0.22)),
                    TaxBracket::new(dec!(206700), dec!(0.24)),
                ],
            ),
            (
                FilingStatus::HeadOfHousehold,
                vec![
                    TaxBracket::new(dec!(0), dec!(0.10)),
                    TaxBracket::new(dec!(17000), dec!(0.12)),
                    TaxBracket::new(dec!(64850), dec!(0.22)),
                    TaxBracket::new(dec!(103350), dec!(0.24)),
                ],
            ),
        ]);

        let state_brackets = vec![
            TaxBracket::new(dec!(0), dec!(0.02)),
            TaxBracket::new(dec!(3000), dec!(0.03)),
            TaxBracket::new(dec!(5000), dec!(0.05)),
            TaxBracket::new(dec!(17000), dec!(0.0575)),
        ];

        let standard_deductions = BTreeMap::from([
            (FilingStatus::Single, dec!(14600)),
            (FilingStatus::MarriedFilingJointly, dec!(29200)),
            (FilingStatus::HeadOfHousehold, dec!(21900)),
        ]);

        let health_plan_costs = BTreeMap::from([
            (HealthPlan::CovaCare, dec!(51.50)),
            (HealthPlan::CovaCareExpandedDental, dec!(68.00)),
            (HealthPlan::CovaCareDentalVision, dec!(78.00)),
            (HealthPlan::CovaCareOonFull, dec!(88.50)),
            (HealthPlan::CovaHealthAware, dec!(8.50)),
            (HealthPlan::CovaHealthAwareDentalVision, dec!(30.00)),
            (HealthPlan::CovaHdhp, dec!(0.00)),
            (HealthPlan::KaiserHmo, dec!(43.00)),
            (HealthPlan::SentaraHmo, dec!(43.00)),
        ]);

        Self {
            tax_year: 2025,
            federal_brackets,
            state_brackets,
            standard_deductions,
            health_plan_costs,
            child_tax_credit: dec!(2000),
            fica_rate: dec!(0.062),
            medicare_rate: dec!(0.0145),
            default_pension_rate: dec!(0.05),
        }
    }

    /// Checks every table for structural problems.
    ///
    /// Call once after loading a config from an external source; the
    /// worksheet assumes a validated config and does not re-check.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaxTableError`] found.
    pub fn validate(&self) -> Result<(), TaxTableError> {
        for status in FilingStatus::ALL {
            let brackets = self
                .federal_brackets
                .get(&status)
                .ok_or(TaxTableError::MissingFederalSchedule(status))?;
            validate_schedule(&format!("federal {}", status.as_str()), brackets)?;

            let deduction = *self
                .standard_deductions
                .get(&status)
                .ok_or(TaxTableError::MissingStandardDeduction(status))?;
            if deduction < Decimal::ZERO {
                return Err(TaxTableError::NegativeStandardDeduction {
                    status,
                    amount: deduction,
                });
            }
        }

        validate_schedule("state", &self.state_brackets)?;

        for plan in HealthPlan::ALL {
            let premium = *self
                .health_plan_costs
                .get(&plan)
                .ok_or(TaxTableError::MissingHealthPlanPremium(plan))?;
            if premium < Decimal::ZERO {
                return Err(TaxTableError::NegativePremium {
                    plan,
                    amount: premium,
                });
            }
        }

        if self.child_tax_credit < Decimal::ZERO {
            return Err(TaxTableError::NegativeChildCredit(self.child_tax_credit));
        }

        for (name, rate) in [
            ("fica", self.fica_rate),
            ("medicare", self.medicare_rate),
            ("default pension", self.default_pension_rate),
        ] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(TaxTableError::PayrollRateOutOfRange { name, rate });
            }
        }

        Ok(())
    }
}

fn validate_schedule(
    table: &str,
    brackets: &[TaxBracket],
) -> Result<(), TaxTableError> {
    let Some(first) = brackets.first() else {
        return Err(TaxTableError::EmptySchedule {
            table: table.to_string(),
        });
    };

    if first.floor != Decimal::ZERO {
        return Err(TaxTableError::FirstFloorNotZero {
            table: table.to_string(),
            floor: first.floor,
        });
    }

    for bracket in brackets {
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(TaxTableError::RateOutOfRange {
                table: table.to_string(),
                rate: bracket.rate,
            });
        }
    }

    for pair in brackets.windows(2) {
        if pair[1].floor <= pair[0].floor {
            return Err(TaxTableError::NonIncreasingFloor {
                table: table.to_string(),
                prev: pair[0].floor,
                next: pair[1].floor,
            });
        }
        if pair[1].rate < pair[0].rate {
            return Err(TaxTableError::DecreasingRate {
                table: table.to_string(),
                prev: pair[0].rate,
                next: pair[1].rate,
            });
        }
    }

    Ok(())
}
