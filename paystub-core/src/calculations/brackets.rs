//! Marginal bracket tax engine.
//!
//! Both the federal and regional schedules use the same arithmetic: each
//! bracket's rate applies only to the slice of income between its floor
//! and the next bracket's floor, and the last bracket is open-ended.
//! Credits are handled separately because they subtract from tax, not
//! from income.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paystub_core::TaxBracket;
//! use paystub_core::calculations::marginal_tax;
//!
//! let schedule = vec![
//!     TaxBracket::new(dec!(0), dec!(0.10)),
//!     TaxBracket::new(dec!(11925), dec!(0.12)),
//! ];
//!
//! // 11925 * 0.10 + (20000 - 11925) * 0.12
//! assert_eq!(marginal_tax(&schedule, dec!(20000)), dec!(2161.50));
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::max;
use crate::models::TaxBracket;

/// Computes tax owed on `taxable_income` under a marginal schedule.
///
/// The schedule must be validated ([`TaxYearConfig::validate`]) so the
/// floors are strictly increasing from zero. Income at or below zero
/// owes nothing; the result is never negative.
///
/// [`TaxYearConfig::validate`]: crate::TaxYearConfig::validate
pub fn marginal_tax(
    brackets: &[TaxBracket],
    taxable_income: Decimal,
) -> Decimal {
    if taxable_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut tax = Decimal::ZERO;
    for (i, bracket) in brackets.iter().enumerate() {
        if taxable_income <= bracket.floor {
            break;
        }
        // The next floor closes this band; the last band never closes.
        let band_top = match brackets.get(i + 1) {
            Some(next) => taxable_income.min(next.floor),
            None => taxable_income,
        };
        tax += (band_top - bracket.floor) * bracket.rate;
    }
    tax
}

/// Applies a nonrefundable per-child credit to a computed tax amount.
///
/// The credit can zero the tax but never turn it into a refund.
pub fn apply_child_credit(
    tax: Decimal,
    qualifying_children: u32,
    credit_per_child: Decimal,
) -> Decimal {
    let credit = Decimal::from(qualifying_children) * credit_per_child;
    max(tax - credit, Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn federal_single() -> Vec<TaxBracket> {
        vec![
            TaxBracket::new(dec!(0), dec!(0.10)),
            TaxBracket::new(dec!(11925), dec!(0.12)),
            TaxBracket::new(dec!(48475), dec!(0.22)),
            TaxBracket::new(dec!(103350), dec!(0.24)),
        ]
    }

    fn virginia() -> Vec<TaxBracket> {
        vec![
            TaxBracket::new(dec!(0), dec!(0.02)),
            TaxBracket::new(dec!(3000), dec!(0.03)),
            TaxBracket::new(dec!(5000), dec!(0.05)),
            TaxBracket::new(dec!(17000), dec!(0.0575)),
        ]
    }

    #[test]
    fn zero_income_owes_nothing() {
        let result = marginal_tax(&federal_single(), dec!(0));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn negative_income_owes_nothing() {
        let result = marginal_tax(&federal_single(), dec!(-500));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn income_inside_first_band_uses_first_rate_only() {
        let result = marginal_tax(&federal_single(), dec!(10000));

        assert_eq!(result, dec!(1000.00));
    }

    #[test]
    fn band_boundary_is_taxed_entirely_at_lower_rate() {
        let result = marginal_tax(&federal_single(), dec!(11925));

        assert_eq!(result, dec!(1192.50));
    }

    #[test]
    fn income_spanning_two_bands_is_taxed_marginally() {
        // 11925 * 0.10 + (30000 - 11925) * 0.12 = 1192.50 + 2169.00
        let result = marginal_tax(&federal_single(), dec!(30000));

        assert_eq!(result, dec!(3361.50));
    }

    #[test]
    fn top_band_is_open_ended() {
        // 1192.50 + 4386.00 + 12072.50 + (500000 - 103350) * 0.24
        let result = marginal_tax(&federal_single(), dec!(500000));

        assert_eq!(result, dec!(112847.00));
    }

    #[test]
    fn state_schedule_uses_its_own_bands() {
        // 3000 * 0.02 + (4147.03125 - 3000) * 0.03
        let result = marginal_tax(&virginia(), dec!(4147.03125));

        assert_eq!(result, dec!(94.4109375));
    }

    #[test]
    fn single_bracket_schedule_is_flat() {
        let flat = vec![TaxBracket::new(dec!(0), dec!(0.05))];

        let result = marginal_tax(&flat, dec!(123456));

        assert_eq!(result, dec!(6172.80));
    }

    #[test]
    fn tax_is_monotonic_in_income() {
        let schedule = federal_single();
        let mut prev = dec!(0);
        let mut income = dec!(0);

        while income < dec!(250000) {
            let tax = marginal_tax(&schedule, income);
            assert!(tax >= prev, "tax decreased at income {income}");
            prev = tax;
            income += dec!(7777);
        }
    }

    #[test]
    fn child_credit_with_zero_children_is_identity() {
        let result = apply_child_credit(dec!(9952.875), 0, dec!(2000));

        assert_eq!(result, dec!(9952.875));
    }

    #[test]
    fn child_credit_subtracts_per_child() {
        let result = apply_child_credit(dec!(9952.875), 2, dec!(2000));

        assert_eq!(result, dec!(5952.875));
    }

    #[test]
    fn child_credit_is_nonrefundable() {
        let result = apply_child_credit(dec!(1500), 3, dec!(2000));

        assert_eq!(result, dec!(0));
    }
}
