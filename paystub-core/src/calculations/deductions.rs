//! Contribution classification.
//!
//! Every deduction on the stub lands in one of two pools: pre-tax
//! amounts reduce taxable income, post-tax amounts come out of net pay
//! after taxes. Pension, benefit premiums and HSA are always pre-tax;
//! brokerage is always post-tax; the 403(b) and 457(b) follow their
//! Roth flags independently of each other.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-paycheck amounts subtracted from gross before computing taxable income.
///
/// A retirement plan elected as Roth appears here as zero and in
/// [`PosttaxComponents`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PretaxComponents {
    pub pension: Decimal,
    pub health_premium: Decimal,
    pub parking: Decimal,
    pub hsa: Decimal,
    pub plan_403b: Decimal,
    pub plan_457b: Decimal,
}

impl PretaxComponents {
    pub fn total(&self) -> Decimal {
        self.pension + self.health_premium + self.parking + self.hsa + self.plan_403b
            + self.plan_457b
    }
}

/// Per-paycheck amounts subtracted from net pay after taxes.
///
/// None of these reduce taxable income; Roth and brokerage amounts
/// still count toward the savings aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosttaxComponents {
    pub roth_403b: Decimal,
    pub roth_457b: Decimal,
    pub brokerage: Decimal,
}

impl PosttaxComponents {
    pub fn total(&self) -> Decimal {
        self.roth_403b + self.roth_457b + self.brokerage
    }
}

/// Both deduction pools for one paycheck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionPools {
    pub pretax: PretaxComponents,
    pub posttax: PosttaxComponents,
}

/// Assigns each per-paycheck contribution to its pool.
///
/// Amounts are taken as given; the worksheet rejects negative inputs
/// before classification.
#[allow(clippy::too_many_arguments)]
pub fn classify_contributions(
    pension: Decimal,
    health_premium: Decimal,
    parking: Decimal,
    hsa: Decimal,
    contribution_403b: Decimal,
    roth_403b: bool,
    contribution_457b: Decimal,
    roth_457b: bool,
    brokerage: Decimal,
) -> DeductionPools {
    let (pretax_403b, posttax_403b) = if roth_403b {
        (Decimal::ZERO, contribution_403b)
    } else {
        (contribution_403b, Decimal::ZERO)
    };
    let (pretax_457b, posttax_457b) = if roth_457b {
        (Decimal::ZERO, contribution_457b)
    } else {
        (contribution_457b, Decimal::ZERO)
    };

    DeductionPools {
        pretax: PretaxComponents {
            pension,
            health_premium,
            parking,
            hsa,
            plan_403b: pretax_403b,
            plan_457b: pretax_457b,
        },
        posttax: PosttaxComponents {
            roth_403b: posttax_403b,
            roth_457b: posttax_457b,
            brokerage,
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn classify(
        roth_403b: bool,
        roth_457b: bool,
    ) -> DeductionPools {
        classify_contributions(
            dec!(302.34375),
            dec!(51.50),
            dec!(46.00),
            dec!(20.00),
            dec!(750.00),
            roth_403b,
            dec!(750.00),
            roth_457b,
            dec!(100.00),
        )
    }

    #[test]
    fn fixed_benefits_and_hsa_are_always_pretax() {
        let pools = classify(true, true);

        assert_eq!(pools.pretax.pension, dec!(302.34375));
        assert_eq!(pools.pretax.health_premium, dec!(51.50));
        assert_eq!(pools.pretax.parking, dec!(46.00));
        assert_eq!(pools.pretax.hsa, dec!(20.00));
    }

    #[test]
    fn brokerage_is_always_posttax() {
        let traditional = classify(false, false);
        let roth = classify(true, true);

        assert_eq!(traditional.posttax.brokerage, dec!(100.00));
        assert_eq!(roth.posttax.brokerage, dec!(100.00));
    }

    #[test]
    fn traditional_plans_land_in_pretax_pool() {
        let pools = classify(false, false);

        assert_eq!(pools.pretax.plan_403b, dec!(750.00));
        assert_eq!(pools.pretax.plan_457b, dec!(750.00));
        assert_eq!(pools.posttax.roth_403b, dec!(0));
        assert_eq!(pools.posttax.roth_457b, dec!(0));
    }

    #[test]
    fn roth_flags_classify_each_plan_independently() {
        let pools = classify(true, false);

        assert_eq!(pools.pretax.plan_403b, dec!(0));
        assert_eq!(pools.posttax.roth_403b, dec!(750.00));
        assert_eq!(pools.pretax.plan_457b, dec!(750.00));
        assert_eq!(pools.posttax.roth_457b, dec!(0));
    }

    #[test]
    fn roth_election_moves_exactly_its_amount_between_pools() {
        let traditional = classify(false, false);
        let roth = classify(true, false);

        assert_eq!(
            traditional.pretax.total() - roth.pretax.total(),
            dec!(750.00)
        );
        assert_eq!(
            roth.posttax.total() - traditional.posttax.total(),
            dec!(750.00)
        );
    }

    #[test]
    fn pool_totals_sum_their_components() {
        let pools = classify(false, true);

        assert_eq!(
            pools.pretax.total(),
            dec!(302.34375) + dec!(51.50) + dec!(46.00) + dec!(20.00) + dec!(750.00)
        );
        assert_eq!(pools.posttax.total(), dec!(750.00) + dec!(100.00));
    }
}
