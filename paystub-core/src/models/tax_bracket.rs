use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One band of a marginal tax schedule.
///
/// A schedule is an ordered list of brackets; each bracket's rate applies
/// to income above its `floor` up to the next bracket's floor. The last
/// bracket is open-ended: its rate applies to everything above its floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub floor: Decimal,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        floor: Decimal,
        rate: Decimal,
    ) -> Self {
        Self { floor, rate }
    }
}
