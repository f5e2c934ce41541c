use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Minimum monthly income a household must keep after every charge, by household size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidualIncomeTable {
    /// Minimums for households of 1, 2, 3 and 4-or-more people, in that order.
    pub minimums: Vec<Decimal>,
    /// Used when the size cannot be mapped to an entry.
    pub fallback: Decimal,
}

impl ResidualIncomeTable {
    /// Sizes above the last entry share the last entry's minimum.
    pub fn minimum_for(&self, household_size: u8) -> Decimal {
        let largest = self.minimums.len();
        if largest == 0 {
            return self.fallback;
        }

        let clamped = usize::from(household_size).min(largest);
        clamped
            .checked_sub(1)
            .and_then(|index| self.minimums.get(index))
            .copied()
            .unwrap_or(self.fallback)
    }
}

impl Default for ResidualIncomeTable {
    fn default() -> Self {
        Self {
            minimums: vec![dec!(1500), dec!(2000), dec!(2300), dec!(2600)],
            fallback: dec!(2600),
        }
    }
}

/// Thresholds applied when screening a credit request for affordability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeasibilityConfig {
    /// Debt ratios strictly above this percentage are refused.
    pub debt_ratio_cap: Decimal,
    /// Debt ratios strictly above this percentage (and within the cap) need manual review.
    pub review_ratio_floor: Decimal,
    /// Residual incomes below `minimum * margin` need manual review.
    pub residual_review_margin: Decimal,
    pub residual_income: ResidualIncomeTable,
}

impl Default for FeasibilityConfig {
    fn default() -> Self {
        Self {
            debt_ratio_cap: dec!(33),
            review_ratio_floor: dec!(30),
            residual_review_margin: dec!(1.1),
            residual_income: ResidualIncomeTable::default(),
        }
    }
}
