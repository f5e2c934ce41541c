use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::config::FeasibilityConfig;

/// Derived figures the classification policy reads.
pub(crate) struct FeasibilitySignals {
    pub debt_ratio_percent: Decimal,
    pub residual_income: Decimal,
    pub minimum_residual_income: Decimal,
}

/// Returns `None` when the income is zero or a figure leaves the `Decimal` range.
pub(crate) fn measure(
    config: &FeasibilityConfig,
    monthly_income: Decimal,
    existing_charges: Decimal,
    new_installment: Decimal,
    household_size: u8,
) -> Option<FeasibilitySignals> {
    let total_charges = existing_charges.checked_add(new_installment)?;
    let debt_ratio_percent = round_cents(
        total_charges
            .checked_div(monthly_income)?
            .checked_mul(dec!(100))?,
    );
    let residual_income = round_cents(monthly_income.checked_sub(total_charges)?);
    let minimum_residual_income = config.residual_income.minimum_for(household_size);

    Some(FeasibilitySignals {
        debt_ratio_percent,
        residual_income,
        minimum_residual_income,
    })
}

pub(crate) fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
