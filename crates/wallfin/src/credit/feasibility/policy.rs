use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::config::FeasibilityConfig;
use super::rules::FeasibilitySignals;

/// Screening outcome for a credit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeasibilityStatus {
    /// Within every limit.
    Ok,
    /// Borderline; forwarded for case-by-case review.
    Limit,
    /// Debt ratio above the hard cap.
    DebtHigh,
    /// Residual income below the household minimum.
    IncomeLow,
}

impl FeasibilityStatus {
    pub const fn code(self) -> &'static str {
        match self {
            FeasibilityStatus::Ok => "OK",
            FeasibilityStatus::Limit => "LIMIT",
            FeasibilityStatus::DebtHigh => "DEBT_HIGH",
            FeasibilityStatus::IncomeLow => "INCOME_LOW",
        }
    }

    /// Copy shown to the customer for this outcome.
    pub const fn label(self) -> &'static str {
        match self {
            FeasibilityStatus::Ok => "feasible",
            FeasibilityStatus::Limit => "case-by-case review",
            FeasibilityStatus::DebtHigh => "debt ratio too high (>33%)",
            FeasibilityStatus::IncomeLow => "residual income below minimum",
        }
    }

    /// `Limit` still counts as feasible; it only asks for a manual look.
    pub const fn is_feasible(self) -> bool {
        !matches!(
            self,
            FeasibilityStatus::DebtHigh | FeasibilityStatus::IncomeLow
        )
    }
}

impl fmt::Display for FeasibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// First matching rule wins: debt cap, residual minimum, review bands, then OK.
pub(crate) fn classify(
    config: &FeasibilityConfig,
    signals: &FeasibilitySignals,
) -> FeasibilityStatus {
    let ratio = signals.debt_ratio_percent;
    let residual = signals.residual_income;
    let minimum = signals.minimum_residual_income;

    if ratio > config.debt_ratio_cap {
        return FeasibilityStatus::DebtHigh;
    }

    if residual < minimum {
        return FeasibilityStatus::IncomeLow;
    }

    if in_review_ratio_band(config, ratio) || in_review_residual_band(config, residual, minimum) {
        return FeasibilityStatus::Limit;
    }

    FeasibilityStatus::Ok
}

fn in_review_ratio_band(config: &FeasibilityConfig, ratio: Decimal) -> bool {
    ratio > config.review_ratio_floor && ratio <= config.debt_ratio_cap
}

fn in_review_residual_band(
    config: &FeasibilityConfig,
    residual: Decimal,
    minimum: Decimal,
) -> bool {
    // A ceiling past the Decimal range sits above every residual.
    residual >= minimum
        && minimum
            .checked_mul(config.residual_review_margin)
            .map_or(true, |ceiling| residual < ceiling)
}
