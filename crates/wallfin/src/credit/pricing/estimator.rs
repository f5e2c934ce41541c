use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::durations::DurationBands;
use super::table::{ReferencePoint, ReferenceTable};

/// Smallest principal a credit product exists for.
pub const MIN_PRINCIPAL: Decimal = dec!(5001);
/// Largest principal a credit product exists for.
pub const MAX_PRINCIPAL: Decimal = dec!(100000);

/// How a quoted installment was obtained from the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimateSource {
    Exact,
    Interpolated { lower: Decimal, upper: Decimal },
    Scaled { anchor: Decimal },
}

/// Monthly installment and APR quoted for a requested principal and term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEstimate {
    pub payment: Decimal,
    pub apr: Decimal,
    pub source: EstimateSource,
}

/// Reasons a `(principal, duration)` pair cannot be priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EstimateError {
    #[error("no credit product for an amount of {principal} (accepted range 5001 to 100000)")]
    OutOfRange { principal: Decimal },
    #[error("a {duration_months}-month term is not offered for an amount of {principal}")]
    IneligibleDuration {
        principal: Decimal,
        duration_months: u16,
    },
    #[error("no reference pricing for a {duration_months}-month term")]
    NoReferenceData { duration_months: u16 },
}

/// Prices requests against a reference table, interpolating between anchor principals.
#[derive(Debug, Clone, Copy)]
pub struct PaymentEstimator {
    table: &'static ReferenceTable,
    bands: &'static DurationBands,
}

impl Default for PaymentEstimator {
    fn default() -> Self {
        Self::new(ReferenceTable::standard(), DurationBands::standard())
    }
}

impl PaymentEstimator {
    pub fn new(table: &'static ReferenceTable, bands: &'static DurationBands) -> Self {
        Self { table, bands }
    }

    pub fn table(&self) -> &'static ReferenceTable {
        self.table
    }

    pub fn eligible_durations(&self, principal: Decimal) -> &'static [u16] {
        self.bands.eligible(principal)
    }

    pub fn estimate(
        &self,
        principal: Decimal,
        duration_months: u16,
    ) -> Result<PaymentEstimate, EstimateError> {
        if principal < MIN_PRINCIPAL || principal > MAX_PRINCIPAL {
            return Err(EstimateError::OutOfRange { principal });
        }

        if !self.bands.is_eligible(principal, duration_months) {
            return Err(EstimateError::IneligibleDuration {
                principal,
                duration_months,
            });
        }

        if let Some(point) = self.table.lookup(principal, duration_months) {
            return Ok(PaymentEstimate {
                payment: point.payment,
                apr: point.apr,
                source: EstimateSource::Exact,
            });
        }

        let (lower, upper) = self
            .bracket(principal)
            .ok_or(EstimateError::NoReferenceData { duration_months })?;

        match (
            self.table.lookup(lower, duration_months),
            self.table.lookup(upper, duration_months),
        ) {
            (Some(low), Some(high)) => Ok(interpolate(principal, lower, low, upper, high)),
            _ => self.scale_from_closest(principal, duration_months),
        }
    }

    /// Anchors `lo <= principal < hi`; the outermost anchors when no pair brackets the amount.
    fn bracket(&self, principal: Decimal) -> Option<(Decimal, Decimal)> {
        let tiers = self.table.tiers();
        let bracketed = tiers.windows(2).find_map(|pair| {
            let (lower, upper) = (pair[0].principal, pair[1].principal);
            (principal >= lower && principal < upper).then_some((lower, upper))
        });

        bracketed.or_else(|| Some((self.table.smallest_anchor()?, self.table.largest_anchor()?)))
    }

    fn scale_from_closest(
        &self,
        principal: Decimal,
        duration_months: u16,
    ) -> Result<PaymentEstimate, EstimateError> {
        let (anchor, point) = self
            .table
            .tiers()
            .iter()
            .filter_map(|tier| {
                tier.point(duration_months)
                    .map(|point| (tier.principal, point))
            })
            .min_by_key(|(anchor, _)| (*anchor - principal).abs())
            .ok_or(EstimateError::NoReferenceData { duration_months })?;

        Ok(PaymentEstimate {
            payment: round_to_half(point.payment * principal / anchor),
            apr: point.apr,
            source: EstimateSource::Scaled { anchor },
        })
    }
}

fn interpolate(
    principal: Decimal,
    lower: Decimal,
    low: &ReferencePoint,
    upper: Decimal,
    high: &ReferencePoint,
) -> PaymentEstimate {
    let ratio = (principal - lower) / (upper - lower);
    let payment = low.payment + (high.payment - low.payment) * ratio;

    PaymentEstimate {
        payment: round_to_half(payment),
        apr: low.apr,
        source: EstimateSource::Interpolated { lower, upper },
    }
}

/// Round to the nearest 0.5 currency unit, halves away from zero.
pub fn round_to_half(value: Decimal) -> Decimal {
    let doubled =
        (value * dec!(2)).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    (doubled / dec!(2)).normalize()
}

/// Price a request against the standard Wallfin grid.
pub fn estimate(
    principal: Decimal,
    duration_months: u16,
) -> Result<PaymentEstimate, EstimateError> {
    PaymentEstimator::default().estimate(principal, duration_months)
}
