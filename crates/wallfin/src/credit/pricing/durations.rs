use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// One principal band and the terms offered inside it.
///
/// `min` is inclusive. `max` is exclusive unless `max_inclusive` is set, which only the top band
/// uses so that the largest product amount stays eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationBand {
    pub min: Decimal,
    pub max: Decimal,
    pub max_inclusive: bool,
    pub durations: &'static [u16],
}

impl DurationBand {
    pub fn contains(&self, principal: Decimal) -> bool {
        if principal < self.min {
            return false;
        }
        if self.max_inclusive {
            principal <= self.max
        } else {
            principal < self.max
        }
    }
}

/// Step function from principal to the ordered set of offered durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationBands {
    bands: &'static [DurationBand],
}

impl DurationBands {
    pub const fn new(bands: &'static [DurationBand]) -> Self {
        Self { bands }
    }

    pub fn standard() -> &'static DurationBands {
        &STANDARD_BANDS
    }

    pub fn bands(&self) -> &'static [DurationBand] {
        self.bands
    }

    /// Durations offered for `principal`; empty when no product covers the amount.
    pub fn eligible(&self, principal: Decimal) -> &'static [u16] {
        self.bands
            .iter()
            .find(|band| band.contains(principal))
            .map(|band| band.durations)
            .unwrap_or(&[])
    }

    pub fn is_eligible(&self, principal: Decimal, duration_months: u16) -> bool {
        self.eligible(principal).contains(&duration_months)
    }
}

const SHORT_TERMS: [u16; 3] = [24, 30, 36];
const MEDIUM_TERMS: [u16; 6] = [24, 30, 36, 42, 48, 60];
const LONG_TERMS: [u16; 8] = [24, 30, 36, 42, 48, 60, 72, 84];
const FULL_TERMS: [u16; 11] = [24, 30, 36, 42, 48, 60, 72, 84, 96, 108, 120];

static STANDARD_BAND_TABLE: [DurationBand; 4] = [
    DurationBand {
        min: dec!(5001),
        max: dec!(10000),
        max_inclusive: false,
        durations: &SHORT_TERMS,
    },
    DurationBand {
        min: dec!(10000),
        max: dec!(15000),
        max_inclusive: false,
        durations: &MEDIUM_TERMS,
    },
    DurationBand {
        min: dec!(15000),
        max: dec!(20000),
        max_inclusive: false,
        durations: &LONG_TERMS,
    },
    DurationBand {
        min: dec!(20000),
        max: dec!(100000),
        max_inclusive: true,
        durations: &FULL_TERMS,
    },
];

static STANDARD_BANDS: DurationBands = DurationBands::new(&STANDARD_BAND_TABLE);

/// Durations the intake form may offer for `principal`.
pub fn eligible_durations(principal: Decimal) -> Vec<u16> {
    DurationBands::standard().eligible(principal).to_vec()
}
