use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Observed monthly installment and APR for one `(principal, duration)` pricing point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferencePoint {
    pub duration_months: u16,
    pub payment: Decimal,
    pub apr: Decimal,
}

const fn point(duration_months: u16, payment: Decimal, apr: Decimal) -> ReferencePoint {
    ReferencePoint {
        duration_months,
        payment,
        apr,
    }
}

/// All pricing points captured for a single anchor principal, ordered by duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceTier {
    pub principal: Decimal,
    pub points: &'static [ReferencePoint],
}

impl ReferenceTier {
    pub fn point(&self, duration_months: u16) -> Option<&ReferencePoint> {
        self.points
            .iter()
            .find(|point| point.duration_months == duration_months)
    }
}

/// Hand-curated Wallfin pricing grid. The table is the source of truth for payments and APR;
/// nothing here is derived from an amortization formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceTable {
    tiers: &'static [ReferenceTier],
}

impl ReferenceTable {
    pub const fn new(tiers: &'static [ReferenceTier]) -> Self {
        Self { tiers }
    }

    /// The grid used by the client area.
    pub fn standard() -> &'static ReferenceTable {
        &STANDARD_TABLE
    }

    pub fn tiers(&self) -> &'static [ReferenceTier] {
        self.tiers
    }

    pub fn anchors(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.tiers.iter().map(|tier| tier.principal)
    }

    pub fn tier(&self, principal: Decimal) -> Option<&'static ReferenceTier> {
        self.tiers.iter().find(|tier| tier.principal == principal)
    }

    pub fn lookup(
        &self,
        principal: Decimal,
        duration_months: u16,
    ) -> Option<&'static ReferencePoint> {
        self.tier(principal)
            .and_then(|tier| tier.point(duration_months))
    }

    pub fn smallest_anchor(&self) -> Option<Decimal> {
        self.tiers.first().map(|tier| tier.principal)
    }

    pub fn largest_anchor(&self) -> Option<Decimal> {
        self.tiers.last().map(|tier| tier.principal)
    }
}

const APR_ENTRY: Decimal = dec!(12.99);
const APR_STANDARD: Decimal = dec!(7.65);

static TIER_5001: [ReferencePoint; 3] = [
    point(24, dec!(236.05), APR_ENTRY),
    point(30, dec!(194.42), APR_ENTRY),
    point(36, dec!(166.76), APR_ENTRY),
];

static TIER_10001: [ReferencePoint; 6] = [
    point(24, dec!(463.67), APR_STANDARD),
    point(30, dec!(380.35), APR_STANDARD),
    point(36, dec!(324.92), APR_STANDARD),
    point(42, dec!(272.45), APR_STANDARD),
    point(48, dec!(242.80), APR_STANDARD),
    point(60, dec!(199.89), APR_STANDARD),
];

static TIER_15001: [ReferencePoint; 8] = [
    point(24, dec!(695.49), APR_STANDARD),
    point(30, dec!(570.50), APR_STANDARD),
    point(36, dec!(487.37), APR_STANDARD),
    point(42, dec!(408.67), APR_STANDARD),
    point(48, dec!(364.19), APR_STANDARD),
    point(60, dec!(299.83), APR_STANDARD),
    point(72, dec!(258.60), APR_STANDARD),
    point(84, dec!(229.30), APR_STANDARD),
];

static TIER_20001: [ReferencePoint; 11] = [
    point(24, dec!(927.31), APR_STANDARD),
    point(30, dec!(760.66), APR_STANDARD),
    point(36, dec!(649.82), APR_STANDARD),
    point(42, dec!(544.88), APR_STANDARD),
    point(48, dec!(485.57), APR_STANDARD),
    point(60, dec!(399.77), APR_STANDARD),
    point(72, dec!(344.79), APR_STANDARD),
    point(84, dec!(305.73), APR_STANDARD),
    point(96, dec!(276.62), APR_STANDARD),
    point(108, dec!(254.14), APR_STANDARD),
    point(120, dec!(236.31), APR_STANDARD),
];

static TIER_50000: [ReferencePoint; 11] = [
    point(24, dec!(2318.16), APR_STANDARD),
    point(30, dec!(1901.57), APR_STANDARD),
    point(36, dec!(1624.47), APR_STANDARD),
    point(42, dec!(1362.14), APR_STANDARD),
    point(48, dec!(1213.88), APR_STANDARD),
    point(60, dec!(999.38), APR_STANDARD),
    point(72, dec!(861.94), APR_STANDARD),
    point(84, dec!(764.30), APR_STANDARD),
    point(96, dec!(691.53), APR_STANDARD),
    point(108, dec!(635.34), APR_STANDARD),
    point(120, dec!(590.75), APR_STANDARD),
];

static TIER_100000: [ReferencePoint; 11] = [
    point(24, dec!(4636.32), APR_STANDARD),
    point(30, dec!(3803.14), APR_STANDARD),
    point(36, dec!(3248.94), APR_STANDARD),
    point(42, dec!(2724.29), APR_STANDARD),
    point(48, dec!(2427.77), APR_STANDARD),
    point(60, dec!(1998.77), APR_STANDARD),
    point(72, dec!(1723.89), APR_STANDARD),
    point(84, dec!(1528.61), APR_STANDARD),
    point(96, dec!(1383.07), APR_STANDARD),
    point(108, dec!(1270.68), APR_STANDARD),
    point(120, dec!(1181.50), APR_STANDARD),
];

static STANDARD_TIERS: [ReferenceTier; 6] = [
    ReferenceTier {
        principal: dec!(5001),
        points: &TIER_5001,
    },
    ReferenceTier {
        principal: dec!(10001),
        points: &TIER_10001,
    },
    ReferenceTier {
        principal: dec!(15001),
        points: &TIER_15001,
    },
    ReferenceTier {
        principal: dec!(20001),
        points: &TIER_20001,
    },
    ReferenceTier {
        principal: dec!(50000),
        points: &TIER_50000,
    },
    ReferenceTier {
        principal: dec!(100000),
        points: &TIER_100000,
    },
];

static STANDARD_TABLE: ReferenceTable = ReferenceTable::new(&STANDARD_TIERS);
