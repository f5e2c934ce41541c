//! Installment pricing for Wallfin credit products.
//!
//! Quotes come from a hand-curated grid of observed `(amount, term) -> (installment, APR)`
//! points. Amounts between grid anchors are interpolated; the offered terms depend on the
//! amount band. Everything here reads immutable process-wide tables and is safe to call from
//! any thread.

mod durations;
mod estimator;
mod table;

pub use durations::{eligible_durations, DurationBand, DurationBands};
pub use estimator::{
    estimate, round_to_half, EstimateError, EstimateSource, PaymentEstimate, PaymentEstimator,
    MAX_PRINCIPAL, MIN_PRINCIPAL,
};
pub use table::{ReferencePoint, ReferenceTable, ReferenceTier};
