pub mod feasibility;
pub mod pricing;
mod quote;
pub mod requests;

pub use quote::{CreditQuote, CreditQuoter, QuoteError, QuoteRequest};
