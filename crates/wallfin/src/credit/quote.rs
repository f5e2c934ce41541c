use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::feasibility::{FeasibilityAssessment, FeasibilityConfig, FeasibilityEvaluator};
use super::pricing::{EstimateError, PaymentEstimate, PaymentEstimator};

/// Figures the intake form collects before pricing a credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub amount: Decimal,
    pub duration_months: u16,
    pub monthly_income: Decimal,
    #[serde(default)]
    pub existing_charges: Decimal,
    pub household_size: u8,
}

/// Installment estimate paired with the affordability screen it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditQuote {
    pub amount: Decimal,
    pub duration_months: u16,
    pub estimate: PaymentEstimate,
    pub assessment: FeasibilityAssessment,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    #[error(transparent)]
    Pricing(#[from] EstimateError),
    #[error("monthly income must be greater than zero (found {0})")]
    NonPositiveIncome(Decimal),
    #[error("declared income and charges are outside the supported money range")]
    AmountOverflow,
}

/// Prices a request then screens the resulting installment.
#[derive(Debug, Clone, Default)]
pub struct CreditQuoter {
    estimator: PaymentEstimator,
    evaluator: FeasibilityEvaluator,
}

impl CreditQuoter {
    pub fn new(estimator: PaymentEstimator, config: FeasibilityConfig) -> Self {
        Self {
            estimator,
            evaluator: FeasibilityEvaluator::new(config),
        }
    }

    pub fn estimator(&self) -> &PaymentEstimator {
        &self.estimator
    }

    pub fn evaluator(&self) -> &FeasibilityEvaluator {
        &self.evaluator
    }

    pub fn quote(&self, request: &QuoteRequest) -> Result<CreditQuote, QuoteError> {
        let estimate = self
            .estimator
            .estimate(request.amount, request.duration_months)?;

        if request.monthly_income <= Decimal::ZERO {
            return Err(QuoteError::NonPositiveIncome(request.monthly_income));
        }

        let assessment = self
            .evaluator
            .checked_evaluate(
                request.monthly_income,
                request.existing_charges,
                estimate.payment,
                request.household_size,
            )
            .ok_or(QuoteError::AmountOverflow)?;

        Ok(CreditQuote {
            amount: request.amount,
            duration_months: request.duration_months,
            estimate,
            assessment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credit::feasibility::FeasibilityStatus;
    use rust_decimal_macros::dec;

    fn request(amount: Decimal, duration_months: u16, monthly_income: Decimal) -> QuoteRequest {
        QuoteRequest {
            amount,
            duration_months,
            monthly_income,
            existing_charges: dec!(300),
            household_size: 2,
        }
    }

    #[test]
    fn quote_feeds_estimate_into_screen() {
        let quote = CreditQuoter::default()
            .quote(&request(dec!(15001), 60, dec!(2500)))
            .expect("quote succeeds");

        assert_eq!(quote.estimate.payment, dec!(299.83));
        assert_eq!(quote.estimate.apr, dec!(7.65));
        assert_eq!(quote.assessment.debt_ratio_percent, dec!(23.99));
        assert_eq!(quote.assessment.residual_income, dec!(1900.17));
        assert_eq!(quote.assessment.status, FeasibilityStatus::IncomeLow);
        assert!(!quote.assessment.feasible);
    }

    #[test]
    fn pricing_errors_surface_before_income_checks() {
        let err = CreditQuoter::default()
            .quote(&request(dec!(4000), 24, dec!(0)))
            .expect_err("amount out of range");
        assert!(matches!(
            err,
            QuoteError::Pricing(EstimateError::OutOfRange { .. })
        ));
    }

    #[test]
    fn zero_income_is_rejected_instead_of_evaluated() {
        let err = CreditQuoter::default()
            .quote(&request(dec!(15001), 60, dec!(0)))
            .expect_err("income required");
        assert_eq!(err, QuoteError::NonPositiveIncome(dec!(0)));
    }

    #[test]
    fn oversized_charges_are_rejected_instead_of_overflowing() {
        let err = CreditQuoter::default()
            .quote(&QuoteRequest {
                existing_charges: Decimal::MAX,
                ..request(dec!(15001), 60, dec!(2500))
            })
            .expect_err("charges overflow");
        assert_eq!(err, QuoteError::AmountOverflow);
    }

    #[test]
    fn vanishing_income_is_rejected_instead_of_overflowing() {
        let err = CreditQuoter::default()
            .quote(&QuoteRequest {
                existing_charges: dec!(100000000),
                ..request(dec!(15001), 60, Decimal::new(1, 22))
            })
            .expect_err("ratio overflows");
        assert_eq!(err, QuoteError::AmountOverflow);
    }
}
