use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::domain::{CreditRequestStatus, CreditRequestSubmission};
use super::followup::{
    AdditionalFundsRequest, ContactRequest, EarlyRepaymentRequest, FollowUpViolation,
};
use super::intake::{IntakeGuard, IntakeViolation};
use super::notification::{
    render_additional_funds, render_contact_request, render_credit_request,
    render_early_repayment,
};
use super::numbering::RequestNumber;
use super::repository::{
    CreditRequestRecord, CreditRequestRepository, NotificationRelay, RelayError,
    RepositoryError, RequestNotification,
};
use crate::credit::feasibility::FeasibilityConfig;
use crate::credit::pricing::PaymentEstimator;
use crate::credit::{CreditQuote, CreditQuoter, QuoteError, QuoteRequest};

/// Attempts at drawing a request number that is not already stored.
const NUMBER_ATTEMPTS: usize = 3;

/// Service composing intake validation, pricing, storage and the advisor relay.
pub struct CreditRequestService<R, N> {
    guard: Arc<IntakeGuard>,
    quoter: Arc<CreditQuoter>,
    repository: Arc<R>,
    relay: Arc<N>,
}

impl<R, N> CreditRequestService<R, N>
where
    R: CreditRequestRepository + 'static,
    N: NotificationRelay + 'static,
{
    pub fn new(repository: Arc<R>, relay: Arc<N>, config: FeasibilityConfig) -> Self {
        let estimator = PaymentEstimator::default();
        Self {
            guard: Arc::new(IntakeGuard::new(estimator)),
            quoter: Arc::new(CreditQuoter::new(estimator, config)),
            repository,
            relay,
        }
    }

    pub fn quoter(&self) -> &CreditQuoter {
        &self.quoter
    }

    /// Terms the intake form may offer for `amount`.
    pub fn durations(&self, amount: Decimal) -> Vec<u16> {
        self.quoter.estimator().eligible_durations(amount).to_vec()
    }

    /// Price and screen a request without storing anything.
    pub fn quote(&self, request: &QuoteRequest) -> Result<CreditQuote, CreditRequestError> {
        Ok(self.quoter.quote(request)?)
    }

    /// Validate, price, store and forward a new credit request.
    ///
    /// A relay failure is logged and does not undo the stored request.
    pub fn submit(
        &self,
        submission: CreditRequestSubmission,
    ) -> Result<CreditRequestRecord, CreditRequestError> {
        self.guard.validate(&submission)?;

        let quote = self.quoter.quote(&QuoteRequest {
            amount: submission.amount,
            duration_months: submission.duration_months,
            monthly_income: submission.monthly_income,
            existing_charges: submission
                .charges
                .total()
                .ok_or(QuoteError::AmountOverflow)?,
            household_size: submission.household_size,
        })?;

        let stored = self.store(submission, quote)?;
        info!(
            request_number = %stored.request_number,
            feasibility = %stored.quote.assessment.status,
            "credit request stored"
        );

        if let Err(err) = self.relay.send(render_credit_request(&stored)) {
            warn!(
                request_number = %stored.request_number,
                error = %err,
                "credit request notification not delivered"
            );
        }

        Ok(stored)
    }

    pub fn get(&self, number: &RequestNumber) -> Result<CreditRequestRecord, CreditRequestError> {
        let record = self
            .repository
            .fetch(number)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<CreditRequestRecord>, CreditRequestError> {
        Ok(self.repository.recent(limit)?)
    }

    /// Forward a request for extra funds on an existing credit.
    pub fn request_additional_funds(
        &self,
        request: &AdditionalFundsRequest,
    ) -> Result<RequestNotification, CreditRequestError> {
        request.validate()?;
        let notification = render_additional_funds(request);
        self.relay.send(notification.clone())?;
        info!(
            credit_reference = %request.credit_reference,
            "additional funds request forwarded"
        );
        Ok(notification)
    }

    /// Forward an early repayment request on an existing credit.
    pub fn request_early_repayment(
        &self,
        request: &EarlyRepaymentRequest,
    ) -> Result<RequestNotification, CreditRequestError> {
        request.validate()?;
        let notification = render_early_repayment(request);
        self.relay.send(notification.clone())?;
        info!(
            credit_reference = %request.credit_reference,
            repayment_type = request.repayment_type.label(),
            "early repayment request forwarded"
        );
        Ok(notification)
    }

    /// Forward a customer message to the advisors.
    pub fn request_contact(
        &self,
        request: &ContactRequest,
    ) -> Result<RequestNotification, CreditRequestError> {
        request.validate()?;
        let notification = render_contact_request(request);
        self.relay.send(notification.clone())?;
        info!(
            credit_reference = request.credit_reference().unwrap_or("none"),
            "contact request forwarded"
        );
        Ok(notification)
    }

    fn store(
        &self,
        submission: CreditRequestSubmission,
        quote: CreditQuote,
    ) -> Result<CreditRequestRecord, CreditRequestError> {
        let mut attempt = 1;
        loop {
            let record = CreditRequestRecord {
                request_number: RequestNumber::generate(),
                submission: submission.clone(),
                quote,
                status: CreditRequestStatus::Pending,
                submitted_at: Utc::now(),
            };

            match self.repository.insert(record) {
                Err(RepositoryError::Conflict) if attempt < NUMBER_ATTEMPTS => attempt += 1,
                other => return Ok(other?),
            }
        }
    }
}

/// Error raised by the credit request service.
#[derive(Debug, thiserror::Error)]
pub enum CreditRequestError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Quote(#[from] QuoteError),
    #[error(transparent)]
    FollowUp(#[from] FollowUpViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Relay(#[from] RelayError),
}
