use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{CreditRequestStatus, CreditRequestSubmission, CreditRequestView};
use super::numbering::RequestNumber;
use crate::credit::CreditQuote;

/// Stored request: the raw submission plus the figures computed at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditRequestRecord {
    pub request_number: RequestNumber,
    pub submission: CreditRequestSubmission,
    pub quote: CreditQuote,
    pub status: CreditRequestStatus,
    pub submitted_at: DateTime<Utc>,
}

impl CreditRequestRecord {
    pub fn view(&self) -> CreditRequestView {
        CreditRequestView {
            request_number: self.request_number.clone(),
            status: self.status.label(),
            credit_type: self.submission.credit_type.label(),
            amount: self.submission.amount,
            duration_months: self.submission.duration_months,
            monthly_payment: self.quote.estimate.payment,
            apr: self.quote.estimate.apr,
            feasibility_status: self.quote.assessment.status,
            feasibility_label: self.quote.assessment.status.label(),
            submitted_at: self.submitted_at,
        }
    }
}

/// Storage abstraction for submitted credit requests (the hosted backend in production).
pub trait CreditRequestRepository: Send + Sync {
    fn insert(&self, record: CreditRequestRecord) -> Result<CreditRequestRecord, RepositoryError>;
    fn fetch(
        &self,
        number: &RequestNumber,
    ) -> Result<Option<CreditRequestRecord>, RepositoryError>;
    fn recent(&self, limit: usize) -> Result<Vec<CreditRequestRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound relay that forwards requests to an advisor mailbox.
pub trait NotificationRelay: Send + Sync {
    fn send(&self, notification: RequestNotification) -> Result<(), RelayError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationTemplate {
    CreditRequest,
    AdditionalFunds,
    EarlyRepayment,
    ContactRequest,
}

/// Message handed to the relay; `details` carries the machine-readable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestNotification {
    pub template: NotificationTemplate,
    pub reference: String,
    pub subject: String,
    pub body: String,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
