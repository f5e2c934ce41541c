//! Credit request intake, storage and advisor notifications.
//!
//! A submission is validated step by step (project, situation, declarations, contact), priced
//! and screened, stored under a fresh `WF-<year>-<serial>` reference, and forwarded to the
//! advisor relay. Follow-up requests on existing credits and contact messages skip storage and
//! go straight to the relay.

pub mod domain;
pub mod followup;
mod intake;
pub mod notification;
mod numbering;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ContactDetails, CreditRequestStatus, CreditRequestSubmission, CreditRequestView, CreditType,
    Declarations, EmploymentStatus, FamilyStatus, MonthlyCharges,
};
pub use followup::{
    AdditionalFundsRequest, ContactRequest, EarlyRepaymentRequest, FollowUpViolation,
    RepaymentKind,
};
pub use intake::{Declaration, IntakeGuard, IntakeViolation};
pub use numbering::RequestNumber;
pub use repository::{
    CreditRequestRecord, CreditRequestRepository, NotificationRelay, NotificationTemplate,
    RelayError, RepositoryError, RequestNotification,
};
pub use router::credit_router;
pub use service::{CreditRequestError, CreditRequestService};
