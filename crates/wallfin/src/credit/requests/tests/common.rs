use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use rust_decimal_macros::dec;
use serde_json::Value;

use crate::credit::feasibility::FeasibilityConfig;
use crate::credit::requests::domain::{
    ContactDetails, CreditRequestSubmission, CreditType, Declarations, EmploymentStatus,
    FamilyStatus, MonthlyCharges,
};
use crate::credit::requests::followup::{
    AdditionalFundsRequest, ContactRequest, EarlyRepaymentRequest, RepaymentKind,
};
use crate::credit::requests::numbering::RequestNumber;
use crate::credit::requests::repository::{
    CreditRequestRecord, CreditRequestRepository, NotificationRelay, RelayError, RepositoryError,
    RequestNotification,
};
use crate::credit::requests::{credit_router, CreditRequestService};

/// 15001 EUR over 60 months: an exact grid point (299.83 at 7.65%).
pub(super) fn submission() -> CreditRequestSubmission {
    CreditRequestSubmission {
        credit_type: CreditType::CreditAuto,
        amount: dec!(15001),
        duration_months: 60,
        project_description: Some("Replace the family car".to_string()),
        employment_status: EmploymentStatus::Cdi,
        monthly_income: dec!(4200),
        family_status: FamilyStatus::EnCouple,
        household_size: 2,
        charges: MonthlyCharges {
            rent_mortgage: dec!(650),
            current_credits: dec!(120),
            other_charges: dec!(80),
        },
        declarations: Declarations {
            is_belgian_resident: true,
            is_not_bnb_listed: true,
            accepts_data_processing: true,
        },
        contact: ContactDetails {
            name: "Camille Dubois".to_string(),
            email: "camille.dubois@example.be".to_string(),
            phone: "+32 470 12 34 56".to_string(),
        },
    }
}

pub(super) fn income_low_submission() -> CreditRequestSubmission {
    let mut submission = submission();
    submission.monthly_income = dec!(2500);
    submission.charges = MonthlyCharges {
        rent_mortgage: dec!(300),
        current_credits: dec!(0),
        other_charges: dec!(0),
    };
    submission
}

pub(super) fn additional_funds() -> AdditionalFundsRequest {
    AdditionalFundsRequest {
        credit_type: CreditType::PretTravaux,
        credit_reference: "WF-TRAV-2024-0007".to_string(),
        client_name: "Camille Dubois".to_string(),
        client_email: "camille.dubois@example.be".to_string(),
        amount: dec!(2500),
        comment: None,
    }
}

pub(super) fn early_repayment() -> EarlyRepaymentRequest {
    EarlyRepaymentRequest {
        credit_type: CreditType::CreditAuto,
        credit_reference: "WF-AUTO-2023-0042".to_string(),
        client_name: "Camille Dubois".to_string(),
        client_email: "camille.dubois@example.be".to_string(),
        repayment_type: RepaymentKind::Partial,
        amount: dec!(3000),
        remaining_balance: dec!(8420.50),
        comment: Some("Year-end bonus".to_string()),
    }
}

pub(super) fn contact_request() -> ContactRequest {
    ContactRequest {
        client_name: "Camille Dubois".to_string(),
        client_email: "camille.dubois@example.be".to_string(),
        client_phone: Some("+32 470 12 34 56".to_string()),
        subject: "Payment date".to_string(),
        credit_reference: Some("WF-AUTO-2023-0042".to_string()),
        message: "Could the monthly debit move to the 5th?".to_string(),
    }
}

pub(super) fn build_service() -> (
    CreditRequestService<MemoryRepository, MemoryRelay>,
    Arc<MemoryRepository>,
    Arc<MemoryRelay>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let relay = Arc::new(MemoryRelay::default());
    let service = CreditRequestService::new(
        repository.clone(),
        relay.clone(),
        FeasibilityConfig::default(),
    );
    (service, repository, relay)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<RequestNumber, CreditRequestRecord>>>,
}

impl CreditRequestRepository for MemoryRepository {
    fn insert(&self, record: CreditRequestRecord) -> Result<CreditRequestRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.request_number) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.request_number.clone(), record.clone());
        Ok(record)
    }

    fn fetch(
        &self,
        number: &RequestNumber,
    ) -> Result<Option<CreditRequestRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(number).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<CreditRequestRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<_> = guard.values().cloned().collect();
        records.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        records.truncate(limit);
        Ok(records)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRelay {
    events: Arc<Mutex<Vec<RequestNotification>>>,
}

impl MemoryRelay {
    pub(super) fn events(&self) -> Vec<RequestNotification> {
        self.events.lock().expect("relay mutex poisoned").clone()
    }
}

impl NotificationRelay for MemoryRelay {
    fn send(&self, notification: RequestNotification) -> Result<(), RelayError> {
        self.events
            .lock()
            .expect("relay mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct OfflineRelay;

impl NotificationRelay for OfflineRelay {
    fn send(&self, _notification: RequestNotification) -> Result<(), RelayError> {
        Err(RelayError::Transport("smtp relay offline".to_string()))
    }
}

pub(super) struct ConflictRepository;

impl CreditRequestRepository for ConflictRepository {
    fn insert(&self, _record: CreditRequestRecord) -> Result<CreditRequestRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(
        &self,
        _number: &RequestNumber,
    ) -> Result<Option<CreditRequestRecord>, RepositoryError> {
        Ok(None)
    }

    fn recent(&self, _limit: usize) -> Result<Vec<CreditRequestRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl CreditRequestRepository for UnavailableRepository {
    fn insert(&self, _record: CreditRequestRecord) -> Result<CreditRequestRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(
        &self,
        _number: &RequestNumber,
    ) -> Result<Option<CreditRequestRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<CreditRequestRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: CreditRequestService<MemoryRepository, MemoryRelay>,
) -> axum::Router {
    credit_router(Arc::new(service))
}
