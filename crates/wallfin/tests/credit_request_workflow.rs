//! Integration specifications for credit request intake through the public service facade and
//! HTTP router.

mod common {
    use std::sync::{Arc, Mutex};

    use rust_decimal_macros::dec;

    use wallfin::credit::feasibility::FeasibilityConfig;
    use wallfin::credit::requests::{
        ContactDetails, CreditRequestRecord, CreditRequestRepository, CreditRequestService,
        CreditRequestSubmission, CreditType, Declarations, EmploymentStatus, FamilyStatus,
        MonthlyCharges, NotificationRelay, RelayError, RepositoryError, RequestNotification,
        RequestNumber,
    };

    pub(super) fn submission() -> CreditRequestSubmission {
        CreditRequestSubmission {
            credit_type: CreditType::CreditEnergie,
            amount: dec!(22000),
            duration_months: 96,
            project_description: Some("Heat pump and roof insulation".to_string()),
            employment_status: EmploymentStatus::Fonctionnaire,
            monthly_income: dec!(4200),
            family_status: FamilyStatus::AvecEnfants,
            household_size: 4,
            charges: MonthlyCharges {
                rent_mortgage: dec!(780),
                current_credits: dec!(0),
                other_charges: dec!(60),
            },
            declarations: Declarations {
                is_belgian_resident: true,
                is_not_bnb_listed: true,
                accepts_data_processing: true,
            },
            contact: ContactDetails {
                name: "Lucas Janssens".to_string(),
                email: "lucas.janssens@example.be".to_string(),
                phone: "+32 485 00 11 22".to_string(),
            },
        }
    }

    #[derive(Default)]
    pub(super) struct VecRepository {
        records: Mutex<Vec<CreditRequestRecord>>,
    }

    impl CreditRequestRepository for VecRepository {
        fn insert(
            &self,
            record: CreditRequestRecord,
        ) -> Result<CreditRequestRecord, RepositoryError> {
            let mut guard = self.records.lock().expect("repository mutex poisoned");
            if guard
                .iter()
                .any(|existing| existing.request_number == record.request_number)
            {
                return Err(RepositoryError::Conflict);
            }
            guard.push(record.clone());
            Ok(record)
        }

        fn fetch(
            &self,
            number: &RequestNumber,
        ) -> Result<Option<CreditRequestRecord>, RepositoryError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard
                .iter()
                .find(|record| &record.request_number == number)
                .cloned())
        }

        fn recent(&self, limit: usize) -> Result<Vec<CreditRequestRecord>, RepositoryError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard.iter().rev().take(limit).cloned().collect())
        }
    }

    #[derive(Default)]
    pub(super) struct Mailbox {
        sent: Mutex<Vec<RequestNotification>>,
    }

    impl Mailbox {
        pub(super) fn sent(&self) -> Vec<RequestNotification> {
            self.sent.lock().expect("mailbox mutex poisoned").clone()
        }
    }

    impl NotificationRelay for Mailbox {
        fn send(&self, notification: RequestNotification) -> Result<(), RelayError> {
            self.sent
                .lock()
                .expect("mailbox mutex poisoned")
                .push(notification);
            Ok(())
        }
    }

    pub(super) fn service() -> (
        Arc<CreditRequestService<VecRepository, Mailbox>>,
        Arc<VecRepository>,
        Arc<Mailbox>,
    ) {
        let repository = Arc::new(VecRepository::default());
        let mailbox = Arc::new(Mailbox::default());
        let service = Arc::new(CreditRequestService::new(
            repository.clone(),
            mailbox.clone(),
            FeasibilityConfig::default(),
        ));
        (service, repository, mailbox)
    }
}

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use rust_decimal_macros::dec;
use serde_json::Value;
use tower::ServiceExt;

use wallfin::credit::feasibility::FeasibilityStatus;
use wallfin::credit::pricing::EstimateSource;
use wallfin::credit::requests::{
    credit_router, CreditRequestRepository, CreditRequestStatus, NotificationTemplate,
};

use common::*;

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json payload")
}

#[test]
fn submission_is_interpolated_priced_and_stored() {
    let (service, repository, mailbox) = service();

    let record = service.submit(submission()).expect("submission succeeds");

    assert_eq!(
        record.quote.estimate.source,
        EstimateSource::Interpolated {
            lower: dec!(20001),
            upper: dec!(50000)
        }
    );
    assert_eq!(record.quote.estimate.payment, dec!(304.5));
    assert_eq!(record.quote.assessment.status, FeasibilityStatus::Ok);
    assert_eq!(record.status, CreditRequestStatus::Pending);

    let stored = repository
        .fetch(&record.request_number)
        .expect("fetch succeeds")
        .expect("record stored");
    assert_eq!(stored.quote, record.quote);

    let sent = mailbox.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].template, NotificationTemplate::CreditRequest);
    assert_eq!(sent[0].reference, record.request_number.as_str());
    assert_eq!(
        sent[0].details.get("status").map(String::as_str),
        Some("OK")
    );
}

#[tokio::test]
async fn submitted_request_is_visible_through_status_route() {
    let (service, _, _) = service();
    let router = credit_router(service);

    let response = router
        .clone()
        .oneshot(
            Request::post("/api/v1/credit/requests")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&submission()).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let created = json_body(response).await;
    let number = created["request_number"]
        .as_str()
        .expect("request number returned")
        .to_string();

    let response = router
        .oneshot(
            Request::get(format!("/api/v1/credit/requests/{number}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = json_body(response).await;
    assert_eq!(fetched["request_number"], created["request_number"]);
    assert_eq!(fetched["credit_type"], "Credit Energie");
    assert_eq!(fetched["duration_months"], 96);
}

#[tokio::test]
async fn ineligible_term_is_rejected_before_storage() {
    let (service, repository, mailbox) = service();
    let router = credit_router(service);

    let mut request = submission();
    request.amount = dec!(12000);

    let response = router
        .oneshot(
            Request::post("/api/v1/credit/requests")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&request).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(repository.recent(10).expect("listing works").is_empty());
    assert!(mailbox.sent().is_empty());
}
