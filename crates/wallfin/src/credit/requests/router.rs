use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use super::domain::{CreditRequestSubmission, CreditRequestView};
use super::followup::{AdditionalFundsRequest, ContactRequest, EarlyRepaymentRequest};
use super::numbering::RequestNumber;
use super::repository::{
    CreditRequestRepository, NotificationRelay, RepositoryError, RequestNotification,
};
use super::service::{CreditRequestError, CreditRequestService};
use crate::credit::QuoteRequest;

const DEFAULT_LIST_LIMIT: usize = 20;

/// Router builder exposing pricing, intake and follow-up endpoints.
pub fn credit_router<R, N>(service: Arc<CreditRequestService<R, N>>) -> Router
where
    R: CreditRequestRepository + 'static,
    N: NotificationRelay + 'static,
{
    Router::new()
        .route("/api/v1/credit/durations", get(durations_handler::<R, N>))
        .route("/api/v1/credit/quote", post(quote_handler::<R, N>))
        .route(
            "/api/v1/credit/requests",
            post(submit_handler::<R, N>).get(list_handler::<R, N>),
        )
        .route(
            "/api/v1/credit/requests/:request_number",
            get(status_handler::<R, N>),
        )
        .route(
            "/api/v1/credits/additional-funds",
            post(additional_funds_handler::<R, N>),
        )
        .route(
            "/api/v1/credits/early-repayment",
            post(early_repayment_handler::<R, N>),
        )
        .route("/api/v1/contact", post(contact_handler::<R, N>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct DurationsQuery {
    pub(crate) amount: Decimal,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

pub(crate) async fn durations_handler<R, N>(
    State(service): State<Arc<CreditRequestService<R, N>>>,
    Query(query): Query<DurationsQuery>,
) -> Response
where
    R: CreditRequestRepository + 'static,
    N: NotificationRelay + 'static,
{
    let durations = service.durations(query.amount);
    let payload = json!({
        "amount": query.amount,
        "durations": durations,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn quote_handler<R, N>(
    State(service): State<Arc<CreditRequestService<R, N>>>,
    axum::Json(request): axum::Json<QuoteRequest>,
) -> Response
where
    R: CreditRequestRepository + 'static,
    N: NotificationRelay + 'static,
{
    match service.quote(&request) {
        Ok(quote) => (StatusCode::OK, axum::Json(quote)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<CreditRequestService<R, N>>>,
    axum::Json(submission): axum::Json<CreditRequestSubmission>,
) -> Response
where
    R: CreditRequestRepository + 'static,
    N: NotificationRelay + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::ACCEPTED, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R, N>(
    State(service): State<Arc<CreditRequestService<R, N>>>,
    Query(query): Query<ListQuery>,
) -> Response
where
    R: CreditRequestRepository + 'static,
    N: NotificationRelay + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    match service.recent(limit) {
        Ok(records) => {
            let views: Vec<CreditRequestView> =
                records.iter().map(|record| record.view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<CreditRequestService<R, N>>>,
    Path(request_number): Path<String>,
) -> Response
where
    R: CreditRequestRepository + 'static,
    N: NotificationRelay + 'static,
{
    let number = RequestNumber(request_number);
    match service.get(&number) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn additional_funds_handler<R, N>(
    State(service): State<Arc<CreditRequestService<R, N>>>,
    axum::Json(request): axum::Json<AdditionalFundsRequest>,
) -> Response
where
    R: CreditRequestRepository + 'static,
    N: NotificationRelay + 'static,
{
    match service.request_additional_funds(&request) {
        Ok(notification) => forwarded_response(&notification),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn early_repayment_handler<R, N>(
    State(service): State<Arc<CreditRequestService<R, N>>>,
    axum::Json(request): axum::Json<EarlyRepaymentRequest>,
) -> Response
where
    R: CreditRequestRepository + 'static,
    N: NotificationRelay + 'static,
{
    match service.request_early_repayment(&request) {
        Ok(notification) => forwarded_response(&notification),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn contact_handler<R, N>(
    State(service): State<Arc<CreditRequestService<R, N>>>,
    axum::Json(request): axum::Json<ContactRequest>,
) -> Response
where
    R: CreditRequestRepository + 'static,
    N: NotificationRelay + 'static,
{
    match service.request_contact(&request) {
        Ok(notification) => forwarded_response(&notification),
        Err(error) => error_response(error),
    }
}

fn forwarded_response(notification: &RequestNotification) -> Response {
    let payload = json!({
        "status": "forwarded",
        "template": notification.template,
        "reference": notification.reference,
    });
    (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
}

impl CreditRequestError {
    /// HTTP status reported for this error by every response path.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CreditRequestError::Intake(_)
            | CreditRequestError::Quote(_)
            | CreditRequestError::FollowUp(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CreditRequestError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            CreditRequestError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            CreditRequestError::Relay(_) => StatusCode::BAD_GATEWAY,
            CreditRequestError::Repository(RepositoryError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

fn error_response(error: CreditRequestError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (error.status_code(), axum::Json(payload)).into_response()
}
