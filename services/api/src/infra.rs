use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;
use wallfin::credit::requests::{
    CreditRequestRecord, CreditRequestRepository, NotificationRelay, RelayError, RepositoryError,
    RequestNotification, RequestNumber,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

fn poisoned<T>(_: PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable("repository mutex poisoned".to_string())
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCreditRequestRepository {
    records: Arc<Mutex<HashMap<RequestNumber, CreditRequestRecord>>>,
}

impl CreditRequestRepository for InMemoryCreditRequestRepository {
    fn insert(&self, record: CreditRequestRecord) -> Result<CreditRequestRecord, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
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
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(number).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<CreditRequestRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        let mut records: Vec<_> = guard.values().cloned().collect();
        records.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        records.truncate(limit);
        Ok(records)
    }
}

/// Keeps every notification in memory and logs it; stands in for the advisor mailbox.
#[derive(Default, Clone)]
pub(crate) struct LoggingNotificationRelay {
    outbox: Arc<Mutex<Vec<RequestNotification>>>,
}

impl NotificationRelay for LoggingNotificationRelay {
    fn send(&self, notification: RequestNotification) -> Result<(), RelayError> {
        info!(
            template = ?notification.template,
            reference = %notification.reference,
            subject = %notification.subject,
            "advisor notification queued"
        );
        self.outbox
            .lock()
            .map_err(|_| RelayError::Transport("outbox mutex poisoned".to_string()))?
            .push(notification);
        Ok(())
    }
}

impl LoggingNotificationRelay {
    pub(crate) fn outbox(&self) -> Vec<RequestNotification> {
        self.outbox
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

/// Accepts `12500`, `12500.50`, `12 500,50` and `12.500,50`.
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{202f}' && *c != '€')
        .collect();

    let normalized = if compact.contains(',') {
        compact.replace('.', "").replace(',', ".")
    } else {
        compact
    };

    Decimal::from_str(&normalized)
        .map_err(|err| format!("failed to parse '{raw}' as an amount ({err})"))
}
