use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::domain::CreditType;

/// Request for extra funds on a credit the customer already holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalFundsRequest {
    pub credit_type: CreditType,
    pub credit_reference: String,
    pub client_name: String,
    pub client_email: String,
    pub amount: Decimal,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentKind {
    Total,
    Partial,
}

impl RepaymentKind {
    pub const fn label(self) -> &'static str {
        match self {
            RepaymentKind::Total => "TOTAL",
            RepaymentKind::Partial => "PARTIAL",
        }
    }
}

/// Request to repay part or all of an outstanding credit ahead of schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlyRepaymentRequest {
    pub credit_type: CreditType,
    pub credit_reference: String,
    pub client_name: String,
    pub client_email: String,
    pub repayment_type: RepaymentKind,
    pub amount: Decimal,
    pub remaining_balance: Decimal,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Free-form message from a customer to the Wallfin advisors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub client_name: String,
    pub client_email: String,
    #[serde(default)]
    pub client_phone: Option<String>,
    pub subject: String,
    /// Credit the message is about, when the customer picked one.
    #[serde(default)]
    pub credit_reference: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FollowUpViolation {
    #[error("credit reference is required")]
    MissingReference,
    #[error("client name and e-mail are required")]
    MissingClient,
    #[error("a subject is required")]
    MissingSubject,
    #[error("a message is required")]
    MissingMessage,
    #[error("amount must be greater than zero (found {0})")]
    NonPositiveAmount(Decimal),
    #[error("total repayment must equal the remaining balance ({remaining}, found {amount})")]
    TotalMismatch { amount: Decimal, remaining: Decimal },
    #[error("partial repayment must stay below the remaining balance ({remaining}, found {amount})")]
    PartialExceedsBalance { amount: Decimal, remaining: Decimal },
}

impl AdditionalFundsRequest {
    pub fn validate(&self) -> Result<(), FollowUpViolation> {
        check_identity(&self.credit_reference, &self.client_name, &self.client_email)?;
        if self.amount <= Decimal::ZERO {
            return Err(FollowUpViolation::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

impl EarlyRepaymentRequest {
    pub fn validate(&self) -> Result<(), FollowUpViolation> {
        check_identity(&self.credit_reference, &self.client_name, &self.client_email)?;
        if self.amount <= Decimal::ZERO {
            return Err(FollowUpViolation::NonPositiveAmount(self.amount));
        }

        match self.repayment_type {
            RepaymentKind::Total if self.amount != self.remaining_balance => {
                Err(FollowUpViolation::TotalMismatch {
                    amount: self.amount,
                    remaining: self.remaining_balance,
                })
            }
            RepaymentKind::Partial if self.amount >= self.remaining_balance => {
                Err(FollowUpViolation::PartialExceedsBalance {
                    amount: self.amount,
                    remaining: self.remaining_balance,
                })
            }
            _ => Ok(()),
        }
    }
}

impl ContactRequest {
    pub fn validate(&self) -> Result<(), FollowUpViolation> {
        check_client(&self.client_name, &self.client_email)?;
        if self.subject.trim().is_empty() {
            return Err(FollowUpViolation::MissingSubject);
        }
        if self.message.trim().is_empty() {
            return Err(FollowUpViolation::MissingMessage);
        }
        Ok(())
    }

    /// Referenced credit, ignoring a blank selection.
    pub fn credit_reference(&self) -> Option<&str> {
        self.credit_reference
            .as_deref()
            .map(str::trim)
            .filter(|reference| !reference.is_empty())
    }
}

fn check_identity(reference: &str, name: &str, email: &str) -> Result<(), FollowUpViolation> {
    if reference.trim().is_empty() {
        return Err(FollowUpViolation::MissingReference);
    }
    check_client(name, email)
}

fn check_client(name: &str, email: &str) -> Result<(), FollowUpViolation> {
    if name.trim().is_empty() || email.trim().is_empty() {
        return Err(FollowUpViolation::MissingClient);
    }
    Ok(())
}
