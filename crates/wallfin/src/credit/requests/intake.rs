use rust_decimal::Decimal;

use super::domain::CreditRequestSubmission;
use crate::credit::pricing::{PaymentEstimator, MAX_PRINCIPAL, MIN_PRINCIPAL};

/// Statements that must be accepted before a request can be forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration {
    BelgianResidency,
    NotBnbListed,
    DataProcessing,
}

/// Reasons the intake guard refuses a submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("minimum amount is 5001 EUR (found {0})")]
    AmountBelowMinimum(Decimal),
    #[error("maximum amount is 100000 EUR (found {0})")]
    AmountAboveMaximum(Decimal),
    #[error("{duration_months} months is not offered for {amount} EUR (offered: {offered:?})")]
    IneligibleDuration {
        amount: Decimal,
        duration_months: u16,
        offered: Vec<u16>,
    },
    #[error("monthly income must be declared")]
    MissingIncome,
    #[error("household must count at least one person")]
    IncompleteHousehold,
    #[error("monthly charges cannot be negative")]
    NegativeCharges,
    #[error("declaration not accepted: {0:?}")]
    MissingDeclaration(Declaration),
    #[error("contact {0} is missing or invalid")]
    IncompleteContact(&'static str),
}

/// Checks a raw submission before it is priced and stored.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard {
    estimator: PaymentEstimator,
}

impl IntakeGuard {
    pub fn new(estimator: PaymentEstimator) -> Self {
        Self { estimator }
    }

    pub fn validate(&self, submission: &CreditRequestSubmission) -> Result<(), IntakeViolation> {
        self.check_project(submission)?;
        check_situation(submission)?;
        check_declarations(submission)?;
        check_contact(submission)
    }

    fn check_project(&self, submission: &CreditRequestSubmission) -> Result<(), IntakeViolation> {
        let amount = submission.amount;
        if amount < MIN_PRINCIPAL {
            return Err(IntakeViolation::AmountBelowMinimum(amount));
        }
        if amount > MAX_PRINCIPAL {
            return Err(IntakeViolation::AmountAboveMaximum(amount));
        }

        let offered = self.estimator.eligible_durations(amount);
        if !offered.contains(&submission.duration_months) {
            return Err(IntakeViolation::IneligibleDuration {
                amount,
                duration_months: submission.duration_months,
                offered: offered.to_vec(),
            });
        }

        Ok(())
    }
}

fn check_situation(submission: &CreditRequestSubmission) -> Result<(), IntakeViolation> {
    if submission.monthly_income <= Decimal::ZERO {
        return Err(IntakeViolation::MissingIncome);
    }

    if submission.household_size == 0 {
        return Err(IntakeViolation::IncompleteHousehold);
    }

    let charges = submission.charges;
    if [
        charges.rent_mortgage,
        charges.current_credits,
        charges.other_charges,
    ]
    .iter()
    .any(|amount| *amount < Decimal::ZERO)
    {
        return Err(IntakeViolation::NegativeCharges);
    }

    Ok(())
}

fn check_declarations(submission: &CreditRequestSubmission) -> Result<(), IntakeViolation> {
    let declarations = submission.declarations;
    if !declarations.is_belgian_resident {
        return Err(IntakeViolation::MissingDeclaration(
            Declaration::BelgianResidency,
        ));
    }
    if !declarations.is_not_bnb_listed {
        return Err(IntakeViolation::MissingDeclaration(Declaration::NotBnbListed));
    }
    if !declarations.accepts_data_processing {
        return Err(IntakeViolation::MissingDeclaration(
            Declaration::DataProcessing,
        ));
    }
    Ok(())
}

fn check_contact(submission: &CreditRequestSubmission) -> Result<(), IntakeViolation> {
    let contact = &submission.contact;
    if contact.name.trim().is_empty() {
        return Err(IntakeViolation::IncompleteContact("name"));
    }

    let email = contact.email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(IntakeViolation::IncompleteContact("email")),
    }
}
