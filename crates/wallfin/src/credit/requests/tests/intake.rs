use super::common::*;
use crate::credit::requests::intake::{Declaration, IntakeGuard, IntakeViolation};
use rust_decimal_macros::dec;

#[test]
fn accepts_complete_submission() {
    assert_eq!(IntakeGuard::default().validate(&submission()), Ok(()));
}

#[test]
fn rejects_amounts_outside_product_range() {
    let guard = IntakeGuard::default();

    let mut low = submission();
    low.amount = dec!(5000);
    assert_eq!(
        guard.validate(&low),
        Err(IntakeViolation::AmountBelowMinimum(dec!(5000)))
    );

    let mut high = submission();
    high.amount = dec!(100000.01);
    assert_eq!(
        guard.validate(&high),
        Err(IntakeViolation::AmountAboveMaximum(dec!(100000.01)))
    );
}

#[test]
fn rejects_terms_not_offered_for_amount() {
    let mut request = submission();
    request.amount = dec!(8000);
    request.duration_months = 60;

    match IntakeGuard::default().validate(&request) {
        Err(IntakeViolation::IneligibleDuration {
            duration_months,
            offered,
            ..
        }) => {
            assert_eq!(duration_months, 60);
            assert_eq!(offered, vec![24, 30, 36]);
        }
        other => panic!("expected ineligible duration, got {other:?}"),
    }
}

#[test]
fn requires_income_and_household() {
    let guard = IntakeGuard::default();

    let mut no_income = submission();
    no_income.monthly_income = dec!(0);
    assert_eq!(guard.validate(&no_income), Err(IntakeViolation::MissingIncome));

    let mut empty_household = submission();
    empty_household.household_size = 0;
    assert_eq!(
        guard.validate(&empty_household),
        Err(IntakeViolation::IncompleteHousehold)
    );

    let mut negative = submission();
    negative.charges.other_charges = dec!(-10);
    assert_eq!(guard.validate(&negative), Err(IntakeViolation::NegativeCharges));
}

#[test]
fn every_declaration_is_mandatory() {
    let guard = IntakeGuard::default();

    let mut resident = submission();
    resident.declarations.is_belgian_resident = false;
    assert_eq!(
        guard.validate(&resident),
        Err(IntakeViolation::MissingDeclaration(
            Declaration::BelgianResidency
        ))
    );

    let mut listed = submission();
    listed.declarations.is_not_bnb_listed = false;
    assert_eq!(
        guard.validate(&listed),
        Err(IntakeViolation::MissingDeclaration(Declaration::NotBnbListed))
    );

    let mut consent = submission();
    consent.declarations.accepts_data_processing = false;
    assert_eq!(
        guard.validate(&consent),
        Err(IntakeViolation::MissingDeclaration(
            Declaration::DataProcessing
        ))
    );
}

#[test]
fn contact_needs_name_and_plausible_email() {
    let guard = IntakeGuard::default();

    let mut nameless = submission();
    nameless.contact.name = "   ".to_string();
    assert_eq!(
        guard.validate(&nameless),
        Err(IntakeViolation::IncompleteContact("name"))
    );

    let mut bad_email = submission();
    bad_email.contact.email = "camille.dubois".to_string();
    assert_eq!(
        guard.validate(&bad_email),
        Err(IntakeViolation::IncompleteContact("email"))
    );
}
