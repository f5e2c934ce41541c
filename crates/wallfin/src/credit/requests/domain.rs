use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::numbering::RequestNumber;
use crate::credit::feasibility::FeasibilityStatus;

/// Credit products offered through the client area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditType {
    PretPersonnel,
    CreditAuto,
    PretTravaux,
    CreditEnergie,
    PretVacances,
    Regroupement,
}

impl CreditType {
    pub const ALL: [CreditType; 6] = [
        CreditType::PretPersonnel,
        CreditType::CreditAuto,
        CreditType::PretTravaux,
        CreditType::CreditEnergie,
        CreditType::PretVacances,
        CreditType::Regroupement,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            CreditType::PretPersonnel => "Pret Personnel",
            CreditType::CreditAuto => "Credit Auto",
            CreditType::PretTravaux => "Pret Travaux",
            CreditType::CreditEnergie => "Credit Energie",
            CreditType::PretVacances => "Pret Vacances",
            CreditType::Regroupement => "Regroupement de Credits",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Cdi,
    Cdd,
    Independant,
    Fonctionnaire,
    Retraite,
    SansEmploi,
}

impl EmploymentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EmploymentStatus::Cdi => "CDI",
            EmploymentStatus::Cdd => "CDD",
            EmploymentStatus::Independant => "Independant",
            EmploymentStatus::Fonctionnaire => "Fonctionnaire",
            EmploymentStatus::Retraite => "Retraite",
            EmploymentStatus::SansEmploi => "Sans emploi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyStatus {
    Seul,
    EnCouple,
    AvecEnfants,
}

impl FamilyStatus {
    pub const fn label(self) -> &'static str {
        match self {
            FamilyStatus::Seul => "Seul(e)",
            FamilyStatus::EnCouple => "En couple",
            FamilyStatus::AvecEnfants => "Avec enfant(s)",
        }
    }
}

/// Monthly charges declared on the request, before the new installment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCharges {
    #[serde(default)]
    pub rent_mortgage: Decimal,
    #[serde(default)]
    pub current_credits: Decimal,
    #[serde(default)]
    pub other_charges: Decimal,
}

impl MonthlyCharges {
    /// Sum of the declared charges, or `None` past the `Decimal` range.
    pub fn total(&self) -> Option<Decimal> {
        self.rent_mortgage
            .checked_add(self.current_credits)?
            .checked_add(self.other_charges)
    }
}

/// Mandatory statements the applicant ticks before submitting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declarations {
    pub is_belgian_resident: bool,
    /// Not registered as a defaulting borrower at the National Bank credit register.
    pub is_not_bnb_listed: bool,
    pub accepts_data_processing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Raw credit request as captured by the multi-step intake form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditRequestSubmission {
    pub credit_type: CreditType,
    pub amount: Decimal,
    pub duration_months: u16,
    #[serde(default)]
    pub project_description: Option<String>,
    pub employment_status: EmploymentStatus,
    pub monthly_income: Decimal,
    pub family_status: FamilyStatus,
    pub household_size: u8,
    #[serde(default)]
    pub charges: MonthlyCharges,
    #[serde(default)]
    pub declarations: Declarations,
    pub contact: ContactDetails,
}

/// Advisor-side progress of a submitted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditRequestStatus {
    Pending,
    InReview,
    Approved,
    Rejected,
}

impl CreditRequestStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CreditRequestStatus::Pending => "pending",
            CreditRequestStatus::InReview => "in_review",
            CreditRequestStatus::Approved => "approved",
            CreditRequestStatus::Rejected => "rejected",
        }
    }
}

/// Summary exposed to the client area once a request is stored.
#[derive(Debug, Clone, Serialize)]
pub struct CreditRequestView {
    pub request_number: RequestNumber,
    pub status: &'static str,
    pub credit_type: &'static str,
    pub amount: Decimal,
    pub duration_months: u16,
    pub monthly_payment: Decimal,
    pub apr: Decimal,
    pub feasibility_status: FeasibilityStatus,
    pub feasibility_label: &'static str,
    pub submitted_at: DateTime<Utc>,
}
