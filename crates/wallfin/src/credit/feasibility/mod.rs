//! Affordability screening for credit requests.
//!
//! Given the household's monthly income, its existing charges, and the installment quoted for
//! the new credit, the evaluator derives a debt ratio and a residual income ("reste a vivre")
//! and classifies the request. The classification is a pre-screen: `LIMIT` requests are still
//! forwarded to an advisor.

mod config;
mod policy;
mod rules;

pub use config::{FeasibilityConfig, ResidualIncomeTable};
pub use policy::FeasibilityStatus;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Figures and outcome produced for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeasibilityAssessment {
    pub debt_ratio_percent: Decimal,
    pub residual_income: Decimal,
    pub minimum_residual_income: Decimal,
    pub feasible: bool,
    pub status: FeasibilityStatus,
}

/// Stateless evaluator applying a threshold configuration.
#[derive(Debug, Clone, Default)]
pub struct FeasibilityEvaluator {
    config: FeasibilityConfig,
}

impl FeasibilityEvaluator {
    pub fn new(config: FeasibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeasibilityConfig {
        &self.config
    }

    /// Screen a request.
    ///
    /// Inputs are not validated: negative amounts flow straight into the arithmetic.
    ///
    /// # Panics
    ///
    /// Panics when `monthly_income` is zero, or when the figures overflow `Decimal`. Use
    /// [`FeasibilityEvaluator::checked_evaluate`] for untrusted input.
    pub fn evaluate(
        &self,
        monthly_income: Decimal,
        existing_charges: Decimal,
        new_installment: Decimal,
        household_size: u8,
    ) -> FeasibilityAssessment {
        match self.checked_evaluate(
            monthly_income,
            existing_charges,
            new_installment,
            household_size,
        ) {
            Some(assessment) => assessment,
            None => panic!(
                "cannot screen income {monthly_income} against charges {existing_charges} \
                 and installment {new_installment}"
            ),
        }
    }

    /// Like [`FeasibilityEvaluator::evaluate`], but returns `None` instead of panicking on a
    /// zero income or on figures outside the `Decimal` range.
    pub fn checked_evaluate(
        &self,
        monthly_income: Decimal,
        existing_charges: Decimal,
        new_installment: Decimal,
        household_size: u8,
    ) -> Option<FeasibilityAssessment> {
        let signals = rules::measure(
            &self.config,
            monthly_income,
            existing_charges,
            new_installment,
            household_size,
        )?;
        let status = policy::classify(&self.config, &signals);

        Some(FeasibilityAssessment {
            debt_ratio_percent: signals.debt_ratio_percent,
            residual_income: signals.residual_income,
            minimum_residual_income: signals.minimum_residual_income,
            feasible: status.is_feasible(),
            status,
        })
    }
}

/// Screen a request with the standard Wallfin thresholds.
///
/// # Panics
///
/// Panics when `monthly_income` is zero or the figures overflow `Decimal`.
pub fn evaluate(
    monthly_income: Decimal,
    existing_charges: Decimal,
    new_installment: Decimal,
    household_size: u8,
) -> FeasibilityAssessment {
    FeasibilityEvaluator::default().evaluate(
        monthly_income,
        existing_charges,
        new_installment,
        household_size,
    )
}
