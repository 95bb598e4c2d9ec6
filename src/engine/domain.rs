use serde::{Deserialize, Serialize};

/// Applicant snapshot consumed by every pipeline stage.
///
/// The record is immutable once built; stages borrow it and never write back.
/// `has_bacen_restriction` carries the domestic credit-bureau restriction flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub age: u8,
    pub income: f64,
    pub credit_score: u16,
    pub employment_status: EmploymentStatus,
    pub debt_to_income_ratio: f64,
    pub time_at_job_months: u32,
    pub has_bank_account: bool,
    pub has_bacen_restriction: bool,
    pub num_credit_inquiries: u32,
    pub num_existing_loans: u32,
}

impl CustomerProfile {
    /// Reject malformed field values before the pipeline runs.
    ///
    /// Out-of-policy values (a 17-year-old, a sub-floor score) are NOT
    /// malformed; the persona stage turns those into structured rejections.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.income.is_finite() || self.income < 0.0 {
            return Err(ValidationError::NegativeIncome {
                income: self.income,
            });
        }
        if self.credit_score > 1000 {
            return Err(ValidationError::CreditScoreOutOfRange {
                score: self.credit_score,
            });
        }
        if !self.debt_to_income_ratio.is_finite()
            || !(0.0..=1.0).contains(&self.debt_to_income_ratio)
        {
            return Err(ValidationError::DebtRatioOutOfRange {
                ratio: self.debt_to_income_ratio,
            });
        }
        Ok(())
    }
}

/// Employment situations recognized by the decision rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Retired,
    Unemployed,
}

impl EmploymentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EmploymentStatus::Employed => "employed",
            EmploymentStatus::SelfEmployed => "self_employed",
            EmploymentStatus::Retired => "retired",
            EmploymentStatus::Unemployed => "unemployed",
        }
    }

    /// Whether the status counts as active earnings for the network feature.
    pub const fn is_working(self) -> bool {
        matches!(
            self,
            EmploymentStatus::Employed | EmploymentStatus::SelfEmployed
        )
    }
}

/// Credit products the catalog can price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    PersonalLoan,
    CreditCard,
    AutoLoan,
    HomeLoan,
}

impl ProductType {
    pub const fn label(self) -> &'static str {
        match self {
            ProductType::PersonalLoan => "personal_loan",
            ProductType::CreditCard => "credit_card",
            ProductType::AutoLoan => "auto_loan",
            ProductType::HomeLoan => "home_loan",
        }
    }
}

/// One credit request, tied to the profile it was submitted with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditRequest {
    pub requested_amount: f64,
    pub product_type: ProductType,
    #[serde(default)]
    pub requested_installments: Option<u32>,
    /// Advisory free text; never consulted by the decision stages.
    #[serde(default)]
    pub purpose: Option<String>,
}

impl CreditRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.requested_amount.is_finite() || self.requested_amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount {
                amount: self.requested_amount,
            });
        }
        if self.requested_installments == Some(0) {
            return Err(ValidationError::ZeroInstallments);
        }
        Ok(())
    }
}

/// Malformed-input failures raised before any stage runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("income must be a non-negative number, got {income}")]
    NegativeIncome { income: f64 },
    #[error("credit score must be within 0..=1000, got {score}")]
    CreditScoreOutOfRange { score: u16 },
    #[error("debt-to-income ratio must be within [0, 1], got {ratio}")]
    DebtRatioOutOfRange { ratio: f64 },
    #[error("requested amount must be positive, got {amount}")]
    NonPositiveAmount { amount: f64 },
    #[error("requested installments must be at least 1")]
    ZeroInstallments,
}
