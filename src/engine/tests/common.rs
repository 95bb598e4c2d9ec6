use crate::engine::catalog::ProductCatalog;
use crate::engine::domain::{CreditRequest, CustomerProfile, EmploymentStatus, ProductType};
use crate::engine::service::{CreditAnalysisPipeline, EngineConfig};

/// Applicant that should clear every stage comfortably.
pub(super) fn strong_profile() -> CustomerProfile {
    CustomerProfile {
        age: 35,
        income: 8_500.0,
        credit_score: 780,
        employment_status: EmploymentStatus::Employed,
        debt_to_income_ratio: 0.25,
        time_at_job_months: 48,
        has_bank_account: true,
        has_bacen_restriction: false,
        num_credit_inquiries: 1,
        num_existing_loans: 1,
    }
}

/// Mid-tier applicant: passes screening, classifies standard.
pub(super) fn standard_profile() -> CustomerProfile {
    CustomerProfile {
        age: 30,
        income: 5_000.0,
        credit_score: 700,
        employment_status: EmploymentStatus::Employed,
        debt_to_income_ratio: 0.32,
        time_at_job_months: 12,
        has_bank_account: true,
        has_bacen_restriction: false,
        num_credit_inquiries: 2,
        num_existing_loans: 1,
    }
}

/// Thin-margin applicant: passes screening on the basic tier only.
pub(super) fn basic_profile() -> CustomerProfile {
    CustomerProfile {
        age: 22,
        income: 1_600.0,
        credit_score: 560,
        employment_status: EmploymentStatus::Employed,
        debt_to_income_ratio: 0.45,
        time_at_job_months: 10,
        has_bank_account: true,
        has_bacen_restriction: false,
        num_credit_inquiries: 3,
        num_existing_loans: 2,
    }
}

pub(super) fn personal_loan_request(amount: f64) -> CreditRequest {
    CreditRequest {
        requested_amount: amount,
        product_type: ProductType::PersonalLoan,
        requested_installments: Some(24),
        purpose: None,
    }
}

pub(super) fn catalog() -> ProductCatalog {
    ProductCatalog::standard()
}

pub(super) fn pipeline() -> CreditAnalysisPipeline {
    CreditAnalysisPipeline::new(EngineConfig::standard()).expect("standard config is valid")
}
