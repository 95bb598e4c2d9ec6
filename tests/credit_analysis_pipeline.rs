use credit_ai::engine::{
    ApprovalStatus, CreditAnalysisPipeline, CreditRequest, CustomerProfile, EmploymentStatus,
    EngineConfig, PersonaRejection, PersonaTier, ProductType, RiskLevel,
};

fn pipeline() -> CreditAnalysisPipeline {
    CreditAnalysisPipeline::new(EngineConfig::standard()).expect("standard config builds")
}

fn applicant() -> CustomerProfile {
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

fn loan_request(amount: f64) -> CreditRequest {
    CreditRequest {
        requested_amount: amount,
        product_type: ProductType::PersonalLoan,
        requested_installments: Some(24),
        purpose: Some("home renovation".to_string()),
    }
}

#[test]
fn strong_applicant_is_approved_end_to_end() {
    let result = pipeline()
        .analyze(&applicant(), &loan_request(25_000.0))
        .expect("analysis runs");

    assert_eq!(result.persona.tier(), Some(PersonaTier::Premium));

    let offer = result
        .limit
        .as_ref()
        .and_then(|limit| limit.offer())
        .expect("feasible offer");
    assert_eq!(offer.approved_limit, 25_000.0);
    assert_eq!(offer.product_type, ProductType::PersonalLoan);

    assert_eq!(
        result.risk.as_ref().expect("risk present").risk_level,
        RiskLevel::Low
    );

    let decision = result.decision.as_ref().expect("decision present");
    assert_eq!(decision.status, ApprovalStatus::Approved);

    let total: f64 = decision.class_probabilities.iter().sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert_eq!(decision.confidence, decision.class_probabilities[0]);
}

#[test]
fn underage_applicant_stops_at_the_age_rule() {
    let mut profile = applicant();
    profile.age = 17;

    let result = pipeline()
        .analyze(&profile, &loan_request(25_000.0))
        .expect("analysis runs");

    assert_eq!(
        result.persona.rejection(),
        Some(PersonaRejection::AgeRequirement)
    );
    assert_eq!(result.persona.decision_path, vec!["age_requirement"]);
    assert!(result.limit.is_none());
    assert!(result.risk.is_none());
    assert!(result.decision.is_none());
}

#[test]
fn bacen_restriction_overrides_a_strong_profile() {
    let mut profile = applicant();
    profile.has_bacen_restriction = true;

    let result = pipeline()
        .analyze(&profile, &loan_request(25_000.0))
        .expect("analysis runs");

    assert_eq!(
        result.persona.rejection(),
        Some(PersonaRejection::BacenRestriction)
    );
    assert!(result.decision.is_none());
}

#[test]
fn deep_subprime_score_is_screened_out() {
    let mut profile = applicant();
    profile.credit_score = 250;

    let result = pipeline()
        .analyze(&profile, &loan_request(25_000.0))
        .expect("analysis runs");

    assert_eq!(
        result.persona.rejection(),
        Some(PersonaRejection::CreditScore)
    );
}

#[test]
fn over_ceiling_debt_ratio_is_screened_out() {
    let mut profile = applicant();
    profile.debt_to_income_ratio = 0.55;

    let result = pipeline()
        .analyze(&profile, &loan_request(25_000.0))
        .expect("analysis runs");

    assert_eq!(result.persona.rejection(), Some(PersonaRejection::DebtRatio));
}

#[test]
fn oversized_request_still_gets_a_full_assessment() {
    let profile = CustomerProfile {
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
    };

    let result = pipeline()
        .analyze(&profile, &loan_request(900_000.0))
        .expect("analysis runs");

    assert_eq!(result.persona.tier(), Some(PersonaTier::Standard));
    assert!(!result.limit.as_ref().expect("limit stage ran").is_feasible());

    // Risk is computed independently of the limit stage.
    let risk = result.risk.as_ref().expect("risk present");
    assert!((0.0..=10.0).contains(&risk.risk_score));

    let decision = result.decision.as_ref().expect("decision present");
    assert_eq!(decision.status, ApprovalStatus::UnderReview);
}

#[test]
fn repeated_analysis_yields_identical_decisions() {
    let pipeline = pipeline();
    let profile = applicant();
    let request = loan_request(25_000.0);

    let first = pipeline.analyze(&profile, &request).expect("runs");
    let second = pipeline.analyze(&profile, &request).expect("runs");

    assert_eq!(first.decision, second.decision);
    assert_eq!(first.persona.decision_path, second.persona.decision_path);
}
