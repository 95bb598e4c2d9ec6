use super::common::*;
use crate::engine::domain::EmploymentStatus;
use crate::engine::persona::{PersonaFilter, PersonaRejection, PersonaTier};

#[test]
fn strong_profile_classifies_premium_with_full_path() {
    let filter = PersonaFilter::default();
    let result = filter.evaluate(&strong_profile());

    assert_eq!(result.tier(), Some(PersonaTier::Premium));
    assert_eq!(
        result.decision_path,
        vec![
            "age_requirement",
            "bacen_restriction",
            "credit_score",
            "income_floor",
            "debt_ratio",
            "employment_status",
            "premium_income",
            "premium_score",
            "premium_tenure",
        ]
    );
}

#[test]
fn underage_applicant_fails_on_the_first_check() {
    let filter = PersonaFilter::default();
    let mut profile = strong_profile();
    profile.age = 17;

    let result = filter.evaluate(&profile);

    assert_eq!(result.rejection(), Some(PersonaRejection::AgeRequirement));
    assert_eq!(result.decision_path, vec!["age_requirement"]);
}

#[test]
fn bacen_restriction_rejects_an_otherwise_strong_profile() {
    let filter = PersonaFilter::default();
    let mut profile = strong_profile();
    profile.has_bacen_restriction = true;

    let result = filter.evaluate(&profile);

    assert_eq!(result.rejection(), Some(PersonaRejection::BacenRestriction));
    assert_eq!(
        result.decision_path,
        vec!["age_requirement", "bacen_restriction"]
    );
}

#[test]
fn sub_floor_credit_score_rejects() {
    let filter = PersonaFilter::default();
    let mut profile = strong_profile();
    profile.credit_score = 250;

    let result = filter.evaluate(&profile);

    assert_eq!(result.rejection(), Some(PersonaRejection::CreditScore));
    assert_eq!(result.decision_path.last(), Some(&"credit_score"));
}

#[test]
fn heavy_debt_ratio_rejects() {
    let filter = PersonaFilter::default();
    let mut profile = strong_profile();
    profile.debt_to_income_ratio = 0.55;

    let result = filter.evaluate(&profile);

    assert_eq!(result.rejection(), Some(PersonaRejection::DebtRatio));
    assert_eq!(result.decision_path.len(), 5);
}

#[test]
fn unemployed_applicant_rejects_on_the_last_disqualifier() {
    let filter = PersonaFilter::default();
    let mut profile = strong_profile();
    profile.employment_status = EmploymentStatus::Unemployed;

    let result = filter.evaluate(&profile);

    assert_eq!(
        result.rejection(),
        Some(PersonaRejection::EmploymentStatus)
    );
    assert_eq!(result.decision_path.len(), 6);
}

#[test]
fn missed_premium_threshold_falls_through_to_standard() {
    let filter = PersonaFilter::default();
    let result = filter.evaluate(&standard_profile());

    assert_eq!(result.tier(), Some(PersonaTier::Standard));
    // Premium income misses at 5000, so the premium chain stops there.
    assert!(result.decision_path.contains(&"premium_income"));
    assert!(!result.decision_path.contains(&"premium_score"));
    assert!(result.decision_path.contains(&"standard_tenure"));
}

#[test]
fn thin_profile_lands_on_basic() {
    let filter = PersonaFilter::default();
    let result = filter.evaluate(&basic_profile());

    assert_eq!(result.tier(), Some(PersonaTier::Basic));
}

#[test]
fn retired_applicant_passes_screening() {
    let filter = PersonaFilter::default();
    let mut profile = basic_profile();
    profile.age = 68;
    profile.employment_status = EmploymentStatus::Retired;
    profile.time_at_job_months = 0;

    let result = filter.evaluate(&profile);

    assert_eq!(result.tier(), Some(PersonaTier::Basic));
}

#[test]
fn evaluation_is_deterministic() {
    let filter = PersonaFilter::default();
    let profile = standard_profile();

    let first = filter.evaluate(&profile);
    let second = filter.evaluate(&profile);

    assert_eq!(first, second);
}
