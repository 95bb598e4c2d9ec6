use super::common::*;
use crate::engine::risk::{
    Antecedent, Condition, FuzzyConfig, FuzzyRule, LinguisticTerm, MembershipFunction,
    RiskFactor, RiskFuzzyEngine, RiskLevel,
};

#[test]
fn strong_profile_scores_low_risk() {
    let engine = RiskFuzzyEngine::default();
    let assessment = engine.assess(&strong_profile());

    assert_eq!(assessment.risk_level, RiskLevel::Low);
    assert!(
        (1.0..2.5).contains(&assessment.risk_score),
        "expected a deep-low centroid, got {}",
        assessment.risk_score
    );
}

#[test]
fn saturated_bad_signals_score_high_risk() {
    let engine = RiskFuzzyEngine::default();
    let mut profile = basic_profile();
    profile.credit_score = 300;
    profile.income = 1_500.0;
    profile.debt_to_income_ratio = 0.80;
    profile.num_credit_inquiries = 12;
    profile.time_at_job_months = 3;

    let assessment = engine.assess(&profile);

    assert_eq!(assessment.risk_level, RiskLevel::High);
    assert!(
        (6.9..7.5).contains(&assessment.risk_score),
        "got {}",
        assessment.risk_score
    );
}

#[test]
fn mid_profile_scores_medium_risk() {
    let engine = RiskFuzzyEngine::default();
    let assessment = engine.assess(&standard_profile());

    assert_eq!(assessment.risk_level, RiskLevel::Medium);
    assert!((4.5..6.0).contains(&assessment.risk_score), "got {}", assessment.risk_score);
}

#[test]
fn risk_score_stays_inside_the_universe() {
    let engine = RiskFuzzyEngine::default();
    for profile in [strong_profile(), standard_profile(), basic_profile()] {
        let assessment = engine.assess(&profile);
        assert!((0.0..=10.0).contains(&assessment.risk_score));
    }
}

#[test]
fn level_thresholds_are_monotonic() {
    assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(3.9), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(4.0), RiskLevel::Medium);
    assert_eq!(RiskLevel::from_score(6.99), RiskLevel::Medium);
    assert_eq!(RiskLevel::from_score(7.0), RiskLevel::High);
    assert_eq!(RiskLevel::from_score(10.0), RiskLevel::High);

    let mut previous = RiskLevel::Low;
    for step in 0..=100 {
        let level = RiskLevel::from_score(step as f64 / 10.0);
        assert!(level >= previous);
        previous = level;
    }
}

#[test]
fn contributions_report_the_dominant_degree_per_factor() {
    let engine = RiskFuzzyEngine::default();
    let assessment = engine.assess(&strong_profile());

    let score = &assessment.factor_contributions["credit_score"];
    assert_eq!(score.dominant_term, "high");
    assert_eq!(score.weight, 1.0);

    let debt = &assessment.factor_contributions["debt_ratio"];
    assert_eq!(debt.dominant_term, "low");
    assert!(debt.weight > 0.0);

    assert_eq!(assessment.factor_contributions.len(), 5);
}

#[test]
fn membership_edges_behave_like_shoulders() {
    let left = MembershipFunction::Trapezoid { a: 0.0, b: 0.0, c: 450.0, d: 550.0 };
    assert_eq!(left.degree(0.0), 1.0);
    assert_eq!(left.degree(450.0), 1.0);
    assert_eq!(left.degree(500.0), 0.5);
    assert_eq!(left.degree(550.0), 0.0);

    let right = MembershipFunction::Trapezoid { a: 700.0, b: 780.0, c: 1000.0, d: 1000.0 };
    assert_eq!(right.degree(1000.0), 1.0);
    assert_eq!(right.degree(740.0), 0.5);
    assert_eq!(right.degree(699.0), 0.0);

    let peak = MembershipFunction::Triangle { a: 3.0, b: 5.5, c: 7.5 };
    assert_eq!(peak.degree(5.5), 1.0);
    assert_eq!(peak.degree(3.0), 0.0);
    assert_eq!(peak.degree(6.5), 0.5);
}

#[test]
fn disjunctive_antecedents_take_the_strongest_branch() {
    // A single OR rule lets either weak signal fire the medium band alone.
    let config = FuzzyConfig {
        rules: vec![FuzzyRule {
            antecedent: Antecedent::Any(vec![
                Condition { factor: RiskFactor::EmploymentTenure, term: LinguisticTerm::Low },
                Condition { factor: RiskFactor::Inquiries, term: LinguisticTerm::High },
            ]),
            consequent: LinguisticTerm::Medium,
        }],
        ..FuzzyConfig::default()
    };
    let engine = RiskFuzzyEngine::new(config);

    let mut profile = strong_profile();
    profile.time_at_job_months = 2;

    let assessment = engine.assess(&profile);
    assert_eq!(assessment.risk_level, RiskLevel::Medium);
}

#[test]
fn empty_firing_falls_back_to_the_universe_midpoint() {
    // A rule that cannot fire for this profile leaves the output curve empty.
    let config = FuzzyConfig {
        rules: vec![FuzzyRule {
            antecedent: Antecedent::All(vec![
                Condition { factor: RiskFactor::CreditScore, term: LinguisticTerm::Low },
                Condition { factor: RiskFactor::DebtRatio, term: LinguisticTerm::High },
            ]),
            consequent: LinguisticTerm::High,
        }],
        ..FuzzyConfig::default()
    };
    let engine = RiskFuzzyEngine::new(config);

    let assessment = engine.assess(&strong_profile());
    assert_eq!(assessment.risk_score, 5.0);
    assert_eq!(assessment.risk_level, RiskLevel::Medium);
}
