use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::catalog::ProductCatalog;
use super::domain::{CreditRequest, CustomerProfile, ValidationError};
use super::limit::{CreditLimitResult, CreditLimitSearch, LimitSearchPolicy};
use super::network::{
    ApprovalDecision, ApprovalDecisionNetwork, ApprovalStatus, FeatureVector, NetworkWeights,
};
use super::persona::{PersonaFilter, PersonaResult, PersonaThresholds};
use super::risk::{FuzzyConfig, RiskAssessment, RiskFuzzyEngine};
use super::ConfigurationError;

/// The immutable configuration bundle the pipeline is built from.
///
/// Constructed once at process start and handed to the orchestrator; nothing
/// reads it through ambient state, so tests can swap in alternate bundles.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub catalog: ProductCatalog,
    pub persona: PersonaThresholds,
    pub limit: LimitSearchPolicy,
    pub fuzzy: FuzzyConfig,
    pub weights: NetworkWeights,
}

impl EngineConfig {
    /// Built-in catalog, thresholds, rule base, and weight artifact.
    pub fn standard() -> Self {
        Self {
            catalog: ProductCatalog::standard(),
            persona: PersonaThresholds::default(),
            limit: LimitSearchPolicy::default(),
            fuzzy: FuzzyConfig::default(),
            weights: NetworkWeights::builtin(),
        }
    }

    /// A bundle that cannot run must fail construction, not limp along.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.catalog.is_empty() {
            return Err(ConfigurationError::EmptyCatalog);
        }
        if self.fuzzy.rules.is_empty() {
            return Err(ConfigurationError::EmptyRuleBase);
        }
        self.weights.validate_shape()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Aggregate outcome of one analysis. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditAnalysisResult {
    pub persona: PersonaResult,
    pub limit: Option<CreditLimitResult>,
    pub risk: Option<RiskAssessment>,
    pub decision: Option<ApprovalDecision>,
    /// Key deciding factors, one phrase each, feeding the summary.
    pub key_factors: Vec<String>,
    pub summary: String,
    pub analyzed_at: DateTime<Utc>,
}

impl CreditAnalysisResult {
    pub fn is_approved(&self) -> bool {
        matches!(
            self.decision,
            Some(ApprovalDecision {
                status: ApprovalStatus::Approved,
                ..
            })
        )
    }
}

/// Orchestrator for the four decision stages.
///
/// Stateless and synchronous; safe to share across threads because every
/// stage only reads its config snapshot and the borrowed inputs.
#[derive(Debug)]
pub struct CreditAnalysisPipeline {
    catalog: ProductCatalog,
    persona: PersonaFilter,
    limits: CreditLimitSearch,
    risk: RiskFuzzyEngine,
    network: ApprovalDecisionNetwork,
}

impl CreditAnalysisPipeline {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let EngineConfig {
            catalog,
            persona,
            limit,
            fuzzy,
            weights,
        } = config;

        Ok(Self {
            catalog,
            persona: PersonaFilter::new(persona),
            limits: CreditLimitSearch::new(limit),
            risk: RiskFuzzyEngine::new(fuzzy),
            network: ApprovalDecisionNetwork::new(weights)?,
        })
    }

    /// Run the full pipeline for one applicant.
    ///
    /// Persona rejection short-circuits; an infeasible limit does not, the
    /// later stages just see a zero limit ratio.
    pub fn analyze(
        &self,
        profile: &CustomerProfile,
        request: &CreditRequest,
    ) -> Result<CreditAnalysisResult, ValidationError> {
        profile.validate()?;
        request.validate()?;

        let persona = self.persona.evaluate(profile);
        let Some(tier) = persona.tier() else {
            debug!(
                reason = persona.rejection().map(|r| r.code()),
                "analysis short-circuited at persona screening"
            );
            return Ok(rejection_result(persona));
        };

        let limit = self.limits.search(profile, request, &self.catalog);
        let risk = self.risk.assess(profile);
        let features = FeatureVector::from_stages(profile, request, &limit, &risk);
        let decision = self.network.infer(&features);

        debug!(
            tier = tier.label(),
            feasible = limit.is_feasible(),
            risk = risk.risk_level.label(),
            status = decision.status.label(),
            "analysis complete"
        );

        let key_factors = decision_factors(profile, &risk, &decision);
        let summary = full_summary(&persona, &limit, &risk, &decision, &key_factors);

        Ok(CreditAnalysisResult {
            persona,
            limit: Some(limit),
            risk: Some(risk),
            decision: Some(decision),
            key_factors,
            summary,
            analyzed_at: Utc::now(),
        })
    }
}

fn rejection_result(persona: PersonaResult) -> CreditAnalysisResult {
    let reason = persona
        .rejection()
        .map(|reason| reason.summary())
        .unwrap_or_else(|| "did not meet screening criteria".to_string());
    let summary = format!(
        "rejected at persona screening: {} ({} rules evaluated)",
        reason,
        persona.decision_path.len()
    );

    CreditAnalysisResult {
        persona,
        limit: None,
        risk: None,
        decision: None,
        key_factors: vec![reason],
        summary,
        analyzed_at: Utc::now(),
    }
}

/// Key deciding factors for the chosen status, phrased for the summary.
fn decision_factors(
    profile: &CustomerProfile,
    risk: &RiskAssessment,
    decision: &ApprovalDecision,
) -> Vec<String> {
    let mut factors = Vec::new();
    match decision.status {
        ApprovalStatus::Approved => {
            if profile.credit_score > 700 {
                factors.push("strong credit score".to_string());
            }
            if risk.risk_score < 3.0 {
                factors.push("low assessed default risk".to_string());
            }
            if profile.debt_to_income_ratio < 0.3 {
                factors.push("healthy debt-to-income ratio".to_string());
            }
            if profile.time_at_job_months > 24 {
                factors.push("stable employment history".to_string());
            }
            if factors.is_empty() {
                factors.push("approved on overall profile strength".to_string());
            }
        }
        ApprovalStatus::UnderReview => {
            if (4.0..7.0).contains(&risk.risk_score) {
                factors.push("moderate risk band requires an analyst".to_string());
            }
            if profile.num_credit_inquiries > 5 {
                factors.push("many recent credit inquiries".to_string());
            }
            if profile.time_at_job_months < 12 {
                factors.push("short employment history".to_string());
            }
            if (0.3..=0.4).contains(&profile.debt_to_income_ratio) {
                factors.push("borderline debt-to-income ratio".to_string());
            }
            if factors.is_empty() {
                factors.push("manual review recommended".to_string());
            }
        }
        ApprovalStatus::Rejected => {
            if risk.risk_score >= 7.0 {
                factors.push("high assessed default risk".to_string());
            }
            if profile.credit_score < 500 {
                factors.push("insufficient credit score".to_string());
            }
            if profile.debt_to_income_ratio > 0.5 {
                factors.push("excessive debt-to-income ratio".to_string());
            }
            if !profile.employment_status.is_working() {
                factors.push("employment situation below requirements".to_string());
            }
            if profile.num_credit_inquiries > 8 {
                factors.push("too many recent credit inquiries".to_string());
            }
            if factors.is_empty() {
                factors.push("does not meet approval criteria".to_string());
            }
        }
    }
    factors
}

fn full_summary(
    persona: &PersonaResult,
    limit: &CreditLimitResult,
    risk: &RiskAssessment,
    decision: &ApprovalDecision,
    key_factors: &[String],
) -> String {
    let tier = persona
        .tier()
        .map(|tier| tier.label())
        .unwrap_or("unclassified");

    let offer_part = match limit.offer() {
        Some(offer) => format!(
            "offer {:.2} over {}x of {:.2} ({})",
            offer.approved_limit,
            offer.max_installments,
            offer.monthly_installment,
            offer.product_type.label()
        ),
        None => "no feasible offer".to_string(),
    };

    format!(
        "persona {}; {}; risk {} ({:.1}/10); decision {} at {:.0}% confidence: {}",
        tier,
        offer_part,
        risk.risk_level.label(),
        risk.risk_score,
        decision.status.label(),
        decision.confidence * 100.0,
        key_factors.join(", ")
    )
}
