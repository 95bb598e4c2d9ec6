mod weights;

pub use weights::{
    Activation, NetworkWeights, WeightsImportError, CLASS_LEN, FEATURE_LEN, HIDDEN_LEN,
};

use serde::{Deserialize, Serialize};

use super::domain::{CreditRequest, CustomerProfile};
use super::limit::CreditLimitResult;
use super::risk::RiskAssessment;
use super::ConfigurationError;

/// Final disposition of the credit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Approved,
    UnderReview,
    Rejected,
}

impl ApprovalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::UnderReview => "under_review",
            ApprovalStatus::Rejected => "rejected",
        }
    }

    const fn from_index(index: usize) -> Self {
        match index {
            0 => ApprovalStatus::Approved,
            1 => ApprovalStatus::UnderReview,
            _ => ApprovalStatus::Rejected,
        }
    }
}

/// Stage-4 result: argmax class, its probability, and the full distribution
/// in `[approved, under_review, rejected]` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalDecision {
    pub status: ApprovalStatus,
    pub confidence: f64,
    pub class_probabilities: [f64; CLASS_LEN],
}

/// The network's input contract, order-significant.
///
/// Slots: normalized age `(age-18)/57`; `credit_score/1000`; log-scaled income
/// `min(1, ln(1+income)/ln(1+50000))`; debt-to-income ratio; working binary;
/// bank-account binary; `min(1, inquiries/10)`; `min(1, loans/5)`;
/// `risk_score/10`; approved-limit-to-request ratio (0 when infeasible).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_LEN]);

const INCOME_LOG_CAP: f64 = 50_000.0;

impl FeatureVector {
    /// Assemble the vector from the profile and the earlier stage outputs.
    pub fn from_stages(
        profile: &CustomerProfile,
        request: &CreditRequest,
        limit: &CreditLimitResult,
        risk: &RiskAssessment,
    ) -> Self {
        let age = ((profile.age as f64 - 18.0) / 57.0).clamp(0.0, 1.0);
        let score = profile.credit_score as f64 / 1000.0;
        let income = (profile.income.ln_1p() / INCOME_LOG_CAP.ln_1p()).min(1.0);
        let debt = profile.debt_to_income_ratio;
        let working = if profile.employment_status.is_working() { 1.0 } else { 0.0 };
        let banked = if profile.has_bank_account { 1.0 } else { 0.0 };
        let inquiries = (profile.num_credit_inquiries as f64 / 10.0).min(1.0);
        let loans = (profile.num_existing_loans as f64 / 5.0).min(1.0);
        let risk_score = risk.risk_score / 10.0;
        let limit_ratio = limit
            .offer()
            .map(|offer| offer.approved_limit / request.requested_amount)
            .unwrap_or(0.0);

        Self([
            age, score, income, debt, working, banked, inquiries, loans, risk_score, limit_ratio,
        ])
    }

    pub fn from_raw(values: [f64; FEATURE_LEN]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Stage 4: two-layer forward pass over an injected weight artifact.
#[derive(Debug)]
pub struct ApprovalDecisionNetwork {
    weights: NetworkWeights,
}

impl ApprovalDecisionNetwork {
    /// Shape validation happens here so a bad artifact is a construction
    /// failure, never a mid-analysis panic.
    pub fn new(weights: NetworkWeights) -> Result<Self, ConfigurationError> {
        weights.validate_shape()?;
        Ok(Self { weights })
    }

    pub fn version(&self) -> &str {
        &self.weights.version
    }

    /// Deterministic inference: softmax over the logits, argmax wins (first
    /// index on exact ties).
    pub fn infer(&self, features: &FeatureVector) -> ApprovalDecision {
        let x = features.as_slice();

        let mut hidden = [0.0_f64; HIDDEN_LEN];
        for (unit, (row, bias)) in self.weights.w1.iter().zip(&self.weights.b1).enumerate() {
            let z: f64 = row.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + bias;
            hidden[unit] = self.weights.activation.apply(z);
        }

        let mut logits = [0.0_f64; CLASS_LEN];
        for (class, (row, bias)) in self.weights.w2.iter().zip(&self.weights.b2).enumerate() {
            logits[class] = row.iter().zip(&hidden).map(|(w, h)| w * h).sum::<f64>() + bias;
        }

        let class_probabilities = softmax(logits);
        let (winner, confidence) = argmax(&class_probabilities);

        ApprovalDecision {
            status: ApprovalStatus::from_index(winner),
            confidence,
            class_probabilities,
        }
    }
}

/// Max-subtracted for numeric stability.
fn softmax(logits: [f64; CLASS_LEN]) -> [f64; CLASS_LEN] {
    let peak = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut probabilities = [0.0_f64; CLASS_LEN];
    let mut total = 0.0;
    for (slot, logit) in logits.iter().enumerate() {
        let e = (logit - peak).exp();
        probabilities[slot] = e;
        total += e;
    }
    for probability in &mut probabilities {
        *probability /= total;
    }
    probabilities
}

fn argmax(probabilities: &[f64; CLASS_LEN]) -> (usize, f64) {
    let mut winner = 0;
    for (index, probability) in probabilities.iter().enumerate() {
        if *probability > probabilities[winner] {
            winner = index;
        }
    }
    (winner, probabilities[winner])
}
