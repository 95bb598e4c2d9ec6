mod membership;
mod rules;

pub use membership::{
    FactorMemberships, LinguisticTerm, MembershipFunction, MembershipTable, RiskFactor,
};
pub use rules::{standard_rules, Antecedent, Condition, FuzzyRule};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::CustomerProfile;

/// Discretization of the output universe used by the centroid.
const UNIVERSE_MIN: f64 = 0.0;
const UNIVERSE_MAX: f64 = 10.0;
const UNIVERSE_STEP: f64 = 0.05;

/// Level cut points over the defuzzified score.
const LOW_CEILING: f64 = 4.0;
const MEDIUM_CEILING: f64 = 7.0;

/// Categorical risk band derived from the crisp score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    pub fn from_score(score: f64) -> Self {
        if score < LOW_CEILING {
            RiskLevel::Low
        } else if score < MEDIUM_CEILING {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

/// How one input factor read during fuzzification, kept for explainability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorContribution {
    /// The linguistic degree with the highest membership for this factor.
    pub dominant_term: &'static str,
    /// That degree's membership value in [0, 1].
    pub weight: f64,
}

/// Stage-3 result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub factor_contributions: BTreeMap<&'static str, FactorContribution>,
}

/// Membership definitions plus the rule table, as one injectable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyConfig {
    pub memberships: MembershipTable,
    pub rules: Vec<FuzzyRule>,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            memberships: MembershipTable::default(),
            rules: standard_rules(),
        }
    }
}

/// Stage 3: Mamdani-style fuzzy inference over the applicant profile.
///
/// The assessment deliberately ignores the stage-2 offer so a risk score
/// exists even when no product is feasible.
#[derive(Debug)]
pub struct RiskFuzzyEngine {
    config: FuzzyConfig,
}

impl RiskFuzzyEngine {
    pub fn new(config: FuzzyConfig) -> Self {
        Self { config }
    }

    pub fn assess(&self, profile: &CustomerProfile) -> RiskAssessment {
        let degrees = self.fuzzify(profile);
        let fired = self.fire_rules(&degrees);
        let risk_score = self.defuzzify(&fired);

        RiskAssessment {
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
            factor_contributions: contributions(&degrees),
        }
    }

    /// Membership degree of every (factor, term) pair for this profile.
    fn fuzzify(&self, profile: &CustomerProfile) -> Vec<((RiskFactor, LinguisticTerm), f64)> {
        let mut degrees = Vec::with_capacity(RiskFactor::ALL.len() * LinguisticTerm::ALL.len());
        for factor in RiskFactor::ALL {
            let crisp = factor.crisp(profile);
            for term in LinguisticTerm::ALL {
                degrees.push(((factor, term), self.config.memberships.degree(factor, term, crisp)));
            }
        }
        degrees
    }

    /// Evaluate every rule and aggregate firing strengths per consequent (max).
    fn fire_rules(&self, degrees: &[((RiskFactor, LinguisticTerm), f64)]) -> [f64; 3] {
        let lookup = |condition: &Condition| -> f64 {
            degrees
                .iter()
                .find(|((factor, term), _)| *factor == condition.factor && *term == condition.term)
                .map(|(_, degree)| *degree)
                .unwrap_or(0.0)
        };

        let mut fired = [0.0_f64; 3];
        for rule in &self.config.rules {
            let strength = match &rule.antecedent {
                Antecedent::All(conditions) => conditions
                    .iter()
                    .map(lookup)
                    .fold(f64::INFINITY, f64::min)
                    .min(1.0),
                Antecedent::Any(conditions) => {
                    conditions.iter().map(lookup).fold(0.0, f64::max)
                }
            };

            let slot = term_index(rule.consequent);
            if strength > fired[slot] {
                fired[slot] = strength;
            }
        }
        fired
    }

    /// Centroid of the clipped-and-merged output curve over [0, 10].
    fn defuzzify(&self, fired: &[f64; 3]) -> f64 {
        let output = &self.config.memberships.risk;
        let mut weighted = 0.0;
        let mut total = 0.0;

        let steps = ((UNIVERSE_MAX - UNIVERSE_MIN) / UNIVERSE_STEP).round() as usize;
        for step in 0..=steps {
            let x = UNIVERSE_MIN + step as f64 * UNIVERSE_STEP;
            let mut mu: f64 = 0.0;
            for term in LinguisticTerm::ALL {
                let clipped = fired[term_index(term)].min(output.for_term(term).degree(x));
                mu = mu.max(clipped);
            }
            weighted += x * mu;
            total += mu;
        }

        if total <= f64::EPSILON {
            // No rule fired; report the universe midpoint rather than NaN.
            return (UNIVERSE_MIN + UNIVERSE_MAX) / 2.0;
        }

        (weighted / total).clamp(UNIVERSE_MIN, UNIVERSE_MAX)
    }
}

impl Default for RiskFuzzyEngine {
    fn default() -> Self {
        Self::new(FuzzyConfig::default())
    }
}

fn term_index(term: LinguisticTerm) -> usize {
    match term {
        LinguisticTerm::Low => 0,
        LinguisticTerm::Medium => 1,
        LinguisticTerm::High => 2,
    }
}

fn contributions(
    degrees: &[((RiskFactor, LinguisticTerm), f64)],
) -> BTreeMap<&'static str, FactorContribution> {
    let mut map = BTreeMap::new();
    for factor in RiskFactor::ALL {
        let mut dominant = LinguisticTerm::Low;
        let mut weight = f64::MIN;
        for ((candidate, term), degree) in degrees {
            if *candidate == factor && *degree > weight {
                dominant = *term;
                weight = *degree;
            }
        }
        map.insert(
            factor.name(),
            FactorContribution {
                dominant_term: dominant.label(),
                weight: weight.max(0.0),
            },
        );
    }
    map
}
