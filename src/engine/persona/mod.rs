mod tree;

use serde::{Deserialize, Serialize};

use super::domain::{CustomerProfile, EmploymentStatus};
use tree::{all_of, traverse, Predicate, RuleCheck, RuleNode, TreeOutcome};

/// Employment situations that clear the hard disqualifier.
const ACCEPTED_EMPLOYMENT: &[EmploymentStatus] = &[
    EmploymentStatus::Employed,
    EmploymentStatus::SelfEmployed,
    EmploymentStatus::Retired,
];

/// Coarse applicant classification used to gate downstream eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaTier {
    Premium,
    Standard,
    Basic,
}

impl PersonaTier {
    pub const fn label(self) -> &'static str {
        match self {
            PersonaTier::Premium => "premium",
            PersonaTier::Standard => "standard",
            PersonaTier::Basic => "basic",
        }
    }
}

/// Structured reason for a hard rejection. The code doubles as the id of the
/// failed rule in the decision path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaRejection {
    AgeRequirement,
    BacenRestriction,
    CreditScore,
    IncomeFloor,
    DebtRatio,
    EmploymentStatus,
}

impl PersonaRejection {
    pub const fn code(self) -> &'static str {
        match self {
            PersonaRejection::AgeRequirement => "age_requirement",
            PersonaRejection::BacenRestriction => "bacen_restriction",
            PersonaRejection::CreditScore => "credit_score",
            PersonaRejection::IncomeFloor => "income_floor",
            PersonaRejection::DebtRatio => "debt_ratio",
            PersonaRejection::EmploymentStatus => "employment_status",
        }
    }

    pub fn summary(self) -> String {
        match self {
            PersonaRejection::AgeRequirement => "applicant age outside the accepted range".into(),
            PersonaRejection::BacenRestriction => "active BACEN restriction on record".into(),
            PersonaRejection::CreditScore => "credit score below the minimum floor".into(),
            PersonaRejection::IncomeFloor => "income below the minimum floor".into(),
            PersonaRejection::DebtRatio => "debt-to-income ratio above the ceiling".into(),
            PersonaRejection::EmploymentStatus => "employment situation not accepted".into(),
        }
    }
}

/// Outcome of the persona stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PersonaOutcome {
    Qualified { tier: PersonaTier },
    Rejected { reason: PersonaRejection },
}

/// Stage-1 result: tier or rejection, plus the ordered audit path of rule ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonaResult {
    pub outcome: PersonaOutcome,
    pub decision_path: Vec<&'static str>,
}

impl PersonaResult {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, PersonaOutcome::Qualified { .. })
    }

    pub fn tier(&self) -> Option<PersonaTier> {
        match self.outcome {
            PersonaOutcome::Qualified { tier } => Some(tier),
            PersonaOutcome::Rejected { .. } => None,
        }
    }

    pub fn rejection(&self) -> Option<PersonaRejection> {
        match self.outcome {
            PersonaOutcome::Qualified { .. } => None,
            PersonaOutcome::Rejected { reason } => Some(reason),
        }
    }
}

/// Minimums a profile must meet to classify into one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub min_income: f64,
    pub min_credit_score: u16,
    pub min_tenure_months: u32,
}

/// Threshold table backing the rule tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaThresholds {
    pub age_min: u8,
    pub age_max: u8,
    pub min_credit_score: u16,
    pub min_income: f64,
    pub max_debt_ratio: f64,
    pub premium: TierThresholds,
    pub standard: TierThresholds,
}

impl Default for PersonaThresholds {
    fn default() -> Self {
        Self {
            age_min: 18,
            age_max: 75,
            min_credit_score: 400,
            min_income: 1_500.0,
            max_debt_ratio: 0.50,
            premium: TierThresholds {
                min_income: 8_000.0,
                min_credit_score: 750,
                min_tenure_months: 24,
            },
            standard: TierThresholds {
                min_income: 3_000.0,
                min_credit_score: 650,
                min_tenure_months: 6,
            },
        }
    }
}

/// Stage 1: ordered rule tree that hard-rejects or classifies the applicant.
#[derive(Debug)]
pub struct PersonaFilter {
    root: RuleNode,
}

impl PersonaFilter {
    pub fn new(thresholds: PersonaThresholds) -> Self {
        Self {
            root: build_tree(&thresholds),
        }
    }

    /// Pure and total: identical profiles yield identical outcomes and paths.
    pub fn evaluate(&self, profile: &CustomerProfile) -> PersonaResult {
        let mut decision_path = Vec::new();
        let outcome = match traverse(&self.root, profile, &mut decision_path) {
            TreeOutcome::Qualified(tier) => PersonaOutcome::Qualified { tier: *tier },
            TreeOutcome::Rejected(reason) => PersonaOutcome::Rejected { reason: *reason },
        };

        PersonaResult {
            outcome,
            decision_path,
        }
    }
}

impl Default for PersonaFilter {
    fn default() -> Self {
        Self::new(PersonaThresholds::default())
    }
}

/// Disqualifiers first, in fixed order; then tiers strictest-first, with any
/// missed threshold falling through to the next tier.
fn build_tree(thresholds: &PersonaThresholds) -> RuleNode {
    let tier_subtree = tier_subtree(thresholds);

    let disqualifiers = [
        (
            RuleCheck {
                id: PersonaRejection::AgeRequirement.code(),
                predicate: Predicate::AgeWithin {
                    min: thresholds.age_min,
                    max: thresholds.age_max,
                },
            },
            PersonaRejection::AgeRequirement,
        ),
        (
            RuleCheck {
                id: PersonaRejection::BacenRestriction.code(),
                predicate: Predicate::BacenClear,
            },
            PersonaRejection::BacenRestriction,
        ),
        (
            RuleCheck {
                id: PersonaRejection::CreditScore.code(),
                predicate: Predicate::CreditScoreAtLeast {
                    floor: thresholds.min_credit_score,
                },
            },
            PersonaRejection::CreditScore,
        ),
        (
            RuleCheck {
                id: PersonaRejection::IncomeFloor.code(),
                predicate: Predicate::IncomeAbove {
                    floor: thresholds.min_income,
                },
            },
            PersonaRejection::IncomeFloor,
        ),
        (
            RuleCheck {
                id: PersonaRejection::DebtRatio.code(),
                predicate: Predicate::DebtRatioAtMost {
                    ceiling: thresholds.max_debt_ratio,
                },
            },
            PersonaRejection::DebtRatio,
        ),
        (
            RuleCheck {
                id: PersonaRejection::EmploymentStatus.code(),
                predicate: Predicate::EmploymentAccepted {
                    statuses: ACCEPTED_EMPLOYMENT,
                },
            },
            PersonaRejection::EmploymentStatus,
        ),
    ];

    let mut node = tier_subtree;
    for (check, rejection) in disqualifiers.into_iter().rev() {
        node = RuleNode::Check {
            check,
            on_pass: Box::new(node),
            on_fail: Box::new(RuleNode::Leaf(TreeOutcome::Rejected(rejection))),
        };
    }
    node
}

fn tier_subtree(thresholds: &PersonaThresholds) -> RuleNode {
    let standard = thresholds.standard.clone();
    let standard_chain = move || {
        all_of(
            tier_checks(
                ["standard_income", "standard_score", "standard_tenure"],
                &standard,
            ),
            RuleNode::Leaf(TreeOutcome::Qualified(PersonaTier::Standard)),
            || RuleNode::Leaf(TreeOutcome::Qualified(PersonaTier::Basic)),
        )
    };

    all_of(
        tier_checks(
            ["premium_income", "premium_score", "premium_tenure"],
            &thresholds.premium,
        ),
        RuleNode::Leaf(TreeOutcome::Qualified(PersonaTier::Premium)),
        standard_chain,
    )
}

fn tier_checks(
    ids: [&'static str; 3],
    thresholds: &TierThresholds,
) -> Vec<RuleCheck> {
    let [income_id, score_id, tenure_id] = ids;
    vec![
        RuleCheck {
            id: income_id,
            predicate: Predicate::IncomeAtLeast {
                floor: thresholds.min_income,
            },
        },
        RuleCheck {
            id: score_id,
            predicate: Predicate::CreditScoreAtLeast {
                floor: thresholds.min_credit_score,
            },
        },
        RuleCheck {
            id: tenure_id,
            predicate: Predicate::TenureAtLeast {
                months: thresholds.min_tenure_months,
            },
        },
    ]
}
