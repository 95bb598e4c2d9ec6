use serde::{Deserialize, Serialize};

use super::membership::{LinguisticTerm, RiskFactor};

/// One (factor, term) test inside an antecedent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub factor: RiskFactor,
    pub term: LinguisticTerm,
}

/// Antecedent combinator: `All` is fuzzy AND (min), `Any` fuzzy OR (max).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Antecedent {
    All(Vec<Condition>),
    Any(Vec<Condition>),
}

impl Antecedent {
    pub fn conditions(&self) -> &[Condition] {
        match self {
            Antecedent::All(conditions) | Antecedent::Any(conditions) => conditions,
        }
    }
}

/// One inference rule: antecedent strength fires the consequent risk term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyRule {
    pub antecedent: Antecedent,
    pub consequent: LinguisticTerm,
}

fn when(factor: RiskFactor, term: LinguisticTerm) -> Condition {
    Condition { factor, term }
}

/// The shipped rule base.
///
/// Low-risk rules reward strong score or income under light debt; high-risk
/// rules key on weak score, heavy debt, and inquiry churn. Tenure stands in
/// for stability on the medium band.
pub fn standard_rules() -> Vec<FuzzyRule> {
    use LinguisticTerm::{High, Low, Medium};
    use RiskFactor::{CreditScore, DebtRatio, EmploymentTenure, Income, Inquiries};

    vec![
        // Low risk
        FuzzyRule {
            antecedent: Antecedent::All(vec![when(CreditScore, High), when(DebtRatio, Low)]),
            consequent: Low,
        },
        FuzzyRule {
            antecedent: Antecedent::All(vec![when(CreditScore, High), when(DebtRatio, Medium)]),
            consequent: Low,
        },
        FuzzyRule {
            antecedent: Antecedent::All(vec![when(CreditScore, High), when(Inquiries, Low)]),
            consequent: Low,
        },
        FuzzyRule {
            antecedent: Antecedent::All(vec![when(Income, High), when(DebtRatio, Low)]),
            consequent: Low,
        },
        FuzzyRule {
            antecedent: Antecedent::All(vec![when(Income, High), when(Inquiries, Low)]),
            consequent: Low,
        },
        FuzzyRule {
            antecedent: Antecedent::All(vec![
                when(CreditScore, Medium),
                when(DebtRatio, Low),
                when(Inquiries, Low),
            ]),
            consequent: Low,
        },
        FuzzyRule {
            antecedent: Antecedent::All(vec![when(CreditScore, Medium), when(Income, High)]),
            consequent: Low,
        },
        // Medium risk
        FuzzyRule {
            antecedent: Antecedent::All(vec![when(CreditScore, Medium), when(DebtRatio, Medium)]),
            consequent: Medium,
        },
        // High score does not fully offset heavy debt.
        FuzzyRule {
            antecedent: Antecedent::All(vec![when(CreditScore, High), when(DebtRatio, High)]),
            consequent: Medium,
        },
        // Weak score forgiven when income is strong and debt light.
        FuzzyRule {
            antecedent: Antecedent::All(vec![
                when(CreditScore, Low),
                when(DebtRatio, Low),
                when(Income, High),
            ]),
            consequent: Medium,
        },
        FuzzyRule {
            antecedent: Antecedent::All(vec![when(Inquiries, High), when(DebtRatio, Low)]),
            consequent: Medium,
        },
        FuzzyRule {
            antecedent: Antecedent::All(vec![
                when(EmploymentTenure, Low),
                when(CreditScore, Medium),
            ]),
            consequent: Medium,
        },
        FuzzyRule {
            antecedent: Antecedent::Any(vec![
                when(EmploymentTenure, Low),
                when(Inquiries, High),
            ]),
            consequent: Medium,
        },
        // High risk
        FuzzyRule {
            antecedent: Antecedent::All(vec![when(CreditScore, Low), when(DebtRatio, Medium)]),
            consequent: High,
        },
        FuzzyRule {
            antecedent: Antecedent::All(vec![when(CreditScore, Low), when(Inquiries, High)]),
            consequent: High,
        },
        FuzzyRule {
            antecedent: Antecedent::All(vec![when(DebtRatio, High), when(Income, Low)]),
            consequent: High,
        },
        FuzzyRule {
            antecedent: Antecedent::All(vec![when(DebtRatio, High), when(Income, Medium)]),
            consequent: High,
        },
        FuzzyRule {
            antecedent: Antecedent::All(vec![when(Inquiries, High), when(DebtRatio, High)]),
            consequent: High,
        },
        FuzzyRule {
            antecedent: Antecedent::All(vec![
                when(EmploymentTenure, Low),
                when(CreditScore, Low),
            ]),
            consequent: High,
        },
    ]
}
