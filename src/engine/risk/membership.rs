use serde::{Deserialize, Serialize};

use crate::engine::domain::CustomerProfile;

/// Numeric inputs the fuzzy system reasons over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    CreditScore,
    Income,
    DebtRatio,
    EmploymentTenure,
    Inquiries,
}

impl RiskFactor {
    pub const ALL: [RiskFactor; 5] = [
        RiskFactor::CreditScore,
        RiskFactor::Income,
        RiskFactor::DebtRatio,
        RiskFactor::EmploymentTenure,
        RiskFactor::Inquiries,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            RiskFactor::CreditScore => "credit_score",
            RiskFactor::Income => "income",
            RiskFactor::DebtRatio => "debt_ratio",
            RiskFactor::EmploymentTenure => "employment_tenure",
            RiskFactor::Inquiries => "inquiries",
        }
    }

    /// Crisp value read off the profile, clamped to the factor's universe so
    /// shoulder terms saturate instead of dropping to zero past the edge.
    pub fn crisp(self, profile: &CustomerProfile) -> f64 {
        match self {
            RiskFactor::CreditScore => profile.credit_score as f64,
            RiskFactor::Income => profile.income.min(50_000.0),
            RiskFactor::DebtRatio => profile.debt_to_income_ratio,
            RiskFactor::EmploymentTenure => (profile.time_at_job_months as f64).min(120.0),
            RiskFactor::Inquiries => (profile.num_credit_inquiries as f64).min(20.0),
        }
    }
}

/// Linguistic degree shared by every factor and by the risk output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinguisticTerm {
    Low,
    Medium,
    High,
}

impl LinguisticTerm {
    pub const ALL: [LinguisticTerm; 3] =
        [LinguisticTerm::Low, LinguisticTerm::Medium, LinguisticTerm::High];

    pub const fn label(self) -> &'static str {
        match self {
            LinguisticTerm::Low => "low",
            LinguisticTerm::Medium => "medium",
            LinguisticTerm::High => "high",
        }
    }
}

/// Piecewise-linear membership shape.
///
/// Trapezoids with `a == b` (or `c == d`) act as open shoulders; the degree
/// computation treats a zero-width edge as a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipFunction {
    Trapezoid { a: f64, b: f64, c: f64, d: f64 },
    Triangle { a: f64, b: f64, c: f64 },
}

impl MembershipFunction {
    pub fn degree(&self, x: f64) -> f64 {
        match *self {
            MembershipFunction::Trapezoid { a, b, c, d } => {
                rising_edge(x, a, b).min(falling_edge(x, c, d))
            }
            MembershipFunction::Triangle { a, b, c } => {
                rising_edge(x, a, b).min(falling_edge(x, b, c))
            }
        }
    }
}

fn rising_edge(x: f64, from: f64, to: f64) -> f64 {
    if x >= to {
        1.0
    } else if x <= from {
        0.0
    } else {
        (x - from) / (to - from)
    }
}

fn falling_edge(x: f64, from: f64, to: f64) -> f64 {
    if x <= from {
        1.0
    } else if x >= to {
        0.0
    } else {
        (to - x) / (to - from)
    }
}

/// The three shapes describing one factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorMemberships {
    pub low: MembershipFunction,
    pub medium: MembershipFunction,
    pub high: MembershipFunction,
}

impl FactorMemberships {
    pub fn for_term(&self, term: LinguisticTerm) -> &MembershipFunction {
        match term {
            LinguisticTerm::Low => &self.low,
            LinguisticTerm::Medium => &self.medium,
            LinguisticTerm::High => &self.high,
        }
    }
}

/// Membership breakpoints for every input factor and the risk output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipTable {
    pub credit_score: FactorMemberships,
    pub income: FactorMemberships,
    pub debt_ratio: FactorMemberships,
    pub employment_tenure: FactorMemberships,
    pub inquiries: FactorMemberships,
    /// Output shapes over the [0, 10] risk universe.
    pub risk: FactorMemberships,
}

impl MembershipTable {
    pub fn for_factor(&self, factor: RiskFactor) -> &FactorMemberships {
        match factor {
            RiskFactor::CreditScore => &self.credit_score,
            RiskFactor::Income => &self.income,
            RiskFactor::DebtRatio => &self.debt_ratio,
            RiskFactor::EmploymentTenure => &self.employment_tenure,
            RiskFactor::Inquiries => &self.inquiries,
        }
    }

    pub fn degree(&self, factor: RiskFactor, term: LinguisticTerm, x: f64) -> f64 {
        self.for_factor(factor).for_term(term).degree(x)
    }
}

impl Default for MembershipTable {
    fn default() -> Self {
        use MembershipFunction::{Trapezoid, Triangle};

        Self {
            credit_score: FactorMemberships {
                low: Trapezoid { a: 0.0, b: 0.0, c: 450.0, d: 550.0 },
                medium: Triangle { a: 500.0, b: 650.0, c: 780.0 },
                high: Trapezoid { a: 700.0, b: 780.0, c: 1000.0, d: 1000.0 },
            },
            income: FactorMemberships {
                low: Trapezoid { a: 0.0, b: 0.0, c: 2_000.0, d: 4_000.0 },
                medium: Triangle { a: 3_000.0, b: 7_000.0, c: 12_000.0 },
                high: Trapezoid { a: 8_000.0, b: 15_000.0, c: 50_000.0, d: 50_000.0 },
            },
            debt_ratio: FactorMemberships {
                low: Trapezoid { a: 0.0, b: 0.0, c: 0.2, d: 0.3 },
                medium: Triangle { a: 0.2, b: 0.4, c: 0.6 },
                high: Trapezoid { a: 0.5, b: 0.7, c: 1.0, d: 1.0 },
            },
            employment_tenure: FactorMemberships {
                low: Trapezoid { a: 0.0, b: 0.0, c: 6.0, d: 12.0 },
                medium: Triangle { a: 6.0, b: 24.0, c: 48.0 },
                high: Trapezoid { a: 36.0, b: 60.0, c: 120.0, d: 120.0 },
            },
            inquiries: FactorMemberships {
                low: Trapezoid { a: 0.0, b: 0.0, c: 2.0, d: 4.0 },
                medium: Triangle { a: 3.0, b: 6.0, c: 9.0 },
                high: Trapezoid { a: 7.0, b: 10.0, c: 20.0, d: 20.0 },
            },
            risk: FactorMemberships {
                low: Trapezoid { a: 0.0, b: 0.0, c: 2.0, d: 4.0 },
                medium: Triangle { a: 3.0, b: 5.5, c: 7.5 },
                high: Trapezoid { a: 6.5, b: 8.0, c: 10.0, d: 10.0 },
            },
        }
    }
}
