//! The four-stage credit decision core.
//!
//! Stage 1 screens and classifies the applicant over an explicit rule tree;
//! stage 2 searches the product catalog breadth-first for the best feasible
//! offer; stage 3 scores default risk with Mamdani fuzzy inference; stage 4
//! turns everything into class probabilities through a small feed-forward
//! network. [`CreditAnalysisPipeline`] sequences them and owns the shared
//! read-only configuration bundle.

pub mod catalog;
pub mod domain;
pub mod limit;
pub mod network;
pub mod persona;
pub mod risk;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogImportError, CreditProduct, ProductCatalog};
pub use domain::{
    CreditRequest, CustomerProfile, EmploymentStatus, ProductType, ValidationError,
};
pub use limit::{CreditLimitResult, CreditLimitSearch, CreditOffer, LimitSearchPolicy};
pub use network::{
    Activation, ApprovalDecision, ApprovalDecisionNetwork, ApprovalStatus, FeatureVector,
    NetworkWeights, WeightsImportError,
};
pub use persona::{
    PersonaFilter, PersonaOutcome, PersonaRejection, PersonaResult, PersonaThresholds, PersonaTier,
};
pub use risk::{FuzzyConfig, RiskAssessment, RiskFuzzyEngine, RiskLevel};
pub use service::{CreditAnalysisPipeline, CreditAnalysisResult, EngineConfig};

/// Fatal configuration faults: the pipeline refuses to start on these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("product catalog is empty")]
    EmptyCatalog,
    #[error("fuzzy rule base is empty")]
    EmptyRuleBase,
    #[error(
        "weight matrix {matrix} has shape {found_rows}x{found_cols}, expected {expected_rows}x{expected_cols}"
    )]
    WeightShape {
        matrix: &'static str,
        expected_rows: usize,
        expected_cols: usize,
        found_rows: usize,
        found_cols: usize,
    },
}
