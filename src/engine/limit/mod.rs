use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::catalog::{CreditProduct, ProductCatalog};
use super::domain::{CreditRequest, CustomerProfile, ProductType};

/// Knobs for the offer search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitSearchPolicy {
    /// Highest share of monthly income an installment may consume.
    pub max_income_share: f64,
    /// Step between candidate installment counts.
    pub installment_stride: u32,
}

impl Default for LimitSearchPolicy {
    fn default() -> Self {
        Self {
            max_income_share: 0.30,
            installment_stride: 6,
        }
    }
}

/// A feasible financing offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditOffer {
    pub product_type: ProductType,
    pub approved_limit: f64,
    pub max_installments: u32,
    pub monthly_installment: f64,
    pub interest_rate: f64,
}

/// Stage-2 result: the best offer, or no product fits the applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CreditLimitResult {
    Offer(CreditOffer),
    Infeasible,
}

impl CreditLimitResult {
    pub fn offer(&self) -> Option<&CreditOffer> {
        match self {
            CreditLimitResult::Offer(offer) => Some(offer),
            CreditLimitResult::Infeasible => None,
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.offer().is_some()
    }
}

/// Fixed monthly payment that repays principal plus interest over `n` periods:
/// `amount * r / (1 - (1 + r)^-n)`, degenerating to straight division at zero
/// interest.
pub fn monthly_installment(amount: f64, rate: f64, installments: u32) -> f64 {
    if rate > 0.0 {
        amount * rate / (1.0 - (1.0 + rate).powi(-(installments as i32)))
    } else {
        amount / installments as f64
    }
}

/// Stage 2: breadth-first exploration of (product, installment-count) pairs.
#[derive(Debug)]
pub struct CreditLimitSearch {
    policy: LimitSearchPolicy,
}

/// Worklist entry. A bare product is a layer-0 candidate still waiting for
/// installment expansion; a (product, count) pair is a layer-1 leaf.
enum Candidate<'a> {
    Product(&'a CreditProduct),
    Pair(&'a CreditProduct, u32),
}

impl CreditLimitSearch {
    pub fn new(policy: LimitSearchPolicy) -> Self {
        Self { policy }
    }

    /// Find the best offer for the request.
    ///
    /// The requested product is explored first; the rest of the catalog is
    /// only seeded when the requested product yields nothing feasible.
    pub fn search(
        &self,
        profile: &CustomerProfile,
        request: &CreditRequest,
        catalog: &ProductCatalog,
    ) -> CreditLimitResult {
        let budget = self.policy.max_income_share * profile.income;

        let requested: Vec<&CreditProduct> =
            catalog.find(request.product_type).into_iter().collect();
        if let Some(offer) = self.explore(&requested, request, budget) {
            return CreditLimitResult::Offer(offer);
        }

        let alternatives: Vec<&CreditProduct> =
            catalog.alternatives(request.product_type).collect();
        match self.explore(&alternatives, request, budget) {
            Some(offer) => CreditLimitResult::Offer(offer),
            None => CreditLimitResult::Infeasible,
        }
    }

    /// Run the worklist over one seed set and keep the best survivor.
    fn explore(
        &self,
        seeds: &[&CreditProduct],
        request: &CreditRequest,
        budget: f64,
    ) -> Option<CreditOffer> {
        let mut worklist: VecDeque<Candidate<'_>> = seeds
            .iter()
            .map(|product| Candidate::Product(*product))
            .collect();
        let mut best: Option<CreditOffer> = None;

        while let Some(candidate) = worklist.pop_front() {
            match candidate {
                Candidate::Product(product) => {
                    for count in self.expand_installments(product, request.requested_installments)
                    {
                        worklist.push_back(Candidate::Pair(product, count));
                    }
                }
                Candidate::Pair(product, count) => {
                    let Some(offer) =
                        self.evaluate_pair(product, count, request.requested_amount, budget)
                    else {
                        continue;
                    };
                    if best
                        .as_ref()
                        .map(|current| better_offer(&offer, current))
                        .unwrap_or(true)
                    {
                        best = Some(offer);
                    }
                }
            }
        }

        best
    }

    /// Layer-1 expansion: stride multiples capped by the product, the product
    /// max itself, and the requested count clamped into range.
    pub(crate) fn expand_installments(
        &self,
        product: &CreditProduct,
        requested: Option<u32>,
    ) -> Vec<u32> {
        let mut counts = Vec::new();
        let mut count = self.policy.installment_stride.max(1);
        while count < product.max_installments {
            counts.push(count);
            count += self.policy.installment_stride.max(1);
        }
        counts.push(product.max_installments);

        if let Some(requested) = requested {
            let clamped = requested.clamp(1, product.max_installments);
            if !counts.contains(&clamped) {
                counts.push(clamped);
            }
        }

        counts
    }

    /// Affordability filter for one (product, count) pair.
    pub(crate) fn evaluate_pair(
        &self,
        product: &CreditProduct,
        installments: u32,
        requested_amount: f64,
        budget: f64,
    ) -> Option<CreditOffer> {
        let amount = requested_amount.min(product.max_amount);
        if amount < product.min_amount {
            return None;
        }

        let installment = monthly_installment(amount, product.base_interest_rate, installments);
        if installment > budget {
            return None;
        }

        Some(CreditOffer {
            product_type: product.product_type,
            approved_limit: amount,
            max_installments: installments,
            monthly_installment: installment,
            interest_rate: product.base_interest_rate,
        })
    }
}

impl Default for CreditLimitSearch {
    fn default() -> Self {
        Self::new(LimitSearchPolicy::default())
    }
}

/// Ordering: larger approved amount, then cheaper installment, then lower rate.
fn better_offer(candidate: &CreditOffer, current: &CreditOffer) -> bool {
    if candidate.approved_limit != current.approved_limit {
        return candidate.approved_limit > current.approved_limit;
    }
    if candidate.monthly_installment != current.monthly_installment {
        return candidate.monthly_installment < current.monthly_installment;
    }
    candidate.interest_rate < current.interest_rate
}
