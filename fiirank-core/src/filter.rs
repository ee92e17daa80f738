//! Threshold and sector filtering over a ranked dataset.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::RankedFund;

/// User-supplied filter thresholds.
///
/// `min_yield_pct` is in percentage points and is compared against the
/// annualized yield scaled by 100. An empty `sectors` set means no sector
/// restriction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub min_yield_pct: f64,
    pub min_liquidity: f64,
    pub min_valuation: f64,
    pub max_valuation: f64,
    pub sectors: BTreeSet<String>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            min_yield_pct: 7.0,
            min_liquidity: 500_000.0,
            min_valuation: 0.80,
            max_valuation: 1.05,
            sectors: BTreeSet::new(),
        }
    }
}

impl FilterCriteria {
    /// Criteria that keep every row.
    pub fn pass_all() -> Self {
        Self {
            min_yield_pct: f64::NEG_INFINITY,
            min_liquidity: f64::NEG_INFINITY,
            min_valuation: f64::NEG_INFINITY,
            max_valuation: f64::INFINITY,
            sectors: BTreeSet::new(),
        }
    }

    /// Whether a single fund passes every threshold.
    pub fn matches(&self, fund: &RankedFund) -> bool {
        let r = &fund.record;
        r.yield_pct() >= self.min_yield_pct
            && r.liquidity >= self.min_liquidity
            && r.valuation_ratio >= self.min_valuation
            && r.valuation_ratio <= self.max_valuation
            && (self.sectors.is_empty() || self.sectors.contains(&r.sector))
    }

    /// Subset of `ranked` that passes, in the same order, rank columns untouched.
    pub fn apply(&self, ranked: &[RankedFund]) -> Vec<RankedFund> {
        let kept: Vec<RankedFund> = ranked.iter().filter(|f| self.matches(f)).cloned().collect();
        tracing::debug!(input = ranked.len(), kept = kept.len(), "filter applied");
        kept
    }
}
