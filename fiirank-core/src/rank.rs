//! 2-in-1 ranking — valuation rank plus yield rank, lowest sum first.
//!
//! The three sorts run in sequence and are all stable, so ties at each step
//! keep the order produced by the step before:
//!
//! 1. ascending by valuation ratio → `rank_valuation`
//! 2. descending by annualized yield → `rank_yield`
//! 3. ascending by `rank_valuation + rank_yield`

use crate::domain::{FundRecord, RankedFund};

/// Rank a dataset with the 2-in-1 method.
pub fn rank_two_in_one(records: Vec<FundRecord>) -> Vec<RankedFund> {
    let mut ranked: Vec<RankedFund> = records
        .into_iter()
        .map(|record| RankedFund {
            record,
            rank_valuation: 0,
            rank_yield: 0,
            composite_score: 0,
        })
        .collect();

    ranked.sort_by(|a, b| a.record.valuation_ratio.total_cmp(&b.record.valuation_ratio));
    for (i, fund) in ranked.iter_mut().enumerate() {
        fund.rank_valuation = i + 1;
    }

    ranked.sort_by(|a, b| b.record.yield_annualized.total_cmp(&a.record.yield_annualized));
    for (i, fund) in ranked.iter_mut().enumerate() {
        fund.rank_yield = i + 1;
        fund.composite_score = fund.rank_valuation + fund.rank_yield;
    }

    ranked.sort_by_key(|fund| fund.composite_score);
    ranked
}

/// Strip rank columns, returning the underlying records in their current order.
pub fn unrank(ranked: Vec<RankedFund>) -> Vec<FundRecord> {
    ranked.into_iter().map(|fund| fund.record).collect()
}
