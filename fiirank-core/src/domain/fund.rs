//! Fund records — one cleaned row of the ranking table, and its ranked form.

use serde::{Deserialize, Serialize};

/// One row of the cleaned dataset.
///
/// Numeric fields use `0.0` as the "unknown / failed to parse" sentinel. The
/// valuation ratio and the six windowed yield aggregates are guaranteed
/// nonzero for every record produced by the table builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundRecord {
    pub ticker: String,
    pub sector: String,
    pub price: f64,
    pub liquidity: f64,
    /// Price-to-book (P/VP).
    pub valuation_ratio: f64,
    pub dividend_amount: f64,
    /// Monthly yield compounded over twelve periods, as a fraction (0.1268 = 12.68 %).
    pub yield_annualized: f64,
    pub yield_sum_3m: f64,
    pub yield_sum_6m: f64,
    pub yield_sum_12m: f64,
    pub yield_avg_3m: f64,
    pub yield_avg_6m: f64,
    pub yield_avg_12m: f64,
    pub yield_sum_current_year: f64,
}

impl FundRecord {
    /// Annualized yield in percentage points.
    pub fn yield_pct(&self) -> f64 {
        self.yield_annualized * 100.0
    }

    /// The seven fields that must be nonzero for a row to pass the quality gate,
    /// paired with their column names.
    pub fn gated_fields(&self) -> [(&'static str, f64); 7] {
        [
            (columns::VALUATION_RATIO, self.valuation_ratio),
            (columns::YIELD_SUM_3M, self.yield_sum_3m),
            (columns::YIELD_SUM_6M, self.yield_sum_6m),
            (columns::YIELD_SUM_12M, self.yield_sum_12m),
            (columns::YIELD_AVG_3M, self.yield_avg_3m),
            (columns::YIELD_AVG_6M, self.yield_avg_6m),
            (columns::YIELD_AVG_12M, self.yield_avg_12m),
        ]
    }

    /// Numeric columns in table order, after `ticker` and `sector`.
    pub fn numeric_values(&self) -> [f64; 12] {
        [
            self.price,
            self.liquidity,
            self.valuation_ratio,
            self.dividend_amount,
            self.yield_annualized,
            self.yield_sum_3m,
            self.yield_sum_6m,
            self.yield_sum_12m,
            self.yield_avg_3m,
            self.yield_avg_6m,
            self.yield_avg_12m,
            self.yield_sum_current_year,
        ]
    }
}

/// A fund record with the three columns added by the 2-in-1 ranker.
///
/// Serializes flat: the record's fields followed by the rank columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFund {
    #[serde(flatten)]
    pub record: FundRecord,
    /// 1-based position when sorted ascending by valuation ratio.
    pub rank_valuation: usize,
    /// 1-based position when sorted descending by annualized yield.
    pub rank_yield: usize,
    /// `rank_valuation + rank_yield`; lower is better.
    pub composite_score: usize,
}

/// Column names shared by every tabular output (frame, CSV, JSON keys).
pub mod columns {
    pub const TICKER: &str = "ticker";
    pub const SECTOR: &str = "sector";
    pub const PRICE: &str = "price";
    pub const LIQUIDITY: &str = "liquidity";
    pub const VALUATION_RATIO: &str = "valuation_ratio";
    pub const DIVIDEND_AMOUNT: &str = "dividend_amount";
    pub const YIELD_ANNUALIZED: &str = "yield_annualized";
    pub const YIELD_SUM_3M: &str = "yield_sum_3m";
    pub const YIELD_SUM_6M: &str = "yield_sum_6m";
    pub const YIELD_SUM_12M: &str = "yield_sum_12m";
    pub const YIELD_AVG_3M: &str = "yield_avg_3m";
    pub const YIELD_AVG_6M: &str = "yield_avg_6m";
    pub const YIELD_AVG_12M: &str = "yield_avg_12m";
    pub const YIELD_SUM_CURRENT_YEAR: &str = "yield_sum_current_year";
    pub const RANK_VALUATION: &str = "rank_valuation";
    pub const RANK_YIELD: &str = "rank_yield";
    pub const COMPOSITE_SCORE: &str = "composite_score";

    /// The twelve numeric record columns, in table order.
    pub const NUMERIC: [&str; 12] = [
        PRICE,
        LIQUIDITY,
        VALUATION_RATIO,
        DIVIDEND_AMOUNT,
        YIELD_ANNUALIZED,
        YIELD_SUM_3M,
        YIELD_SUM_6M,
        YIELD_SUM_12M,
        YIELD_AVG_3M,
        YIELD_AVG_6M,
        YIELD_AVG_12M,
        YIELD_SUM_CURRENT_YEAR,
    ];

    /// Rank columns appended by the ranker.
    pub const RANKS: [&str; 3] = [RANK_VALUATION, RANK_YIELD, COMPOSITE_SCORE];

    /// Every column of a ranked table, in output order.
    pub fn all() -> Vec<&'static str> {
        let mut cols = Vec::with_capacity(2 + NUMERIC.len() + RANKS.len());
        cols.push(TICKER);
        cols.push(SECTOR);
        cols.extend(NUMERIC);
        cols.extend(RANKS);
        cols
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::FundRecord;

    /// A record that passes the quality gate, with the given identity and key metrics.
    pub fn record(ticker: &str, sector: &str, valuation: f64, yield_annualized: f64) -> FundRecord {
        FundRecord {
            ticker: ticker.into(),
            sector: sector.into(),
            price: 100.0,
            liquidity: 1_000_000.0,
            valuation_ratio: valuation,
            dividend_amount: 0.9,
            yield_annualized,
            yield_sum_3m: 2.7,
            yield_sum_6m: 5.4,
            yield_sum_12m: 10.8,
            yield_avg_3m: 0.9,
            yield_avg_6m: 0.9,
            yield_avg_12m: 0.9,
            yield_sum_current_year: 8.1,
        }
    }
}
