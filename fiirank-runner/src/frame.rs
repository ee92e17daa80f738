//! Tabular view of a ranking as a Polars `DataFrame`.
//!
//! Column names and order follow `fiirank_core::domain::columns`.

use fiirank_core::domain::columns;
use fiirank_core::RankedFund;
use polars::prelude::*;

/// Convert a ranked list into a DataFrame, one row per fund, order preserved.
pub fn to_frame(funds: &[RankedFund]) -> PolarsResult<DataFrame> {
    let tickers: Vec<&str> = funds.iter().map(|f| f.record.ticker.as_str()).collect();
    let sectors: Vec<&str> = funds.iter().map(|f| f.record.sector.as_str()).collect();
    let values: Vec<[f64; 12]> = funds.iter().map(|f| f.record.numeric_values()).collect();

    let mut cols = Vec::with_capacity(columns::all().len());
    cols.push(Column::new(columns::TICKER.into(), tickers));
    cols.push(Column::new(columns::SECTOR.into(), sectors));
    for (i, name) in columns::NUMERIC.iter().enumerate() {
        let series: Vec<f64> = values.iter().map(|row| row[i]).collect();
        cols.push(Column::new((*name).into(), series));
    }

    let rank_valuation: Vec<u64> = funds.iter().map(|f| f.rank_valuation as u64).collect();
    let rank_yield: Vec<u64> = funds.iter().map(|f| f.rank_yield as u64).collect();
    let composite: Vec<u64> = funds.iter().map(|f| f.composite_score as u64).collect();
    cols.push(Column::new(columns::RANK_VALUATION.into(), rank_valuation));
    cols.push(Column::new(columns::RANK_YIELD.into(), rank_yield));
    cols.push(Column::new(columns::COMPOSITE_SCORE.into(), composite));

    DataFrame::new(cols)
}

/// Per-sector summary of a ranked frame: fund count, mean annualized yield
/// and best composite score, sorted by sector name.
pub fn sector_summary(frame: &DataFrame) -> PolarsResult<DataFrame> {
    frame
        .clone()
        .lazy()
        .group_by([col(columns::SECTOR)])
        .agg([
            col(columns::TICKER).count().alias("funds"),
            col(columns::YIELD_ANNUALIZED).mean().alias("mean_yield"),
            col(columns::COMPOSITE_SCORE).min().alias("best_score"),
        ])
        .sort([columns::SECTOR], SortMultipleOptions::default())
        .collect()
}
