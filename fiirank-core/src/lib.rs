//! fiirank core: turn the fundsexplorer ranking page into a ranked, filtered
//! list of Brazilian real-estate funds.
//!
//! Pipeline stages, each usable on its own:
//! - `data`: fetch the page markup (live, from disk, or fixed)
//! - `markup`: locate the ranking table and read its cells
//! - `extract` / `parse`: turn one row of cells into a `FundRecord`
//! - `sector`: canonicalize sector labels and drop excluded categories
//! - `table`: assemble the dataset from all rows
//! - `rank`: 2-in-1 ranking (valuation rank + yield rank)
//! - `filter`: user thresholds and sector allow-list

pub mod data;
pub mod domain;
pub mod extract;
pub mod filter;
pub mod markup;
pub mod parse;
pub mod rank;
pub mod sector;
pub mod table;

pub use data::{FetchError, MarkupFetcher};
pub use domain::{FundRecord, RankedFund};
pub use filter::FilterCriteria;
pub use rank::rank_two_in_one;
pub use sector::SectorTable;
pub use table::{build_dataset, build_dataset_with_stats, BuildOutcome, BuildStats};

/// Parse page markup into the dataset, using the given table selectors.
pub fn dataset_from_markup(
    markup_text: &str,
    selectors: &markup::TableSelectors,
    sectors: &SectorTable,
) -> Result<BuildOutcome, markup::MarkupError> {
    let rows = markup::parse_rows(markup_text, selectors)?;
    Ok(build_dataset_with_stats(&rows, sectors))
}
