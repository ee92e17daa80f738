//! Table builder — extraction plus sector canonicalization over every row.

use serde::{Deserialize, Serialize};

use crate::domain::FundRecord;
use crate::extract::{extract_row, CellSource, Discard};
use crate::sector::SectorTable;

/// Row counts from one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    pub rows_seen: usize,
    pub too_few_cells: usize,
    pub zero_fields: usize,
    pub excluded_sector: usize,
    pub accepted: usize,
}

impl BuildStats {
    /// Rows that did not make it into the dataset.
    pub fn dropped(&self) -> usize {
        self.too_few_cells + self.zero_fields + self.excluded_sector
    }
}

/// The cleaned dataset together with the counts that produced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildOutcome {
    pub records: Vec<FundRecord>,
    pub stats: BuildStats,
}

/// Build the cleaned dataset, in source order.
pub fn build_dataset<R, C>(rows: &[R], sectors: &SectorTable) -> Vec<FundRecord>
where
    R: AsRef<[C]>,
    C: CellSource,
{
    build_dataset_with_stats(rows, sectors).records
}

/// Build the cleaned dataset and report how many rows were dropped and why.
///
/// Rows that fail extraction are skipped; rows whose resolved sector is
/// excluded are skipped. Zero input rows produce an empty dataset.
pub fn build_dataset_with_stats<R, C>(rows: &[R], sectors: &SectorTable) -> BuildOutcome
where
    R: AsRef<[C]>,
    C: CellSource,
{
    let mut stats = BuildStats {
        rows_seen: rows.len(),
        ..BuildStats::default()
    };
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let mut record = match extract_row(row.as_ref()) {
            Ok(record) => record,
            Err(discard) => {
                match discard {
                    Discard::TooFewCells { .. } => stats.too_few_cells += 1,
                    Discard::ZeroField { .. } => stats.zero_fields += 1,
                }
                tracing::trace!(row = i, reason = %discard, "row discarded");
                continue;
            }
        };

        match sectors.sector_for(&record.ticker, &record.sector) {
            Some(sector) => {
                record.sector = sector;
                records.push(record);
            }
            None => {
                stats.excluded_sector += 1;
                tracing::trace!(row = i, ticker = %record.ticker, sector = %record.sector, "sector excluded");
            }
        }
    }

    stats.accepted = records.len();
    tracing::debug!(
        rows = stats.rows_seen,
        accepted = stats.accepted,
        too_few_cells = stats.too_few_cells,
        zero_fields = stats.zero_fields,
        excluded_sector = stats.excluded_sector,
        "dataset built"
    );

    BuildOutcome { records, stats }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(ticker: &str, sector: &str, pvp: &str) -> Vec<String> {
        [
            ticker, sector, "100", "1000000", pvp, "1", "0,8", "2,4", "4,8", "9,6", "0,8", "0,8",
            "0,8", "6,4",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn keeps_source_order_and_canonicalizes() {
        let rows = vec![
            row("zzzz11", "logistica", "1,0"),
            row("aaaa11", "papis", "0,9"),
        ];
        let out = build_dataset(&rows, &SectorTable::default_b3());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].ticker, "ZZZZ11");
        assert_eq!(out[0].sector, "Logística");
        assert_eq!(out[1].ticker, "AAAA11");
        assert_eq!(out[1].sector, "Papéis");
    }

    #[test]
    fn counts_each_drop_reason() {
        let rows = vec![
            row("A11", "Shoppings", "1"),
            row("B11", "Shoppings", "0"),
            row("C11", "Indefinido", "1"),
            vec!["D11".to_string(); 5],
        ];
        let out = build_dataset_with_stats(&rows, &SectorTable::default_b3());
        assert_eq!(out.records.len(), 1);
        assert_eq!(
            out.stats,
            BuildStats {
                rows_seen: 4,
                too_few_cells: 1,
                zero_fields: 1,
                excluded_sector: 1,
                accepted: 1,
            }
        );
        assert_eq!(out.stats.dropped(), 3);
    }

    #[test]
    fn override_rescues_excluded_label() {
        let rows = vec![row("hgbl11", "indefinido", "1")];
        let out = build_dataset(&rows, &SectorTable::default_b3());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].sector, "Logística");
    }

    #[test]
    fn override_uses_normalized_ticker() {
        let rows = vec![row("  knri11 ", "Híbrido", "1")];
        let out = build_dataset(&rows, &SectorTable::default_b3());
        assert_eq!(out[0].sector, "Lajes Corporativas");
    }

    #[test]
    fn empty_input_gives_empty_dataset() {
        let rows: Vec<Vec<String>> = Vec::new();
        let out = build_dataset_with_stats(&rows, &SectorTable::default_b3());
        assert!(out.records.is_empty());
        assert_eq!(out.stats, BuildStats::default());
    }
}
