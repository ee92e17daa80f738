//! Row extraction — fourteen positional cells into a typed `FundRecord`.
//!
//! Layout of the ranking table (0-based):
//!
//! | pos | field                  | pos | field             |
//! |-----|------------------------|-----|-------------------|
//! | 0   | ticker                 | 7   | yield sum 3m      |
//! | 1   | sector                 | 8   | yield sum 6m      |
//! | 2   | price                  | 9   | yield sum 12m     |
//! | 3   | liquidity              | 10  | yield avg 3m      |
//! | 4   | P/VP                   | 11  | yield avg 6m      |
//! | 5   | last dividend          | 12  | yield avg 12m     |
//! | 6   | monthly yield (%)      | 13  | current-year sum  |
//!
//! Malformed rows are never errors: they come back as a [`Discard`] value.

use std::fmt;

use crate::domain::FundRecord;
use crate::parse::{annualize_monthly_yield, parse_numeric};

/// Number of cells a ranking row must carry.
pub const ROW_WIDTH: usize = 14;

/// One table cell as seen by the extractor.
///
/// `preferred_value` returns the structured value attribute when the markup
/// carries one (usually the unformatted number), otherwise the visible text.
pub trait CellSource {
    fn preferred_value(&self) -> String;
}

impl CellSource for &str {
    fn preferred_value(&self) -> String {
        (*self).to_string()
    }
}

impl CellSource for String {
    fn preferred_value(&self) -> String {
        self.clone()
    }
}

/// Why a row did not make it into the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discard {
    /// The row has fewer than [`ROW_WIDTH`] cells.
    TooFewCells { found: usize },
    /// A quality-gated field parsed to exactly `0.0`.
    ZeroField { field: &'static str },
}

impl fmt::Display for Discard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discard::TooFewCells { found } => {
                write!(f, "row has {found} cells, expected {ROW_WIDTH}")
            }
            Discard::ZeroField { field } => write!(f, "{field} is zero or unparseable"),
        }
    }
}

/// Extract a fund record from one row of cells.
///
/// Cells beyond the fourteenth are ignored. The sector is returned as
/// trimmed raw text; canonicalization happens in the table builder.
pub fn extract_row<C: CellSource>(cells: &[C]) -> Result<FundRecord, Discard> {
    if cells.len() < ROW_WIDTH {
        return Err(Discard::TooFewCells { found: cells.len() });
    }

    let text = |i: usize| cells[i].preferred_value();
    let num = |i: usize| parse_numeric(&text(i));

    let record = FundRecord {
        ticker: text(0).trim().to_uppercase(),
        sector: text(1).trim().to_string(),
        price: num(2),
        liquidity: num(3),
        valuation_ratio: num(4),
        dividend_amount: num(5),
        yield_annualized: annualize_monthly_yield(num(6)),
        yield_sum_3m: num(7),
        yield_sum_6m: num(8),
        yield_sum_12m: num(9),
        yield_avg_3m: num(10),
        yield_avg_6m: num(11),
        yield_avg_12m: num(12),
        yield_sum_current_year: num(13),
    };

    if let Some((field, _)) = record.gated_fields().into_iter().find(|(_, v)| *v == 0.0) {
        return Err(Discard::ZeroField { field });
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pvp: &str, monthly: &str) -> Vec<String> {
        [
            " hglg11 ", " Logística ", "160,50", "2500000", pvp, "1,10", monthly, "2,4", "4,8",
            "9,6", "0,8", "0,8", "0,8", "6,4",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn extracts_full_row() {
        let rec = extract_row(&row("0,95", "0,70")).unwrap();
        assert_eq!(rec.ticker, "HGLG11");
        assert_eq!(rec.sector, "Logística");
        assert_eq!(rec.price, 160.5);
        assert_eq!(rec.liquidity, 2_500_000.0);
        assert_eq!(rec.valuation_ratio, 0.95);
        assert_eq!(rec.dividend_amount, 1.1);
        assert!((rec.yield_annualized - (1.007f64.powi(12) - 1.0)).abs() < 1e-12);
        assert_eq!(rec.yield_sum_12m, 9.6);
        assert_eq!(rec.yield_sum_current_year, 6.4);
    }

    #[test]
    fn short_row_is_discarded() {
        let mut cells = row("0,95", "0,70");
        cells.truncate(13);
        assert_eq!(
            extract_row(&cells),
            Err(Discard::TooFewCells { found: 13 })
        );
        let empty: Vec<String> = Vec::new();
        assert_eq!(extract_row(&empty), Err(Discard::TooFewCells { found: 0 }));
    }

    #[test]
    fn extra_cells_are_ignored() {
        let mut cells = row("0,95", "0,70");
        cells.push("ignored".into());
        assert!(extract_row(&cells).is_ok());
    }

    #[test]
    fn zero_valuation_is_discarded() {
        assert_eq!(
            extract_row(&row("0", "0,70")),
            Err(Discard::ZeroField {
                field: "valuation_ratio"
            })
        );
        assert_eq!(
            extract_row(&row("N/A", "0,70")),
            Err(Discard::ZeroField {
                field: "valuation_ratio"
            })
        );
    }

    #[test]
    fn zero_window_aggregate_is_discarded() {
        for pos in 7..=12 {
            let mut cells = row("0,95", "0,70");
            cells[pos] = "0,00%".into();
            assert!(
                matches!(extract_row(&cells), Err(Discard::ZeroField { .. })),
                "position {pos} should gate"
            );
        }
    }

    #[test]
    fn zero_yield_and_current_year_are_kept() {
        let mut cells = row("0,95", "0");
        cells[13] = "".into();
        let rec = extract_row(&cells).unwrap();
        assert_eq!(rec.yield_annualized, 0.0);
        assert_eq!(rec.yield_sum_current_year, 0.0);
    }

    #[test]
    fn str_cells_work() {
        let cells = [
            "KNRI11", "Híbrido", "140", "3000000", "1,01", "0,95", "0,68", "2", "4", "8", "0,6",
            "0,6", "0,6", "5",
        ];
        let rec = extract_row(&cells).unwrap();
        assert_eq!(rec.ticker, "KNRI11");
    }
}
