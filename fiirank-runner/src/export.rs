//! Export — CSV and JSON renderings of a ranking.
//!
//! CSV carries one header row with the column names from
//! `fiirank_core::domain::columns`; JSON wraps the funds with the snapshot
//! timestamp and source.

use std::path::Path;

use fiirank_core::domain::columns;
use fiirank_core::RankedFund;
use thiserror::Error;

use crate::service::Ranking;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("csv output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

fn write_rows<W: std::io::Write>(wtr: &mut csv::Writer<W>, funds: &[RankedFund]) -> Result<(), ExportError> {
    wtr.write_record(columns::all())?;
    for f in funds {
        let mut row = Vec::with_capacity(columns::all().len());
        row.push(f.record.ticker.clone());
        row.push(f.record.sector.clone());
        row.extend(f.record.numeric_values().iter().map(|v| v.to_string()));
        row.push(f.rank_valuation.to_string());
        row.push(f.rank_yield.to_string());
        row.push(f.composite_score.to_string());
        wtr.write_record(&row)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Render a ranked list as CSV text.
pub fn to_csv(funds: &[RankedFund]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    write_rows(&mut wtr, funds)?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))?;
    Ok(String::from_utf8(bytes)?)
}

/// Write a ranked list as CSV to `path`.
pub fn write_csv(path: &Path, funds: &[RankedFund]) -> Result<(), ExportError> {
    let file = std::fs::File::create(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut wtr = csv::Writer::from_writer(file);
    write_rows(&mut wtr, funds)?;
    tracing::info!(path = %path.display(), rows = funds.len(), "csv written");
    Ok(())
}

/// Render a ranking as pretty JSON.
pub fn to_json(ranking: &Ranking) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(ranking)?)
}
