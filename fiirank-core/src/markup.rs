//! HTML row source — turns the rendered ranking page into rows of cells.
//!
//! Each `<td>` becomes an [`HtmlCell`] holding its `data-value` attribute (the
//! unformatted number, when the site provides one) and its stripped text. A
//! page without the expected table body yields zero rows rather than an
//! error: a layout change upstream shows up as an empty ranking.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extract::CellSource;

/// Attribute carrying the raw value of a cell.
pub const VALUE_ATTR: &str = "data-value";

#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("invalid CSS selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// CSS selectors locating the ranking table inside the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSelectors {
    /// The element containing the fund rows.
    pub body: String,
    /// Row elements, relative to `body`.
    pub row: String,
    /// Cell elements, relative to a row.
    pub cell: String,
}

impl Default for TableSelectors {
    fn default() -> Self {
        Self {
            body: "tbody.default-fiis-table__container__table__body".into(),
            row: "tr".into(),
            cell: "td".into(),
        }
    }
}

/// One parsed `<td>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlCell {
    pub value: Option<String>,
    pub text: String,
}

impl HtmlCell {
    fn from_element(el: ElementRef<'_>) -> Self {
        let text = el
            .text()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<String>();
        Self {
            value: el.value().attr(VALUE_ATTR).map(str::to_string),
            text,
        }
    }
}

impl CellSource for HtmlCell {
    fn preferred_value(&self) -> String {
        self.value.clone().unwrap_or_else(|| self.text.clone())
    }
}

struct Compiled {
    body: Selector,
    row: Selector,
    cell: Selector,
}

impl TableSelectors {
    fn compile(&self) -> Result<Compiled, MarkupError> {
        Ok(Compiled {
            body: compile_one(&self.body)?,
            row: compile_one(&self.row)?,
            cell: compile_one(&self.cell)?,
        })
    }

    /// Check the selectors without parsing any markup.
    pub fn validate(&self) -> Result<(), MarkupError> {
        self.compile().map(|_| ())
    }
}

fn compile_one(selector: &str) -> Result<Selector, MarkupError> {
    Selector::parse(selector).map_err(|e| MarkupError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Parse every row of the ranking table, in document order.
///
/// Only the first element matching `body` is read. Returns an empty vector
/// when the table is absent.
pub fn parse_rows(markup: &str, selectors: &TableSelectors) -> Result<Vec<Vec<HtmlCell>>, MarkupError> {
    let compiled = selectors.compile()?;
    let document = Html::parse_document(markup);

    let Some(body) = document.select(&compiled.body).next() else {
        tracing::warn!(selector = %selectors.body, "ranking table not found in markup");
        return Ok(Vec::new());
    };

    let rows = body
        .select(&compiled.row)
        .map(|row| row.select(&compiled.cell).map(HtmlCell::from_element).collect())
        .collect::<Vec<Vec<HtmlCell>>>();

    tracing::debug!(rows = rows.len(), "parsed ranking table");
    Ok(rows)
}

/// Whether the markup contains the ranking table with at least one row that
/// has cells. Used by fetchers to decide if the page finished rendering.
pub fn has_populated_table(markup: &str, selectors: &TableSelectors) -> Result<bool, MarkupError> {
    let compiled = selectors.compile()?;
    let document = Html::parse_document(markup);
    let populated = document
        .select(&compiled.body)
        .next()
        .map(|body| {
            body.select(&compiled.row)
                .any(|row| row.select(&compiled.cell).next().is_some())
        })
        .unwrap_or(false);
    Ok(populated)
}
