//! Sector canonicalization — aliases, exclusions and ticker overrides.
//!
//! The ranking site labels sectors inconsistently: accents get stripped or
//! mangled ("Papis", "Imveis-Residenciais"), words get hyphenated, and some
//! funds carry no useful label at all. A [`SectorTable`] maps every label into
//! a fixed, accent-correct vocabulary and drops categories that are out of
//! scope for the ranking (development, fund-of-funds, agriculture, ...).
//!
//! The table is plain data. [`SectorTable::default_b3`] reproduces the
//! built-in tables; a TOML file can replace or extend them:
//!
//! ```toml
//! excluded = ["desenvolvimento", "indefinido"]
//!
//! [aliases]
//! Logistica = "Logística"
//!
//! [ticker_overrides]
//! HGBL11 = "Logística"
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Ticker;

/// Errors loading a sector table from disk.
#[derive(Debug, Error)]
pub enum SectorTableError {
    #[error("read sector table {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("parse sector table: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize sector table: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Canonicalization data: alias lookup, exclusion substrings, ticker overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectorTable {
    /// Lowercase substrings; a label containing any of them is excluded.
    pub excluded: Vec<String>,
    /// Canonical sectors offered for filtering even when no alias or
    /// override produces them.
    pub known: Vec<String>,
    /// Title-cased raw label → canonical label.
    pub aliases: BTreeMap<String, String>,
    /// Ticker → sector text that replaces whatever the site reports.
    pub ticker_overrides: BTreeMap<Ticker, String>,
}

impl SectorTable {
    /// Load a sector table from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, SectorTableError> {
        let content = std::fs::read_to_string(path).map_err(|source| SectorTableError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a sector table from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, SectorTableError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize the table to TOML.
    pub fn to_toml(&self) -> Result<String, SectorTableError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Layer `other` on top of `self`: its aliases and overrides win on key
    /// collisions, its exclusions are appended.
    pub fn merge(mut self, other: SectorTable) -> Self {
        self.aliases.extend(other.aliases);
        self.ticker_overrides.extend(other.ticker_overrides);
        for label in other.known {
            if !self.known.contains(&label) {
                self.known.push(label);
            }
        }
        for needle in other.excluded {
            let needle = needle.to_lowercase();
            if !self.excluded.contains(&needle) {
                self.excluded.push(needle);
            }
        }
        self
    }

    /// The built-in table for the fundsexplorer ranking page.
    pub fn default_b3() -> Self {
        let aliases = [
            ("Logistica", "Logística"),
            ("Hibrido", "Híbrido"),
            ("Papis", "Papéis"),
            ("Imves Residenciais", "Imóveis Residenciais"),
            ("Imveis Residenciais", "Imóveis Residenciais"),
            ("Imveis-Residenciais", "Imóveis Residenciais"),
            ("Agncias De Bancos", "Agências De Bancos"),
            ("Agncias-De-Bancos", "Agências De Bancos"),
            ("Servios Financeiros Diversos", "Serviços Financeiros Diversos"),
            ("Servios-Financeiros-Diversos", "Serviços Financeiros Diversos"),
            ("Imveis Industriais E Logsticos", "Logística"),
            ("Imveis-Industriais-E-Logsticos", "Logística"),
            ("Imveis-Comerciais---Outros", "Imóveis Comerciais Outros"),
            ("Hotis", "Hotéis"),
            ("Tecidos-Vesturio-E-Calados", "Tecidos, Vestuário E Calçados"),
            ("Lajes-Corporativas", "Lajes Corporativas"),
        ];

        let excluded = [
            "desenvolvimento",
            "indefinido",
            "fundo-de-fundos",
            "agricultura",
            "incorporaes",
        ];

        let known = [
            "Logística",
            "Shoppings",
            "Lajes Corporativas",
            "Terras Agrícolas",
            "Hospitais",
            "Hotéis",
            "Imóveis Comerciais Outros",
            "Imóveis Residenciais",
            "Papéis",
            "Agências De Bancos",
            "Serviços Financeiros Diversos",
            "Tecidos, Vestuário E Calçados",
        ];

        let overrides = [
            ("CPSH11", "Shoppings"),
            ("KNRI11", "Lajes Corporativas"),
            ("VGHF11", "Papéis"),
            ("ICRI11", "Papéis"),
            ("VGRI11", "Imóveis Comerciais Outros"),
            ("HGRU11", "Imóveis Comerciais Outros"),
            ("HGBL11", "Logística"),
            ("ALZR11", "Logística"),
            ("RZTR11", "Terras Agrícolas"),
        ];

        Self {
            aliases: aliases
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            excluded: excluded.into_iter().map(String::from).collect(),
            known: known.into_iter().map(String::from).collect(),
            ticker_overrides: overrides
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Canonicalize a raw sector label.
    ///
    /// Title-cases, maps through the alias table, then excludes the result if
    /// it contains any excluded substring (case-insensitive). `None` means the
    /// row must be dropped.
    pub fn canonicalize(&self, raw: &str) -> Option<String> {
        let titled = title_case(raw);
        let label = self.aliases.get(&titled).cloned().unwrap_or(titled);
        if self.is_excluded(&label) {
            None
        } else {
            Some(label)
        }
    }

    /// Resolve the sector for a ticker: the override text if one exists,
    /// otherwise the extracted label, then canonicalized.
    pub fn sector_for(&self, ticker: &str, raw: &str) -> Option<String> {
        let source = self
            .ticker_overrides
            .get(ticker)
            .map(String::as_str)
            .unwrap_or(raw);
        self.canonicalize(source)
    }

    /// Whether a label falls into an excluded category.
    pub fn is_excluded(&self, label: &str) -> bool {
        let lower = label.to_lowercase();
        self.excluded
            .iter()
            .any(|needle| lower.contains(needle.to_lowercase().as_str()))
    }

    /// Sorted, distinct canonical sectors: the known list plus everything the
    /// aliases and overrides can produce (the choices offered for filtering).
    pub fn vocabulary(&self) -> Vec<String> {
        self.known
            .iter()
            .chain(self.aliases.values())
            .chain(self.ticker_overrides.values())
            .filter_map(|label| self.canonicalize(label))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Title-case a label: the first letter of every alphabetic run is
/// uppercased, the rest lowercased. Non-letters (spaces, hyphens, digits,
/// punctuation) start a new run.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_variants() {
        assert_eq!(title_case("logistica"), "Logistica");
        assert_eq!(title_case("LAJES CORPORATIVAS"), "Lajes Corporativas");
        assert_eq!(
            title_case("imveis-comerciais---outros"),
            "Imveis-Comerciais---Outros"
        );
        assert_eq!(title_case("papéis"), "Papéis");
        assert_eq!(title_case("tecidos, vestuário e calçados"), "Tecidos, Vestuário E Calçados");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn maps_accent_stripped_label() {
        let t = SectorTable::default_b3();
        assert_eq!(t.canonicalize("logistica").as_deref(), Some("Logística"));
        assert_eq!(t.canonicalize("PAPIS").as_deref(), Some("Papéis"));
        assert_eq!(t.canonicalize("hotis").as_deref(), Some("Hotéis"));
        assert_eq!(
            t.canonicalize("imveis-industriais-e-logsticos").as_deref(),
            Some("Logística")
        );
    }

    #[test]
    fn unmapped_label_passes_through_title_cased() {
        let t = SectorTable::default_b3();
        assert_eq!(t.canonicalize("shoppings").as_deref(), Some("Shoppings"));
        assert_eq!(t.canonicalize("hospitais").as_deref(), Some("Hospitais"));
    }

    #[test]
    fn excludes_whole_and_partial_matches() {
        let t = SectorTable::default_b3();
        assert_eq!(t.canonicalize("Indefinido"), None);
        assert_eq!(t.canonicalize("INDEFINIDO"), None);
        assert_eq!(t.canonicalize("setor indefinido (misto)"), None);
        assert_eq!(t.canonicalize("subindefinidox"), None);
        assert_eq!(t.canonicalize("fundo-de-fundos"), None);
        assert_eq!(t.canonicalize("Desenvolvimento Residencial"), None);
        assert_eq!(t.canonicalize("incorporaes"), None);
        assert_eq!(t.canonicalize("Agricultura"), None);
    }

    #[test]
    fn terras_agricolas_is_not_agriculture() {
        let t = SectorTable::default_b3();
        assert_eq!(
            t.canonicalize("Terras Agrícolas").as_deref(),
            Some("Terras Agrícolas")
        );
    }

    #[test]
    fn ticker_override_takes_precedence() {
        let t = SectorTable::default_b3();
        assert_eq!(t.sector_for("HGBL11", "indefinido").as_deref(), Some("Logística"));
        assert_eq!(t.sector_for("RZTR11", "agricultura").as_deref(), Some("Terras Agrícolas"));
        assert_eq!(t.sector_for("XPTO11", "indefinido"), None);
        assert_eq!(t.sector_for("XPTO11", "hibrido").as_deref(), Some("Híbrido"));
    }

    #[test]
    fn vocabulary_is_sorted_and_distinct() {
        let vocab = SectorTable::default_b3().vocabulary();
        assert!(vocab.contains(&"Logística".to_string()));
        assert!(vocab.contains(&"Shoppings".to_string()));
        assert!(vocab.contains(&"Terras Agrícolas".to_string()));
        assert!(vocab.contains(&"Hospitais".to_string()));
        assert!(vocab.contains(&"Híbrido".to_string()));
        let mut sorted = vocab.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(vocab, sorted);
    }

    #[test]
    fn toml_roundtrip() {
        let t = SectorTable::default_b3();
        let s = t.to_toml().unwrap();
        let parsed = SectorTable::from_toml(&s).unwrap();
        assert_eq!(t, parsed);
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_sections() {
        let t = SectorTable::from_toml(
            r#"
            [ticker_overrides]
            MXRF11 = "Papéis"
            "#,
        )
        .unwrap();
        assert!(t.aliases.is_empty());
        assert!(t.excluded.is_empty());
        assert!(t.known.is_empty());
        assert_eq!(t.ticker_overrides["MXRF11"], "Papéis");
    }

    #[test]
    fn merge_layers_overrides_and_exclusions() {
        let extra = SectorTable::from_toml(
            r#"
            excluded = ["Hospitais"]
            [aliases]
            Shoppings = "Shopping Centers"
            [ticker_overrides]
            KNRI11 = "Híbrido"
            "#,
        )
        .unwrap();
        let t = SectorTable::default_b3().merge(extra);
        assert_eq!(t.canonicalize("hospitais"), None);
        assert_eq!(t.canonicalize("shoppings").as_deref(), Some("Shopping Centers"));
        assert_eq!(t.sector_for("KNRI11", "x").as_deref(), Some("Híbrido"));
        assert_eq!(t.canonicalize("logistica").as_deref(), Some("Logística"));
    }

    #[test]
    fn read_missing_file_reports_path() {
        let err = SectorTable::from_file(Path::new("/nonexistent/sectors.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/sectors.toml"));
    }
}
