//! CSV ingestion for the two spreadsheet sources.
//!
//! Both sources are UTF-8 spreadsheet exports with a header row, sometimes
//! carrying a leading byte-order mark. Each file is read fully into memory,
//! the BOM is stripped, and rows are deserialized by header name so column
//! order in the export does not matter. Sparse rows are expected; rows with
//! an empty item name survive parsing and are skipped downstream.

use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One row of the authority list (the regulatory source).
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorityRow {
    /// Free-text classification label.
    #[serde(rename = "GUBUN", default)]
    pub category_label: String,
    /// Korean item name.
    #[serde(rename = "CARRY_BAN", default)]
    pub name_ko: String,
    /// Cabin-allowed glyph (`○`/`×`).
    #[serde(rename = "CABIN", default)]
    pub cabin: String,
    /// Checked-allowed glyph (`○`/`×`).
    #[serde(rename = "TRUST", default)]
    pub checked: String,
}

/// One row of the search-term frequency list.
#[derive(Debug, Clone, Deserialize)]
pub struct TermRow {
    /// Korean search term.
    #[serde(rename = "금지물품(한글)", default)]
    pub term_ko: String,
    /// English translation, often empty.
    #[serde(rename = "금지물품(영문)", default)]
    pub term_en: String,
    /// Broad category label, often empty.
    #[serde(rename = "금지물품 대분류", default)]
    pub broad_category: String,
    /// Raw search count cell; parse with [`TermRow::frequency`].
    #[serde(rename = "검색건수", default)]
    pub search_count: String,
}

impl TermRow {
    /// Parses the search count leniently.
    ///
    /// The exporter writes counts with stray suffixes (`"50건"`), so only the
    /// leading decimal digits are read; anything unparseable counts as 0.
    pub fn frequency(&self) -> u32 {
        let digits: String = self
            .search_count
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().unwrap_or(0)
    }
}

/// Reads the authority list from a file.
pub fn read_authority_file(path: impl AsRef<Path>) -> Result<Vec<AuthorityRow>> {
    let text = fs::read_to_string(path)?;
    parse_authority(&text)
}

/// Parses authority rows from CSV text.
pub fn parse_authority(text: &str) -> Result<Vec<AuthorityRow>> {
    parse_rows(text)
}

/// Reads the term-frequency list from a file.
pub fn read_terms_file(path: impl AsRef<Path>) -> Result<Vec<TermRow>> {
    let text = fs::read_to_string(path)?;
    parse_terms(&text)
}

/// Parses term rows from CSV text.
pub fn parse_terms(text: &str) -> Result<Vec<TermRow>> {
    parse_rows(text)
}

fn parse_rows<T: for<'de> Deserialize<'de>>(text: &str) -> Result<Vec<T>> {
    let text = strip_bom(text);
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}
