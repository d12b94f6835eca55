//! Catalog repair pass.
//!
//! Rewrites a previously built catalog file into the canonical shape: every
//! item carries the full field set in a fixed order, legacy rule-flag
//! encodings (Korean `허용`/`금지` strings, `"true"`/`"false"` strings,
//! booleans) collapse to boolean-or-null, and `rules_sources` is always a
//! list. Running the pass on its own output is a no-op.
//!
//! Works on loosely-typed JSON values on the way in: repair exists precisely
//! because existing files do not match the typed model.

use crate::error::{Error, Result};
use crate::model::{pretty_json, RuleFlag};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A catalog re-shaped into the canonical field layout.
#[derive(Debug, Serialize)]
pub struct RepairedCatalog {
    /// Jurisdiction code, defaulting to `KR` when the input omits it.
    pub country: String,
    /// Items in input order, each with the full canonical field set.
    pub items: Vec<RepairedItem>,
}

/// One item in canonical layout. Field order here is the artifact order.
#[derive(Debug, Serialize)]
pub struct RepairedItem {
    pub item_id: Value,
    pub name_ko: Value,
    pub name_en: Value,
    pub primary_category: Value,
    pub sub_category: Value,
    pub description: Value,
    pub tags: Vec<Value>,
    pub rules_summary: BTreeMap<String, RepairedChannels>,
    pub rules_sources: BTreeMap<String, Vec<Value>>,
    pub published: bool,
    pub source_last_checked: Value,
}

/// Canonical boolean-or-null flag pair.
#[derive(Debug, Serialize)]
pub struct RepairedChannels {
    pub carry_on: Option<bool>,
    pub checked: Option<bool>,
}

impl RepairedCatalog {
    /// Serializes the repaired catalog as pretty-printed JSON with a
    /// trailing newline.
    pub fn to_pretty_json(&self) -> Result<String> {
        pretty_json(self)
    }
}

/// Re-shapes a parsed catalog document into the canonical layout.
///
/// Fails with [`Error::InvalidCatalog`] when the top-level `items`
/// collection is not list-shaped.
pub fn repair_catalog(document: &Value) -> Result<RepairedCatalog> {
    let items = document
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::InvalidCatalog("expected items array".into()))?;

    let country = document
        .get("country")
        .and_then(Value::as_str)
        .unwrap_or("KR")
        .to_string();

    Ok(RepairedCatalog {
        items: items
            .iter()
            .map(|item| repair_item(item, &country))
            .collect(),
        country,
    })
}

/// Repairs a catalog file in place.
///
/// Validation failures abort before anything is written; the input file is
/// only overwritten once the whole document has been re-shaped. Returns the
/// number of items written.
pub fn repair_file(path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&content)?;

    let repaired = repair_catalog(&document)?;
    fs::write(path, repaired.to_pretty_json()?)?;
    Ok(repaired.items.len())
}

fn repair_item(item: &Value, country: &str) -> RepairedItem {
    let field = |key: &str| item.get(key).cloned().unwrap_or(Value::Null);

    let channel = |key: &str| {
        item.get("rules_summary")
            .and_then(|summary| summary.get(country))
            .and_then(|rules| rules.get(key))
            .map(RuleFlag::from_legacy_value)
            .unwrap_or(RuleFlag::Unknown)
            .as_bool()
    };

    let sources = item
        .get("rules_sources")
        .and_then(|sources| sources.get(country))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    RepairedItem {
        item_id: field("item_id"),
        name_ko: field("name_ko"),
        name_en: field("name_en"),
        primary_category: field("primary_category"),
        sub_category: field("sub_category"),
        description: field("description"),
        tags: item
            .get("tags")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        rules_summary: BTreeMap::from([(
            country.to_string(),
            RepairedChannels {
                carry_on: channel("carry_on"),
                checked: channel("checked"),
            },
        )]),
        rules_sources: BTreeMap::from([(country.to_string(), sources)]),
        published: truthy(&field("published")),
        source_last_checked: field("source_last_checked"),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::Array(_) | Value::Object(_) => true,
    }
}
