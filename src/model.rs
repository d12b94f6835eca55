//! Catalog data model and artifact types.
//!
//! Every artifact the pipeline produces is an immutable JSON snapshot,
//! pretty-printed with a trailing newline so it can be served as a static
//! asset directly.

use crate::category::PrimaryCategory;
use crate::error::{Error, Result};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Per-channel allow/deny state for one item under one jurisdiction.
///
/// The authority source encodes these as circle/cross glyphs. A glyph that is
/// missing or unrecognized parses as [`RuleFlag::Unknown`]; collapsing that
/// into `Denied` is a policy decision applied by the caller (see
/// [`RuleFlag::or_denied`]), not something the parser decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleFlag {
    /// The item is allowed through this channel.
    Allowed,
    /// The item is denied through this channel.
    Denied,
    /// The source did not say either way.
    #[default]
    Unknown,
}

impl RuleFlag {
    /// Interprets a circle/cross glyph from the authority export.
    ///
    /// `○` (or an ASCII `o`, case-insensitive) means allowed, `×` (or an
    /// ASCII `x`) means denied. Anything else, including an empty cell, is
    /// reported as `Unknown`.
    pub fn from_glyph(raw: &str) -> Self {
        let s = raw.trim();
        if s == "○" || s.eq_ignore_ascii_case("o") {
            RuleFlag::Allowed
        } else if s == "×" || s.eq_ignore_ascii_case("x") {
            RuleFlag::Denied
        } else {
            RuleFlag::Unknown
        }
    }

    /// Collapses `Unknown` into `Denied`.
    ///
    /// The catalog treats an unstated rule as a denial so that missing data
    /// never shows an item as safe to carry.
    pub fn or_denied(self) -> Self {
        match self {
            RuleFlag::Unknown => RuleFlag::Denied,
            other => other,
        }
    }

    /// Boolean view used by the repair pass: allowed/denied map to a
    /// boolean, unknown maps to `None`.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            RuleFlag::Allowed => Some(true),
            RuleFlag::Denied => Some(false),
            RuleFlag::Unknown => None,
        }
    }

    /// Decodes any of the legacy flag encodings found in existing catalog
    /// files: proper booleans, the Korean `허용`/`금지` strings, or
    /// case-insensitive `"true"`/`"false"` strings.
    pub fn from_legacy_value(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Bool(true) => RuleFlag::Allowed,
            serde_json::Value::Bool(false) => RuleFlag::Denied,
            serde_json::Value::String(s) => Self::from_legacy_str(s),
            _ => RuleFlag::Unknown,
        }
    }

    fn from_legacy_str(s: &str) -> Self {
        let v = s.trim();
        if v == "허용" || v.eq_ignore_ascii_case("true") {
            RuleFlag::Allowed
        } else if v == "금지" || v.eq_ignore_ascii_case("false") {
            RuleFlag::Denied
        } else {
            RuleFlag::Unknown
        }
    }
}

// Built catalogs carry the display encoding ("허용"/"금지"); the repair pass
// rewrites it to boolean-or-null.
impl Serialize for RuleFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            RuleFlag::Allowed => serializer.serialize_str("허용"),
            RuleFlag::Denied => serializer.serialize_str("금지"),
            RuleFlag::Unknown => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for RuleFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(v) => RuleFlag::from_legacy_value(&v),
            None => RuleFlag::Unknown,
        })
    }
}

/// Allow/deny state for the two baggage channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRules {
    /// Cabin (carry-on) baggage.
    #[serde(default)]
    pub carry_on: RuleFlag,
    /// Checked baggage.
    #[serde(default)]
    pub checked: RuleFlag,
}

/// One entry of the item catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    /// 1-based position in ascending Korean-collation order of `name_ko`.
    ///
    /// Recomputed on every rebuild: adding or removing an item shifts every
    /// subsequent ID, so this is a display key within one build, not a
    /// permanent identifier. Consumers that need a stable key should derive
    /// one from the name (see [`crate::normalize::slugify`]).
    pub item_id: u32,
    /// Canonical Korean display name. Non-empty and unique within a catalog
    /// after key normalization.
    pub name_ko: String,
    /// English display name, when the term source knew one.
    #[serde(default)]
    pub name_en: Option<String>,
    /// Primary category derived from the authority classification label.
    pub primary_category: PrimaryCategory,
    /// Finer classification, assigned by the sub-category pass.
    #[serde(default)]
    pub sub_category: Option<String>,
    /// Free-text description (extended schema; not produced by the build).
    #[serde(default)]
    pub description: Option<String>,
    /// Deduplicated classification tags, in first-seen order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Per-jurisdiction allow/deny summary.
    #[serde(default)]
    pub rules_summary: BTreeMap<String, ChannelRules>,
    /// Per-jurisdiction citation strings.
    #[serde(default)]
    pub rules_sources: BTreeMap<String, Vec<String>>,
    /// Visibility flag; consumers exclude unpublished items from listings.
    #[serde(default = "default_published")]
    pub published: bool,
    /// When the jurisdiction source was last verified.
    #[serde(default)]
    pub source_last_checked: Option<String>,
}

fn default_published() -> bool {
    true
}

/// The item catalog artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Jurisdiction code, e.g. `KR`.
    pub country: String,
    /// Items in ascending `item_id` order.
    pub items: Vec<CatalogItem>,
}

impl Catalog {
    /// Serializes the catalog as pretty-printed JSON with a trailing newline.
    pub fn to_pretty_json(&self) -> Result<String> {
        pretty_json(self)
    }

    /// Writes the catalog to `path`, overwriting the whole file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_pretty_json()?)?;
        Ok(())
    }

    /// Loads a catalog file, accepting legacy rule-flag encodings.
    ///
    /// Fails with [`Error::InvalidCatalog`] when the top-level `items`
    /// collection is not list-shaped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        if !value.get("items").map(|v| v.is_array()).unwrap_or(false) {
            return Err(Error::InvalidCatalog("expected items array".into()));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// One ranked autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteEntry {
    /// Observed surface form, Korean or English.
    pub term: String,
    /// Peak observed frequency across all contributions of this term.
    pub freq: u32,
}

/// The autocomplete index artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocompleteIndex {
    /// Jurisdiction code, e.g. `KR`.
    pub country: String,
    /// Suggestions in descending frequency order.
    pub terms: Vec<AutocompleteEntry>,
}

impl AutocompleteIndex {
    /// Serializes the index as pretty-printed JSON with a trailing newline.
    pub fn to_pretty_json(&self) -> Result<String> {
        pretty_json(self)
    }

    /// Writes the index to `path`, overwriting the whole file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_pretty_json()?)?;
        Ok(())
    }
}

/// One primary category and its observed sub-categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    /// Primary category name.
    pub name: String,
    /// Sorted, deduplicated sub-categories observed under this primary.
    pub sub_categories: Vec<String>,
}

/// The category taxonomy artifact, derived entirely from a built catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Groups sorted by category name.
    pub categories: Vec<CategoryGroup>,
}

impl Taxonomy {
    /// Serializes the taxonomy as pretty-printed JSON with a trailing newline.
    pub fn to_pretty_json(&self) -> Result<String> {
        pretty_json(self)
    }

    /// Writes the taxonomy to `path`, overwriting the whole file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_pretty_json()?)?;
        Ok(())
    }
}

pub(crate) fn pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
