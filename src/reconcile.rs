//! Reconciliation of the authority list against the term-frequency list.
//!
//! Produces the unified item catalog: authority rows define membership, term
//! rows only enrich matched items with a translation and a broad category.
//! Matching is by exact normalized-name key; substring matching was
//! rejected because it joins generic words to compound words that merely
//! contain them.

use crate::category::classify_primary;
use crate::collate::korean_collator;
use crate::error::Result;
use crate::ingest::{AuthorityRow, TermRow};
use crate::model::{Catalog, CatalogItem, ChannelRules, RuleFlag};
use crate::normalize::normalize_key;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Options for one catalog build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Jurisdiction code keying rule summaries and sources.
    pub country: String,
    /// Citation recorded for every item under this jurisdiction.
    pub source_citation: String,
    /// Fraction of a term's frequency credited to its English translation
    /// in the autocomplete index.
    pub translated_freq_ratio: f64,
    /// Baseline autocomplete frequency for catalog item names.
    pub base_name_freq: u32,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            country: "KR".to_string(),
            source_citation: "국토교통부(2020-09-28)".to_string(),
            translated_freq_ratio: 0.2,
            base_name_freq: 1,
        }
    }
}

impl BuildOptions {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the jurisdiction code.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Sets the citation recorded for the jurisdiction.
    pub fn with_source_citation(mut self, citation: impl Into<String>) -> Self {
        self.source_citation = citation.into();
        self
    }

    /// Sets the translated-term frequency ratio.
    pub fn with_translated_freq_ratio(mut self, ratio: f64) -> Self {
        self.translated_freq_ratio = ratio;
        self
    }

    /// Sets the baseline frequency for item names.
    pub fn with_base_name_freq(mut self, freq: u32) -> Self {
        self.base_name_freq = freq;
        self
    }
}

/// Joins authority rows against term rows and assembles the catalog.
///
/// Authority rows are processed in source order; the first row for a
/// normalized name wins and later rows with the same key are discarded, not
/// merged. Term rows are looked up by exact normalized key only, again first
/// entry wins. After assembly, items are sorted by Korean collation of
/// `name_ko` and `item_id` becomes the dense 1-based position in that order.
pub fn reconcile(
    authority: &[AuthorityRow],
    terms: &[TermRow],
    options: &BuildOptions,
) -> Result<Catalog> {
    // Normalized term name -> first term row with that key.
    let mut term_index: HashMap<String, &TermRow> = HashMap::new();
    for term in terms {
        if term.term_ko.trim().is_empty() {
            continue;
        }
        term_index.entry(normalize_key(&term.term_ko)).or_insert(term);
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut items: Vec<CatalogItem> = Vec::new();

    for row in authority {
        let name_ko = row.name_ko.trim();
        if name_ko.is_empty() {
            continue;
        }
        let key = normalize_key(name_ko);
        if !seen.insert(key.clone()) {
            continue;
        }

        let matched = term_index.get(&key).copied();
        let name_en = matched
            .map(|t| t.term_en.trim())
            .filter(|en| !en.is_empty())
            .map(str::to_string);
        let broad_category = matched
            .map(|t| t.broad_category.trim())
            .filter(|cat| !cat.is_empty())
            .map(str::to_string);

        let primary = classify_primary(&row.category_label);

        let mut tags: Vec<String> = vec![primary.as_str().to_string()];
        if let Some(cat) = broad_category {
            if !tags.contains(&cat) {
                tags.push(cat);
            }
        }
        let label = row.category_label.trim();
        if !label.is_empty() && !tags.iter().any(|t| t == label) {
            tags.push(label.to_string());
        }

        let rules = ChannelRules {
            // Unknown collapses to denied here: an unstated rule must not
            // present an item as safe to carry.
            carry_on: RuleFlag::from_glyph(&row.cabin).or_denied(),
            checked: RuleFlag::from_glyph(&row.checked).or_denied(),
        };

        items.push(CatalogItem {
            item_id: 0, // assigned after sorting
            name_ko: name_ko.to_string(),
            name_en,
            primary_category: primary,
            sub_category: None,
            description: None,
            tags,
            rules_summary: BTreeMap::from([(options.country.clone(), rules)]),
            rules_sources: BTreeMap::from([(
                options.country.clone(),
                vec![options.source_citation.clone()],
            )]),
            published: true,
            source_last_checked: None,
        });
    }

    let collator = korean_collator()?;
    items.sort_by(|a, b| collator.compare(&a.name_ko, &b.name_ko));
    for (index, item) in items.iter_mut().enumerate() {
        item.item_id = (index + 1) as u32;
    }

    Ok(Catalog {
        country: options.country.clone(),
        items,
    })
}
