//! Autocomplete index construction.
//!
//! Merges search-term observations with catalog item names into one ranked
//! suggestion list. A term's frequency is the maximum seen across all of its
//! contributions, never the sum: the index ranks peak observed relevance,
//! not cumulative volume.

use crate::collate::korean_collator;
use crate::error::Result;
use crate::ingest::TermRow;
use crate::model::{AutocompleteEntry, AutocompleteIndex, Catalog};
use crate::reconcile::BuildOptions;
use std::collections::HashMap;

/// Builds the autocomplete index from the term list and the built catalog.
///
/// Every term row seeds its Korean term at the reported frequency and, when
/// a translation exists, the English term at `translated_freq_ratio` of that
/// frequency (floored, minimum 1 so tiny-frequency aliases stay
/// discoverable). Catalog item names merge in at `base_name_freq` and their
/// translations at half of it, floored.
pub fn build_autocomplete(
    terms: &[TermRow],
    catalog: &Catalog,
    options: &BuildOptions,
) -> Result<AutocompleteIndex> {
    let mut freqs: HashMap<String, u32> = HashMap::new();

    for term in terms {
        let term_ko = term.term_ko.trim();
        if term_ko.is_empty() {
            continue;
        }
        let freq = term.frequency();
        merge_max(&mut freqs, term_ko, freq);

        let term_en = term.term_en.trim();
        if !term_en.is_empty() {
            let translated = (freq as f64 * options.translated_freq_ratio).floor() as u32;
            merge_max(&mut freqs, term_en, translated.max(1));
        }
    }

    for item in &catalog.items {
        let name_ko = item.name_ko.trim();
        if !name_ko.is_empty() {
            merge_max(&mut freqs, name_ko, options.base_name_freq);
        }
        if let Some(name_en) = item.name_en.as_deref() {
            let name_en = name_en.trim();
            if !name_en.is_empty() {
                merge_max(&mut freqs, name_en, options.base_name_freq / 2);
            }
        }
    }

    let collator = korean_collator()?;
    let mut entries: Vec<AutocompleteEntry> = freqs
        .into_iter()
        .map(|(term, freq)| AutocompleteEntry { term, freq })
        .collect();
    entries.sort_by(|a, b| {
        b.freq
            .cmp(&a.freq)
            .then_with(|| collator.compare(&a.term, &b.term))
    });

    Ok(AutocompleteIndex {
        country: options.country.clone(),
        terms: entries,
    })
}

fn merge_max(freqs: &mut HashMap<String, u32>, term: &str, freq: u32) {
    let entry = freqs.entry(term.to_string()).or_insert(0);
    *entry = (*entry).max(freq);
}
