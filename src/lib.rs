//! # airban
//!
//! Builds a prohibited travel items catalog from two heterogeneous
//! spreadsheet exports: an authority list of banned items with per-channel
//! allow/deny flags, and a search-term frequency list with English
//! translations and broad categories. The two sources are reconciled into a
//! single deduplicated, stably-identified catalog plus a ranked autocomplete
//! index, written as static JSON artifacts for the web application that
//! serves them.
//!
//! ## Pipeline
//!
//! 1. **Ingestion** - BOM-stripped, header-addressed CSV parsing
//! 2. **Normalization** - canonical join keys and slugs for Korean names
//! 3. **Classification** - ordered substring rules map authority labels to a
//!    fixed category taxonomy
//! 4. **Reconciliation** - exact-key join, first-occurrence dedup, Korean
//!    collation sort, dense ID assignment
//! 5. **Autocomplete** - peak-frequency suggestion index over all observed
//!    surface forms
//!
//! A separate repair pass ([`repair`]) re-shapes previously built catalog
//! files into the canonical field layout.
//!
//! ## Quick Start
//!
//! ```no_run
//! use airban::{build_from_paths, BuildOptions};
//!
//! fn main() -> airban::Result<()> {
//!     let artifacts = build_from_paths(
//!         "authority.csv",
//!         "terms.csv",
//!         &BuildOptions::default(),
//!     )?;
//!
//!     artifacts.catalog.save("data/items.kr.json")?;
//!     artifacts.autocomplete.save("data/autocomplete.kr.json")?;
//!     Ok(())
//! }
//! ```
//!
//! The whole pipeline is single-threaded, batch, and run-to-completion:
//! inputs are read fully into memory, outputs are whole-file overwrites, and
//! a rebuild recomputes everything from scratch. `item_id` values are only
//! stable within one build.

pub mod autocomplete;
pub mod category;
pub mod collate;
pub mod error;
pub mod ingest;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod repair;

// Re-exports
pub use autocomplete::build_autocomplete;
pub use category::{assign_sub_categories, build_taxonomy, classify_primary, PrimaryCategory};
pub use error::{Error, Result};
pub use ingest::{read_authority_file, read_terms_file, AuthorityRow, TermRow};
pub use model::{
    AutocompleteEntry, AutocompleteIndex, Catalog, CatalogItem, CategoryGroup, ChannelRules,
    RuleFlag, Taxonomy,
};
pub use normalize::{normalize_key, slugify};
pub use reconcile::{reconcile, BuildOptions};
pub use repair::{repair_catalog, repair_file};

use std::path::Path;

/// The two artifacts produced by one catalog build.
#[derive(Debug, Clone)]
pub struct BuildArtifacts {
    /// The reconciled item catalog.
    pub catalog: Catalog,
    /// The ranked autocomplete index.
    pub autocomplete: AutocompleteIndex,
}

/// Runs the full pipeline over the two source files.
///
/// Reads both sources fully into memory, reconciles them into the catalog,
/// and derives the autocomplete index. Fails before producing anything if
/// either input is missing or unreadable; partial catalogs are never
/// emitted.
pub fn build_from_paths(
    authority_path: impl AsRef<Path>,
    terms_path: impl AsRef<Path>,
    options: &BuildOptions,
) -> Result<BuildArtifacts> {
    let authority = ingest::read_authority_file(authority_path)?;
    let terms = ingest::read_terms_file(terms_path)?;
    build_from_rows(&authority, &terms, options)
}

/// Runs reconciliation and index construction over already-parsed rows.
pub fn build_from_rows(
    authority: &[AuthorityRow],
    terms: &[TermRow],
    options: &BuildOptions,
) -> Result<BuildArtifacts> {
    let catalog = reconcile::reconcile(authority, terms, options)?;
    let autocomplete = autocomplete::build_autocomplete(terms, &catalog, options)?;
    Ok(BuildArtifacts {
        catalog,
        autocomplete,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const AUTHORITY_CSV: &str = "\u{feff}GUBUN,CARRY_BAN,CABIN,TRUST,SEQ\n\
        액체/겔(gel)류 물질,라이터,○,×,1\n\
        둔기,망치,×,○,2\n\
        둔기,망치,○,○,3\n\
        생활용품류,가위,×,○,4\n\
        둔기,,×,○,5\n";

    const TERMS_CSV: &str = "번호,금지물품(한글),금지물품(영문),금지물품 대분류,검색건수\n\
        1,가위,scissors,생활용품류,50\n\
        2,라이터,,,3\n\
        3,면도날,razor blade,생활용품류,12\n";

    fn write_sources(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
        let authority = dir.join("authority.csv");
        let terms = dir.join("terms.csv");
        fs::write(&authority, AUTHORITY_CSV).unwrap();
        fs::write(&terms, TERMS_CSV).unwrap();
        (authority, terms)
    }

    #[test]
    fn test_end_to_end_build() {
        let dir = tempfile::tempdir().unwrap();
        let (authority, terms) = write_sources(dir.path());

        let artifacts =
            build_from_paths(&authority, &terms, &BuildOptions::default()).unwrap();

        // Duplicate 망치 collapsed, empty-name row skipped.
        let names: Vec<&str> = artifacts
            .catalog
            .items
            .iter()
            .map(|i| i.name_ko.as_str())
            .collect();
        assert_eq!(names, vec!["가위", "라이터", "망치"]);
        let ids: Vec<u32> = artifacts.catalog.items.iter().map(|i| i.item_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        // Join enrichment: 가위 matched, 망치 did not.
        assert_eq!(
            artifacts.catalog.items[0].name_en.as_deref(),
            Some("scissors")
        );
        assert_eq!(artifacts.catalog.items[2].name_en, None);

        // 면도날 has no authority row: autocomplete only.
        assert!(!names.contains(&"면도날"));
        let freq = |t: &str| {
            artifacts
                .autocomplete
                .terms
                .iter()
                .find(|e| e.term == t)
                .map(|e| e.freq)
        };
        assert_eq!(freq("면도날"), Some(12));
        assert_eq!(freq("razor blade"), Some(2));
        assert_eq!(freq("가위"), Some(50));
        assert_eq!(freq("망치"), Some(1));
    }

    #[test]
    fn test_artifacts_write_as_served_json() {
        let dir = tempfile::tempdir().unwrap();
        let (authority, terms) = write_sources(dir.path());
        let artifacts =
            build_from_paths(&authority, &terms, &BuildOptions::default()).unwrap();

        let items_path = dir.path().join("items.kr.json");
        let ac_path = dir.path().join("autocomplete.kr.json");
        artifacts.catalog.save(&items_path).unwrap();
        artifacts.autocomplete.save(&ac_path).unwrap();

        let items_json = fs::read_to_string(&items_path).unwrap();
        assert!(items_json.ends_with('\n'));
        let reloaded = Catalog::load(&items_path).unwrap();
        assert_eq!(reloaded.items.len(), 3);

        let ac_json = fs::read_to_string(&ac_path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&ac_json).unwrap();
        assert_eq!(parsed["country"], "KR");
        assert!(parsed["terms"].is_array());
    }

    #[test]
    fn test_missing_input_aborts_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let terms = dir.path().join("terms.csv");
        fs::write(&terms, TERMS_CSV).unwrap();

        let result = build_from_paths(dir.path().join("absent.csv"), &terms, &BuildOptions::default());
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_taxonomy_from_built_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let (authority, terms) = write_sources(dir.path());
        let mut catalog = build_from_paths(&authority, &terms, &BuildOptions::default())
            .unwrap()
            .catalog;

        assign_sub_categories(&mut catalog);
        let taxonomy = build_taxonomy(&catalog);

        let names: Vec<&str> = taxonomy
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(taxonomy
            .categories
            .iter()
            .all(|c| !c.sub_categories.is_empty()));
    }
}
