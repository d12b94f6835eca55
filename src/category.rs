//! Category classification.
//!
//! Two independent passes: [`classify_primary`] maps the authority source's
//! free-text classification label to a fixed primary category while the
//! catalog is being built, and [`assign_sub_categories`] refines an
//! already-built catalog into finer sub-categories and derives the taxonomy
//! artifact from the result.

use crate::model::{Catalog, CatalogItem, CategoryGroup, Taxonomy};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Fixed primary category taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryCategory {
    /// Liquids, gels and aerosols.
    LiquidsGels,
    /// Sharp or pointed objects.
    SharpObjects,
    /// Blunt instruments.
    BluntObjects,
    /// Firearms, guns and other weapons.
    Weapons,
    /// Chemical and toxic substances.
    ChemicalToxic,
    /// Explosives and flammable substances.
    ExplosivesFlammable,
    /// High-alert / security-flagged items.
    SecurityHighAlert,
    /// Anything the label rules did not match.
    Other,
}

impl PrimaryCategory {
    /// The snake_case name used in artifacts and tags.
    pub fn as_str(self) -> &'static str {
        match self {
            PrimaryCategory::LiquidsGels => "liquids_gels",
            PrimaryCategory::SharpObjects => "sharp_objects",
            PrimaryCategory::BluntObjects => "blunt_objects",
            PrimaryCategory::Weapons => "weapons",
            PrimaryCategory::ChemicalToxic => "chemical_toxic",
            PrimaryCategory::ExplosivesFlammable => "explosives_flammable",
            PrimaryCategory::SecurityHighAlert => "security_high_alert",
            PrimaryCategory::Other => "other",
        }
    }
}

impl fmt::Display for PrimaryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps an authority classification label to a primary category.
///
/// The label is tested against the rules in order and the first match wins.
/// The order is a priority list: labels regularly mention several categories
/// at once (a liquids label can also name toxic substances), so reordering
/// the rules changes results.
pub fn classify_primary(raw_label: &str) -> PrimaryCategory {
    let label: String = raw_label
        .replace(['"', '\u{201C}', '\u{201D}'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let lowered = label.to_lowercase();

    if label.contains("액체") || lowered.contains("gel") {
        PrimaryCategory::LiquidsGels
    } else if label.contains("끝이 뾰족") || label.contains("날카로운") {
        PrimaryCategory::SharpObjects
    } else if label.contains("둔기") {
        PrimaryCategory::BluntObjects
    } else if label.contains("화기") || label.contains("총기") || label.contains("무기") {
        PrimaryCategory::Weapons
    } else if label.contains("화학물질") || label.contains("유독성") {
        PrimaryCategory::ChemicalToxic
    } else if label.contains("폭발물") || label.contains("인화성") {
        PrimaryCategory::ExplosivesFlammable
    } else if label.contains("경계경보") || label.contains("고위험") {
        PrimaryCategory::SecurityHighAlert
    } else {
        PrimaryCategory::Other
    }
}

/// Source-language classification tags mapped to sub-categories, scanned in
/// item tag order. First tag present in this table wins.
const TAG_SUB_CATEGORIES: &[(&str, &str)] = &[
    ("스포츠용품류", "sports_equipment"),
    ("의료용품류", "medical_equipment"),
    ("생활용품류", "household_items"),
    ("공구류", "tools"),
    ("무기류", "weapons"),
    ("화기류, 총기류,무기류", "firearms_weapons"),
    ("둔기", "blunt_objects"),
    ("끝이 뾰족한 무기및 날카로운 물체", "sharp_objects"),
    ("폭발물과 인화성 물질", "explosives_flammable"),
    ("화학물질 및 유독성 물질", "chemical_toxic"),
    ("액체/겔(gel)류 물질", "liquids_gels"),
    (
        "국토해양부장관이 지정한 고위험이 예상되는 비행편 또는 항공보안 등급 경계경보(Orange) 단계이상",
        "security_high_alert",
    ),
];

/// Manually curated sub-category assignments that survive refinement.
///
/// Carried over from the original hand-maintained data: item 1's
/// `medical_equipment` classification predates the tag table and is kept
/// when the item already carries it. New exceptions belong here, not in
/// [`refine_sub_category`].
const SUB_CATEGORY_OVERRIDES: &[(u32, &str)] = &[(1, "medical_equipment")];

/// Substrings of `name_ko` that classify an item as battery equipment when
/// no tag matched.
const BATTERY_KEYWORDS: &[&str] = &["배터리", "리튬"];

/// Determines the sub-category for one catalog item.
///
/// Resolution order: curated override, first matching tag, battery keyword
/// in the display name, then the primary category itself.
pub fn refine_sub_category(item: &CatalogItem) -> String {
    for (item_id, sub) in SUB_CATEGORY_OVERRIDES {
        if item.item_id == *item_id && item.sub_category.as_deref() == Some(*sub) {
            return (*sub).to_string();
        }
    }

    for tag in &item.tags {
        if let Some((_, sub)) = TAG_SUB_CATEGORIES.iter().find(|(t, _)| t == tag) {
            return (*sub).to_string();
        }
    }

    if BATTERY_KEYWORDS.iter().any(|kw| item.name_ko.contains(kw)) {
        return "batteries".to_string();
    }

    item.primary_category.as_str().to_string()
}

/// Assigns a sub-category to every item of the catalog, in place.
pub fn assign_sub_categories(catalog: &mut Catalog) {
    for item in &mut catalog.items {
        item.sub_category = Some(refine_sub_category(item));
    }
}

/// Derives the taxonomy artifact from a catalog with assigned sub-categories.
///
/// Groups every observed sub-category under its item's primary category;
/// both the groups and each group's sub-category list are deduplicated and
/// sorted.
pub fn build_taxonomy(catalog: &Catalog) -> Taxonomy {
    let mut groups: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for item in &catalog.items {
        let sub = item
            .sub_category
            .clone()
            .unwrap_or_else(|| refine_sub_category(item));
        groups
            .entry(item.primary_category.as_str().to_string())
            .or_default()
            .insert(sub);
    }

    Taxonomy {
        categories: groups
            .into_iter()
            .map(|(name, subs)| CategoryGroup {
                name,
                sub_categories: subs.into_iter().collect(),
            })
            .collect(),
    }
}
