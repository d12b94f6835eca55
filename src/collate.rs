//! Korean-locale string ordering.
//!
//! Display names are sorted with real collation rules rather than raw code
//! points, matching what users of the catalog see in dictionary order.

use crate::error::{Error, Result};
use icu::collator::{options::CollatorOptions, Collator, CollatorBorrowed};
use icu::locale::locale;

/// Builds a collator for Korean display-name ordering.
pub fn korean_collator() -> Result<CollatorBorrowed<'static>> {
    Collator::try_new(locale!("ko").into(), CollatorOptions::default())
        .map_err(|e| Error::Collation(e.to_string()))
}
