//! Importer list extraction.

use scraper::{Html, Selector};

use super::element_text;
use crate::model::ImportedBy;

/// Collects the importer package names from an imported-by page, in page
/// order. The page repeats an entry when a module exposes a package more
/// than once; duplicates are kept as-is.
pub fn parse_imported_by_page(doc: &Html, package: &str) -> ImportedBy {
    let entry_sel = Selector::parse(".u-breakWord").unwrap();
    ImportedBy {
        package: package.to_string(),
        imported_by: doc.select(&entry_sel).map(element_text).collect(),
    }
}
