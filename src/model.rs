//! Typed records assembled from site pages.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An image referenced from a package readme, with its URL made absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Image {
    pub alt: String,
    pub url: String,
}

/// Metadata for a single package or module page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Package {
    /// Import path of the package.
    pub package: String,
    pub is_module: bool,
    pub is_package: bool,
    /// Version string shown in the page header.
    pub version: String,
    /// Publication date in YYYY-MM-DD form.
    pub published: String,
    pub license: String,
    pub has_valid_go_mod_file: bool,
    pub has_redistributable_license: bool,
    pub has_tagged_version: bool,
    pub has_stable_version: bool,
    /// Repository URL listed in the details section.
    pub repository: String,
    pub synopsis: String,
    /// Readme images, in page order.
    pub images: Vec<Image>,
}

/// One published version of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Version {
    /// Major version group the entry belongs to (e.g. "v1"). Carried over
    /// from the previous entry when the page leaves the label blank.
    pub major_version: String,
    /// Full version string (e.g. "v1.2.0").
    pub full_version: String,
    /// Publication date in YYYY-MM-DD form.
    pub date: String,
}

/// Version history of a package, in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Versions {
    pub package: String,
    pub versions: Vec<Version>,
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SearchResult {
    pub package: String,
    pub version: String,
    /// Publication date in YYYY-MM-DD form when it parsed, otherwise the
    /// raw text from the page.
    pub published: String,
    /// Number of known importers.
    pub imported_by: u64,
    pub license: String,
    pub synopsis: String,
}

/// Search results across however many pages were fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SearchResults {
    pub results: Vec<SearchResult>,
}

/// Packages that import a package, in page order. Duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ImportedBy {
    pub package: String,
    pub imported_by: Vec<String>,
}

/// Import graph of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Imports {
    pub package: String,
    pub imports: Vec<String>,
    pub module_imports: HashMap<String, Vec<String>>,
    pub std_imports: Vec<String>,
}

/// A license attached to a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct License {
    pub name: String,
    pub source: String,
    pub full_text: String,
}
