//! Version history extraction.
//!
//! The versions tab flattens the history into a single list of sibling
//! rows: a major-version label row opens a group, then each release
//! contributes a tag row and a date row. The walk below rebuilds grouped
//! records from that flat sequence.

use std::mem;

use log::warn;
use scraper::{ElementRef, Html, Node, Selector};

use super::{date, element_text};
use crate::error::ErrorList;
use crate::model::{Version, Versions};

/// Walks the version list and emits one record per completed entry.
///
/// The major version is sticky: a label row with text updates it, a blank
/// label row re-stamps the previous value, and every in-progress record
/// inherits it. A date row terminates the in-progress record; the record
/// is emitted and the accumulator resets. An entry still pending when the
/// list ends is dropped.
pub fn parse_versions_page(doc: &Html, package: &str) -> (Versions, ErrorList) {
    let mut versions = Versions {
        package: package.to_string(),
        versions: Vec::new(),
    };
    let mut errs = ErrorList::new();

    let list_sel = Selector::parse(".Versions-list").unwrap();
    let Some(list) = doc.select(&list_sel).next() else {
        return (versions, errs);
    };

    let link_sel = Selector::parse(".js-versionLink").unwrap();
    let summary_sel = Selector::parse(".Version-summary").unwrap();

    let mut current = Version::default();
    let mut current_major = String::new();

    for row in list.children().filter_map(ElementRef::wrap) {
        let element = row.value();

        if element.classes().any(|c| c == "Version-major") {
            let major = element_text(row);
            if !major.is_empty() {
                current_major = major;
            }
            current.major_version = current_major.clone();
        }

        if element.classes().any(|c| c == "Version-tag") {
            current.full_version = row
                .select(&link_sel)
                .next()
                .map(element_text)
                .unwrap_or_default();
        }

        if element.classes().any(|c| c == "Version-commitTime") {
            match date::normalize(&element_text(row)) {
                Ok(normalized) => {
                    current.date = normalized;
                    versions.versions.push(mem::take(&mut current));
                }
                Err(e) => errs.push(e.into()),
            }
        }

        if element.classes().any(|c| c == "Version-details") {
            let date_str = row
                .select(&summary_sel)
                .next()
                .map(text_without_spans)
                .unwrap_or_default();
            match date::normalize(date_str.trim()) {
                Ok(normalized) => {
                    current.date = normalized;
                    versions.versions.push(mem::take(&mut current));
                }
                Err(e) => warn!("error in version details: {}", e),
            }
        }
    }

    (versions, errs)
}

/// Text content of an element with any span subtrees left out. The
/// summary rows embed commit hashes and counts in spans next to the date.
fn text_without_spans(el: ElementRef) -> String {
    let mut out = String::new();
    for node in el.children() {
        match node.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(child) if child.name() == "span" => {}
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(node) {
                    out.push_str(&text_without_spans(child));
                }
            }
            _ => {}
        }
    }
    out
}
