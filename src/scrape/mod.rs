//! Extraction of typed records from fetched pages.
//!
//! Each submodule reads one page type. Extraction rules are expressed as
//! CSS selector lookups against structural anchors; a missing anchor leaves
//! the corresponding field at its zero value rather than failing the page.

pub mod date;
mod imported_by;
mod package;
mod search;
mod versions;

pub use imported_by::parse_imported_by_page;
pub use package::parse_package_page;
pub use search::{PageRange, SearchPage, parse_search_page};
pub use versions::parse_versions_page;

use scraper::ElementRef;

/// Whitespace-trimmed text content of an element, descendants included.
pub(crate) fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Text content of the element's first child element, untrimmed.
pub(crate) fn first_child_text(el: ElementRef) -> Option<String> {
    el.children()
        .filter_map(ElementRef::wrap)
        .next()
        .map(|child| child.text().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_element_text_trims_and_flattens() {
        let doc = Html::parse_fragment("<div>  a <span>b</span> c  </div>");
        let sel = Selector::parse("div").unwrap();
        let el = doc.select(&sel).next().unwrap();
        assert_eq!(element_text(el), "a b c");
    }

    #[test]
    fn test_first_child_text_skips_text_nodes() {
        let doc = Html::parse_fragment("<div> leading <a>link</a><a>second</a></div>");
        let sel = Selector::parse("div").unwrap();
        let el = doc.select(&sel).next().unwrap();
        assert_eq!(first_child_text(el).unwrap(), "link");
    }

    #[test]
    fn test_first_child_text_none_without_children() {
        let doc = Html::parse_fragment("<div>only text</div>");
        let sel = Selector::parse("div").unwrap();
        let el = doc.select(&sel).next().unwrap();
        assert!(first_child_text(el).is_none());
    }
}
