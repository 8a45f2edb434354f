//! Search results extraction.

use scraper::{ElementRef, Html, Selector};

use super::{date, element_text};
use crate::error::ErrorList;
use crate::model::SearchResult;

/// Result range reported by the pagination header, e.g. "1 - 25 of 126".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub lower: usize,
    pub upper: usize,
    pub total: usize,
}

/// Parsed contents of one search results page.
#[derive(Debug, Default)]
pub struct SearchPage {
    pub results: Vec<SearchResult>,
    /// Whether the page carried any result snippets at all. Used for the
    /// continuation decision when the pagination header is absent.
    pub found_snippets: bool,
    /// Range from the pagination header, when the page has one.
    pub range: Option<PageRange>,
    pub errors: ErrorList,
}

/// Reads up to `remaining` results from a search page, along with the
/// signals the pagination loop needs for its continuation decision.
pub fn parse_search_page(doc: &Html, remaining: usize) -> SearchPage {
    let mut page = SearchPage::default();

    let pagination_sel = Selector::parse(".SearchPagination").unwrap();
    page.range = doc
        .select(&pagination_sel)
        .next()
        .and_then(|el| parse_page_range(&element_text(el)));

    let snippet_sel = Selector::parse(".SearchSnippet").unwrap();
    page.found_snippets = doc.select(&snippet_sel).next().is_some();

    for snippet in doc.select(&snippet_sel) {
        if page.results.len() >= remaining {
            break;
        }
        let result = extract_snippet(snippet, &mut page.errors);
        page.results.push(result);
    }

    page
}

/// Extracts one search result from a snippet node. Missing anchors leave
/// fields at their zero values; a bad published date is accumulated and
/// the raw text kept in its place.
fn extract_snippet(snippet: ElementRef, errs: &mut ErrorList) -> SearchResult {
    let title_sel = Selector::parse(".SearchSnippet-headerContainer a").unwrap();
    let synopsis_sel = Selector::parse(".SearchSnippet-synopsis").unwrap();
    let info_sel = Selector::parse(".SearchSnippet-infoLabel").unwrap();
    let published_sel = Selector::parse(r#"[data-test-id="snippet-published"] strong"#).unwrap();
    let imported_by_sel = Selector::parse(r#"a[href*="tab=importedby"] strong"#).unwrap();
    let license_link_sel = Selector::parse(r#"[data-test-id="snippet-license"] a"#).unwrap();
    let license_sel = Selector::parse(r#"[data-test-id="snippet-license"]"#).unwrap();

    let mut result = SearchResult {
        package: snippet
            .select(&title_sel)
            .next()
            .map(element_text)
            .unwrap_or_default(),
        synopsis: snippet
            .select(&synopsis_sel)
            .next()
            .map(element_text)
            .unwrap_or_default(),
        ..Default::default()
    };

    let Some(info) = snippet.select(&info_sel).next() else {
        return result;
    };

    // The version sits in the info label's own spans, ahead of the
    // "published on" separator.
    let version_text: String = info
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "span")
        .flat_map(|child| child.text())
        .collect();
    result.version = version_text
        .split(" published on ")
        .next()
        .unwrap_or("")
        .trim()
        .to_string();

    if let Some(el) = info.select(&published_sel).next() {
        let raw = element_text(el);
        match date::normalize(&raw) {
            Ok(normalized) => result.published = normalized,
            Err(e) => {
                errs.push(
                    anyhow::Error::new(e)
                        .context(format!("parsing published date '{}'", raw)),
                );
                result.published = raw;
            }
        }
    }

    if let Some(el) = info.select(&imported_by_sel).next() {
        result.imported_by = element_text(el).replace(',', "").parse().unwrap_or(0);
    }

    result.license = info
        .select(&license_link_sel)
        .next()
        .map(element_text)
        .unwrap_or_default();
    if result.license.is_empty() {
        result.license = info
            .select(&license_sel)
            .next()
            .map(element_text)
            .unwrap_or_default();
    }

    result
}

/// Pulls the three counts out of the header text. Token order on the page
/// is lower bound, upper bound, grand total; numbers may carry thousands
/// separators.
fn parse_page_range(text: &str) -> Option<PageRange> {
    let numbers: Vec<usize> = text
        .split_whitespace()
        .filter_map(|token| token.replace(',', "").parse().ok())
        .collect();
    match numbers[..] {
        [lower, upper, total, ..] => Some(PageRange {
            lower,
            upper,
            total,
        }),
        _ => None,
    }
}
