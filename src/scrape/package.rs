//! Field extraction for a package page.

use anyhow::anyhow;
use log::debug;
use scraper::{ElementRef, Html, Selector};

use super::{date, element_text, first_child_text};
use crate::error::ErrorList;
use crate::model::{Image, Package};

/// Reads a package record out of a fetched package page.
///
/// Extraction rules are independent: a missing anchor leaves its field at
/// the zero value. Failures that indicate a real problem with the page (an
/// unreadable publication date, a page that is neither package nor module)
/// are accumulated in the returned list instead of aborting the walk, so
/// the caller sees every problem at once.
pub fn parse_package_page(doc: &Html, package: &str, base_url: &str) -> (Package, ErrorList) {
    let mut p = Package {
        package: package.to_string(),
        ..Default::default()
    };
    let mut errs = ErrorList::new();

    let version_sel = Selector::parse(r#"[data-test-id="UnitHeader-version"]"#).unwrap();
    if let Some(el) = doc.select(&version_sel).next() {
        if let Some(text) = first_child_text(el) {
            p.version = text
                .strip_prefix("Version: ")
                .unwrap_or(&text)
                .trim()
                .to_string();
        }
    }

    let licenses_sel = Selector::parse(r#"[data-test-id="UnitHeader-licenses"]"#).unwrap();
    if let Some(el) = doc.select(&licenses_sel).next() {
        if let Some(text) = first_child_text(el) {
            p.license = text.trim().to_string();
        }
    }

    extract_meta_badges(doc, &mut p);

    let repo_sel = Selector::parse(".UnitMeta-repo").unwrap();
    if let Some(el) = doc.select(&repo_sel).next() {
        if let Some(text) = first_child_text(el) {
            p.repository = text.trim().to_string();
        }
    }

    let commit_time_sel = Selector::parse(r#"[data-test-id="UnitHeader-commitTime"]"#).unwrap();
    if let Some(el) = doc.select(&commit_time_sel).next() {
        let text = element_text(el);
        let date_str = text.strip_prefix("Published: ").unwrap_or(&text);
        match date::normalize(date_str) {
            Ok(date) => p.published = date,
            Err(e) => errs.push(e.into()),
        }
    }

    extract_kind(doc, &mut p, &mut errs);
    extract_readme_images(doc, &mut p, base_url);

    (p, errs)
}

/// Reads the four quality badges from the checklist items, strictly by
/// position. Fewer than four items leaves the trailing badges false.
fn extract_meta_badges(doc: &Html, p: &mut Package) {
    let meta_sel = Selector::parse(".UnitMeta").unwrap();
    let Some(meta) = doc.select(&meta_sel).next() else {
        return;
    };

    let item_sel = Selector::parse("li").unwrap();
    let checked_sel = Selector::parse(r#"img[alt="checked"]"#).unwrap();
    for (i, item) in meta.select(&item_sel).enumerate() {
        let checked = item.select(&checked_sel).next().is_some();
        match i {
            0 => p.has_valid_go_mod_file = checked,
            1 => p.has_redistributable_license = checked,
            2 => p.has_tagged_version = checked,
            3 => p.has_stable_version = checked,
            _ => {}
        }
    }
}

/// Classifies the page as package, module, or both by scanning the label
/// elements following the title heading. "command" is recognized but not
/// discriminating; the first unrecognized label ends the scan. A page that
/// sets neither flag is reported as a probable parsing bug, not an abort.
fn extract_kind(doc: &Html, p: &mut Package, errs: &mut ErrorList) {
    let heading_sel = Selector::parse(".UnitHeader-titleHeading").unwrap();
    let Some(heading) = doc.select(&heading_sel).next() else {
        return;
    };

    for sibling in heading.next_siblings().filter_map(ElementRef::wrap) {
        match element_text(sibling).as_str() {
            "command" => {}
            "package" => p.is_package = true,
            "module" => p.is_module = true,
            other => {
                debug!("ending label scan at '{}'", other);
                break;
            }
        }
    }

    if !p.is_package && !p.is_module {
        errs.push(anyhow!(
            "neither package nor module label found for '{}', this probably indicates a parsing bug",
            p.package
        ));
    }
}

/// Collects readme images, rewriting relative sources to absolute URLs.
fn extract_readme_images(doc: &Html, p: &mut Package, base_url: &str) {
    let img_sel = Selector::parse(".UnitReadme-content img").unwrap();
    for img in doc.select(&img_sel) {
        let alt = img.value().attr("alt").unwrap_or_default().to_string();
        let src = img.value().attr("src").unwrap_or_default();
        p.images.push(Image {
            alt,
            url: absolute_url(base_url, src),
        });
    }
}

fn absolute_url(base_url: &str, src: &str) -> String {
    if src.starts_with("http") {
        src.to_string()
    } else if src.starts_with('/') {
        format!("{}{}", base_url, src)
    } else {
        format!("{}/{}", base_url, src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_URL: &str = "https://pkg.go.dev";

    fn parse(html: &str) -> (Package, ErrorList) {
        let doc = Html::parse_document(html);
        parse_package_page(&doc, "github.com/example/pkg", BASE_URL)
    }

    fn full_page() -> String {
        r#"<html><body>
            <h1 class="UnitHeader-titleHeading">pkg</h1>
            <span>package</span>
            <span class="UnitLabel">standard library</span>
            <div data-test-id="UnitHeader-version"><a>Version: v1.2.3</a></div>
            <div data-test-id="UnitHeader-commitTime">Published: Jan 2, 2006</div>
            <div data-test-id="UnitHeader-licenses"><a>MIT</a></div>
            <div class="UnitMeta"><ul>
                <li><img alt="checked"/> valid go.mod</li>
                <li><img alt="checked"/> redistributable</li>
                <li><img alt="unchecked"/> tagged</li>
                <li><img alt="checked"/> stable</li>
            </ul></div>
            <div class="UnitMeta-repo"><a>github.com/example/pkg</a></div>
            <div class="UnitReadme-content">
                <img alt="logo" src="/static/logo.png"/>
                <img alt="badge" src="https://cdn.example.com/badge.svg"/>
                <img alt="diagram" src="docs/diagram.png"/>
            </div>
        </body></html>"#
            .to_string()
    }

    #[test]
    fn test_full_page() {
        let (p, errs) = parse(&full_page());
        assert!(errs.is_empty(), "unexpected errors: {}", errs);
        assert_eq!(p.package, "github.com/example/pkg");
        assert!(p.is_package);
        assert!(!p.is_module);
        assert_eq!(p.version, "v1.2.3");
        assert_eq!(p.published, "2006-01-02");
        assert_eq!(p.license, "MIT");
        assert_eq!(p.repository, "github.com/example/pkg");
        assert!(p.has_valid_go_mod_file);
        assert!(p.has_redistributable_license);
        assert!(!p.has_tagged_version);
        assert!(p.has_stable_version);
    }

    #[test]
    fn test_images_are_absolutized() {
        let (p, _) = parse(&full_page());
        assert_eq!(
            p.images,
            vec![
                Image {
                    alt: "logo".to_string(),
                    url: "https://pkg.go.dev/static/logo.png".to_string(),
                },
                Image {
                    alt: "badge".to_string(),
                    url: "https://cdn.example.com/badge.svg".to_string(),
                },
                Image {
                    alt: "diagram".to_string(),
                    url: "https://pkg.go.dev/docs/diagram.png".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_missing_anchors_leave_zero_values() {
        let (p, errs) = parse("<html><body></body></html>");
        assert!(errs.is_empty());
        assert_eq!(p.version, "");
        assert_eq!(p.license, "");
        assert_eq!(p.repository, "");
        assert_eq!(p.published, "");
        assert!(!p.is_package);
        assert!(!p.is_module);
        assert!(p.images.is_empty());
    }

    #[test]
    fn test_command_label_is_skipped() {
        let html = r#"<html><body>
            <h1 class="UnitHeader-titleHeading">tool</h1>
            <span>command</span>
            <span>module</span>
        </body></html>"#;
        let (p, errs) = parse(html);
        assert!(errs.is_empty());
        assert!(p.is_module);
        assert!(!p.is_package);
    }

    #[test]
    fn test_scan_stops_at_unrecognized_label() {
        let html = r#"<html><body>
            <h1 class="UnitHeader-titleHeading">pkg</h1>
            <span>package</span>
            <span>something else</span>
            <span>module</span>
        </body></html>"#;
        let (p, errs) = parse(html);
        assert!(errs.is_empty());
        assert!(p.is_package);
        assert!(!p.is_module);
    }

    #[test]
    fn test_neither_package_nor_module_is_reported() {
        let html = r#"<html><body>
            <h1 class="UnitHeader-titleHeading">pkg</h1>
            <span>mystery</span>
        </body></html>"#;
        let (p, errs) = parse(html);
        assert!(!p.is_package);
        assert!(!p.is_module);
        assert_eq!(errs.len(), 1);
        assert!(errs.errors()[0].to_string().contains("parsing bug"));
    }

    #[test]
    fn test_missing_heading_reports_nothing() {
        let html = r#"<html><body><span>package</span></body></html>"#;
        let (p, errs) = parse(html);
        assert!(errs.is_empty());
        assert!(!p.is_package);
    }

    #[test]
    fn test_bad_published_date_is_accumulated() {
        let html = r#"<html><body>
            <h1 class="UnitHeader-titleHeading">pkg</h1>
            <span>package</span>
            <div data-test-id="UnitHeader-commitTime">Published: soonish</div>
        </body></html>"#;
        let (p, errs) = parse(html);
        assert_eq!(p.published, "");
        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn test_fewer_than_four_badges() {
        let html = r#"<html><body>
            <h1 class="UnitHeader-titleHeading">pkg</h1>
            <span>package</span>
            <div class="UnitMeta"><ul>
                <li><img alt="checked"/></li>
                <li><img alt="checked"/></li>
            </ul></div>
        </body></html>"#;
        let (p, errs) = parse(html);
        assert!(errs.is_empty());
        assert!(p.has_valid_go_mod_file);
        assert!(p.has_redistributable_license);
        assert!(!p.has_tagged_version);
        assert!(!p.has_stable_version);
    }
}
