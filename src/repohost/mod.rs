//! Repository hosting sites and description lookup.
//!
//! Package pages link to a source repository but carry no description of
//! it. This module classifies the repository's hosting site, normalizes
//! the link into a fetchable web URL, and reads a short description from
//! the repository's landing page. Everything here is best effort: any
//! failure collapses to "no description".

use std::fmt;

use log::debug;
use scraper::{Html, Selector};
use url::Url;

use crate::http::HttpClient;

/// Maximum length of a repository description before it is cut off.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// A repository hosting site, identified from the repository URL's host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GitHost {
    #[default]
    Unknown,
    GitHub,
    GitLab,
    Codeberg,
    Sourcehut,
}

impl fmt::Display for GitHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitHost::Unknown => write!(f, "unknown"),
            GitHost::GitHub => write!(f, "github"),
            GitHost::GitLab => write!(f, "gitlab"),
            GitHost::Codeberg => write!(f, "codeberg"),
            GitHost::Sourcehut => write!(f, "sourcehut"),
        }
    }
}

impl GitHost {
    /// Classifies a repository URL by its host name.
    pub fn identify(repo_url: &str) -> GitHost {
        let Ok(parsed) = Url::parse(repo_url) else {
            return GitHost::Unknown;
        };
        let Some(host) = parsed.host_str() else {
            return GitHost::Unknown;
        };

        if host.contains("github.com") {
            GitHost::GitHub
        } else if host.contains("gitlab.com") {
            GitHost::GitLab
        } else if host.contains("codeberg.org") {
            GitHost::Codeberg
        } else if host.contains("git.sr.ht") {
            GitHost::Sourcehut
        } else {
            GitHost::Unknown
        }
    }
}

/// Converts the repository URL forms seen on package pages into a
/// web-accessible https URL: `git@host:path.git` becomes
/// `https://host/path`, a `.git` suffix is dropped, and scheme-less hosts
/// get an `https://` prefix.
pub fn normalize_repo_url(repo_url: &str) -> String {
    if let Some(rest) = repo_url.strip_prefix("git@") {
        if let Some((host, path)) = rest.split_once(':') {
            if let Some(path) = path.strip_suffix(".git") {
                return format!("https://{}/{}", host, path);
            }
        }
    }

    let trimmed = repo_url.strip_suffix(".git").unwrap_or(repo_url);
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Fetches the repository landing page and extracts a short description.
/// Returns None for unrecognized hosts and on any fetch failure.
#[tracing::instrument(skip(http))]
pub async fn fetch_description(http: &HttpClient, repo_url: &str) -> Option<String> {
    if repo_url.is_empty() {
        return None;
    }

    let normalized = normalize_repo_url(repo_url);
    let host = GitHost::identify(&normalized);
    if host == GitHost::Unknown {
        debug!("no description rule for host of {}", normalized);
        return None;
    }

    let body = match http.get_html(&normalized).await {
        Ok(body) => body,
        Err(e) => {
            debug!("fetching {}: {}", normalized, e);
            return None;
        }
    };

    let doc = Html::parse_document(&body);
    extract_description(host, &doc)
}

/// Applies the hosting site's single extraction rule to its landing page.
pub(crate) fn extract_description(host: GitHost, doc: &Html) -> Option<String> {
    match host {
        GitHost::GitHub => github_description(doc),
        GitHost::GitLab => gitlab_description(doc),
        GitHost::Codeberg => codeberg_description(doc),
        GitHost::Sourcehut => sourcehut_description(doc),
        GitHost::Unknown => None,
    }
}

/// First non-empty about text. Candidates that carry a URL are skipped
/// since the about block shares its styling with the homepage link.
fn github_description(doc: &Html) -> Option<String> {
    let sel = Selector::parse(r#"p[class*="f4"]"#).unwrap();
    doc.select(&sel)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .find(|text| !text.is_empty() && !text.contains("http"))
}

fn gitlab_description(doc: &Html) -> Option<String> {
    let sel = Selector::parse(".home-panel-description-markdown p").unwrap();
    doc.select(&sel)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .find(|text| !text.is_empty())
}

fn codeberg_description(doc: &Html) -> Option<String> {
    let sel = Selector::parse(".repo-description .description").unwrap();
    doc.select(&sel)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .find(|text| !text.is_empty())
}

/// Sourcehut has no dedicated description field; the first readme
/// paragraph of plausible length stands in for one.
fn sourcehut_description(doc: &Html) -> Option<String> {
    let sel = Selector::parse(".blob-content p").unwrap();
    doc.select(&sel)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .find(|text| text.len() > 10 && text.len() < 200)
}

/// Cuts an overlong description down to [`MAX_DESCRIPTION_LEN`]
/// characters, marking the cut.
pub(crate) fn clip_description(description: &str) -> String {
    let description = description.trim();
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        let clipped: String = description.chars().take(MAX_DESCRIPTION_LEN).collect();
        format!("{}...", clipped)
    } else {
        description.to_string()
    }
}
