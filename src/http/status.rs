//! HTTP status classification for page fetches.

use anyhow::{Result, bail};
use reqwest::StatusCode;

use crate::error::NotFound;

/// Maps a response status to a fetch outcome.
///
/// A 404 becomes the [`NotFound`] sentinel so callers can recognize a
/// missing package; any other non-success status is an error carrying the
/// requested URL.
pub fn check_status(status: StatusCode, url: &str) -> Result<()> {
    if status == StatusCode::NOT_FOUND {
        return Err(NotFound.into());
    }
    if !status.is_success() {
        bail!("request to {} returned HTTP {}", url, status.as_u16());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_status_success() {
        assert!(check_status(StatusCode::OK, "http://example.com").is_ok());
    }

    #[test]
    fn test_check_status_not_found_is_sentinel() {
        let err = check_status(StatusCode::NOT_FOUND, "http://example.com/missing").unwrap_err();
        assert!(err.downcast_ref::<NotFound>().is_some());
    }

    #[test]
    fn test_check_status_server_error_carries_url() {
        let err = check_status(StatusCode::INTERNAL_SERVER_ERROR, "http://example.com/x")
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("http://example.com/x"));
        assert!(msg.contains("500"));
    }
}
