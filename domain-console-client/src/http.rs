//! Shared HTTP request plumbing.
//!
//! One place for sending requests, logging, status classification, and
//! response parsing, so the per-endpoint methods stay declarative. No retry
//! logic lives here: retry policy belongs to a resilience layer outside this
//! client.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ApiError;

/// Error body convention of the backend: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

const MAX_LOGGED_BODY: usize = 2048;

fn truncate_for_log(body: &str) -> &str {
    if body.len() <= MAX_LOGGED_BODY {
        return body;
    }
    let mut end = MAX_LOGGED_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

/// Executes an HTTP request and returns the success response body.
///
/// Non-2xx responses are normalized into [`ApiError::Backend`], carrying the
/// backend's `detail` message verbatim when the error body follows the
/// `{"detail": ...}` convention.
pub(crate) async fn execute(
    request_builder: RequestBuilder,
    method: &str,
    path: &str,
) -> Result<String, ApiError> {
    log::debug!("{method} {path}");

    let response = request_builder.send().await.map_err(|e| {
        if e.is_timeout() {
            ApiError::Timeout {
                detail: e.to_string(),
            }
        } else {
            ApiError::Network {
                detail: e.to_string(),
            }
        }
    })?;

    let status = response.status();
    log::debug!("{method} {path} -> {status}");

    let body = response.text().await.map_err(|e| ApiError::Network {
        detail: format!("Failed to read response body: {e}"),
    })?;

    if !status.is_success() {
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .map(|b| b.detail);
        log::warn!(
            "{method} {path} failed (HTTP {status}): {}",
            detail.as_deref().unwrap_or(truncate_for_log(&body))
        );
        return Err(ApiError::Backend {
            status: status.as_u16(),
            detail,
        });
    }

    log::debug!("Response body: {}", truncate_for_log(&body));
    Ok(body)
}

/// Parses a JSON success body into the target type.
pub(crate) fn parse_json<T>(body: &str, path: &str) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("JSON parse failed for {path}: {e}");
        log::error!("Raw response: {}", truncate_for_log(body));
        ApiError::Parse {
            detail: e.to_string(),
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_json_valid() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo, ApiError> = parse_json(r#"{"x":42}"#, "/test");
        assert!(
            matches!(&result, Ok(Foo { x: 42 })),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn parse_json_invalid() {
        #[derive(Deserialize, Debug)]
        #[allow(dead_code)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo, ApiError> = parse_json("not json", "/test");
        assert!(
            matches!(&result, Err(ApiError::Parse { .. })),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn error_body_follows_detail_convention() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"Realm not found"}"#).unwrap();
        assert_eq!(body.detail, "Realm not found");
    }

    #[test]
    fn truncate_keeps_short_bodies_intact() {
        assert_eq!(truncate_for_log("short"), "short");
    }

    #[test]
    fn truncate_caps_long_bodies() {
        let long = "x".repeat(10_000);
        assert_eq!(truncate_for_log(&long).len(), MAX_LOGGED_BODY);
    }
}
