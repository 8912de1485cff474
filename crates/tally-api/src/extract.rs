//! Client identification and the rate-limiter gate.

use axum::http::HeaderMap;
use chrono::Utc;

use tally_core::{Admission, CoreError, UNKNOWN_CLIENT};

use crate::error::ApiResult;
use crate::AppState;

/// Derives the limiter bucket key from the forwarded-address header.
///
/// Requests without the header all land in the shared "unknown" bucket.
pub fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_owned())
}

/// Runs the limiter before any handler work; a rejection short-circuits the
/// request with no store access.
pub fn rate_gate(state: &AppState, headers: &HeaderMap) -> ApiResult<()> {
    let key = client_key(headers);
    match state.limiter.admit(&key, Utc::now()) {
        Admission::Allowed => Ok(()),
        Admission::Limited { retry_after_secs } => {
            Err(CoreError::RateLimited { retry_after_secs }.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn uses_forwarded_header_when_present() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.9"));
        assert_eq!(client_key(&headers), "203.0.113.9");
    }

    #[test]
    fn missing_or_blank_header_falls_back_to_unknown() {
        assert_eq!(client_key(&HeaderMap::new()), UNKNOWN_CLIENT);

        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("   "));
        assert_eq!(client_key(&headers), UNKNOWN_CLIENT);
    }

    #[test]
    fn forwarded_list_is_used_verbatim() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 198.51.100.2"),
        );
        assert_eq!(client_key(&headers), "203.0.113.9, 198.51.100.2");
    }
}
