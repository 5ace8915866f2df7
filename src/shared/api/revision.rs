// src/shared/api/revision.rs
//
// Document revisions travel as strong ETags (`"42"`). Writers opt into the
// optimistic check by echoing the value back in `If-Match`.
use actix_web::{
    http::header::{HeaderValue, ETAG, IF_MATCH},
    HttpRequest, HttpResponse,
};

use crate::shared::api::ApiResponse;

pub fn etag_value(revision: u64) -> String {
    format!("\"{revision}\"")
}

/// Attach the document revision to an already built response.
pub fn with_etag(mut response: HttpResponse, revision: u64) -> HttpResponse {
    if let Ok(value) = HeaderValue::from_str(&etag_value(revision)) {
        response.headers_mut().insert(ETAG, value);
    }
    response
}

/// Reads `If-Match`.
///
/// - header absent or `*` => `Ok(None)` (unconditional write)
/// - `"N"` or `W/"N"` => `Ok(Some(N))`
/// - anything else => a ready-made 400 response
pub fn expected_revision(req: &HttpRequest) -> Result<Option<u64>, HttpResponse> {
    let Some(raw) = req.headers().get(IF_MATCH) else {
        return Ok(None);
    };

    let invalid = || {
        ApiResponse::bad_request(
            "INVALID_IF_MATCH",
            "If-Match must carry the revision returned in ETag",
        )
    };

    let value = raw.to_str().map_err(|_| invalid())?.trim();
    if value == "*" {
        return Ok(None);
    }

    let value = value.strip_prefix("W/").unwrap_or(value);
    value
        .trim_matches('"')
        .parse::<u64>()
        .map(Some)
        .map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test::TestRequest};

    #[test]
    fn missing_header_means_unconditional() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(expected_revision(&req).unwrap(), None);
    }

    #[test]
    fn wildcard_means_unconditional() {
        let req = TestRequest::default()
            .insert_header((IF_MATCH, "*"))
            .to_http_request();
        assert_eq!(expected_revision(&req).unwrap(), None);
    }

    #[test]
    fn parses_strong_and_weak_tags() {
        let strong = TestRequest::default()
            .insert_header((IF_MATCH, "\"7\""))
            .to_http_request();
        assert_eq!(expected_revision(&strong).unwrap(), Some(7));

        let weak = TestRequest::default()
            .insert_header((IF_MATCH, "W/\"8\""))
            .to_http_request();
        assert_eq!(expected_revision(&weak).unwrap(), Some(8));
    }

    #[test]
    fn garbage_is_rejected() {
        let req = TestRequest::default()
            .insert_header((IF_MATCH, "\"abc\""))
            .to_http_request();
        let resp = expected_revision(&req).unwrap_err();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn etag_is_quoted() {
        let resp = with_etag(HttpResponse::Ok().finish(), 3);
        assert_eq!(resp.headers().get(ETAG).unwrap(), "\"3\"");
    }
}
