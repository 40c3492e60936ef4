//! CORS header set shared by every serverless function response.
//!
//! Browsers compare these values byte-for-byte, so they are constants.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;

pub const ALLOW_ORIGIN_HEADER: &str = "access-control-allow-origin";
pub const ALLOW_HEADERS_HEADER: &str = "access-control-allow-headers";

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

pub fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    apply_cors(&mut headers);
    headers
}

/// Insert the CORS pair, replacing any existing values.
pub fn apply_cors(headers: &mut HeaderMap) {
    headers.insert(ALLOW_ORIGIN_HEADER, HeaderValue::from_static(ALLOW_ORIGIN));
    headers.insert(ALLOW_HEADERS_HEADER, HeaderValue::from_static(ALLOW_HEADERS));
}

pub fn is_preflight(method: &Method) -> bool {
    method == Method::OPTIONS
}

/// Headers for the empty `OPTIONS` reply
pub fn preflight_headers() -> HeaderMap {
    cors_headers()
}

/// Headers for a JSON reply
pub fn json_response_headers() -> HeaderMap {
    let mut headers = cors_headers();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}
