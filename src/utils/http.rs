use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONNECTION, CONTENT_TYPE, USER_AGENT};
use std::io;

/// Get standard user agent string
pub fn get_user_agent() -> &'static str {
    "ZoteroFetch"
}

/// Headers sent with every connector request.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(get_user_agent()));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

/// Build the HTTP client used for all connector calls.
pub fn build_client() -> io::Result<reqwest::Client> {
    reqwest::Client::builder()
        .default_headers(default_headers())
        .build()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::Other,
                format!("Failed to build HTTP client: {}", e),
            )
        })
}
