//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{HeaderMap, header::CONTENT_TYPE},
    middleware::Next,
    response::Response,
};

/// Bodies longer than this many bytes are truncated in the `info` logs.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated and
/// the full body is logged at the `debug` level. Binary bodies, such as
/// spreadsheets, are passed through untouched and only their size is logged.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = read_body(body, "request").await;
    log_request(&parts, &LoggedBody::new(&parts.headers, &body_bytes));

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = read_body(body, "response").await;
    log_response(&parts, &LoggedBody::new(&parts.headers, &body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

async fn read_body(body: Body, direction: &str) -> Bytes {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_else(|error| {
            tracing::error!("could not read {direction} body: {error}");
            Bytes::new()
        })
}

/// The part of a body that is written to the logs.
#[derive(Debug, PartialEq)]
enum LoggedBody {
    Text(String),
    /// The size in bytes of a body that is not text.
    Binary(usize),
}

impl LoggedBody {
    fn new(headers: &HeaderMap, body: &[u8]) -> Self {
        if is_text(headers) {
            LoggedBody::Text(String::from_utf8_lossy(body).to_string())
        } else {
            LoggedBody::Binary(body.len())
        }
    }
}

/// Whether the content type of a body is text that is worth logging.
///
/// Bodies without a content type, e.g. most GET requests, count as text.
fn is_text(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return true;
    };

    content_type.starts_with("text/")
        || ["x-www-form-urlencoded", "json", "javascript", "xml"]
            .iter()
            .any(|kind| content_type.contains(kind))
}

/// The first `limit` bytes of `text`, moved back to the nearest character
/// boundary, or `None` if `text` is not longer than `limit`.
fn truncate(text: &str, limit: usize) -> Option<&str> {
    if text.len() <= limit {
        return None;
    }

    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    Some(&text[..end])
}

fn log_request(headers: &axum::http::request::Parts, body: &LoggedBody) {
    match body {
        LoggedBody::Binary(size) => {
            tracing::info!("Received request: {headers:#?}\nbody: <{size} bytes of binary data>")
        }
        LoggedBody::Text(body) => match truncate(body, LOG_BODY_LENGTH_LIMIT) {
            Some(truncated) => {
                tracing::info!("Received request: {headers:#?}\nbody: {truncated:}...");
                tracing::debug!("Full request body: {body:?}");
            }
            None => tracing::info!("Received request: {headers:#?}\nbody: {body:?}"),
        },
    }
}

fn log_response(headers: &axum::http::response::Parts, body: &LoggedBody) {
    match body {
        LoggedBody::Binary(size) => {
            tracing::info!("Sending response: {headers:#?}\nbody: <{size} bytes of binary data>")
        }
        LoggedBody::Text(body) => match truncate(body, LOG_BODY_LENGTH_LIMIT) {
            Some(truncated) => {
                tracing::info!("Sending response: {headers:#?}\nbody: {truncated:}...");
                tracing::debug!("Full response body: {body:?}");
            }
            None => tracing::info!("Sending response: {headers:#?}\nbody: {body:?}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        http::{HeaderMap, HeaderValue, header::CONTENT_TYPE},
        middleware,
        routing::{get, post},
    };
    use axum_test::TestServer;

    use super::{LoggedBody, is_text, logging_middleware, truncate};

    fn headers_with_content_type(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn short_text_is_not_truncated() {
        assert_eq!(truncate("item_name=Pan", 64), None);
    }

    #[test]
    fn truncates_at_character_boundary() {
        // "ñ" is two bytes, so byte 4 is in the middle of it.
        assert_eq!(truncate("abcñdef", 4), Some("abc"));
        assert_eq!(truncate("abcdef", 4), Some("abcd"));
    }

    #[test]
    fn detects_text_content_types() {
        assert!(is_text(&HeaderMap::new()));
        assert!(is_text(&headers_with_content_type("text/html; charset=utf-8")));
        assert!(is_text(&headers_with_content_type(
            "application/x-www-form-urlencoded"
        )));
        assert!(!is_text(&headers_with_content_type(
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        )));
    }

    #[test]
    fn binary_bodies_are_logged_by_size() {
        let headers = headers_with_content_type("application/octet-stream");

        assert_eq!(
            LoggedBody::new(&headers, &[0x50, 0x4b, 0x03, 0x04, 0xff]),
            LoggedBody::Binary(5)
        );
    }

    #[tokio::test]
    async fn passes_bodies_through_unchanged() {
        let binary: &'static [u8] = &[0x50, 0x4b, 0x03, 0x04, 0xff, 0xfe];
        let app = Router::new()
            .route(
                "/binary",
                get(move || async move {
                    ([(CONTENT_TYPE, "application/octet-stream")], binary)
                }),
            )
            .route("/echo", post(|body: String| async move { body }))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::new(app).expect("Could not create test server.");

        let response = server.get("/binary").await;
        assert_eq!(response.as_bytes().as_ref(), binary);

        let long_text = "ñ".repeat(100);
        let response = server.post("/echo").text(long_text.clone()).await;
        assert_eq!(response.text(), long_text);
    }
}
