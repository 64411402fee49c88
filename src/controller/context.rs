//! Per-request context.
//!
//! Carries the buffered request, a key/value store shared between middleware
//! and the action, and the response slot the action writes into.

use std::collections::HashMap;

use axum::body::{Body, Bytes};
use axum::http::{request::Parts, HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Context key holding the request id.
pub const REQUEST_ID: &str = "request_id";

#[derive(Debug, Default)]
pub struct Context {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    values: HashMap<String, Value>,
    response: Option<Response>,
}

impl Context {
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            ..Default::default()
        }
    }

    /// Build a context from an already-buffered request.
    pub fn from_parts(parts: Parts, body: Bytes) -> Self {
        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.insert(name, value);
        }
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    // --- key/value store ---

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String value for `key`; `None` when absent or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn request_id(&self) -> &str {
        self.get_str(REQUEST_ID).unwrap_or_default()
    }

    // --- request ---

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// First value of a query-string parameter.
    pub fn query(&self, name: &str) -> Option<String> {
        let query = self.uri.query()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    /// Deserialize the request body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    // --- response ---

    /// Replace the response with anything the transport can render.
    pub fn respond(&mut self, response: impl IntoResponse) {
        self.response = Some(response.into_response());
    }

    pub fn text(&mut self, status: StatusCode, body: impl Into<String>) {
        self.respond((status, body.into()));
    }

    pub fn json_response<T: Serialize>(&mut self, status: StatusCode, value: &T) {
        match serde_json::to_vec(value) {
            Ok(bytes) => self.respond((
                status,
                [(axum::http::header::CONTENT_TYPE, "application/json")],
                bytes,
            )),
            Err(e) => {
                tracing::error!(request_id = %self.request_id(), error = %e, "Failed to encode JSON response");
                self.respond(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }

    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }

    /// The written response, or an empty `200 OK` if the action wrote nothing.
    pub fn into_response(self) -> Response {
        self.response
            .unwrap_or_else(|| Response::new(Body::empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_value_store() {
        let mut ctx = Context::new(Method::GET, Uri::from_static("/"));
        assert!(ctx.get("missing").is_none());

        ctx.set(REQUEST_ID, "abc");
        ctx.set("attempts", 3);
        assert_eq!(ctx.request_id(), "abc");
        assert_eq!(ctx.get("attempts"), Some(&Value::from(3)));
        assert_eq!(ctx.get_str("attempts"), None);

        assert!(ctx.remove("attempts").is_some());
        assert!(ctx.get("attempts").is_none());
    }

    #[test]
    fn test_query_and_body() {
        let ctx = Context::new(Method::POST, Uri::from_static("/x?name=Ada%20L&x=1"))
            .with_body(r#"{"id": 7}"#);
        assert_eq!(ctx.query("name").as_deref(), Some("Ada L"));
        assert_eq!(ctx.query("nope"), None);

        let v: Value = ctx.json().unwrap();
        assert_eq!(v["id"], 7);
    }

    #[test]
    fn test_default_response_is_empty_ok() {
        let ctx = Context::new(Method::GET, Uri::from_static("/"));
        assert!(!ctx.has_response());
        assert_eq!(ctx.into_response().status(), StatusCode::OK);
    }

    #[test]
    fn test_text_response() {
        let mut ctx = Context::new(Method::GET, Uri::from_static("/"));
        ctx.text(StatusCode::CREATED, "made");
        assert!(ctx.has_response());
        assert_eq!(ctx.into_response().status(), StatusCode::CREATED);
    }
}
