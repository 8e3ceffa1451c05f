//! The request as seen by a check.
//!
//! The [`RequestContext`] bundles everything a check needs from one request:
//! the method, the URI with its query string, the headers, the buffered body
//! and the path parameters the router already extracted.

use crate::FieldLookup;
use bytes::Bytes;
use http::{HeaderMap, Method, Uri};

/// A buffered request plus the path parameters its router matched.
///
/// # Example
///
/// ```rust
/// use httpcheck_extract::RequestContext;
/// use http::{HeaderMap, Method, Uri};
/// use bytes::Bytes;
///
/// let ctx = RequestContext::new(
///     Method::GET,
///     Uri::from_static("/users/123?verbose=true"),
///     HeaderMap::new(),
///     Bytes::new(),
///     [("id", "123")],
/// );
///
/// assert_eq!(ctx.method(), &Method::GET);
/// assert_eq!(ctx.query_string(), Some("verbose=true"));
/// assert_eq!(ctx.path_params().get_or_empty("ID"), "123");
/// ```
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    path_params: FieldLookup<String>,
}

impl RequestContext {
    /// Creates a new request context.
    ///
    /// `path_params` accepts any `(name, value)` pairs, such as a
    /// `HashMap<String, String>` produced by a router.
    #[must_use]
    pub fn new<I, K, V>(
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
        path_params: I,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            method,
            uri,
            headers,
            body,
            path_params: path_params
                .into_iter()
                .map(|(k, v)| (k, v.into()))
                .collect(),
        }
    }

    /// Creates a context from an `http::Request` whose body is already
    /// buffered.
    ///
    /// # Example
    ///
    /// ```rust
    /// use httpcheck_extract::RequestContext;
    /// use std::collections::HashMap;
    ///
    /// let request = http::Request::post("/users")
    ///     .header("content-type", "application/json")
    ///     .body(r#"{"sku": "A-1"}"#)
    ///     .unwrap();
    ///
    /// let ctx = RequestContext::from_http(request, HashMap::<String, String>::new());
    /// assert_eq!(ctx.content_type(), Some("application/json"));
    /// assert!(!ctx.is_body_empty());
    /// ```
    #[must_use]
    pub fn from_http<B, I, K, V>(request: http::Request<B>, path_params: I) -> Self
    where
        B: Into<Bytes>,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let (parts, body) = request.into_parts();
        Self::new(parts.method, parts.uri, parts.headers, body.into(), path_params)
    }

    /// Request method; decides whether the payload is checked.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Full request target.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// URI path, without the query.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Text after `?`, if any.
    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.uri.query()
    }

    /// All request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Buffered body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Path parameters, keyed case-insensitively.
    #[must_use]
    pub fn path_params(&self) -> &FieldLookup<String> {
        &self.path_params
    }

    /// A header value, if present and visible ASCII.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Raw `Content-Type`, parameters included.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// `true` if no body bytes were received.
    #[must_use]
    pub fn is_body_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Builder for constructing a [`RequestContext`].
///
/// Method defaults to `GET` and URI to `/`.
#[derive(Debug, Default)]
pub struct RequestContextBuilder {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    path_params: FieldLookup<String>,
}

impl RequestContextBuilder {
    /// Starts a `GET /` request with no headers or body.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the URI.
    #[must_use]
    pub fn uri(mut self, uri: Uri) -> Self {
        self.uri = uri;
        self
    }

    /// Adds a single header. Invalid values are ignored.
    #[must_use]
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = value.parse() {
            self.headers.insert(name, value);
        }
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds a path parameter as the router would have matched it.
    #[must_use]
    pub fn path_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.path_params.insert(name, value.into());
        self
    }

    /// Builds the request context.
    #[must_use]
    pub fn build(self) -> RequestContext {
        RequestContext {
            method: self.method,
            uri: self.uri,
            headers: self.headers,
            body: self.body,
            path_params: self.path_params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_new_with_router_params() {
        let params: HashMap<String, String> =
            [("orderId".to_string(), "42".to_string())].into_iter().collect();

        let ctx = RequestContext::new(
            Method::GET,
            Uri::from_static("/orders/42?expand=lines"),
            HeaderMap::new(),
            Bytes::from_static(b""),
            params,
        );

        assert_eq!(ctx.method(), &Method::GET);
        assert_eq!(ctx.path(), "/orders/42");
        assert_eq!(ctx.query_string(), Some("expand=lines"));
        assert_eq!(ctx.path_params().get_or_empty("ORDERID"), "42");
    }

    #[test]
    fn test_builder_sets_every_part() {
        let ctx = RequestContextBuilder::new()
            .method(Method::POST)
            .uri(Uri::from_static("/v2/orders"))
            .header("content-type", "application/json")
            .body(r#"{"sku": "A-1"}"#)
            .path_param("Tenant", "acme")
            .build();

        assert_eq!(ctx.method(), &Method::POST);
        assert_eq!(ctx.path(), "/v2/orders");
        assert_eq!(ctx.content_type(), Some("application/json"));
        assert!(!ctx.is_body_empty());
        assert_eq!(ctx.path_params().get_or_empty("tenant"), "acme");
    }

    #[test]
    fn test_builder_defaults() {
        let ctx = RequestContextBuilder::new().build();

        assert_eq!(ctx.method(), &Method::GET);
        assert_eq!(ctx.path(), "/");
        assert_eq!(ctx.query_string(), None);
        assert!(ctx.is_body_empty());
        assert!(ctx.path_params().is_empty());
    }

    #[test]
    fn test_from_http() {
        let request = http::Request::builder()
            .method(Method::PUT)
            .uri("/items/7?dry_run=1")
            .header("content-type", "application/json; charset=utf-8")
            .body(Bytes::from_static(b"{}"))
            .unwrap();

        let ctx = RequestContext::from_http(request, [("id", "7")]);

        assert_eq!(ctx.method(), &Method::PUT);
        assert_eq!(ctx.query_string(), Some("dry_run=1"));
        assert_eq!(ctx.content_type(), Some("application/json; charset=utf-8"));
        assert_eq!(ctx.body().as_ref(), b"{}");
        assert_eq!(ctx.path_params().get_or_empty("id"), "7");
    }

    #[test]
    fn test_header_access() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "text/plain".parse().unwrap());
        headers.insert("x-tenant", "acme".parse().unwrap());

        let ctx = RequestContext::new(
            Method::GET,
            Uri::from_static("/"),
            headers,
            Bytes::new(),
            Vec::<(String, String)>::new(),
        );

        assert_eq!(ctx.content_type(), Some("text/plain"));
        assert_eq!(ctx.header("X-Tenant"), Some("acme"));
        assert_eq!(ctx.header("missing"), None);
    }
}
