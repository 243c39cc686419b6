//! HTTP request building.
//!
//! # Example
//!
//! ```
//! use conduit_core::{Method, Request};
//! use bytes::Bytes;
//!
//! let request = Request::<Bytes>::builder(Method::GET, "https://api.example.com/items".parse().unwrap())
//!     .header("Accept", "application/json")
//!     .query("page", "1")
//!     .build();
//! assert_eq!(request.url().query(), Some("page=1"));
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use http::Method;
use url::Url;

use crate::ContentType;

/// An HTTP request with method, URL, headers, and optional body.
#[derive(Debug, Clone)]
pub struct Request<B = Bytes> {
    method: Method,
    url: Url,
    headers: HashMap<String, String>,
    body: Option<B>,
}

impl<B> Request<B> {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: Url) -> RequestBuilder<B> {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Request URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers, keyed by lowercase name.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Append a value to a header, joining with `separator` when the header
    /// already has a value.
    pub fn append_header(&mut self, name: &str, value: &str, separator: &str) {
        let current = self.headers.entry(name.to_ascii_lowercase()).or_default();
        if !current.is_empty() {
            current.push_str(separator);
        }
        current.push_str(value);
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, Url, HashMap<String, String>, Option<B>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder<B = Bytes> {
    method: Method,
    url: Url,
    headers: HashMap<String, String>,
    body: Option<B>,
}

impl<B> RequestBuilder<B> {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Sets a header, replacing any value under the same name in any casing.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Appends a query parameter to the URL.
    #[must_use]
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(name, value);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request<B> {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl RequestBuilder<Bytes> {
    /// Set a JSON body.
    pub fn json<T: serde::Serialize>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self
            .header("Content-Type", ContentType::Json.as_str())
            .body(body))
    }

    /// Set a form-urlencoded body.
    pub fn form<T: serde::Serialize>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_form(value)?;
        Ok(self
            .header("Content-Type", ContentType::FormUrlEncoded.as_str())
            .body(body))
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    fn url(path: &str) -> Url {
        Url::parse("https://api.example.com")
            .and_then(|base| base.join(path))
            .expect("valid URL")
    }

    #[test]
    fn request_builder_basic() {
        let request = Request::<Bytes>::builder(Method::GET, url("/users"))
            .header("Accept", "application/json")
            .build();

        check!(request.method() == Method::GET);
        check!(request.url().as_str() == "https://api.example.com/users");
        check!(request.header("accept") == Some("application/json"));
        check!(request.body().is_none());
    }

    #[test]
    fn request_builder_json() {
        #[derive(serde::Serialize)]
        struct Login {
            password: String,
        }

        let request = Request::builder(Method::POST, url("/login"))
            .json(&Login {
                password: "secret".to_string(),
            })
            .expect("json")
            .build();

        check!(request.header("Content-Type") == Some("application/json"));
        check!(request.body().map(Bytes::as_ref) == Some(br#"{"password":"secret"}"#.as_slice()));
    }

    #[test]
    fn header_names_differing_in_case_are_one_header() {
        let mut request = Request::<Bytes>::builder(Method::GET, url("/"))
            .header("Cookie", "a=1")
            .header("cookie", "b=2")
            .build();
        check!(request.headers().len() == 1);
        check!(request.header("Cookie") == Some("b=2"));

        request.append_header("COOKIE", "c=3", "; ");
        check!(request.headers().len() == 1);
        check!(request.headers().get("cookie").map(String::as_str) == Some("b=2; c=3"));
    }

    #[test]
    fn append_header_merges_case_insensitively() {
        let mut request = Request::<Bytes>::builder(Method::GET, url("/"))
            .header("Cookie", "a=1")
            .build();

        request.append_header("cookie", "b=2", "; ");
        check!(request.header("COOKIE") == Some("a=1; b=2"));
        check!(request.headers().len() == 1);

        request.append_header("X-Trace", "t1", ", ");
        check!(request.header("x-trace") == Some("t1"));
    }
}
