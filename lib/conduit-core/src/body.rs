//! Body serialization utilities.

use bytes::Bytes;

use crate::{DecodeCategory, DecodeError, Error, Result};

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Form URL-encoded content type (`application/x-www-form-urlencoded`).
    FormUrlEncoded,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialize a value to JSON bytes.
///
/// # Example
///
/// ```
/// use conduit_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Login { user: String }
///
/// let bytes = to_json(&Login { user: "alice".to_string() }).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"user":"alice"}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(|e| Error::message(format!("JSON serialization error: {e}")))
}

/// Serialize a value to form URL-encoded bytes.
///
/// `Vec<T>` fields become repeated keys (`tags=a&tags=b`).
pub fn to_form<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_html_form::to_string(value)
        .map(|s| Bytes::from(s.into_bytes()))
        .map_err(|e| Error::message(format!("form serialization error: {e}")))
}

/// Deserialize JSON bytes with path-aware error messages.
///
/// Structured failures become [`Error::Decode`]; I/O failures reported by the
/// deserializer are not decode failures and become [`Error::Transport`].
///
/// # Example
///
/// ```
/// use conduit_core::from_json;
///
/// #[derive(Debug, PartialEq, serde::Deserialize)]
/// struct Item { id: u64 }
///
/// let item: Item = from_json(br#"{"id":1}"#).expect("deserialize");
/// assert_eq!(item, Item { id: 1 });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    crate::decode::decode_json(bytes).map_err(Error::from)
}

/// Pretty-print a body when it holds JSON, for logging.
#[must_use]
pub fn pretty_json(bytes: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(bytes).ok()?;
    serde_json::to_string_pretty(&value).ok()
}

/// Build a [`DecodeError`] from a path-tracked `serde_json` failure.
pub(crate) fn decode_error(error: &serde_path_to_error::Error<serde_json::Error>) -> DecodeError {
    use serde_json::error::Category;

    let inner = error.inner();
    let category = match inner.classify() {
        Category::Syntax | Category::Io => DecodeCategory::Syntax,
        Category::Data => DecodeCategory::Data,
        Category::Eof => DecodeCategory::Eof,
    };
    DecodeError::new(category, error.path().to_string(), inner.to_string())
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[test]
    fn content_type_as_str() {
        check!(ContentType::Json.as_str() == "application/json");
        check!(ContentType::FormUrlEncoded.as_str() == "application/x-www-form-urlencoded");
        check!(ContentType::Json.to_string() == "application/json");
    }

    #[test]
    fn to_form_with_vec() {
        #[derive(serde::Serialize)]
        struct Filter {
            name: String,
            tags: Vec<String>,
        }

        let filter = Filter {
            name: "test".to_string(),
            tags: vec!["rust".to_string(), "http".to_string()],
        };

        let bytes = to_form(&filter).expect("serialize");
        check!(bytes.as_ref() == b"name=test&tags=rust&tags=http");
    }

    #[test]
    fn from_json_missing_field_has_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Address {
            #[allow(dead_code)]
            city: String,
        }

        #[derive(Debug, serde::Deserialize)]
        struct User {
            #[allow(dead_code)]
            address: Address,
        }

        let result: Result<User> = from_json(br#"{"address":{}}"#);
        let_assert!(Err(Error::Decode(error)) = result);
        check!(error.category() == DecodeCategory::Data);
        check!(error.path().contains("address"));
        check!(error.message().contains("city"));
    }

    #[test]
    fn from_json_type_mismatch_has_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Item {
            #[allow(dead_code)]
            id: u64,
        }

        let result: Result<Vec<Item>> = from_json(br#"[{"id":1},{"id":"two"}]"#);
        let_assert!(Err(Error::Decode(error)) = result);
        check!(error.category() == DecodeCategory::Data);
        check!(error.path() == "[1].id");
    }

    #[test]
    fn from_json_syntax_and_eof() {
        let result: Result<serde_json::Value> = from_json(b"not json");
        let_assert!(Err(Error::Decode(error)) = result);
        check!(error.category() == DecodeCategory::Syntax);

        let result: Result<serde_json::Value> = from_json(br#"{"id":"#);
        let_assert!(Err(Error::Decode(error)) = result);
        check!(error.category() == DecodeCategory::Eof);
    }

    #[test]
    fn pretty_json_only_for_json() {
        check!(pretty_json(br#"{"a":1}"#) == Some("{\n  \"a\": 1\n}".to_string()));
        check!(pretty_json(b"plain text").is_none());
        check!(pretty_json(b"").is_none());
    }
}
