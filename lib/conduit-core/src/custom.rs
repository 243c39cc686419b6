//! Domain error payloads and the chain that recognises them.
//!
//! Servers often answer failures with a structured body (`{"code":"E100"}`).
//! An [`ErrorChain`] holds an ordered list of [`ErrorDescriptor`]s; the first
//! descriptor able to parse the body wins.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;

/// A domain-specific error decoded from a response body.
///
/// # Example
///
/// ```
/// use conduit_core::DomainError;
///
/// #[derive(Debug, serde::Deserialize, derive_more::Display, derive_more::Error)]
/// #[display("API error {code}")]
/// struct ApiError {
///     code: String,
/// }
///
/// impl DomainError for ApiError {}
/// ```
pub trait DomainError: std::error::Error + Send + Sync + 'static {
    /// Human readable description, the `Display` output by default.
    fn localized_description(&self) -> String {
        self.to_string()
    }

    /// Structured payload, when the error wants to expose one.
    fn details(&self) -> Option<serde_json::Value> {
        None
    }
}

/// Attempts to build a [`DomainError`] from raw response bytes.
pub trait ErrorDescriptor: Send + Sync {
    /// Returns `Some` when the bytes describe this descriptor's error.
    fn try_parse(&self, body: &[u8]) -> Option<Box<dyn DomainError>>;
}

impl<F> ErrorDescriptor for F
where
    F: Fn(&[u8]) -> Option<Box<dyn DomainError>> + Send + Sync,
{
    fn try_parse(&self, body: &[u8]) -> Option<Box<dyn DomainError>> {
        self(body)
    }
}

/// Descriptor that parses the body as JSON into `E`.
pub struct JsonErrorDescriptor<E> {
    _error: PhantomData<fn() -> E>,
}

impl<E> JsonErrorDescriptor<E> {
    /// Create a JSON descriptor for `E`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _error: PhantomData,
        }
    }
}

impl<E> Default for JsonErrorDescriptor<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for JsonErrorDescriptor<E> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for JsonErrorDescriptor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("JsonErrorDescriptor")
            .field(&std::any::type_name::<E>())
            .finish()
    }
}

impl<E> ErrorDescriptor for JsonErrorDescriptor<E>
where
    E: DomainError + DeserializeOwned,
{
    fn try_parse(&self, body: &[u8]) -> Option<Box<dyn DomainError>> {
        let error: E = serde_json::from_slice(body).ok()?;
        Some(Box::new(error))
    }
}

/// Ordered list of [`ErrorDescriptor`]s, first match wins.
#[derive(Clone, Default)]
pub struct ErrorChain {
    descriptors: Vec<Arc<dyn ErrorDescriptor>>,
}

impl fmt::Debug for ErrorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorChain")
            .field("descriptors", &self.descriptors.len())
            .finish()
    }
}

impl ErrorChain {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a descriptor; it is tried after every descriptor already present.
    #[must_use]
    pub fn with(mut self, descriptor: impl ErrorDescriptor + 'static) -> Self {
        self.push(descriptor);
        self
    }

    /// Append `JsonErrorDescriptor<E>`.
    #[must_use]
    pub fn with_json<E>(self) -> Self
    where
        E: DomainError + DeserializeOwned,
    {
        self.with(JsonErrorDescriptor::<E>::new())
    }

    /// Append a descriptor in place.
    pub fn push(&mut self, descriptor: impl ErrorDescriptor + 'static) {
        self.descriptors.push(Arc::new(descriptor));
    }

    /// Number of configured descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if no descriptor is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Run the chain over a response body.
    #[must_use]
    pub fn handle(&self, body: &[u8]) -> Option<Box<dyn DomainError>> {
        self.descriptors
            .iter()
            .find_map(|descriptor| descriptor.try_parse(body))
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use derive_more::{Display, Error};
    use serde::Deserialize;

    use super::*;
    use crate::Error as ConduitError;

    #[derive(Debug, Deserialize, Display, Error)]
    #[display("API error {code}")]
    struct ApiError {
        #[error(not(source))]
        code: String,
    }

    impl DomainError for ApiError {
        fn details(&self) -> Option<serde_json::Value> {
            Some(serde_json::json!({ "code": self.code }))
        }
    }

    #[derive(Debug, Deserialize, Display, Error)]
    #[display("legacy error {code}")]
    struct LegacyError {
        #[error(not(source))]
        code: String,
    }

    impl DomainError for LegacyError {}

    fn custom(error: Box<dyn DomainError>) -> ConduitError {
        ConduitError::Custom(error)
    }

    #[test]
    fn empty_chain_yields_nothing() {
        let chain = ErrorChain::new();
        check!(chain.is_empty());
        check!(chain.handle(br#"{"code":"E100"}"#).is_none());
    }

    #[test]
    fn json_descriptor_parses_matching_body() {
        let chain = ErrorChain::new().with_json::<ApiError>();
        let_assert!(Some(error) = chain.handle(br#"{"code":"E100"}"#));
        check!(error.localized_description() == "API error E100");
        check!(error.details() == Some(serde_json::json!({ "code": "E100" })));
    }

    #[test]
    fn non_matching_body_yields_nothing() {
        let chain = ErrorChain::new().with_json::<ApiError>();
        check!(chain.handle(b"<html>oops</html>").is_none());
        check!(chain.handle(br#"{"message":"no code"}"#).is_none());
    }

    #[test]
    fn first_matching_descriptor_wins() {
        let body = br#"{"code":"E100"}"#;

        let chain = ErrorChain::new()
            .with_json::<LegacyError>()
            .with_json::<ApiError>();
        let_assert!(Some(error) = chain.handle(body));
        check!(custom(error).domain_error::<LegacyError>().is_some());

        let chain = ErrorChain::new()
            .with_json::<ApiError>()
            .with_json::<LegacyError>();
        let_assert!(Some(error) = chain.handle(body));
        check!(custom(error).domain_error::<ApiError>().is_some());
    }

    #[test]
    fn closure_descriptor_is_skipped_when_it_declines() {
        let chain = ErrorChain::new()
            .with(|_: &[u8]| -> Option<Box<dyn DomainError>> { None })
            .with_json::<ApiError>();
        check!(chain.len() == 2);
        let_assert!(Some(error) = chain.handle(br#"{"code":"E7"}"#));
        check!(error.to_string() == "API error E7");
    }
}
