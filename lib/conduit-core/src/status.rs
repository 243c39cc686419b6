//! HTTP status classification.
//!
//! [`classify`] maps any numeric status code onto a [`StatusClass`]. The
//! mapping is total: codes that are not documented HTTP statuses land in
//! [`StatusClass::Undefined`] instead of being rejected.

use derive_more::Display;
use http::StatusCode;

/// Semantic class of an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum StatusClass {
    /// A documented 2xx status.
    #[display("{_0}")]
    Success(StatusCode),
    /// `401 Unauthorized`, surfaced to callers as-is so they can re-authenticate.
    #[display("401 Unauthorized")]
    Unauthorized,
    /// Any other documented status (1xx, 3xx, 4xx except 401, 5xx).
    #[display("{_0}")]
    Failure(StatusCode),
    /// A code with no documented meaning. The raw value is kept for diagnostics.
    #[display("{_0}")]
    Undefined(u16),
}

impl StatusClass {
    /// Synthetic class reported when the network is unreachable or the connection dropped.
    #[must_use]
    pub const fn gateway_timeout() -> Self {
        Self::Failure(StatusCode::GATEWAY_TIMEOUT)
    }

    /// Synthetic class reported when the transport produced no usable response.
    #[must_use]
    pub const fn gone() -> Self {
        Self::Failure(StatusCode::GONE)
    }

    /// Only [`StatusClass::Success`] counts as success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for [`StatusClass::Unauthorized`].
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns `true` when the code is documented.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Undefined(_))
    }

    /// Numeric status code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::Success(status) | Self::Failure(status) => status.as_u16(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.as_u16(),
            Self::Undefined(code) => *code,
        }
    }
}

impl From<u16> for StatusClass {
    fn from(code: u16) -> Self {
        classify(code)
    }
}

/// Classify a numeric status code.
///
/// A code is documented when [`StatusCode`] accepts it and knows a canonical
/// reason phrase for it.
///
/// # Example
///
/// ```
/// use conduit_core::{StatusClass, StatusCode, classify};
///
/// assert_eq!(classify(204), StatusClass::Success(StatusCode::NO_CONTENT));
/// assert_eq!(classify(401), StatusClass::Unauthorized);
/// assert_eq!(classify(503), StatusClass::Failure(StatusCode::SERVICE_UNAVAILABLE));
/// assert_eq!(classify(299), StatusClass::Undefined(299));
/// ```
#[must_use]
pub fn classify(code: u16) -> StatusClass {
    let Ok(status) = StatusCode::from_u16(code) else {
        return StatusClass::Undefined(code);
    };
    if status.canonical_reason().is_none() {
        return StatusClass::Undefined(code);
    }

    if status.is_success() {
        StatusClass::Success(status)
    } else if status == StatusCode::UNAUTHORIZED {
        StatusClass::Unauthorized
    } else {
        StatusClass::Failure(status)
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn documented_success_codes() {
        for code in [200, 201, 202, 203, 204, 205, 206, 207, 208, 226] {
            let class = classify(code);
            check!(class.is_success(), "{code} should be a success");
            check!(class.code() == code);
        }
    }

    #[test]
    fn unauthorized() {
        check!(classify(401) == StatusClass::Unauthorized);
        check!(!classify(401).is_success());
        check!(classify(401).is_unauthorized());
    }

    #[test]
    fn known_failures() {
        check!(classify(100) == StatusClass::Failure(StatusCode::CONTINUE));
        check!(classify(302) == StatusClass::Failure(StatusCode::FOUND));
        check!(classify(403) == StatusClass::Failure(StatusCode::FORBIDDEN));
        check!(classify(404) == StatusClass::Failure(StatusCode::NOT_FOUND));
        check!(classify(500) == StatusClass::Failure(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn undocumented_codes_are_undefined() {
        for code in [0, 1, 99, 209, 299, 420, 599, 600, 999, 1000, u16::MAX] {
            check!(classify(code) == StatusClass::Undefined(code));
        }
    }

    #[test]
    fn classification_is_total_and_pure() {
        for code in 0..=u16::MAX {
            let first = classify(code);
            check!(first == classify(code));
            check!(first.code() == code);
            check!(first.is_success() == (first.is_known() && (200..300).contains(&code)));
        }
    }

    #[test]
    fn synthetic_classes() {
        check!(StatusClass::gateway_timeout().code() == 504);
        check!(StatusClass::gone().code() == 410);
        check!(classify(504) == StatusClass::gateway_timeout());
    }

    #[test]
    fn display() {
        insta::assert_snapshot!(classify(200), @"200 OK");
        insta::assert_snapshot!(classify(401), @"401 Unauthorized");
        insta::assert_snapshot!(classify(299), @"299");
    }
}
