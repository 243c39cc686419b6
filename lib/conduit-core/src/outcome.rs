//! Result of one pipeline invocation.

use crate::{Error, Result};

/// Either the typed value or the single error that prevented it.
///
/// Pipeline layers return `Outcome`; [`Outcome::into_result`] collapses it into
/// a [`Result`] for `?`-friendly call sites.
#[derive(Debug)]
#[must_use]
pub enum Outcome<T> {
    /// The call produced a value.
    Success(T),
    /// The call failed.
    Fail(Error),
}

impl<T> Outcome<T> {
    /// Returns `true` for [`Outcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for [`Outcome::Fail`].
    #[must_use]
    pub const fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }

    /// The value, if any.
    #[must_use]
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Fail(_) => None,
        }
    }

    /// The error, if any.
    #[must_use]
    pub fn fail(self) -> Option<Error> {
        match self {
            Self::Success(_) => None,
            Self::Fail(error) => Some(error),
        }
    }

    /// Transform the success value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Fail(error) => Outcome::Fail(error),
        }
    }

    /// Chain a fallible step on the success value.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Self::Success(value) => f(value),
            Self::Fail(error) => Outcome::Fail(error),
        }
    }

    /// Collapse into a [`Result`].
    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Fail(error) => Err(error),
        }
    }
}

impl<T> From<Result<T>> for Outcome<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Fail(error),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}
