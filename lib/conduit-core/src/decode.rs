//! Typed decoding of response bodies.
//!
//! A [`Decoder`] turns raw bytes into `T`. The pipeline only cares about one
//! distinction: a structured [`DecodeError`] (the bytes don't fit `T`) versus
//! anything else that went wrong while decoding.

use derive_more::{Display, Error, From};
use serde::de::DeserializeOwned;

use crate::{BoxError, DecodeError, Error, TransportError};

/// Why a [`Decoder`] could not produce a value.
#[derive(Debug, Display, Error, From)]
pub enum DecodeFailure {
    /// The bytes do not describe a `T`.
    #[display("{_0}")]
    #[from]
    Invalid(DecodeError),

    /// The decoder itself failed.
    #[display("{_0}")]
    Other(#[error(not(source))] BoxError),
}

impl From<DecodeFailure> for Error {
    fn from(failure: DecodeFailure) -> Self {
        match failure {
            DecodeFailure::Invalid(error) => Self::Decode(error),
            DecodeFailure::Other(error) => Self::Transport(TransportError::Other(error)),
        }
    }
}

/// Decodes response bytes into `T`.
pub trait Decoder<T>: Send + Sync {
    /// Decode the bytes.
    fn decode(&self, bytes: &[u8]) -> Result<T, DecodeFailure>;
}

impl<T, F> Decoder<T> for F
where
    F: Fn(&[u8]) -> Result<T, DecodeFailure> + Send + Sync,
{
    fn decode(&self, bytes: &[u8]) -> Result<T, DecodeFailure> {
        self(bytes)
    }
}

/// JSON decoder backed by `serde_json`, reporting the path of the failing field.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl<T: DeserializeOwned> Decoder<T> for Json {
    fn decode(&self, bytes: &[u8]) -> Result<T, DecodeFailure> {
        decode_json(bytes)
    }
}

pub(crate) fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeFailure> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|error| {
        if error.inner().is_io() {
            DecodeFailure::Other(Box::new(error.into_inner()))
        } else {
            DecodeFailure::Invalid(crate::body::decode_error(&error))
        }
    })
}
