//! Core contracts of the conduit typed HTTP pipeline.
//!
//! This crate holds the transport-agnostic pieces:
//! - [`classify`] and [`StatusClass`] - HTTP status classification
//! - [`Error`], [`TransportError`], [`DecodeError`] - the closed error taxonomy
//! - [`Outcome`] - success value or error of one call
//! - [`ErrorChain`], [`ErrorDescriptor`], [`DomainError`] - domain error payloads
//! - [`Decoder`] and [`Json`] - typed body decoding
//! - [`CookieStore`] and [`CookieJar`] - cookie persistence
//! - [`LogSink`] - body logging hook
//! - [`Transport`] and [`Endpoint`] - collaborator traits
//! - [`Request`], [`RequestBuilder`], [`Response`] - HTTP message types

mod body;
mod client;
mod cookie;
mod custom;
mod decode;
mod error;
mod log;
mod outcome;
pub mod prelude;
mod request;
mod response;
mod status;

pub use body::{ContentType, from_json, pretty_json, to_form, to_json};
pub use client::{Endpoint, Transport};
pub use cookie::{Cookie, CookieJar, CookieStore};
pub use custom::{DomainError, ErrorChain, ErrorDescriptor, JsonErrorDescriptor};
pub use decode::{DecodeFailure, Decoder, Json};
pub use error::{BoxError, DecodeCategory, DecodeError, Error, Result, TransportError};
pub use log::{LogLevel, LogSink};
pub use outcome::Outcome;
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use status::{StatusClass, classify};

// Re-export http crate types for methods, status codes and headers
pub use http::{HeaderMap, Method, StatusCode, header};
