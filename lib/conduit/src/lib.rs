//! Typed HTTP client pipeline.
//!
//! One call goes through four stages:
//!
//! 1. [`CookieSync`] attaches stored cookies for the base origin
//! 2. the [`Transport`] performs the network call ([`HyperClient`] by default)
//! 3. [`TransportSink`] classifies the status and runs the [`ErrorChain`]
//! 4. [`Gateway`] decodes the body into the caller's type
//!
//! [`ApiClient`] wraps the whole thing and returns a plain [`Result`].
//!
//! # Example
//!
//! ```ignore
//! use conduit::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! let client = ApiClient::with_base_url("https://api.example.com")?;
//! let request = Request::builder(Method::GET, client.url("/users/42")?).build();
//! let user: User = client.one(&request).await?;
//! ```

mod api_client;
mod client;
mod connector;
mod cookies;
mod gateway;
mod log;
pub mod middleware;
pub mod prelude;
mod sink;

pub use api_client::ApiClient;
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use cookies::CookieSync;
pub use gateway::Gateway;
pub use log::TracingLogSink;
pub use sink::{LogFlags, TransportSink, TransportSinkBuilder};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use conduit_core::{
    BoxError, ContentType, Cookie, CookieJar, CookieStore, DecodeCategory, DecodeError,
    DecodeFailure, Decoder, DomainError, Endpoint, Error, ErrorChain, ErrorDescriptor, Json,
    JsonErrorDescriptor, LogLevel, LogSink, Method, Outcome, Request, RequestBuilder, Response,
    Result, StatusClass, Transport, TransportError, classify, from_json, pretty_json, to_form,
    to_json,
};

// Re-export http types for status codes and headers
pub use conduit_core::{HeaderMap, StatusCode, header};

pub use url;
