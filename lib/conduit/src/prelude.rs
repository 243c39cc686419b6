//! Prelude module for convenient imports.
//!
//! ```ignore
//! use conduit::prelude::*;
//! ```

pub use crate::{
    ApiClient, DomainError, Endpoint, Error, ErrorChain, Gateway, HyperClient,
    Method, Outcome, Request, RequestBuilder, Response, Result, StatusClass, StatusCode,
    TransportSink, header,
};
pub use serde::{Deserialize, Serialize};
