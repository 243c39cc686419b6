//! Prelude module for convenient imports.
//!
//! ```ignore
//! use conduit_core::prelude::*;
//! ```

pub use crate::{
    DomainError, Endpoint, Error, ErrorChain, Json, Method, Outcome, Request, RequestBuilder,
    Response, Result, StatusClass, Transport, TransportError, classify,
};
