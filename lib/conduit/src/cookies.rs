//! Cookie synchronization between the cookie store and outgoing calls.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use http::header::COOKIE;
use tracing::debug;
use url::Url;

use crate::{Cookie, CookieStore, Request, Response};

/// Injects stored cookies before a call and persists new ones after a success.
///
/// Cookies are scoped to the origin of the configured base URL. Without a base
/// URL or a store every operation is a silent no-op.
#[derive(Clone, Default)]
pub struct CookieSync {
    base_url: Option<Url>,
    store: Option<Arc<dyn CookieStore>>,
}

impl fmt::Debug for CookieSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieSync")
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("store", &self.store.is_some())
            .finish()
    }
}

impl CookieSync {
    /// Create a synchronizer.
    #[must_use]
    pub fn new(base_url: Option<Url>, store: Option<Arc<dyn CookieStore>>) -> Self {
        Self { base_url, store }
    }

    /// Base URL whose origin scopes the cookies.
    #[must_use]
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Attach stored cookies to a request aimed at the base origin.
    pub fn before_send(&self, request: &mut Request<Bytes>) {
        let Some((base_url, store)) = self.scoped(request.url()) else {
            return;
        };
        let Some(cookies) = store.cookies(base_url) else {
            return;
        };

        debug!(count = cookies.len(), "attaching stored cookies");
        request.append_header(COOKIE.as_str(), &Cookie::header_value(&cookies), "; ");
    }

    /// Persist the cookies set by a successful response to a request for `url`.
    pub fn after_success(&self, url: &Url, response: &Response<Bytes>) {
        let Some((base_url, store)) = self.scoped(url) else {
            return;
        };
        store.save(base_url, response.headers());
    }

    /// Base URL and store, only when `url` shares the base origin.
    fn scoped(&self, url: &Url) -> Option<(&Url, &dyn CookieStore)> {
        let (Some(base_url), Some(store)) = (&self.base_url, &self.store) else {
            return None;
        };
        if url.origin() != base_url.origin() {
            debug!(%url, "outside the base origin, cookies left untouched");
            return None;
        }
        Some((base_url, store.as_ref()))
    }
}
