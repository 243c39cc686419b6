//! Cookie storage.
//!
//! [`CookieStore`] is the contract the pipeline uses to persist cookies
//! between calls. [`CookieJar`] is the default in-memory store: cookies are
//! keyed by origin (`scheme://host:port`) and every read or write takes the
//! jar lock exactly once.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};

use http::HeaderMap;
use http::header::SET_COOKIE;
use url::Url;

/// A `name=value` cookie pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cookie {
    name: String,
    value: String,
}

impl Cookie {
    /// Create a cookie.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Cookie name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cookie value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Render cookies as a `Cookie` request header value (`a=1; b=2`).
    #[must_use]
    pub fn header_value(cookies: &[Self]) -> String {
        cookies
            .iter()
            .map(|cookie| format!("{}={}", cookie.name, cookie.value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// What a single `Set-Cookie` header asks for.
#[derive(Debug, PartialEq, Eq)]
enum SetCookie {
    Store(Cookie),
    Remove(String),
}

impl SetCookie {
    fn parse(header: &str) -> Option<Self> {
        let mut parts = header.split(';');
        let (name, value) = parts.next()?.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let expired = parts.filter_map(|attr| attr.split_once('=')).any(|(key, value)| {
            key.trim().eq_ignore_ascii_case("max-age")
                && value.trim().parse::<i64>().is_ok_and(|age| age <= 0)
        });

        Some(if expired {
            Self::Remove(name.to_string())
        } else {
            Self::Store(Cookie::new(name, value.trim().trim_matches('"')))
        })
    }
}

/// Process-wide cookie storage contract.
pub trait CookieStore: Send + Sync {
    /// Cookies stored for the origin of `url`, `None` when there are none.
    fn cookies(&self, url: &Url) -> Option<Vec<Cookie>>;

    /// Persist the `Set-Cookie` headers of a response for the origin of `url`.
    fn save(&self, url: &Url, headers: &HeaderMap);
}

/// In-memory cookie store keyed by origin.
#[derive(Debug, Default)]
pub struct CookieJar {
    origins: Mutex<HashMap<String, BTreeMap<String, String>>>,
}

impl CookieJar {
    /// Create an empty jar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a single cookie for the origin of `url`.
    pub fn insert(&self, url: &Url, cookie: Cookie) {
        self.lock()
            .entry(origin_key(url))
            .or_default()
            .insert(cookie.name, cookie.value);
    }

    /// Drop every stored cookie.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Total number of cookies across origins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().values().map(BTreeMap::len).sum()
    }

    /// Returns `true` if no cookie is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, BTreeMap<String, String>>> {
        self.origins.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CookieStore for CookieJar {
    fn cookies(&self, url: &Url) -> Option<Vec<Cookie>> {
        let origins = self.lock();
        let cookies = origins.get(&origin_key(url))?;
        if cookies.is_empty() {
            return None;
        }
        Some(
            cookies
                .iter()
                .map(|(name, value)| Cookie::new(name.as_str(), value.as_str()))
                .collect(),
        )
    }

    fn save(&self, url: &Url, headers: &HeaderMap) {
        let updates: Vec<SetCookie> = headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(SetCookie::parse)
            .collect();
        if updates.is_empty() {
            return;
        }

        let mut origins = self.lock();
        let cookies = origins.entry(origin_key(url)).or_default();
        for update in updates {
            match update {
                SetCookie::Store(cookie) => {
                    cookies.insert(cookie.name, cookie.value);
                }
                SetCookie::Remove(name) => {
                    cookies.remove(&name);
                }
            }
        }
    }
}

fn origin_key(url: &Url) -> String {
    url.origin().ascii_serialization()
}
