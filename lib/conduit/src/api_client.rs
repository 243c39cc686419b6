//! Service facade returning plain `Result`s.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{Endpoint, Error, Gateway, HyperClient, Result, Transport, TransportSink};

/// Entry point for calling an API.
///
/// # Example
///
/// ```ignore
/// use conduit::{ApiClient, Method, Request};
///
/// let client = ApiClient::with_base_url("https://api.example.com")?;
/// let user: User = client
///     .one(&Request::builder(Method::GET, client.url("/users/42")?).build())
///     .await?;
/// ```
#[derive(Debug)]
pub struct ApiClient<C> {
    gateway: Gateway<C>,
}

impl<C> Clone for ApiClient<C> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}

impl ApiClient<HyperClient> {
    /// Client over the default hyper transport, with an in-memory cookie jar
    /// and body logs sent to `tracing`.
    pub fn with_base_url(base_url: impl AsRef<str>) -> Result<Self> {
        let sink = TransportSink::builder(HyperClient::new())
            .base_url(base_url)?
            .with_tracing()
            .build();
        Ok(Self::from(sink))
    }
}

impl<C: Transport> ApiClient<C> {
    /// Wrap a gateway.
    #[must_use]
    pub fn new(gateway: Gateway<C>) -> Self {
        Self { gateway }
    }

    /// The underlying gateway, for callers that want the `Outcome` directly.
    #[must_use]
    pub fn gateway(&self) -> &Gateway<C> {
        &self.gateway
    }

    /// Configured base URL.
    #[must_use]
    pub fn base_url(&self) -> Option<&Url> {
        self.gateway.sink().base_url()
    }

    /// Join `path` onto the base URL.
    pub fn url(&self, path: &str) -> Result<Url> {
        let base = self
            .base_url()
            .ok_or_else(|| Error::message(format!("no base URL configured to resolve '{path}'")))?;
        base.join(path)
            .map_err(|e| Error::message(format!("invalid path '{path}': {e}")))
    }

    /// Call an endpoint returning one JSON value.
    pub async fn one<T, E>(&self, endpoint: &E) -> Result<T>
    where
        T: DeserializeOwned,
        E: Endpoint + ?Sized,
    {
        self.gateway.fetch_one(endpoint).await.into_result()
    }

    /// Call an endpoint returning a JSON array.
    pub async fn many<T, E>(&self, endpoint: &E) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        E: Endpoint + ?Sized,
    {
        self.gateway.fetch_many(endpoint).await.into_result()
    }

    /// Call an endpoint and keep the raw body.
    pub async fn raw<E>(&self, endpoint: &E) -> Result<Bytes>
    where
        E: Endpoint + ?Sized,
    {
        self.gateway.fetch_raw(endpoint).await.into_result()
    }
}

impl<C: Transport> From<TransportSink<C>> for ApiClient<C> {
    fn from(sink: TransportSink<C>) -> Self {
        Self::new(Gateway::new(sink))
    }
}

impl<C: Transport> From<Gateway<C>> for ApiClient<C> {
    fn from(gateway: Gateway<C>) -> Self {
        Self::new(gateway)
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use http::{HeaderMap, Method};

    use super::*;
    use crate::{Request, Response, TransportError};

    struct Echo;

    impl Transport for Echo {
        async fn execute(
            &self,
            request: Request<Bytes>,
        ) -> std::result::Result<Response<Bytes>, TransportError> {
            let status = if request.url().path() == "/missing" { 404 } else { 200 };
            let body = request.body().cloned().unwrap_or_default();
            Ok(Response::new(status, HeaderMap::new(), body))
        }
    }

    fn client() -> ApiClient<Echo> {
        TransportSink::builder(Echo)
            .base_url("https://api.example.com/v1/")
            .expect("base url")
            .build()
            .into()
    }

    #[test]
    fn url_joins_onto_base() {
        let client = client();
        let_assert!(Ok(url) = client.url("users/42"));
        check!(url.as_str() == "https://api.example.com/v1/users/42");
    }

    #[test]
    fn url_without_base_is_an_error() {
        let client = ApiClient::from(TransportSink::new(Echo));
        check!(client.base_url().is_none());
        let_assert!(Err(Error::Message(_)) = client.url("users"));
    }

    #[tokio::test]
    async fn facade_collapses_outcomes() {
        let client = client();
        let url = client.url("numbers").expect("url");
        let request = Request::builder(Method::POST, url)
            .body(Bytes::from_static(b"[1,2,3]"))
            .build();

        let numbers: Vec<u32> = client.many(&request).await.expect("numbers");
        check!(numbers == [1, 2, 3]);

        let raw = client.raw(&request).await.expect("raw");
        check!(raw == Bytes::from_static(b"[1,2,3]"));

        let missing = Request::builder(Method::GET, client.url("/missing").expect("url")).build();
        let_assert!(Err(error) = client.one::<serde_json::Value, _>(&missing).await);
        check!(error.status() == Some(404));
    }
}
