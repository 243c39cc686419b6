//! Decode dispatcher: sends an endpoint through the sink and decodes the body.

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::{Decoder, Endpoint, Error, Json, LogFlags, Outcome, Transport, TransportSink};

/// Turns endpoints into typed outcomes.
///
/// A gateway never reinterprets the sink's failures; it only adds the
/// decoding step on top of a successful body.
#[derive(Debug)]
pub struct Gateway<C> {
    sink: TransportSink<C>,
}

impl<C> Clone for Gateway<C> {
    fn clone(&self) -> Self {
        Self {
            sink: self.sink.clone(),
        }
    }
}

impl<C: Transport> Gateway<C> {
    /// Wrap a sink.
    #[must_use]
    pub fn new(sink: TransportSink<C>) -> Self {
        Self { sink }
    }

    /// The sink requests go through.
    #[must_use]
    pub fn sink(&self) -> &TransportSink<C> {
        &self.sink
    }

    /// Fetch one JSON value.
    pub async fn fetch_one<T, E>(&self, endpoint: &E) -> Outcome<T>
    where
        T: DeserializeOwned,
        E: Endpoint + ?Sized,
    {
        self.fetch_one_with(&Json, endpoint).await
    }

    /// Fetch one value with a custom decoder.
    pub async fn fetch_one_with<T, D, E>(&self, decoder: &D, endpoint: &E) -> Outcome<T>
    where
        D: Decoder<T> + ?Sized,
        E: Endpoint + ?Sized,
    {
        self.fetch_raw(endpoint)
            .await
            .and_then(|body| decoder.decode(&body).map_err(Error::from).into())
    }

    /// Fetch a JSON array.
    pub async fn fetch_many<T, E>(&self, endpoint: &E) -> Outcome<Vec<T>>
    where
        T: DeserializeOwned,
        E: Endpoint + ?Sized,
    {
        self.fetch_many_with(&Json, endpoint).await
    }

    /// Fetch a sequence with a custom decoder.
    pub async fn fetch_many_with<T, D, E>(&self, decoder: &D, endpoint: &E) -> Outcome<Vec<T>>
    where
        D: Decoder<Vec<T>> + ?Sized,
        E: Endpoint + ?Sized,
    {
        self.fetch_one_with(decoder, endpoint).await
    }

    /// Fetch the body bytes untouched.
    pub async fn fetch_raw<E>(&self, endpoint: &E) -> Outcome<Bytes>
    where
        E: Endpoint + ?Sized,
    {
        let request = match endpoint.request() {
            Ok(request) => request,
            Err(error) => return Outcome::Fail(error),
        };
        self.sink.send(request, LogFlags::of(endpoint)).await
    }
}
