//! The call dispatcher: builds transport requests, retries transient failures
//! with backoff, and decodes the response envelope.

use std::sync::Arc;

use log::{debug, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Request, StatusCode};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::backoff::BackOffProvider;
use super::call::{Body, Call};
use super::error::{ApiError, ResponseError};

/// Generator of identifiers for new API resources.
pub type IdProvider = Arc<dyn Fn() -> String + Send + Sync>;

/// Executes [`Call`]s against the API with retry, error classification and
/// cancellation.
///
/// Safe for any number of concurrent calls: all state is immutable or
/// call-local, and the underlying connection pool is internally synchronized.
pub struct Api {
    base_url: Url,
    http: Client,
    backoff_provider: BackOffProvider,
    id_provider: IdProvider,
    organisation_id: String,
}

impl Api {
    pub(crate) fn new(
        base_url: Url,
        http: Client,
        backoff_provider: BackOffProvider,
        id_provider: IdProvider,
        organisation_id: String,
    ) -> Self {
        Self {
            base_url,
            http,
            backoff_provider,
            id_provider,
            organisation_id,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The organisation identifier attached to resource payloads.
    pub fn organisation_id(&self) -> &str {
        &self.organisation_id
    }

    pub(crate) fn new_id(&self) -> String {
        (self.id_provider)()
    }

    /// Executes the call and decodes the `{"data": ...}` response envelope
    /// into `T`. A malformed body on a successful response is a terminal
    /// [`ApiError::Decode`], never retried.
    #[tracing::instrument(skip(self, call, cancel), fields(method = %call.method(), path = call.path()))]
    pub async fn execute<T: DeserializeOwned>(
        &self,
        call: &Call,
        cancel: &CancellationToken,
    ) -> Result<T, ApiError> {
        let raw = self.dispatch(call, cancel).await?;
        let body: Body<T> = serde_json::from_slice(&raw)?;
        Ok(body.data)
    }

    /// Executes the call, discarding the response body.
    #[tracing::instrument(skip(self, call, cancel), fields(method = %call.method(), path = call.path()))]
    pub async fn send(&self, call: &Call, cancel: &CancellationToken) -> Result<(), ApiError> {
        self.dispatch(call, cancel).await?;
        Ok(())
    }

    /// The retry loop. Returns the raw body of a successful response.
    async fn dispatch(&self, call: &Call, cancel: &CancellationToken) -> Result<Vec<u8>, ApiError> {
        let request = self.build_request(call)?;
        let mut backoff = (self.backoff_provider)();
        let mut attempt = 1;

        loop {
            // Byte-buffer bodies always clone; rebuilding is a fallback that
            // never re-encodes the payload.
            let req = match request.try_clone() {
                Some(req) => req,
                None => self.build_request(call)?,
            };

            debug!("{} {} (attempt {})", call.method(), call.path(), attempt);

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ApiError::Cancelled),
                result = self.attempt(req) => result,
            };

            let err = match result {
                Ok(raw) => return Ok(raw),
                Err(err) if err.is_retryable() => err,
                Err(err) => return Err(err),
            };

            let Some(delay) = backoff.next_backoff() else {
                return Err(err);
            };

            warn!(
                "{} {} failed ({}), retrying in {:?}...",
                call.method(),
                call.path(),
                err,
                delay
            );

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ApiError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
            attempt += 1;
        }
    }

    /// One request/response exchange. The response body is fully read on every
    /// branch so the connection can be reused.
    async fn attempt(&self, request: Request) -> Result<Vec<u8>, ApiError> {
        let response = self.http.execute(request).await?;
        let status = response.status();
        let raw = response.bytes().await?.to_vec();

        if status == StatusCode::OK || status == StatusCode::CREATED {
            return Ok(raw);
        }
        Err(ApiError::Api(ResponseError::from_body(status.as_u16(), raw)))
    }

    fn build_request(&self, call: &Call) -> Result<Request, ApiError> {
        let mut url = self.base_url.join(call.path())?;
        if !call.query_pairs().is_empty() {
            url.query_pairs_mut().extend_pairs(call.query_pairs());
        }

        let mut builder = self.http.request(call.method().clone(), url);
        if let Some(body) = call.body() {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_vec());
        }
        builder.build().map_err(ApiError::Transport)
    }
}
