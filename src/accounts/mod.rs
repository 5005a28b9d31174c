//! Client for the `/v1/organisation/accounts` endpoints.

pub mod types;

use std::sync::Arc;

use reqwest::Method;
use tokio_util::sync::CancellationToken;

use crate::api::{Api, ApiError, Call, ErrorKind};

pub use types::{AccountAttributes, AccountResource};

const ACCOUNTS_PATH: &str = "/v1/organisation/accounts";

/// Client for the accounts endpoints of the API.
#[derive(Clone)]
pub struct AccountsClient {
    api: Arc<Api>,
}

impl AccountsClient {
    pub(crate) fn new(api: Arc<Api>) -> Self {
        Self { api }
    }

    /// Creates a new bank account or registers an existing one.
    ///
    /// The resource id is generated client-side before the request goes out, so
    /// retries are naturally idempotent. If the API reports a conflict for that
    /// id, the existing resource is fetched and returned instead of failing.
    #[tracing::instrument(skip(self, attributes, cancel))]
    pub async fn create(
        &self,
        attributes: AccountAttributes,
        cancel: &CancellationToken,
    ) -> Result<AccountResource, ApiError> {
        let resource = AccountResource {
            id: self.api.new_id(),
            organisation_id: self.api.organisation_id().to_string(),
            resource_type: "accounts".to_string(),
            version: None,
            attributes: Some(attributes),
        };

        let call = Call::new(Method::POST, ACCOUNTS_PATH).json(&resource)?;

        match self.api.execute(&call, cancel).await {
            Err(ApiError::Api(err)) if err.kind() == ErrorKind::Conflict => {
                self.fetch(&resource.id, cancel).await
            }
            result => result,
        }
    }

    /// Fetches a single account resource by id.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn fetch(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<AccountResource, ApiError> {
        let call = Call::new(Method::GET, format!("{ACCOUNTS_PATH}/{id}"));
        self.api.execute(&call, cancel).await
    }

    /// Deletes an account resource by id and current version number.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn delete(
        &self,
        id: &str,
        version: i64,
        cancel: &CancellationToken,
    ) -> Result<(), ApiError> {
        let call = Call::new(Method::DELETE, format!("{ACCOUNTS_PATH}/{id}"))
            .query("version", version.to_string());
        self.api.send(&call, cancel).await
    }
}
