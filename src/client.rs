//! Client construction and configuration.

use std::sync::Arc;

use url::Url;
use uuid::Uuid;

use crate::accounts::AccountsClient;
use crate::api::{Api, ApiError, BackOffProvider, IdProvider, default_backoff_provider};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.coreledger.io";

/// CoreLedger API client.
///
/// Cheap to clone; all clones share one connection pool and may issue any
/// number of concurrent calls.
#[derive(Clone)]
pub struct Client {
    api: Arc<Api>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The low-level dispatcher, for endpoints without a specialised client.
    pub fn api(&self) -> &Api {
        &self.api
    }

    /// Client for the `/v1/organisation/accounts` endpoints.
    pub fn accounts(&self) -> AccountsClient {
        AccountsClient::new(self.api.clone())
    }
}

/// Builder for [`Client`].
pub struct ClientBuilder {
    base_url: String,
    organisation_id: String,
    http: Option<reqwest::Client>,
    backoff_provider: Option<BackOffProvider>,
    id_provider: Option<IdProvider>,
}

impl ClientBuilder {
    fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            organisation_id: String::new(),
            http: None,
            backoff_provider: None,
            id_provider: None,
        }
    }

    /// Base URL of the API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Organisation identifier attached to resource payloads.
    pub fn organisation_id(mut self, organisation_id: impl Into<String>) -> Self {
        self.organisation_id = organisation_id.into();
        self
    }

    /// Custom `reqwest::Client`, e.g. to configure timeouts or proxies.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Factory for per-call retry policies. Defaults to
    /// [`ExponentialBackOff`](crate::api::ExponentialBackOff).
    pub fn backoff_provider(mut self, provider: BackOffProvider) -> Self {
        self.backoff_provider = Some(provider);
        self
    }

    /// Generator of ids for new resources. Defaults to random v4 UUIDs; should
    /// only be overridden in tests.
    pub fn id_provider(mut self, provider: impl Fn() -> String + Send + Sync + 'static) -> Self {
        self.id_provider = Some(Arc::new(provider));
        self
    }

    pub fn build(self) -> Result<Client, ApiError> {
        let base_url = Url::parse(&self.base_url)?;
        let http = self.http.unwrap_or_default();
        let backoff_provider = self
            .backoff_provider
            .unwrap_or_else(default_backoff_provider);
        let id_provider = self
            .id_provider
            .unwrap_or_else(|| Arc::new(|| Uuid::new_v4().to_string()));

        Ok(Client {
            api: Arc::new(Api::new(
                base_url,
                http,
                backoff_provider,
                id_provider,
                self.organisation_id,
            )),
        })
    }
}
