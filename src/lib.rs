//! Async client library for the CoreLedger bank account API.
//!
//! All requests go through a single dispatcher that wraps payloads in the
//! `{"data": ...}` JSON envelope, classifies error responses into a closed set
//! of kinds, and retries transient failures with randomized exponential
//! backoff. Calls are cancellable and safe to run concurrently.
//!
//! ```no_run
//! use coreledger::Client;
//! use coreledger::accounts::AccountAttributes;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> Result<(), coreledger::api::ApiError> {
//! let client = Client::builder()
//!     .organisation_id("9d3a8910-a748-40a3-aca2-be3d4f469c05")
//!     .build()?;
//!
//! let cancel = CancellationToken::new();
//! let account = client
//!     .accounts()
//!     .create(
//!         AccountAttributes {
//!             account_number: Some("21751823".to_string()),
//!             country: Some("GB".to_string()),
//!             iban: Some("GB34BARC20040121751823".to_string()),
//!             ..Default::default()
//!         },
//!         &cancel,
//!     )
//!     .await?;
//! println!("created account {}", account.id);
//! # Ok(())
//! # }
//! ```

pub mod accounts;
pub mod api;
mod client;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL};
