//! End-to-end tests of the public client surface against a mock API server.

use std::sync::Arc;
use std::time::Duration;

use coreledger::Client;
use coreledger::accounts::{AccountAttributes, AccountResource};
use coreledger::api::{ApiError, BackOff, BackOffProvider, Call, ErrorKind};
use reqwest::Method;
use tokio_util::sync::CancellationToken;

const ORGANISATION_ID: &str = "9d3a8910-a748-40a3-aca2-be3d4f469c05";
const RESOURCE_ID: &str = "08e96610-d4ed-4de2-9a18-fcb3017b452c";

/// Policy that never retries, keeping failure tests fast.
struct NoRetry;

impl BackOff for NoRetry {
    fn next_backoff(&mut self) -> Option<Duration> {
        None
    }

    fn reset(&mut self) {}
}

fn no_retry() -> BackOffProvider {
    Arc::new(|| Box::new(NoRetry))
}

fn test_client(base_url: &str) -> Client {
    Client::builder()
        .base_url(base_url)
        .organisation_id(ORGANISATION_ID)
        .id_provider(|| RESOURCE_ID.to_string())
        .backoff_provider(no_retry())
        .build()
        .unwrap()
}

fn account_body(version: i64) -> String {
    format!(
        r#"{{"data":{{"id":"{RESOURCE_ID}","organisation_id":"{ORGANISATION_ID}","type":"accounts","version":{version},"attributes":{{"country":"GB","iban":"GB34BARC20040121751823"}}}}}}"#
    )
}

#[tokio::test]
async fn create_fetch_delete_lifecycle() {
    let mut server = mockito::Server::new_async().await;
    let cancel = CancellationToken::new();

    let create = server
        .mock("POST", "/v1/organisation/accounts")
        .match_header("content-type", "application/json")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(account_body(0))
        .expect(1)
        .create_async()
        .await;
    let fetch = server
        .mock("GET", format!("/v1/organisation/accounts/{RESOURCE_ID}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(account_body(0))
        .expect(1)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", format!("/v1/organisation/accounts/{RESOURCE_ID}").as_str())
        .match_query(mockito::Matcher::UrlEncoded("version".into(), "0".into()))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let client = test_client(&server.url());
    let accounts = client.accounts();

    let created = accounts
        .create(
            AccountAttributes {
                country: Some("GB".to_string()),
                iban: Some("GB34BARC20040121751823".to_string()),
                ..Default::default()
            },
            &cancel,
        )
        .await
        .unwrap();
    assert_eq!(created.id, RESOURCE_ID);
    assert_eq!(created.version, Some(0));

    let fetched = accounts.fetch(RESOURCE_ID, &cancel).await.unwrap();
    assert_eq!(fetched.id, created.id);

    accounts
        .delete(RESOURCE_ID, 0, &cancel)
        .await
        .unwrap();

    create.assert_async().await;
    fetch.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn create_conflict_resolves_to_existing_account() {
    let mut server = mockito::Server::new_async().await;

    let post = server
        .mock("POST", "/v1/organisation/accounts")
        .with_status(409)
        .with_body(r#"{"error_message": "duplicate account"}"#)
        .expect(1)
        .create_async()
        .await;
    let get = server
        .mock("GET", format!("/v1/organisation/accounts/{RESOURCE_ID}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(account_body(4))
        .expect(1)
        .create_async()
        .await;

    let client = test_client(&server.url());
    let account = client
        .accounts()
        .create(AccountAttributes::default(), &CancellationToken::new())
        .await
        .unwrap();

    post.assert_async().await;
    get.assert_async().await;
    assert_eq!(account.version, Some(4));
}

#[tokio::test]
async fn errors_expose_status_and_kind() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/organisation/accounts/missing")
        .with_status(404)
        .with_body(r#"{"error_message": "record does not exist"}"#)
        .create_async()
        .await;

    let client = test_client(&server.url());
    let err = client
        .accounts()
        .fetch("missing", &CancellationToken::new())
        .await
        .unwrap_err();

    mock.assert_async().await;
    let response = err.response().unwrap();
    assert_eq!(response.status_code, 404);
    assert_eq!(response.kind(), ErrorKind::ClientError);
    assert_eq!(err.to_string(), "HTTP 404: record does not exist");
}

#[tokio::test]
async fn generic_calls_through_the_dispatcher() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/organisation/accounts/other")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(account_body(1))
        .create_async()
        .await;

    let client = test_client(&server.url());
    let call = Call::new(Method::GET, "/v1/organisation/accounts/other");
    let account: AccountResource = client
        .api()
        .execute(&call, &CancellationToken::new())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(account.version, Some(1));
}

#[tokio::test]
async fn concurrent_calls_share_one_client() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", format!("/v1/organisation/accounts/{RESOURCE_ID}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(account_body(0))
        .expect(8)
        .create_async()
        .await;

    let client = test_client(&server.url());
    let cancel = CancellationToken::new();

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let accounts = client.accounts();
        let cancel = cancel.clone();
        tasks.push(tokio::spawn(async move {
            accounts.fetch(RESOURCE_ID, &cancel).await
        }));
    }
    for task in tasks {
        let account = task.await.unwrap().unwrap();
        assert_eq!(account.id, RESOURCE_ID);
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn pre_cancelled_call_never_reaches_the_server() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/organisation/accounts/123")
        .with_status(200)
        .expect(0)
        .create_async()
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let client = test_client(&server.url());
    let result = client.accounts().fetch("123", &cancel).await;

    mock.assert_async().await;
    assert!(matches!(result, Err(ApiError::Cancelled)));
}
