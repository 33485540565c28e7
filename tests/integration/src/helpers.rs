//! Test helpers for integration tests
//!
//! Provides the test server, HTTP request shortcuts, and response
//! assertions.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use appeal_api::{create_app, AppState};
use appeal_common::AppConfig;
use appeal_service::testing::TestHarness;
use reqwest::{header, redirect, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    /// The fakes behind the server, for seeding and inspection
    pub harness: TestHarness,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on fresh fakes
    pub async fn start() -> Result<Self> {
        Self::start_with(TestHarness::new(), test_config()?).await
    }

    /// Start a test server over existing fakes and a custom config
    pub async fn start_with(harness: TestHarness, config: AppConfig) -> Result<Self> {
        let state = AppState::new(harness.context(), config);
        let app = create_app(state);

        // Port 0 lets the OS pick, so tests can run in parallel
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Redirects are asserted on, not followed
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            addr,
            client,
            harness,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with the session cookie
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .get(&url)
            .header(header::COOKIE, format!("token={token}"))
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with JSON body and the session cookie
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header(header::COOKIE, format!("token={token}"))
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request with a raw body and the session cookie
    pub async fn post_raw_auth(&self, path: &str, token: &str, body: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header(header::COOKIE, format!("token={token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .await?)
    }
}

/// Create a test configuration
///
/// Nothing is read from the process environment; the database URL is never
/// dialled because the repositories are in memory.
pub fn test_config() -> Result<AppConfig> {
    test_config_with(&[])
}

/// Create a test configuration with extra variables set
pub fn test_config_with(overrides: &[(&str, &str)]) -> Result<AppConfig> {
    let config = AppConfig::from_lookup(|key| {
        if let Some((_, value)) = overrides.iter().find(|(k, _)| *k == key) {
            return Some((*value).to_string());
        }
        match key {
            "DATABASE_URL" => Some("postgres://localhost/unused"),
            "GUILD_ID" => Some("81384788765712384"),
            "CLIENT_ID" => Some("123456"),
            "CLIENT_SECRET" => Some("secret"),
            "TOKEN" => Some("bot-token"),
            "RATE_LIMIT_BURST" => Some("1000"),
            _ => None,
        }
        .map(String::from)
    })
    .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    Ok(config)
}

/// The `Set-Cookie` header values of a response
pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(String::from))
        .collect()
}

/// The `Location` header of a response
pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
