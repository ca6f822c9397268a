#![allow(dead_code)]

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use staff_review::app::{app, AppState};
use staff_review::database::Database;

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Serve the API over a fresh in-memory store for the lifetime of the test runtime
pub async fn spawn_server() -> Result<TestServer> {
    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let db = Database::in_memory().await?;
    db.create_schema().await?;

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind {}", base_url))?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, app(AppState::new(db))).await;
    });

    Ok(TestServer { port, base_url })
}

/// Sign up `username` (password "pw") and log in, returning the bearer token
pub async fn signup_and_login(server: &TestServer, username: &str) -> Result<String> {
    let client = reqwest::Client::new();
    let credentials = json!({
        "username": username,
        "password": "pw",
        "faculty": "FST",
        "department": "DCIT"
    });

    let res = client.post(server.url("/auth/signup")).json(&credentials).send().await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "signup failed: {}", res.status());

    let res = client.post(server.url("/auth/login")).json(&credentials).send().await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

    let body = res.json::<Value>().await?;
    body["data"]["token"]
        .as_str()
        .map(str::to_string)
        .context("login response has no token")
}
