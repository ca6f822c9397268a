mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn student_crud() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();
    let token = common::signup_and_login(&server, "admin").await?;

    let res = client
        .post(server.url("/api/students"))
        .bearer_auth(&token)
        .json(&json!({"studentID": 816024126, "name": "Jane"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .put(server.url("/api/students/816024126"))
        .bearer_auth(&token)
        .json(&json!({"name": "Janet"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = client.get(server.url("/api/students")).send().await?.json::<Value>().await?;
    assert_eq!(body["data"], json!([{"studentID": 816024126, "name": "Janet"}]));

    let res = client
        .delete(server.url("/api/students/816024126"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(server.url("/api/students/816024126")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn student_writes_need_auth() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = reqwest::Client::new()
        .delete(server.url("/api/students/1"))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
