//! End-to-end HTTP tests for both services.

use std::time::Duration;

use super::helpers::{service, spawn_app, spawn_services};
use reqwest::StatusCode;
use serde_json::{Value, json};
use taskboard::http::task_app;

/// Polls `GET {audit_url}/logs` until `count` entries are present.
async fn wait_for_logs(
    client: &reqwest::Client,
    audit_url: &str,
    count: usize,
) -> Result<Vec<Value>, eyre::Report> {
    for _ in 0..50 {
        let logs: Vec<Value> = client
            .get(format!("{audit_url}/logs"))
            .send()
            .await?
            .json()
            .await?;
        if logs.len() >= count {
            return Ok(logs);
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    Err(eyre::eyre!("audit log never reached {count} entries"))
}

#[tokio::test(flavor = "multi_thread")]
async fn create_and_update_are_audited() -> Result<(), eyre::Report> {
    let (task_url, audit_url) = spawn_services().await?;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{task_url}/tasks"))
        .json(&json!({"title": "Write docs"}))
        .send()
        .await?;
    eyre::ensure!(response.status() == StatusCode::CREATED, "create status");
    let created: Value = response.json().await?;
    eyre::ensure!(created["stage"] == "todo", "default stage");
    eyre::ensure!(created["position"] == 1, "first position");
    let id = created["id"]
        .as_str()
        .ok_or_else(|| eyre::eyre!("missing task id"))?
        .to_owned();

    let response = client
        .put(format!("{task_url}/tasks/{id}"))
        .json(&json!({"stage": "done"}))
        .send()
        .await?;
    eyre::ensure!(response.status() == StatusCode::OK, "update status");
    let updated: Value = response.json().await?;
    eyre::ensure!(updated["title"] == "Write docs", "title preserved");
    eyre::ensure!(updated["position"] == 1, "appended to empty stage");

    let logs = wait_for_logs(&client, &audit_url, 2).await?;
    let newest = logs.first().ok_or_else(|| eyre::eyre!("no audit entries"))?;
    eyre::ensure!(newest["action_string"] == "task_updated", "newest first: {newest}");
    eyre::ensure!(newest["task_id"] == id.as_str(), "task reference");
    eyre::ensure!(
        newest["payload"] == json!({"title": "Write docs", "stage": "done", "position": 1}),
        "payload snapshot: {newest}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn task_service_works_without_audit_service() -> Result<(), eyre::Report> {
    let task_url = spawn_app(task_app(service())).await?;
    let client = reqwest::Client::new();

    for title in ["A", "B"] {
        let response = client
            .post(format!("{task_url}/tasks"))
            .json(&json!({"title": title}))
            .send()
            .await?;
        eyre::ensure!(response.status() == StatusCode::CREATED, "create status");
    }

    let tasks: Vec<Value> = client
        .get(format!("{task_url}/tasks"))
        .send()
        .await?
        .json()
        .await?;
    let positions: Vec<&Value> = tasks.iter().map(|task| &task["position"]).collect();
    eyre::ensure!(positions == [&json!(1), &json!(2)], "positions: {positions:?}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn task_errors_use_json_bodies() -> Result<(), eyre::Report> {
    let task_url = spawn_app(task_app(service())).await?;
    let client = reqwest::Client::new();

    let tasks = format!("{task_url}/tasks");
    let cases = [
        (
            client.post(&tasks).json(&json!({"title": "  "})),
            400,
            "title is required",
        ),
        (
            client
                .post(&tasks)
                .json(&json!({"title": "A", "stage": "bogus_stage"})),
            400,
            "invalid stage",
        ),
        (
            client
                .post(&tasks)
                .header("content-type", "application/json")
                .body("{not json"),
            400,
            "invalid json body",
        ),
        (
            client
                .put(format!("{tasks}/{}", uuid::Uuid::new_v4()))
                .json(&json!({"title": "B"})),
            404,
            "task not found",
        ),
        (
            client
                .put(format!("{tasks}/not-a-uuid"))
                .json(&json!({"title": "B"})),
            404,
            "task not found",
        ),
        (
            client.put(format!("{tasks}/not-a-uuid")).json(&json!({})),
            400,
            "title, stage, or position is required",
        ),
        (
            client
                .put(format!("{tasks}/not-a-uuid"))
                .json(&json!({"stage": "bogus_stage"})),
            400,
            "invalid stage",
        ),
    ];

    for (request, status, message) in cases {
        let response = request.send().await?;
        eyre::ensure!(response.status().as_u16() == status, "status for {message}");
        let body: Value = response.json().await?;
        eyre::ensure!(body == json!({"error": message}), "body: {body}");
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_update_is_rejected() -> Result<(), eyre::Report> {
    let task_url = spawn_app(task_app(service())).await?;
    let client = reqwest::Client::new();

    let created: Value = client
        .post(format!("{task_url}/tasks"))
        .json(&json!({"title": "A"}))
        .send()
        .await?
        .json()
        .await?;
    let id = created["id"]
        .as_str()
        .ok_or_else(|| eyre::eyre!("missing task id"))?;

    let response = client
        .put(format!("{task_url}/tasks/{id}"))
        .json(&json!({"title": "", "position": null}))
        .send()
        .await?;

    eyre::ensure!(response.status() == StatusCode::BAD_REQUEST, "status");
    let body: Value = response.json().await?;
    eyre::ensure!(
        body == json!({"error": "title, stage, or position is required"}),
        "body: {body}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn audit_service_accepts_free_form_entries() -> Result<(), eyre::Report> {
    let (_, audit_url) = spawn_services().await?;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{audit_url}/logs"))
        .json(&json!({"action": "manual_note"}))
        .send()
        .await?;
    eyre::ensure!(response.status() == StatusCode::CREATED, "append status");
    let entry: Value = response.json().await?;
    eyre::ensure!(entry["action_string"] == "manual_note", "action echoed");
    eyre::ensure!(entry["task_id"].is_null(), "no task reference");
    eyre::ensure!(entry["payload"].is_null(), "no payload");

    let response = client
        .post(format!("{audit_url}/logs"))
        .json(&json!({"task_id": uuid::Uuid::new_v4()}))
        .send()
        .await?;
    eyre::ensure!(response.status() == StatusCode::BAD_REQUEST, "missing action");
    let body: Value = response.json().await?;
    eyre::ensure!(body == json!({"error": "action is required"}), "body: {body}");
    Ok(())
}
