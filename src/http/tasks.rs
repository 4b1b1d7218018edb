//! Task service routes.

use super::ApiError;
use crate::task::{
    domain::Task,
    ports::{AuditSink, TaskRepository},
    services::{CreateTaskRequest, TaskLifecycleService, UpdateTaskRequest},
};
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, put},
};
use mockable::Clock;
use serde::Deserialize;

/// Body of `POST /tasks`.
#[derive(Debug, Deserialize)]
struct CreateTaskBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    stage: Option<String>,
}

/// Body of `PUT /tasks/{id}`. A `null` position means "compute".
#[derive(Debug, Deserialize)]
struct UpdateTaskBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    stage: Option<String>,
    #[serde(default)]
    position: Option<i32>,
}

/// Builds the `/tasks` routes over `service`.
pub fn task_routes<R, A, C>(service: TaskLifecycleService<R, A, C>) -> Router
where
    R: TaskRepository + 'static,
    A: AuditSink,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/tasks",
            get(list_tasks::<R, A, C>).post(create_task::<R, A, C>),
        )
        .route("/tasks/{id}", put(update_task::<R, A, C>))
        .with_state(service)
}

async fn list_tasks<R, A, C>(
    State(service): State<TaskLifecycleService<R, A, C>>,
) -> Result<Json<Vec<Task>>, ApiError>
where
    R: TaskRepository + 'static,
    A: AuditSink,
    C: Clock + Send + Sync + 'static,
{
    service
        .list_tasks()
        .await
        .map(Json)
        .map_err(|err| ApiError::from_task(err, "failed to fetch tasks"))
}

async fn create_task<R, A, C>(
    State(service): State<TaskLifecycleService<R, A, C>>,
    body: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError>
where
    R: TaskRepository + 'static,
    A: AuditSink,
    C: Clock + Send + Sync + 'static,
{
    let Json(body) = body.map_err(|_| ApiError::invalid_body())?;
    let mut request = CreateTaskRequest::new(body.title.unwrap_or_default());
    if let Some(stage) = body.stage {
        request = request.with_stage(stage);
    }

    let task = service
        .create_task(request)
        .await
        .map_err(|err| ApiError::from_task(err, "failed to create task"))?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task<R, A, C>(
    State(service): State<TaskLifecycleService<R, A, C>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> Result<Json<Task>, ApiError>
where
    R: TaskRepository + 'static,
    A: AuditSink,
    C: Clock + Send + Sync + 'static,
{
    let Json(body) = body.map_err(|_| ApiError::invalid_body())?;

    let mut request = UpdateTaskRequest::for_raw_id(id);
    if let Some(title) = body.title {
        request = request.with_title(title);
    }
    if let Some(stage) = body.stage {
        request = request.with_stage(stage);
    }
    if let Some(position) = body.position {
        request = request.with_position(position);
    }

    service
        .update_task(request)
        .await
        .map(Json)
        .map_err(|err| ApiError::from_task(err, "failed to update task"))
}
