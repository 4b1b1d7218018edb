//! `PostgreSQL` integration tests for the task repository.

use std::sync::Arc;

use super::helpers::{BoxError, IsolatedSchema, isolated_schema};
use mockable::DefaultClock;
use taskboard::{
    db::TASK_SCHEMA,
    task::{
        adapters::{audit_client::HttpAuditClient, postgres::PostgresTaskRepository},
        domain::{Position, Stage, TaskDomainError, TaskId},
        ports::{TaskRepository, TaskRepositoryError},
        services::{
            AuditDispatcher, CreateTaskRequest, TaskLifecycleError, TaskLifecycleService,
            UpdateTaskRequest,
        },
    },
};

type PgService = TaskLifecycleService<PostgresTaskRepository, HttpAuditClient, DefaultClock>;

struct TaskContext {
    repository: Arc<PostgresTaskRepository>,
    service: PgService,
    schema: IsolatedSchema,
}

async fn setup() -> Result<TaskContext, BoxError> {
    let schema = isolated_schema(TASK_SCHEMA).await?;
    let repository = Arc::new(PostgresTaskRepository::new(schema.pool()));
    let service = TaskLifecycleService::new(
        Arc::clone(&repository),
        AuditDispatcher::new(Arc::new(HttpAuditClient::unconfigured())),
        Arc::new(DefaultClock),
    );
    Ok(TaskContext {
        repository,
        service,
        schema,
    })
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs PostgreSQL: TASKBOARD_TEST_DATABASE_URL or an embedded cluster"]
async fn appends_number_each_stage_from_one() -> Result<(), BoxError> {
    let ctx = setup().await?;

    let first = ctx.service.create_task(CreateTaskRequest::new("A")).await?;
    let second = ctx.service.create_task(CreateTaskRequest::new("B")).await?;
    let review = ctx
        .service
        .create_task(CreateTaskRequest::new("R").with_stage("review"))
        .await?;

    assert_eq!(first.position(), Position::new(1));
    assert_eq!(second.position(), Position::new(2));
    assert_eq!(review.position(), Position::new(1));
    assert_eq!(ctx.repository.find_by_id(first.id()).await?, Some(first));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs PostgreSQL: TASKBOARD_TEST_DATABASE_URL or an embedded cluster"]
async fn stage_move_appends_and_keeps_other_fields() -> Result<(), BoxError> {
    let ctx = setup().await?;

    let task = ctx.service.create_task(CreateTaskRequest::new("A")).await?;
    ctx.service
        .create_task(CreateTaskRequest::new("d").with_stage("done"))
        .await?;

    let moved = ctx
        .service
        .update_task(UpdateTaskRequest::new(task.id()).with_stage("done"))
        .await?;

    assert_eq!(moved.stage(), Stage::Done);
    assert_eq!(moved.position(), Position::new(2));
    assert_eq!(moved.title(), task.title());
    assert_eq!(moved.created_at(), task.created_at());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs PostgreSQL: TASKBOARD_TEST_DATABASE_URL or an embedded cluster"]
async fn explicit_position_is_stored_verbatim() -> Result<(), BoxError> {
    let ctx = setup().await?;

    let task = ctx.service.create_task(CreateTaskRequest::new("A")).await?;
    let updated = ctx
        .service
        .update_task(
            UpdateTaskRequest::new(task.id())
                .with_title("B")
                .with_position(-5),
        )
        .await?;

    assert_eq!(updated.title().as_str(), "B");
    assert_eq!(updated.position(), Position::new(-5));
    assert_eq!(ctx.repository.find_by_id(task.id()).await?, Some(updated));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs PostgreSQL: TASKBOARD_TEST_DATABASE_URL or an embedded cluster"]
async fn update_of_missing_task_reports_not_found() -> Result<(), BoxError> {
    let ctx = setup().await?;

    let result = ctx
        .service
        .update_task(UpdateTaskRequest::new(TaskId::new()).with_stage("review"))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Repository(TaskRepositoryError::NotFound(_)))
    ));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs PostgreSQL: TASKBOARD_TEST_DATABASE_URL or an embedded cluster"]
async fn invalid_stage_never_reaches_storage() -> Result<(), BoxError> {
    let ctx = setup().await?;

    let result = ctx
        .service
        .create_task(CreateTaskRequest::new("A").with_stage("bogus_stage"))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::InvalidStage(_)))
    ));
    assert!(ctx.service.list_tasks().await?.is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs PostgreSQL: TASKBOARD_TEST_DATABASE_URL or an embedded cluster"]
async fn list_uses_board_order() -> Result<(), BoxError> {
    let ctx = setup().await?;

    let done = ctx
        .service
        .create_task(CreateTaskRequest::new("done").with_stage("done"))
        .await?;
    let progress = ctx
        .service
        .create_task(CreateTaskRequest::new("progress").with_stage("in_progress"))
        .await?;
    let older = ctx.service.create_task(CreateTaskRequest::new("older")).await?;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let newer = ctx.service.create_task(CreateTaskRequest::new("newer")).await?;
    let newer = ctx
        .service
        .update_task(UpdateTaskRequest::new(newer.id()).with_position(1))
        .await?;

    let ids: Vec<TaskId> = ctx
        .service
        .list_tasks()
        .await?
        .iter()
        .map(|task| task.id())
        .collect();

    assert_eq!(ids, vec![newer.id(), older.id(), progress.id(), done.id()]);
    Ok(())
}

const REJECT_UPDATES_SQL: &str = "
    CREATE FUNCTION reject_task_update() RETURNS trigger LANGUAGE plpgsql AS $$
    BEGIN
        RAISE EXCEPTION 'task updates are disabled';
    END
    $$;
    CREATE TRIGGER reject_task_update BEFORE UPDATE ON tasks
        FOR EACH ROW EXECUTE FUNCTION reject_task_update();
";

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs PostgreSQL: TASKBOARD_TEST_DATABASE_URL or an embedded cluster"]
async fn failed_update_rolls_back_every_field() -> Result<(), BoxError> {
    let ctx = setup().await?;

    let task = ctx.service.create_task(CreateTaskRequest::new("A")).await?;
    ctx.service
        .create_task(CreateTaskRequest::new("d").with_stage("done"))
        .await?;
    ctx.schema.execute(REJECT_UPDATES_SQL).await?;

    let result = ctx
        .service
        .update_task(
            UpdateTaskRequest::new(task.id())
                .with_title("B")
                .with_stage("done"),
        )
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Repository(TaskRepositoryError::Persistence(_)))
    ));
    assert_eq!(ctx.repository.find_by_id(task.id()).await?, Some(task));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "needs PostgreSQL: TASKBOARD_TEST_DATABASE_URL or an embedded cluster"]
async fn malformed_id_is_rejected_before_storage() -> Result<(), BoxError> {
    let ctx = setup().await?;

    let result = ctx
        .service
        .update_task(UpdateTaskRequest::for_raw_id("not-a-uuid").with_title("B"))
        .await;

    assert!(matches!(result, Err(TaskLifecycleError::MalformedId(_))));
    Ok(())
}
