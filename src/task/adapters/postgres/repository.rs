//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{NewTask, PersistedTaskData, Position, Stage, Task, TaskId, TaskPatch, TaskTitle},
    ports::{PositionOverflow, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Board ordering evaluated by the database.
const LIST_TASKS_SQL: &str = concat!(
    "SELECT id, title, stage, position, created_at FROM tasks ",
    "ORDER BY CASE stage ",
    "WHEN 'todo' THEN 0 WHEN 'in_progress' THEN 1 ",
    "WHEN 'review' THEN 2 WHEN 'done' THEN 3 ELSE 4 END, ",
    "position ASC, created_at DESC",
);

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn append(&self, task: NewTask) -> TaskRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let position = next_position(tx, task.stage())?;
                let new_row = to_new_row(&task, position);
                let row = diesel::insert_into(tasks::table)
                    .values(&new_row)
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(tx)
                    .map_err(TaskRepositoryError::persistence)?;
                row_to_task(row)
            })
        })
        .await
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskRepositoryResult<Task> {
        let patch = patch.clone();
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let current = tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .select(TaskRow::as_select())
                    .first::<TaskRow>(tx)
                    .optional()
                    .map_err(TaskRepositoryError::persistence)?
                    .ok_or(TaskRepositoryError::NotFound(id))?;
                let current = row_to_task(current)?;

                let changes = patch
                    .plan(&current)
                    .resolve(|stage| next_position(tx, stage))?;

                let row = diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                    .set((
                        tasks::title.eq(changes.title.as_str()),
                        tasks::stage.eq(changes.stage.as_str()),
                        tasks::position.eq(changes.position.value()),
                    ))
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(tx)
                    .map_err(TaskRepositoryError::persistence)?;
                row_to_task(row)
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            diesel::sql_query(LIST_TASKS_SQL)
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }
}

/// Reads `max(position in stage) + 1` on the given connection.
///
/// Nothing locks the stage between this read and the caller's write.
fn next_position(connection: &mut PgConnection, stage: Stage) -> TaskRepositoryResult<Position> {
    let max = tasks::table
        .filter(tasks::stage.eq(stage.as_str()))
        .select(diesel::dsl::max(tasks::position))
        .get_result::<Option<i32>>(connection)
        .map_err(TaskRepositoryError::persistence)?;
    Position::after(max.map(Position::new))
        .ok_or_else(|| TaskRepositoryError::persistence(PositionOverflow(stage)))
}

fn to_new_row(task: &NewTask, position: Position) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        stage: task.stage().as_str().to_owned(),
        position: position.value(),
        created_at: task.created_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title: persisted_title,
        stage: persisted_stage,
        position,
        created_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;
    let stage =
        Stage::try_from(persisted_stage.as_str()).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        stage,
        position: Position::new(position),
        created_at,
    }))
}
