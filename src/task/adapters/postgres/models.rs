//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Title.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub title: String,
    /// Stage in storage representation.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub stage: String,
    /// Position within the stage.
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub position: i32,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Stage in storage representation.
    pub stage: String,
    /// Position assigned by the append.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
