//! User repository
//!
//! Read-only. Rows are streamed from the cursor and decoded one at a time;
//! the first failure aborts the scan and drops the cursor. The scan runs in
//! its own read transaction so a statement timeout stays local to it.

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use futures::TryStreamExt;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::DbError;

/// User record, as stored and as served
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
    statement_timeout: Option<Duration>,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self {
            pool,
            statement_timeout: None,
        }
    }

    /// Have the server cancel the scan once `timeout` has elapsed.
    ///
    /// Cancellation frees the pooled connection even when the caller has
    /// already stopped waiting.
    pub fn with_statement_timeout(mut self, timeout: Duration) -> Self {
        self.statement_timeout = Some(timeout);
        self
    }

    /// List every user in table order.
    ///
    /// Order is whatever the table yields; callers must not rely on it.
    /// Nothing is returned unless every row decodes.
    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        let mut tx = self.pool.begin().await.map_err(DbError::from_query)?;

        if let Some(timeout) = self.statement_timeout {
            // 0 would disable the limit
            let millis = timeout.as_millis().max(1);
            sqlx::query("SELECT set_config('statement_timeout', $1, true)")
                .bind(millis.to_string())
                .execute(&mut *tx)
                .await
                .map_err(DbError::from_query)?;
        }

        let mut users = Vec::new();
        {
            let mut rows = sqlx::query("SELECT * FROM users").fetch(&mut *tx);
            while let Some(row) = rows.try_next().await.map_err(DbError::from_query)? {
                users.push(decode_user(&row)?);
            }
        }
        tx.commit().await.map_err(DbError::from_query)?;

        tracing::debug!(count = users.len(), "listed users");
        Ok(users)
    }
}

fn decode_user(row: &PgRow) -> Result<User, DbError> {
    Ok(User {
        id: id_column(row, "id")?,
        name: column(row, "name")?,
        email: column(row, "email")?,
        created_at: timestamp_column(row, "created_at")?,
        updated_at: timestamp_column(row, "updated_at")?,
    })
}

fn column<'r, T>(row: &'r PgRow, name: &'static str) -> Result<T, DbError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|source| DbError::Decode {
        column: name,
        source,
    })
}

/// `bigint` or `integer` primary keys both widen to `i64`.
fn id_column(row: &PgRow, name: &'static str) -> Result<i64, DbError> {
    match row.try_get::<i64, _>(name) {
        Err(sqlx::Error::ColumnDecode { .. }) => column::<i32>(row, name).map(i64::from),
        other => other.map_err(|source| DbError::Decode {
            column: name,
            source,
        }),
    }
}

/// `timestamptz` decodes directly; a zone-less `timestamp` is taken as UTC.
fn timestamp_column(row: &PgRow, name: &'static str) -> Result<DateTime<Utc>, DbError> {
    match row.try_get::<DateTime<Utc>, _>(name) {
        Err(sqlx::Error::ColumnDecode { .. }) => {
            column::<NaiveDateTime>(row, name).map(|ts| ts.and_utc())
        }
        other => other.map_err(|source| DbError::Decode {
            column: name,
            source,
        }),
    }
}
