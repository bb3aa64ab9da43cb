use std::str::FromStr;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row, TypeInfo, ValueRef};
use tracing::{debug, info};

use super::model::*;
use super::query::{Bind, RankingQuery, ALL_MOVIES_SQL};
use super::repo::*;

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Opens an existing database. A missing file is an error, the
    /// service never creates an empty movielens database.
    pub async fn new(db_path: &str) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(db_path)?.create_if_missing(false);
        let pool = single_connection_pool().connect_with(options).await?;

        info!("Connected to database at {}", db_path);

        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// One connection, opened eagerly and held until close().
fn single_connection_pool() -> SqlitePoolOptions {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
}

fn row_to_json(row: &SqliteRow) -> DbResult<MovieRow> {
    let mut obj = MovieRow::new();

    for column in row.columns() {
        let idx = column.ordinal();
        let (is_null, type_name) = {
            let raw = row.try_get_raw(idx)?;
            (raw.is_null(), raw.type_info().name().to_string())
        };

        let value = if is_null {
            Value::Null
        } else {
            match type_name.as_str() {
                "INTEGER" | "BOOLEAN" => Value::from(row.try_get::<i64, _>(idx)?),
                "REAL" => Value::from(row.try_get::<f64, _>(idx)?),
                "TEXT" | "DATE" | "TIME" | "DATETIME" => {
                    Value::from(row.try_get::<String, _>(idx)?)
                }
                _ => Value::Null,
            }
        };

        obj.insert(column.name().to_string(), value);
    }

    Ok(obj)
}

#[async_trait]
impl MovieRepo for SqliteRepository {
    async fn list_movies(&self) -> DbResult<Vec<MovieRow>> {
        let rows = sqlx::query(ALL_MOVIES_SQL).fetch_all(&self.pool).await?;
        rows.iter().map(row_to_json).collect()
    }

    async fn ranked_movies(&self, query: &RankingQuery) -> DbResult<Vec<RankedMovie>> {
        let mut q = sqlx::query_as::<_, RankedMovie>(query.sql());
        for bind in query.binds() {
            q = match bind {
                Bind::Int(v) => q.bind(v),
                Bind::Text(s) => q.bind(s),
            };
        }

        let movies = q.fetch_all(&self.pool).await?;
        debug!(rows = movies.len(), "ranking query done");

        Ok(movies)
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn close(&self) {
        self.pool.close().await;
    }
}
