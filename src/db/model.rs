use serde::{Deserialize, Serialize};

/// A row of the `Movies` table, with every column the table happens to have.
pub type MovieRow = serde_json::Map<String, serde_json::Value>;

/// One entry of a ranking query. Field names on the wire are the column
/// aliases used in the SQL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RankedMovie {
    #[sqlx(rename = "Movie_ID")]
    #[serde(rename = "Movie_ID")]
    pub movie_id: i64,
    #[sqlx(rename = "Title")]
    #[serde(rename = "Title")]
    pub title: String,
    #[sqlx(rename = "Genre_Name")]
    #[sqlx(default)]
    #[serde(rename = "Genre_Name", default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[sqlx(rename = "NumReviews")]
    #[serde(rename = "NumReviews")]
    pub num_reviews: i64,
    #[sqlx(rename = "AvgRating")]
    #[serde(rename = "AvgRating")]
    pub avg_rating: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl DbError {
    /// The text reported to clients: the engine's own message when the
    /// failure came from SQLite, the driver's description otherwise.
    pub fn message(&self) -> String {
        match self {
            DbError::Sqlx(sqlx::Error::Database(e)) => e.message().to_string(),
            DbError::Sqlx(e) => e.to_string(),
        }
    }
}

pub type DbResult<T> = Result<T, DbError>;
