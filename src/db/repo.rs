use async_trait::async_trait;

use super::model::*;
use super::query::RankingQuery;

#[async_trait]
pub trait MovieRepo: Send + Sync {
    /// All movies ordered by id.
    async fn list_movies(&self) -> DbResult<Vec<MovieRow>>;
    async fn ranked_movies(&self, query: &RankingQuery) -> DbResult<Vec<RankedMovie>>;
}

#[async_trait]
pub trait Repository: MovieRepo + Send + Sync {
    /// Releases the connection. Queries issued afterwards fail.
    async fn close(&self);
}
