use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;

use crate::db::{MovieRepo, MovieRow, RankedMovie, RankingQuery};
use crate::error::ApiResult;
use crate::server::AppState;
use crate::util::QueryParams;

use super::params::RankingParams;
use super::types::Envelope;

pub async fn list_movies(State(state): State<AppState>) -> ApiResult<Json<Envelope<MovieRow>>> {
    info!("call to /movies");

    let movies = state.db.list_movies().await?;
    Ok(Json(Envelope::success(movies)))
}

pub async fn top10(State(state): State<AppState>) -> ApiResult<Json<Envelope<RankedMovie>>> {
    info!("call to /movies/top10");

    rank(&state, RankingQuery::Top10).await
}

/// Top N movies with at least M reviews, e.g. `/movies/topNwithM?N=20&M=50`.
pub async fn top_n_with_m(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Json<Envelope<RankedMovie>>> {
    let p = RankingParams::from_query(&params);
    info!(n = p.limit, m = p.min_reviews, "call to /movies/topNwithM");

    rank(&state, p.into_query(None)).await
}

/// As [`top_n_with_m`], restricted to movies whose genre matches the
/// `genre` path segment as a LIKE pattern.
pub async fn top_n_with_m_by_genre(
    State(state): State<AppState>,
    Path(genre): Path<String>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Json<Envelope<RankedMovie>>> {
    let p = RankingParams::from_query(&params);
    info!(
        genre = %genre,
        n = p.limit,
        m = p.min_reviews,
        "call to /movies/topNwithM/:genre"
    );

    rank(&state, p.into_query(Some(genre))).await
}

async fn rank(state: &AppState, query: RankingQuery) -> ApiResult<Json<Envelope<RankedMovie>>> {
    let movies = state.db.ranked_movies(&query).await?;
    Ok(Json(Envelope::success(movies)))
}
