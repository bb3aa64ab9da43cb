use crate::db::query::{DEFAULT_LIMIT, DEFAULT_MIN_REVIEWS};
use crate::db::RankingQuery;
use crate::util::QueryParams;

/// Resolved N and M of a ranking request.
///
/// Values are not range checked: zero or negative numbers go to SQLite as
/// given. A negative limit there means "no limit".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingParams {
    pub limit: i64,
    pub min_reviews: i64,
}

impl Default for RankingParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            min_reviews: DEFAULT_MIN_REVIEWS,
        }
    }
}

impl RankingParams {
    pub fn from_query(params: &QueryParams) -> Self {
        Self {
            limit: parse_or(params.get("N"), DEFAULT_LIMIT),
            min_reviews: parse_or(params.get("M"), DEFAULT_MIN_REVIEWS),
        }
    }

    pub fn into_query(self, genre: Option<String>) -> RankingQuery {
        match genre {
            Some(genre) => RankingQuery::TopNByGenre {
                genre,
                min_reviews: self.min_reviews,
                limit: self.limit,
            },
            None => RankingQuery::TopN {
                min_reviews: self.min_reviews,
                limit: self.limit,
            },
        }
    }
}

fn parse_or(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(default)
}
