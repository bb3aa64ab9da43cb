//! SQL for the ranking endpoints.
//!
//! Caller input only ever reaches SQLite as bound parameters. The fixed
//! top-10 query has no caller input, so its threshold and limit are literal.

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_MIN_REVIEWS: i64 = 100;

pub const ALL_MOVIES_SQL: &str = "SELECT * FROM Movies ORDER BY Movie_ID";

const TOP10_SQL: &str = "\
SELECT Movies.Movie_ID, Title,
       COUNT(Rating) AS NumReviews, AVG(Rating) AS AvgRating
  FROM Movies
 INNER JOIN Ratings ON Movies.Movie_ID = Ratings.Movie_ID
 GROUP BY Movies.Movie_ID
HAVING COUNT(Rating) >= 100
 ORDER BY AVG(Rating) DESC, Title ASC
 LIMIT 10";

const TOP_N_SQL: &str = "\
SELECT Movies.Movie_ID, Title,
       COUNT(Rating) AS NumReviews, AVG(Rating) AS AvgRating
  FROM Movies
 INNER JOIN Ratings ON Movies.Movie_ID = Ratings.Movie_ID
 GROUP BY Movies.Movie_ID
HAVING NumReviews >= ?
 ORDER BY AvgRating DESC, Title ASC
 LIMIT ?";

const TOP_N_BY_GENRE_SQL: &str = "\
SELECT Movies.Movie_ID, Title, Genre_Name,
       COUNT(Rating) AS NumReviews, AVG(Rating) AS AvgRating
  FROM Movies
 INNER JOIN Ratings ON Movies.Movie_ID = Ratings.Movie_ID
 INNER JOIN Movie_Genres ON Movies.Movie_ID = Movie_Genres.Movie_ID
 INNER JOIN Genres ON Genres.Genre_ID = Movie_Genres.Genre_ID
 WHERE Genre_Name LIKE ?
 GROUP BY Movies.Movie_ID
HAVING NumReviews >= ?
 ORDER BY AvgRating DESC, Title ASC
 LIMIT ?";

/// The three shapes a ranking request can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankingQuery {
    Top10,
    TopN {
        min_reviews: i64,
        limit: i64,
    },
    /// `genre` is a LIKE pattern; `%` and `_` in it act as wildcards.
    TopNByGenre {
        genre: String,
        min_reviews: i64,
        limit: i64,
    },
}

/// A value bound to a `?` placeholder, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bind<'a> {
    Int(i64),
    Text(&'a str),
}

impl RankingQuery {
    pub fn sql(&self) -> &'static str {
        match self {
            RankingQuery::Top10 => TOP10_SQL,
            RankingQuery::TopN { .. } => TOP_N_SQL,
            RankingQuery::TopNByGenre { .. } => TOP_N_BY_GENRE_SQL,
        }
    }

    pub fn binds(&self) -> Vec<Bind<'_>> {
        match self {
            RankingQuery::Top10 => Vec::new(),
            RankingQuery::TopN { min_reviews, limit } => {
                vec![Bind::Int(*min_reviews), Bind::Int(*limit)]
            }
            RankingQuery::TopNByGenre {
                genre,
                min_reviews,
                limit,
            } => vec![
                Bind::Text(genre.as_str()),
                Bind::Int(*min_reviews),
                Bind::Int(*limit),
            ],
        }
    }
}
