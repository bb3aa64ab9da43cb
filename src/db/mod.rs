pub mod model;
pub mod query;
pub mod repo;
pub mod sqlite;

pub use model::*;
pub use query::RankingQuery;
pub use repo::*;
pub use sqlite::SqliteRepository;
