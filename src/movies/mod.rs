pub mod handlers;
pub mod params;
pub mod types;

pub use handlers::*;
pub use params::RankingParams;
pub use types::Envelope;
