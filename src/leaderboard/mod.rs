pub mod aggregate;
pub mod types;

pub use aggregate::aggregate;
pub use types::{LeaderboardResult, ScoreEntry, UserAggregate};
