pub mod mock;
pub mod observability;
pub mod scorer;

pub use mock::StaticScorer;
pub use scorer::ProcessScorer;
