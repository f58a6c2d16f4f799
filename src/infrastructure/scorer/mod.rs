pub mod process_scorer;

pub use process_scorer::ProcessScorer;
