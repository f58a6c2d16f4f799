// Prediction orchestration between the HTTP layer and the scorer
pub mod pricing;
