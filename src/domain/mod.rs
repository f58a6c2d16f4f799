// Feature vector and prediction types
pub mod pricing;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
