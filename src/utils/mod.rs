// Utilities
pub mod display;
pub mod error;
pub mod formatter;
