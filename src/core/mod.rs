//! Core business logic abstractions

pub mod budget;
pub mod log;
pub mod submit;

// Re-export main types for cleaner imports
pub use budget::{BudgetLine, REQUIRED_COLUMNS};
pub use submit::{BatchOutcome, BatchSubmitter};
