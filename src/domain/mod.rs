//! Domain models and types for Tabula.
//!
//! This module contains the core domain models, types, and business rules:
//!
//! - **Strongly-typed identifiers** ([`CohortId`])
//! - **Record tables and column sets** ([`RecordTable`], [`ColumnSet`])
//! - **Error types** ([`TabulaError`], [`RepositoryError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Cohort identifiers use the newtype pattern so they cannot be confused with
//! arbitrary strings:
//!
//! ```rust
//! use tabula::domain::CohortId;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cohort_id = CohortId::new("TCGA-STAD")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, TabulaError>`](Result):
//!
//! ```rust,no_run
//! use tabula::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = tabula::config::load_config("tabula.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod result;
pub mod table;

// Re-export commonly used types for convenience
pub use errors::{RepositoryError, TabulaError};
pub use ids::CohortId;
pub use result::Result;
pub use table::{ColumnSet, RecordTable};
