//! Domain identifier types with validation
//!
//! This module provides a newtype wrapper for cohort identifiers.
//! The type ensures type safety and provides validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cohort identifier newtype wrapper
///
/// Represents a unique identifier for a cohort (project) within the remote
/// repository, e.g. `TCGA-STAD`. Opaque to the core; its only guaranteed
/// property is non-emptiness.
///
/// # Examples
///
/// ```
/// use tabula::domain::ids::CohortId;
/// use std::str::FromStr;
///
/// let cohort_id = CohortId::from_str("TCGA-STAD").unwrap();
/// assert_eq!(cohort_id.as_str(), "TCGA-STAD");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CohortId(String);

impl CohortId {
    /// Creates a new CohortId from a string
    ///
    /// # Arguments
    ///
    /// * `id` - The cohort identifier string
    ///
    /// # Returns
    ///
    /// Returns `Ok(CohortId)` if the ID is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Cohort ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the cohort ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CohortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CohortId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for CohortId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
