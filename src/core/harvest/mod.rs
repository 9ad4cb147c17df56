//! Harvest pipeline
//!
//! The fetch-and-reconcile core: per-cohort retrieval with failure
//! isolation ([`orchestrator`]), schema-union reconciliation and
//! concatenation ([`merge`]), run reporting ([`summary`]), and the
//! coordinator wiring it all together ([`coordinator`]).

pub mod coordinator;
pub mod merge;
pub mod orchestrator;
pub mod summary;

pub use coordinator::HarvestCoordinator;
pub use merge::merge_tables;
pub use orchestrator::{fetch_all, HarvestSet};
pub use summary::HarvestSummary;
