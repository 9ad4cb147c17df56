//! External integrations
//!
//! This module contains adapters for external systems:
//!
//! - [`repository`] - The [`ClinicalRepository`](repository::ClinicalRepository)
//!   trait, the seam between the harvest core and any remote archive
//! - [`gdc`] - GDC-compatible REST implementation of that trait
//! - [`tsv`] - Tab-separated output file writer

pub mod gdc;
pub mod repository;
pub mod tsv;
