//! GDC adapter
//!
//! REST client for GDC-compatible biomedical repositories, implementing the
//! [`ClinicalRepository`](crate::adapters::repository::ClinicalRepository)
//! trait for the harvest core.

pub mod client;
pub mod models;

pub use client::GdcRepository;
