//! `serpent-docs` - Documentation build configuration toolkit
//!
//! This library defines the typed documentation-build configuration for
//! the Serpent Methylation Pipeline docs site, along with loading,
//! validation, and serialization of that record. Rendering the docs is
//! the job of an external generator; this crate owns the record it
//! consumes.

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
