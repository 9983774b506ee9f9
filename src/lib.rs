//! Stevedore publisher library.
//!
//! This crate provides the core functionality for publishing crates into a
//! git-backed local registry whose layout mirrors the crates.io index. It is
//! used by the `stevedore` CLI binary and can be consumed programmatically
//! for testing or custom publish workflows.
//!
//! # Modules
//!
//! - [`cargo`] - Build backend wrapping cargo metadata and packaging
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Registry root and upstream-index configuration
//! - [`crate_name`] - Semantic wrapper for crate names
//! - [`digest`] - SHA-256 digest newtype and artefact hashing
//! - [`entry`] - Canonical index-entry schema and metadata normalizer
//! - [`error`] - Semantic error types, all fatal
//! - [`executor`] - External command abstraction with a system implementation
//! - [`git`] - Version-control backend for staging and committing
//! - [`index`] - Replace-by-version writer for per-crate index files
//! - [`layout`] - crates.io-style path sharding under the registry root
//! - [`output`] - Progress and completion output helpers
//! - [`publish`] - Publish orchestration

pub mod cargo;
pub mod cli;
pub mod config;
pub mod crate_name;
pub mod digest;
pub mod entry;
pub mod error;
pub mod executor;
pub mod git;
pub mod index;
pub mod layout;
pub mod output;
pub mod publish;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
