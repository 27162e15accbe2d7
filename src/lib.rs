//! Firebird ODBC Driver release publisher library.
//!
//! This crate provides the core functionality for reconciling a release
//! manifest against a repository's GitHub releases. It is used by the
//! `firebird-odbc-publisher` CLI binary and can be consumed
//! programmatically for testing or custom publishing workflows.
//!
//! # Modules
//!
//! - [`artefact`] - Installer archive download and extraction
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Runtime configuration and credential resolution
//! - [`error`] - Startup and per-version error types
//! - [`exec`] - Bounded external command execution
//! - [`fetch`] - Per-version installer acquisition pipeline
//! - [`gh`] - GitHub CLI adapter for the release host interface
//! - [`host`] - Release host capability interface
//! - [`manifest`] - Release manifest loading and validation
//! - [`output`] - Console output formatting
//! - [`publish`] - Release creation and asset upload
//! - [`reconcile`] - Manifest reconciliation driver

pub mod artefact;
pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod fetch;
pub mod gh;
pub mod host;
pub mod manifest;
pub mod output;
pub mod publish;
pub mod reconcile;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
