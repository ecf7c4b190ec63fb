//! plugtest core library.
//!
//! This crate exposes programmatic APIs for discovering plugin packages,
//! validating their components, and scoring plugin quality.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `discover`: Plugin discovery on disk with glob name filtering.
//! - `frontmatter`: Splits component files into YAML front matter and body.
//! - `models`: Issues, validation results, component records, score reports.
//! - `rules`: Reusable checks (naming, required fields, description quality, injection).
//! - `validators`: Per-component-kind validators and their dispatch table.
//! - `scoring`: Aggregation of component results into a plugin report.
//! - `runner`: Orchestration of discovery, validation, and scoring.
//! - `output`: Human/JSON printers.
//! - `error`: Crate error type.
pub mod cli;
pub mod config;
pub mod discover;
pub mod error;
pub mod frontmatter;
pub mod models;
pub mod output;
pub mod rules;
pub mod runner;
pub mod scoring;
pub mod validators;

pub use error::{Error, Result};
pub use models::{Severity, ValidationIssue, ValidationResult};
pub use runner::Runner;
