//! create-starter library
//!
//! Scaffolds a starter project from a template package:
//! - [`catalog`] - frameworks, variants and template identifiers
//! - [`naming`] - directory and package name rules
//! - [`prompt`] - the interactive question flow
//! - [`materialize`] - copying a template package to disk
//! - [`invoker`] - package manager detection for the final instructions

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::cognitive_complexity)]
#![allow(clippy::multiple_crate_versions)]

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod invoker;
pub mod materialize;
pub mod naming;
pub mod observability;
pub mod prompt;
pub mod templates;

pub use catalog::{Catalog, Framework, Variant};
pub use config::ScaffoldConfig;
pub use error::{Result, ScaffoldError};
pub use materialize::Materializer;
pub use prompt::{FlowOutcome, PromptFlow, Prompter, ResolvedConfig};
pub use templates::TemplateStore;
