//! catspec - Generate rspec-puppet tests from compiled Puppet catalogs
//!
//! This library turns a catalog of typed, titled resources into an rspec
//! file that asserts the presence and exact parameters of each resource,
//! with optional content checks for files.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod catalog;
pub mod config;
pub mod emit;
pub mod error;
pub mod filter;
pub mod literal;
pub mod output;
pub mod pipeline;
pub mod sanitize;
pub mod subject;
pub mod writer;

pub use catalog::{Catalog, Resource};
pub use config::GeneratorConfig;
pub use emit::GeneratedDocument;
pub use error::{Error, Result};
pub use filter::{FilterRule, ResourceFilter, RuleSyntaxError};
pub use subject::Subject;
