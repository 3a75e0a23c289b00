//! Error types for catalog loading, rule parsing and spec generation
//!
//! Only the variants here abort a run. Unresolved subjects, missing class
//! parameters and content that cannot be escaped are logged and degraded
//! by the stages that encounter them.

use std::path::PathBuf;

use thiserror::Error;

use crate::filter::RuleSyntaxError;

/// Fatal errors raised while generating a spec
#[derive(Debug, Error)]
pub enum Error {
    /// Configured catalog path does not exist
    #[error("{0}: not found")]
    CatalogNotFound(PathBuf),

    /// Catalog is not valid JSON or has an unexpected resource shape
    #[error("failed to parse catalog {path}: {source}")]
    CatalogParse {
        /// Catalog file path
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A filter rule could not be compiled
    #[error(transparent)]
    RuleSyntax(#[from] RuleSyntaxError),

    /// No catalog path was configured
    #[error("you must specify a catalog file via -c")]
    MissingCatalog,

    /// Configuration file could not be read or parsed
    #[error("invalid config file {path}: {message}")]
    Config {
        /// Config file path
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// IO error while reading input or writing the generated document
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for catspec operations
pub type Result<T> = std::result::Result<T, Error>;
