// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Error taxonomy for the redaction pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Result type for redaction operations.
pub type Result<T> = std::result::Result<T, RedactError>;

/// Errors raised while configuring or running a redaction batch.
#[derive(Error, Debug)]
pub enum RedactError {
    /// Input file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file is not a `.txt` document.
    #[error("unsupported input {} (expected a .txt file)", path.display())]
    UnsupportedExtension { path: PathBuf },

    /// The entity annotator could not process the text.
    #[error("annotation failed: {0}")]
    Annotation(String),

    /// Censored copy could not be written.
    #[error("cannot write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two inputs map to the same censored path.
    #[error("{} would overwrite the censored copy of {}", path.display(), first.display())]
    OutputCollision { path: PathBuf, first: PathBuf },

    /// Invalid run configuration, surfaced before any file is processed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A regex failed to compile.
    #[error("pattern error: {0}")]
    Pattern(String),

    /// The lexical knowledge base is unavailable or malformed.
    #[error("knowledge base error: {0}")]
    KnowledgeBase(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl RedactError {
    /// Whether the error is a usage problem the CLI should report before doing any work.
    pub fn is_configuration(&self) -> bool {
        matches!(self, RedactError::Configuration(_) | RedactError::Toml(_))
    }
}
