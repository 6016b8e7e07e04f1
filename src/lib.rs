// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Redacts names, dates, phone numbers, addresses, email usernames and
// concept-bearing sentences from plain-text documents

//! # Example
//!
//! ```
//! use redactor::redaction::{Categories, RedactionConfig, RedactionEngine};
//!
//! let config = RedactionConfig {
//!     categories: Categories { names: true, phones: true, ..Default::default() },
//!     ..Default::default()
//! };
//! let engine = RedactionEngine::new(&config).unwrap();
//!
//! let outcome = engine.redact("John Doe: call me at 123-456-7890.");
//! assert_eq!(outcome.text, "████ ███: call me at ████████████.");
//! assert_eq!(outcome.counts.total(), 2);
//! ```

pub mod batch;
pub mod error;
pub mod logging;
pub mod redaction;
pub mod stats;

pub use error::{RedactError, Result};
