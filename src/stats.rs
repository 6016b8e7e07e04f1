// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Per-category counters and the end-of-run statistics report

use serde::Serialize;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{RedactError, Result};
use crate::redaction::Category;

/// Masked spans per category.
///
/// Returned by each engine call and merged explicitly; there is no global state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RedactionCounts {
    counts: BTreeMap<Category, usize>,
}

impl RedactionCounts {
    pub fn record(&mut self, category: Category, count: usize) {
        if count > 0 {
            *self.counts.entry(category).or_default() += count;
        }
    }

    pub fn merge(&mut self, other: &RedactionCounts) {
        for (category, count) in &other.counts {
            self.record(*category, *count);
        }
    }

    pub fn get(&self, category: Category) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Totals for a whole batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub counts: RedactionCounts,
    pub files_processed: usize,
    pub files_failed: usize,
}

impl RunStats {
    /// `key: value` lines, one metric per line.
    pub fn report(&self) -> String {
        let c = &self.counts;
        let lines = [
            ("names", c.get(Category::Name)),
            ("concepts", c.get(Category::Concept)),
            ("dates", c.get(Category::Date)),
            ("addresses", c.get(Category::Address)),
            ("phones", c.get(Category::Phone)),
            ("emails", c.get(Category::Email)),
            ("total redacted", c.total()),
            ("files processed", self.files_processed),
            ("files failed", self.files_failed),
        ];

        lines
            .iter()
            .map(|(key, value)| format!("{key}: {value}\n"))
            .collect()
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report())
    }
}

/// Where the statistics report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsTarget {
    Stderr,
    Stdout,
    File(PathBuf),
}

impl FromStr for StatsTarget {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "stderr" => StatsTarget::Stderr,
            "stdout" => StatsTarget::Stdout,
            path => StatsTarget::File(PathBuf::from(path)),
        })
    }
}

impl StatsTarget {
    pub fn write(&self, stats: &RunStats) -> Result<()> {
        let report = stats.report();
        match self {
            StatsTarget::Stderr => std::io::stderr().write_all(report.as_bytes())?,
            StatsTarget::Stdout => std::io::stdout().write_all(report.as_bytes())?,
            StatsTarget::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(|source| RedactError::Output {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }
                std::fs::write(path, report).map_err(|source| RedactError::Output {
                    path: path.clone(),
                    source,
                })?;
            }
        }
        Ok(())
    }
}
