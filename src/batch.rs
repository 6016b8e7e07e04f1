// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Batch driver: glob expansion, per-file redaction and censored output

use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};
use tracing::{error, info, info_span, warn};

use crate::error::{RedactError, Result};
use crate::redaction::RedactionEngine;
use crate::stats::RunStats;

const INPUT_EXTENSION: &str = "txt";
const OUTPUT_SUFFIX: &str = ".censored";

/// A file selected for redaction and the root its output path is relative to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    pub root: PathBuf,
}

/// Expand glob `patterns` into `.txt` files, first-seen order, no duplicates.
///
/// Matches with another extension are skipped with a warning. An invalid
/// pattern is an error; a pattern matching nothing is only a warning.
pub fn resolve_inputs<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<InputFile>> {
    let mut seen = HashSet::new();
    let mut inputs = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let paths = glob::glob(pattern)
            .map_err(|e| RedactError::Pattern(format!("invalid input pattern {pattern:?}: {e}")))?;
        let root = input_root(pattern);

        let mut matched = 0;
        for entry in paths {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!(pattern, error = %e, "skipping unreadable match");
                    continue;
                }
            };
            if path.is_dir() {
                continue;
            }
            matched += 1;

            if path.extension().and_then(|e| e.to_str()) != Some(INPUT_EXTENSION) {
                let skipped = RedactError::UnsupportedExtension { path };
                warn!(error = %skipped, "skipping input");
                continue;
            }

            if seen.insert(path.clone()) {
                inputs.push(InputFile {
                    path,
                    root: root.clone(),
                });
            }
        }

        if matched == 0 {
            warn!(pattern, "input pattern matched no files");
        }
    }

    Ok(inputs)
}

/// Literal directory prefix of a glob pattern.
///
/// `docs/**/*.txt` -> `docs`; a literal file path yields its parent.
pub fn input_root(pattern: &str) -> PathBuf {
    let path = Path::new(pattern);
    let is_glob = |c: &Component| {
        c.as_os_str()
            .to_str()
            .is_some_and(|s| s.contains(['*', '?', '[', '{']))
    };

    let components: Vec<Component> = path.components().collect();
    match components.iter().position(is_glob) {
        Some(first_glob) => components[..first_glob].iter().collect(),
        None => path.parent().map(Path::to_path_buf).unwrap_or_default(),
    }
}

/// `<output>/<path relative to root>.censored`
pub fn output_path(output: &Path, input: &InputFile) -> PathBuf {
    let path = strip_cur_dir(&input.path);
    let root = strip_cur_dir(&input.root);

    let relative = match path.strip_prefix(&root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
        _ => path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| path.clone()),
    };

    let mut name = relative.into_os_string();
    name.push(OUTPUT_SUFFIX);
    output.join(name)
}

fn strip_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Runs one engine over every resolved input, one file at a time.
pub struct BatchDriver {
    engine: RedactionEngine,
    output: PathBuf,
}

impl BatchDriver {
    pub fn new(engine: RedactionEngine, output: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            output: output.into(),
        }
    }

    /// Redact one file and write its censored copy to `destination`.
    ///
    /// Counts are merged into `stats` as soon as redaction finishes, so a
    /// failed write still leaves them counted.
    pub fn process_file(
        &self,
        input: &InputFile,
        destination: &Path,
        stats: &mut RunStats,
    ) -> Result<()> {
        let text = std::fs::read_to_string(&input.path).map_err(|source| RedactError::Input {
            path: input.path.clone(),
            source,
        })?;

        let outcome = self.engine.redact(&text);
        stats.counts.merge(&outcome.counts);

        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent).map_err(|source| RedactError::Output {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(destination, outcome.text).map_err(|source| RedactError::Output {
            path: destination.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// Process every input; a failing file is reported and skipped.
    ///
    /// An input whose censored path was already written by an earlier input
    /// fails instead of overwriting it.
    pub fn run(&self, inputs: &[InputFile]) -> RunStats {
        let mut stats = RunStats::default();
        let mut written: HashMap<PathBuf, &Path> = HashMap::new();

        for input in inputs {
            let _span = info_span!("file", path = %input.path.display()).entered();
            let destination = output_path(&self.output, input);
            let result = match written.get(&destination) {
                Some(first) => Err(RedactError::OutputCollision {
                    path: input.path.clone(),
                    first: first.to_path_buf(),
                }),
                None => self.process_file(input, &destination, &mut stats),
            };

            match result {
                Ok(()) => {
                    stats.files_processed += 1;
                    info!(output = %destination.display(), "wrote censored copy");
                    written.insert(destination, &input.path);
                }
                Err(e) => {
                    stats.files_failed += 1;
                    error!(error = %e, "file failed");
                    eprintln!("error: {}: {}", input.path.display(), e);
                }
            }
        }

        stats
    }
}
