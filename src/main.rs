// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Command-line entry point for the redactor

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, info_span};

use redactor::batch::{resolve_inputs, BatchDriver};
use redactor::logging::{generate_run_id, init_logging, LogFormat, LogLevel};
use redactor::redaction::{Categories, OverlapPolicy, RedactionConfig, RedactionEngine};
use redactor::stats::StatsTarget;
use redactor::RedactError;

/// Redact sensitive information from plain-text documents
#[derive(Parser, Debug)]
#[command(name = "redactor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Glob pattern selecting .txt files (repeatable)
    #[arg(long, required = true)]
    input: Vec<String>,

    /// Directory receiving the censored copies
    #[arg(long)]
    output: PathBuf,

    /// Redact person names
    #[arg(long)]
    names: bool,

    /// Redact dates
    #[arg(long)]
    dates: bool,

    /// Redact phone numbers
    #[arg(long)]
    phones: bool,

    /// Redact places and street addresses
    #[arg(long)]
    address: bool,

    /// Redact email usernames
    #[arg(long)]
    emails: bool,

    /// Redact sentences about this concept (repeatable)
    #[arg(long = "concept", value_name = "KEYWORD")]
    concepts: Vec<String>,

    /// Where to write statistics: stderr, stdout or a file path
    #[arg(long, value_name = "TARGET")]
    stats: Option<StatsTarget>,

    /// TOML configuration file; flags are applied on top of it
    #[arg(long, env = "REDACTOR_CONFIG")]
    config: Option<PathBuf>,

    /// Name to mask wherever it appears (repeatable)
    #[arg(long = "deny-name", value_name = "NAME")]
    deny_names: Vec<String>,

    /// Count every overlapping name match instead of once
    #[arg(long)]
    count_overlaps: bool,

    /// Match concept keywords literally, without synonyms or hypernyms
    #[arg(long)]
    no_expand: bool,

    /// JSON thesaurus replacing the built-in one
    #[arg(long, value_name = "PATH")]
    thesaurus: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Log format (human, json)
    #[arg(long, default_value = "human")]
    log_format: LogFormat,
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
enum ExitCode {
    /// The batch ran to completion, even if some files failed.
    Clean = 0,
    /// Startup failed for a reason other than bad usage.
    Failure = 1,
    /// Invalid configuration or arguments.
    Usage = 2,
}

impl ExitCode {
    fn as_i32(self) -> i32 {
        self as i32
    }
}

impl Cli {
    /// Configuration file (if any) with command-line flags layered on top.
    fn redaction_config(&self) -> Result<RedactionConfig, RedactError> {
        let mut config = match &self.config {
            Some(path) => RedactionConfig::load(path)?,
            None => RedactionConfig::default(),
        };

        config.categories.enable_from(Categories {
            names: self.names,
            dates: self.dates,
            phones: self.phones,
            address: self.address,
            emails: self.emails,
        });
        config.concepts.extend(self.concepts.iter().cloned());
        config.deny_list.extend(self.deny_names.iter().cloned());
        if self.count_overlaps {
            config.overlap_policy = OverlapPolicy::CountAll;
        }
        if self.no_expand {
            config.expand_concepts = false;
        }
        if let Some(path) = &self.thesaurus {
            config.thesaurus = Some(path.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.redaction_config()?;
    let engine = RedactionEngine::new(&config).context("failed to build redaction engine")?;
    let inputs = resolve_inputs(&cli.input).context("failed to resolve input files")?;

    info!(
        inputs = inputs.len(),
        categories = ?engine.categories(),
        "starting batch"
    );

    let stats = BatchDriver::new(engine, &cli.output).run(&inputs);

    info!(
        processed = stats.files_processed,
        failed = stats.files_failed,
        redacted = stats.counts.total(),
        "batch complete"
    );

    if let Some(target) = &cli.stats {
        target.write(&stats).context("failed to write statistics")?;
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.log_format);

    let run_id = generate_run_id();
    let _root = info_span!("run", run_id = %run_id).entered();

    let exit_code = match run(&cli) {
        Ok(()) => ExitCode::Clean,
        Err(e) => {
            let usage = e
                .downcast_ref::<RedactError>()
                .is_some_and(RedactError::is_configuration);
            eprintln!("error: {e:#}");
            if usage {
                ExitCode::Usage
            } else {
                ExitCode::Failure
            }
        }
    };

    std::process::exit(exit_code.as_i32());
}
