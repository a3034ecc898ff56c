// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

//! Command-line configuration and log setup.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::Level;

/// Errors raised while applying the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot install logger: {0}")]
    Logger(String),
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// TScript language server.
///
/// Speaks the Language Server Protocol over stdin and stdout.
#[derive(Debug, Parser)]
#[command(name = "tscript-lsp", version)]
pub struct Config {
    /// Append logs to this file instead of writing them to stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging (same as `--log-level debug`)
    #[arg(long)]
    pub debug: bool,

    /// Maximum level of log records to emit
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Config {
    /// The effective log level; `--debug` never lowers an explicit level.
    pub fn level(&self) -> LogLevel {
        if self.debug {
            self.log_level.max(LogLevel::Debug)
        } else {
            self.log_level
        }
    }

    /// Install the global `tracing` subscriber. Stdout carries the protocol,
    /// so logs go to stderr or the configured file.
    pub fn init_logging(&self) -> Result<(), ConfigError> {
        let builder = tracing_subscriber::fmt()
            .with_max_level(Level::from(self.level()))
            .with_target(false);

        let installed = match &self.log_file {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| ConfigError::LogFile {
                        path: path.clone(),
                        source,
                    })?;
                builder
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init()
            }
            None => builder.with_writer(std::io::stderr).try_init(),
        };
        installed.map_err(|error| ConfigError::Logger(error.to_string()))
    }
}
