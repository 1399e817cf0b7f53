//
//  jenkins-cli
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Renders command results either as human-readable text (with optional
//! color) or as pretty-printed JSON for scripting.
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: the available formats
//! - [`OutputWriter`]: writes values and status messages in the chosen format
//! - [`TextOutput`]: implemented by types that have a text rendering
//!
//! ## Example
//!
//! ```rust,ignore
//! use jenkins_cli::output::{OutputFormat, OutputWriter};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write(&outcome)?;
//! ```

use console::style;
use serde::Serialize;

/// Represents the available output formats for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text with optional color support.
    #[default]
    Text,
    /// Pretty-printed JSON for scripting and automation.
    Json,
}

/// A unified output writer that handles both output formats.
///
/// Values go to stdout. Errors and warnings go to stderr so they never mix
/// with JSON output.
#[derive(Debug, Clone, Copy)]
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a writer; color follows the terminal's capabilities.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Returns `true` when writing JSON.
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Writes a value in the configured format.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn write<T: Serialize + TextOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(value)?);
            }
            OutputFormat::Text => value.print_text(self.color),
        }
        Ok(())
    }

    /// Writes an error message to stderr.
    pub fn write_error(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {msg}");
        }
    }

    /// Writes a warning message to stderr.
    pub fn write_warning(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {msg}");
        }
    }

    /// Writes an informational line; suppressed in JSON mode.
    pub fn write_info(&self, msg: &str) {
        if !self.is_json() {
            println!("{msg}");
        }
    }
}

/// Types with a human-readable text rendering.
pub trait TextOutput {
    /// Prints the value as text to stdout.
    fn print_text(&self, color: bool);
}

/// Prints a bold header followed by an underline.
pub fn print_header(text: &str, color: bool) {
    if color {
        println!("{}", style(text).bold());
    } else {
        println!("{text}");
    }
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints an indented `key: value` line, dimming the key when colored.
pub fn print_field(key: &str, value: &str, color: bool) {
    if color {
        println!("  {}: {}", style(key).dim(), value);
    } else {
        println!("  {key}: {value}");
    }
}
