//! Output formatting for human and JSON modes
//!
//! The generated spec itself goes to a file; this module reports what was
//! generated, either as human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of a generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    /// Where the spec was written
    pub output_file: String,
    /// Class under test, if resolved
    pub class_name: Option<String>,
    /// Resources in the catalog before filtering
    pub resources_total: usize,
    /// Resources left after filtering
    pub resources_kept: usize,
    /// Example blocks emitted
    pub examples: usize,
    /// File content checks emitted
    pub content_checks: usize,
    /// Whether the compile + snapshot block was emitted
    pub compile_test: bool,
}

impl GenerationSummary {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        println!("Writing out as {}", self.output_file.bold());
        println!(
            "  class: {}",
            self.class_name.as_deref().map_or_else(|| "(unresolved)".yellow(), |c| c.normal())
        );
        println!(
            "  {} of {} resource(s) kept, {} example(s), {} content check(s)",
            self.resources_kept, self.resources_total, self.examples, self.content_checks
        );
        if !self.compile_test {
            println!("  compile test: {}", "skipped".dimmed());
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}
