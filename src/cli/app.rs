//! CLI definitions and entry point

use std::path::PathBuf;

use clap::Parser;

use super::commands;
use catspec::output::OutputMode;

/// catspec - Generate rspec-puppet tests from a compiled catalog
#[derive(Parser, Debug)]
#[command(
    name = "catspec",
    version,
    about = "Generate rspec-puppet tests from a compiled catalog",
    long_about = "Rewrite a compiled Puppet catalog as an rspec-puppet spec file.\n\n\
                  Every resource left after filtering becomes an example asserting\n\
                  its presence and exact parameters; file content is checked inline\n\
                  or by MD5 digest."
)]
pub struct Cli {
    /// Path to a YAML or TOML config file (replaces the built-in defaults)
    #[arg(short = 'f', long = "config", value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the catalog JSON file
    #[arg(short = 'c', long, value_name = "CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Class (or node) name under test
    #[arg(short = 'C', long = "class", value_name = "CLASS")]
    pub class_name: Option<String>,

    /// Path to the output rspec file
    #[arg(short, long, value_name = "OUTPUTFILE")]
    pub output: Option<PathBuf>,

    /// Resources to exclude. String or /regexp/. Repeat to exclude several
    #[arg(short = 'x', long = "exclude", value_name = "RESOURCE")]
    pub excludes: Vec<String>,

    /// Resources to include despite the exclude list
    #[arg(short = 'i', long = "include", value_name = "RESOURCE")]
    pub includes: Vec<String>,

    /// Only include these resources and exclude everything else. Regexp supported
    #[arg(short = 'I', long = "only-include", value_name = "RESOURCE")]
    pub only_include: Vec<String>,

    /// Use md5sums instead of full file content to validate file content
    #[arg(short, long)]
    pub md5sums: bool,

    /// Include the catalog compilation test
    #[arg(short = 't', long = "compile-test", overrides_with = "no_compile_test")]
    pub compile_test: bool,

    /// Exclude the catalog compilation test
    #[arg(long = "no-compile-test", overrides_with = "compile_test")]
    pub no_compile_test: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Explicit compile-test choice, `None` to keep the configured value
    #[must_use]
    pub const fn compile_test_choice(&self) -> Option<bool> {
        if self.no_compile_test {
            Some(false)
        } else if self.compile_test {
            Some(true)
        } else {
            None
        }
    }
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    commands::generate(&cli, output_mode)
}
