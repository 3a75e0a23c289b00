//! Generate command - write a spec file from a catalog

use anyhow::Context;
use catspec::config::GeneratorConfig;
use catspec::output::OutputMode;
use catspec::pipeline;

use crate::cli::app::Cli;

/// Layer command-line flags over the loaded configuration
pub fn build_config(cli: &Cli) -> anyhow::Result<GeneratorConfig> {
    let mut config = GeneratorConfig::load_or_default(cli.config.as_deref())?;

    if let Some(catalog) = &cli.catalog {
        config.catalog_file = Some(catalog.clone());
    }
    if let Some(class_name) = &cli.class_name {
        config.class_name = Some(class_name.clone());
    }
    if let Some(output) = &cli.output {
        config.output_file.clone_from(output);
    }
    for rule in &cli.excludes {
        config.exclude(rule.as_str());
    }
    for rule in &cli.includes {
        config.include(rule.as_str());
    }
    for rule in &cli.only_include {
        config.only_include(rule.as_str());
    }
    if cli.md5sums {
        config.md5sums = true;
    }
    if let Some(compile_test) = cli.compile_test_choice() {
        config.compile_test = compile_test;
    }

    Ok(config)
}

/// Generate the spec and report what was written
pub fn generate(cli: &Cli, mode: OutputMode) -> anyhow::Result<()> {
    let config = build_config(cli)?;
    let summary = pipeline::run(&config).context("spec generation failed")?;
    summary.render(mode);
    Ok(())
}
