//! End-to-end generation: load → normalize → resolve → filter → emit → write
//!
//! Every fatal error surfaces before [`write_document`] is called, so a
//! failed run never leaves a partial spec behind.

use crate::catalog::Catalog;
use crate::config::GeneratorConfig;
use crate::emit::{self, EmitOptions, GeneratedDocument};
use crate::error::Result;
use crate::filter::ResourceFilter;
use crate::output::GenerationSummary;
use crate::subject::Subject;
use crate::writer::write_document;

/// Build the spec for an already loaded catalog
///
/// The subject is resolved before filtering, since the default excludes
/// remove the `Class` resources it is derived from.
pub fn generate_from_catalog(
    mut catalog: Catalog,
    config: &GeneratorConfig,
) -> Result<(GeneratedDocument, GenerationSummary)> {
    let subject = Subject::resolve(&catalog, config.class_name.as_deref());

    let filter = ResourceFilter::new(
        config.excludes.as_slice(),
        config.include_overrides.as_slice(),
        config.only_include.as_slice(),
    )?;
    let total = catalog.len();
    filter.apply(&mut catalog.resources);

    let opts = EmitOptions {
        digest: config.md5sums,
        compile_test: config.compile_test,
        only_include: filter.is_only_include(),
        setup: config.setup.clone(),
    };
    let document = emit::emit(&subject, &catalog.resources, &opts);

    let summary = GenerationSummary {
        output_file: config.output_file.display().to_string(),
        class_name: subject.class_name,
        resources_total: total,
        resources_kept: catalog.len(),
        examples: document.example_count(),
        content_checks: document.content_check_count(),
        compile_test: document.has_compile_test(),
    };
    Ok((document, summary))
}

/// Load the configured catalog and build the spec without writing it
pub fn generate(config: &GeneratorConfig) -> Result<(GeneratedDocument, GenerationSummary)> {
    let catalog = Catalog::load(config.catalog_path()?)?;
    generate_from_catalog(catalog, config)
}

/// Generate the spec and write it to the configured output file
pub fn run(config: &GeneratorConfig) -> Result<GenerationSummary> {
    let (document, summary) = generate(config)?;
    write_document(&config.output_file, &document)?;
    Ok(summary)
}
