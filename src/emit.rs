//! Spec emission - renders the filtered catalog as an rspec-puppet file
//!
//! The document is built from independent sections, each a pure function
//! of the subject, the filtered resources and [`EmitOptions`]:
//!
//! ```text
//! head      require lines and `describe '<class>' do`
//! setup     pre_condition / hiera_config / facts lets (optional)
//! params    let(:params) from the Class resource (optional)
//! examples  one `it` block per resource, plus file content checks
//! tail      compile + catalog snapshot block (optional), closing `end`
//! ```

use serde_json::{Map, Value};

use crate::catalog::Resource;
use crate::config::Setup;
use crate::literal::{self, escape_single};
use crate::sanitize::{self, CONTENT_PARAM, FILE_TYPE};
use crate::subject::Subject;

/// Directory the generated spec writes compiled catalogs into
pub const CATALOGS_DIR: &str = "catalogs";

/// Flags controlling which sections and checks are emitted
#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    /// Compare MD5 digests instead of inline file content
    pub digest: bool,
    /// Emit the compile + snapshot block
    pub compile_test: bool,
    /// Only-include filtering was applied (suppresses the compile block)
    pub only_include: bool,
    /// Injected setup lets
    pub setup: Setup,
}

/// Sections of a generated spec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Requires and the opening `describe`
    Head,
    /// Injected lets from configuration
    Setup,
    /// Class parameters
    Params,
    /// Resource examples and content checks
    Examples,
    /// Compile block and closing `end`
    Tail,
}

/// The generated spec, as an ordered list of rendered sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    sections: Vec<(SectionKind, String)>,
    examples: usize,
    content_checks: usize,
    compile_test: bool,
}

impl GeneratedDocument {
    /// Rendered text of one section, if it was emitted
    #[must_use]
    pub fn section(&self, kind: SectionKind) -> Option<&str> {
        self.sections.iter().find(|(k, _)| *k == kind).map(|(_, text)| text.as_str())
    }

    /// Number of resource example blocks
    #[must_use]
    pub const fn example_count(&self) -> usize {
        self.examples
    }

    /// Number of file content check blocks
    #[must_use]
    pub const fn content_check_count(&self) -> usize {
        self.content_checks
    }

    /// Whether the compile + snapshot block was emitted
    #[must_use]
    pub const fn has_compile_test(&self) -> bool {
        self.compile_test
    }

    /// Full document text
    #[must_use]
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for GeneratedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (_, text) in &self.sections {
            f.write_str(text)?;
        }
        Ok(())
    }
}

/// Render the whole document
#[must_use]
pub fn emit(subject: &Subject, resources: &[Resource], opts: &EmitOptions) -> GeneratedDocument {
    let mut sections = vec![(SectionKind::Head, head(subject, opts))];

    if let Some(text) = setup(&opts.setup) {
        sections.push((SectionKind::Setup, text));
    }
    if let Some(text) = params(subject) {
        sections.push((SectionKind::Params, text));
    }

    let examples = examples(resources, opts);
    sections.push((SectionKind::Examples, examples.text));

    let compile_test = emits_compile_test(opts);
    sections.push((SectionKind::Tail, tail(subject, opts)));

    GeneratedDocument {
        sections,
        examples: examples.examples,
        content_checks: examples.content_checks,
        compile_test,
    }
}

/// Require lines and the opening `describe`
#[must_use]
pub fn head(subject: &Subject, opts: &EmitOptions) -> String {
    let mut out = String::from("require 'spec_helper'\n");
    if subject.has_parameters() {
        out.push_str("require 'json'\n");
    }
    if opts.digest {
        out.push_str("require 'digest'\n");
    }
    out.push_str(&format!("\ndescribe '{}' do\n", escape_single(subject.name())));
    out
}

/// Injected `let` blocks, `None` when no setup is configured
#[must_use]
pub fn setup(setup: &Setup) -> Option<String> {
    if setup.is_empty() {
        return None;
    }

    let mut out = String::new();
    if let Some(lines) = &setup.pre_condition {
        out.push_str("  let(:pre_condition) do\n    \"\"\"\n");
        for line in lines {
            out.push_str(&format!("    {line}\n"));
        }
        out.push_str("    \"\"\"\n  end\n\n");
    }
    if let Some(path) = &setup.hiera_config {
        out.push_str(&format!("  let(:hiera_config){{ '{}' }}\n\n", escape_single(path)));
    }
    if let Some(facts) = &setup.facts {
        out.push_str(&let_block("facts", facts));
    }
    Some(out)
}

/// `let(:params)` from the class parameters, `None` when there are none
#[must_use]
pub fn params(subject: &Subject) -> Option<String> {
    subject.parameters.as_ref().map(|p| let_block("params", p))
}

fn let_block(name: &str, map: &Map<String, Value>) -> String {
    let body = literal::pretty_map(map).replace('\n', "\n    ");
    format!("  let(:{name}) do\n    {body}\n  end\n\n")
}

/// Rendered example blocks and their counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleSection {
    /// Rendered text
    pub text: String,
    /// Number of resource example blocks
    pub examples: usize,
    /// Number of content check blocks
    pub content_checks: usize,
}

/// One example block per resource, in order, with content checks
#[must_use]
pub fn examples(resources: &[Resource], opts: &EmitOptions) -> ExampleSection {
    let mut section = ExampleSection::default();

    for resource in resources {
        let title = escape_single(&resource.title);
        section.text.push_str(&example(resource, &title));
        section.examples += 1;

        if let Some(content) = sanitize::content_check_target(resource) {
            let check = if opts.digest {
                digest_check(&title, &sanitize::content_digest(content))
            } else {
                content_check(&title, &sanitize::sanitize_or_raw(&resource.title, content))
            };
            section.text.push_str(&check);
            section.content_checks += 1;
        }
    }

    section
}

/// `contain_<type>` matcher name; namespace separators become `__`
#[must_use]
pub fn matcher(type_name: &str) -> String {
    format!("contain_{}", type_name.to_lowercase().replace("::", "__"))
}

fn example(resource: &Resource, title: &str) -> String {
    let type_lower = resource.type_name.to_lowercase();
    let matcher = matcher(&resource.type_name);
    let mut out = format!("  it 'is expected to contain {type_lower} {title}' do\n");

    let Some(parameters) = &resource.parameters else {
        out.push_str(&format!("    is_expected.to {matcher}('{title}')\n  end\n\n"));
        return out;
    };

    out.push_str(&format!("    is_expected.to {matcher}('{title}').with({{\n"));
    let is_file = resource.type_name == FILE_TYPE;
    for (key, value) in parameters {
        if is_file && key == CONTENT_PARAM {
            continue;
        }
        out.push_str(&format!("      '{key}' => {},\n", literal::param_value(value)));
    }
    out.push_str("    })\n  end\n\n");
    out
}

fn digest_check(title: &str, md5: &str) -> String {
    format!(
        "  it 'is expected to contain expected content for file {title}' do\n\
         \x20   content = catalogue.resource('file', '{title}').send(:parameters)[:content]\n\
         \x20   md5 = Digest::MD5.hexdigest(content)\n\
         \x20   expect(md5).to eq '{md5}'\n\
         \x20 end\n\n"
    )
}

fn content_check(title: &str, escaped: &str) -> String {
    format!(
        "  it 'is expected to contain expected content for file {title}' do\n\
         \x20   [\n\n\
         \"{escaped}\",\n\n\
         \x20   ].map{{|text| text.split(\"\\n\")}}.each do |line|\n\n\
         \x20     verify_contents(catalogue, '{title}', line)\n\
         \x20   end\n\
         \x20 end\n\n"
    )
}

const fn emits_compile_test(opts: &EmitOptions) -> bool {
    opts.compile_test && !opts.only_include
}

/// Path the generated spec writes its compiled catalog snapshot to
#[must_use]
pub fn snapshot_path(class_name: &str) -> String {
    format!("{CATALOGS_DIR}/{}.json", class_name.replace("::", "__"))
}

/// Compile + snapshot block (when enabled) and the closing `end`
#[must_use]
pub fn tail(subject: &Subject, opts: &EmitOptions) -> String {
    let mut out = String::new();
    if emits_compile_test(opts) {
        out.push_str(&format!(
            "  it 'should write a compiled catalog' do\n\
             \x20   is_expected.to compile.with_all_deps\n\
             \x20   File.write(\n\
             \x20     '{}',\n\
             \x20     PSON.pretty_generate(catalogue)\n\
             \x20   )\n\
             \x20 end\n",
            snapshot_path(subject.name())
        ));
    }
    out.push_str("end\n");
    out
}
