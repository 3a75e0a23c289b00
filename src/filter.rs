//! Resource filtering - exclude lists and only-include lists
//!
//! Rules come in four shapes:
//!
//! ```text
//! Service             exact type
//! /::/                regex against the type
//! Service[ntp]        exact type and exact title
//! File[/\.conf$/]     exact type, regex against the title
//! ```
//!
//! Every rule is compiled once, up front. A pattern that does not compile
//! is a [`RuleSyntaxError`] and stops the run before anything is written.
//!
//! # Examples
//!
//! ```
//! use catspec::catalog::Resource;
//! use catspec::filter::ResourceFilter;
//!
//! let filter = ResourceFilter::new(&["Class", "/::/"], &[], &[]).unwrap();
//! let mut resources = vec![
//!     Resource::new("Class", "Ntp"),
//!     Resource::new("Concat::Fragment", "motd"),
//!     Resource::new("Service", "ntp"),
//! ];
//! filter.apply(&mut resources);
//! assert_eq!(resources, vec![Resource::new("Service", "ntp")]);
//! ```

use regex::Regex;
use thiserror::Error;

use crate::catalog::Resource;

/// A filter rule whose embedded pattern failed to compile
#[derive(Debug, Error)]
#[error("regexp in {rule} invalid (see your only_include and exclude lists): {source}")]
pub struct RuleSyntaxError {
    /// The offending rule string, as configured
    pub rule: String,
    /// Compilation error from the regex engine
    #[source]
    pub source: regex::Error,
}

/// A compiled filter rule
#[derive(Debug, Clone)]
pub enum FilterRule {
    /// `Type` - type equals exactly
    ExactType(String),

    /// `/pattern/` - pattern matches the type
    RegexType(Regex),

    /// `Type[title]` - type and title equal exactly
    TypeAndExactTitle {
        /// Resource type
        type_name: String,
        /// Resource title
        title: String,
    },

    /// `Type[/pattern/]` - type equals exactly, pattern matches the title
    TypeAndTitleRegex {
        /// Resource type
        type_name: String,
        /// Title pattern
        pattern: Regex,
    },
}

impl PartialEq for FilterRule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ExactType(a), Self::ExactType(b)) => a == b,
            (Self::RegexType(a), Self::RegexType(b)) => a.as_str() == b.as_str(),
            (
                Self::TypeAndExactTitle {
                    type_name: ta,
                    title: a,
                },
                Self::TypeAndExactTitle {
                    type_name: tb,
                    title: b,
                },
            ) => ta == tb && a == b,
            (
                Self::TypeAndTitleRegex {
                    type_name: ta,
                    pattern: a,
                },
                Self::TypeAndTitleRegex {
                    type_name: tb,
                    pattern: b,
                },
            ) => ta == tb && a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

/// Strip the surrounding slashes of a `/pattern/` literal
fn regex_literal(s: &str) -> Option<&str> {
    if s.len() >= 2 {
        s.strip_prefix('/').and_then(|rest| rest.strip_suffix('/'))
    } else {
        None
    }
}

impl FilterRule {
    /// Parse and compile a rule string
    pub fn parse(rule: &str) -> Result<Self, RuleSyntaxError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|source| RuleSyntaxError {
                rule: rule.to_string(),
                source,
            })
        };

        if let Some(pattern) = regex_literal(rule) {
            return Ok(Self::RegexType(compile(pattern)?));
        }

        let bracketed = rule
            .find('[')
            .and_then(|open| rule.strip_suffix(']').map(|inner| (&rule[..open], &inner[open + 1..])));

        let Some((type_name, title)) = bracketed else {
            return Ok(Self::ExactType(rule.to_string()));
        };

        let type_name = type_name.to_string();
        Ok(match regex_literal(title) {
            Some(pattern) => Self::TypeAndTitleRegex {
                type_name,
                pattern: compile(pattern)?,
            },
            None => Self::TypeAndExactTitle {
                type_name,
                title: title.to_string(),
            },
        })
    }

    /// Whether this rule selects the resource
    #[must_use]
    pub fn matches(&self, resource: &Resource) -> bool {
        match self {
            Self::ExactType(type_name) => resource.type_name == *type_name,
            Self::RegexType(pattern) => pattern.is_match(&resource.type_name),
            Self::TypeAndExactTitle { type_name, title } => resource.is(type_name, title),
            Self::TypeAndTitleRegex { type_name, pattern } => {
                resource.type_name == *type_name && pattern.is_match(&resource.title)
            },
        }
    }
}

/// Which way the rule list is applied
#[derive(Debug, Clone, PartialEq)]
pub enum FilterMode {
    /// Drop resources matching any rule
    Exclude(Vec<FilterRule>),
    /// Keep only resources matching some rule
    OnlyInclude(Vec<FilterRule>),
}

/// Filter over a resource sequence
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceFilter {
    mode: FilterMode,
}

impl ResourceFilter {
    /// Build a filter from configured rule strings
    ///
    /// A non-empty `only_include` selects only-include mode and ignores the
    /// exclude list. Otherwise `excludes` is used, minus any entry that is
    /// string-equal to one of `include_overrides`.
    pub fn new<S: AsRef<str>>(
        excludes: &[S],
        include_overrides: &[S],
        only_include: &[S],
    ) -> Result<Self, RuleSyntaxError> {
        let parse_all = |rules: Vec<&str>| {
            rules.into_iter().map(FilterRule::parse).collect::<Result<Vec<_>, _>>()
        };

        let mode = if only_include.is_empty() {
            let remaining: Vec<&str> = excludes
                .iter()
                .map(AsRef::as_ref)
                .filter(|rule| !include_overrides.iter().any(|o| o.as_ref() == *rule))
                .collect();
            log::debug!("Excluding resources matching {remaining:?}");
            FilterMode::Exclude(parse_all(remaining)?)
        } else {
            let rules: Vec<&str> = only_include.iter().map(AsRef::as_ref).collect();
            log::debug!("Only including resources matching {rules:?}");
            FilterMode::OnlyInclude(parse_all(rules)?)
        };

        Ok(Self { mode })
    }

    /// The active mode and its compiled rules
    #[must_use]
    pub const fn mode(&self) -> &FilterMode {
        &self.mode
    }

    /// Whether only-include mode is active
    #[must_use]
    pub const fn is_only_include(&self) -> bool {
        matches!(self.mode, FilterMode::OnlyInclude(_))
    }

    /// Whether a resource survives the filter
    #[must_use]
    pub fn keeps(&self, resource: &Resource) -> bool {
        match &self.mode {
            FilterMode::Exclude(rules) => !rules.iter().any(|r| r.matches(resource)),
            FilterMode::OnlyInclude(rules) => rules.iter().any(|r| r.matches(resource)),
        }
    }

    /// Remove filtered resources in place, preserving order
    pub fn apply(&self, resources: &mut Vec<Resource>) {
        let before = resources.len();
        resources.retain(|r| self.keeps(r));
        log::debug!("Filter removed {} of {before} resource(s)", before - resources.len());
    }
}
