//! The source scope of a test run.
//!
//! A [`Source`] is built once while the run configuration is assembled and
//! then shared read-only. It answers two kinds of questions:
//!
//! - **Scope**: which directories and files count as "our" code, used by
//!   code coverage and by scope-restricted issue reporting
//! - **Policy**: whether a baseline applies, which issue categories are
//!   restricted to the scope, and which inline suppressions are overridden
//!
//! ## Example
//!
//! ```rust
//! use sourcescope::{FilterDirectory, FilterDirectoryCollection, Source};
//!
//! let source = Source::builder()
//!     .baseline("qa/baseline.xml")
//!     .ignore_baseline(true)
//!     .include_directories(FilterDirectoryCollection::from_vec(vec![
//!         FilterDirectory::new("src").unwrap().suffix(".php"),
//!     ]))
//!     .build()
//!     .unwrap();
//!
//! assert!(source.has_baseline());
//! assert!(!source.use_baseline());
//! assert_eq!(source.baseline().unwrap(), "qa/baseline.xml");
//! assert!(source.not_empty());
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SourceError;
use crate::filter::{FileCollection, FilterDirectoryCollection};
use crate::options::{IssueKind, Restrictions, SuppressionOverrides};
use crate::Result;

/// Functions and methods whose invocation always counts as a deprecation.
///
/// Methods are written as `Class::method`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprecationTriggers {
    pub functions: Vec<String>,
    pub methods: Vec<String>,
}

impl DeprecationTriggers {
    /// Create triggers from function and method names in order.
    pub fn new(functions: Vec<String>, methods: Vec<String>) -> Self {
        Self { functions, methods }
    }

    /// True if neither functions nor methods are listed.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.methods.is_empty()
    }

    /// Check if calling `function` always counts as a deprecation.
    pub fn is_function_trigger(&self, function: &str) -> bool {
        self.functions.iter().any(|f| f == function)
    }

    /// Check if calling `class::method` always counts as a deprecation.
    pub fn is_method_trigger(&self, class: &str, method: &str) -> bool {
        self.methods.iter().any(|m| {
            m.split_once("::")
                .is_some_and(|(c, name)| c == class && name == method)
        })
    }

    fn validate(&self) -> Result<()> {
        if self.functions.iter().any(String::is_empty) {
            return Err(SourceError::EmptyDeprecationTrigger { kind: "function" });
        }
        if self.methods.iter().any(String::is_empty) {
            return Err(SourceError::EmptyDeprecationTrigger { kind: "method" });
        }
        Ok(())
    }
}

/// Immutable source scope and issue policy for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Source {
    baseline: Option<String>,
    ignore_baseline: bool,
    include_directories: FilterDirectoryCollection,
    include_files: FileCollection,
    exclude_directories: FilterDirectoryCollection,
    exclude_files: FileCollection,
    restrictions: Restrictions,
    suppression_overrides: SuppressionOverrides,
    deprecation_triggers: DeprecationTriggers,
}

impl Source {
    /// Start building a source.
    pub fn builder() -> SourceBuilder {
        SourceBuilder::default()
    }

    /// True if a baseline is configured and not ignored for this run.
    ///
    /// Check this before loading a baseline; [`has_baseline`](Self::has_baseline)
    /// only reports that one is configured.
    pub fn use_baseline(&self) -> bool {
        self.has_baseline() && !self.ignore_baseline
    }

    /// True if a baseline is configured, whether or not it is used.
    ///
    /// ```rust
    /// use sourcescope::Source;
    ///
    /// let source = Source::builder().baseline("b.xml").ignore_baseline(true).build().unwrap();
    /// assert!(source.has_baseline());
    /// assert!(!source.use_baseline());
    /// ```
    pub fn has_baseline(&self) -> bool {
        self.baseline.is_some()
    }

    /// The configured baseline.
    ///
    /// Fails with [`SourceError::NoBaseline`] when none is configured, even if
    /// the caller only wanted to peek.
    pub fn baseline(&self) -> Result<&str> {
        self.baseline.as_deref().ok_or(SourceError::NoBaseline)
    }

    /// Directories whose files are in scope.
    pub fn include_directories(&self) -> &FilterDirectoryCollection {
        &self.include_directories
    }

    /// Individual files in scope.
    pub fn include_files(&self) -> &FileCollection {
        &self.include_files
    }

    /// Directories removed from the scope.
    pub fn exclude_directories(&self) -> &FilterDirectoryCollection {
        &self.exclude_directories
    }

    /// Individual files removed from the scope.
    pub fn exclude_files(&self) -> &FileCollection {
        &self.exclude_files
    }

    /// True if anything is included. Excludes are not considered.
    pub fn not_empty(&self) -> bool {
        self.include_directories.not_empty() || self.include_files.not_empty()
    }

    /// Only report deprecations raised inside the scope.
    pub fn restrict_deprecations(&self) -> bool {
        self.restrictions.deprecations
    }

    /// Only report notices raised inside the scope.
    pub fn restrict_notices(&self) -> bool {
        self.restrictions.notices
    }

    /// Only report warnings raised inside the scope.
    pub fn restrict_warnings(&self) -> bool {
        self.restrictions.warnings
    }

    /// Report suppressed userland deprecations anyway.
    pub fn ignore_suppression_of_deprecations(&self) -> bool {
        self.suppression_overrides.deprecations
    }

    /// Report suppressed PHP deprecations anyway.
    pub fn ignore_suppression_of_php_deprecations(&self) -> bool {
        self.suppression_overrides.php_deprecations
    }

    /// Report suppressed errors anyway.
    pub fn ignore_suppression_of_errors(&self) -> bool {
        self.suppression_overrides.errors
    }

    /// Report suppressed userland notices anyway.
    pub fn ignore_suppression_of_notices(&self) -> bool {
        self.suppression_overrides.notices
    }

    /// Report suppressed PHP notices anyway.
    pub fn ignore_suppression_of_php_notices(&self) -> bool {
        self.suppression_overrides.php_notices
    }

    /// Report suppressed userland warnings anyway.
    pub fn ignore_suppression_of_warnings(&self) -> bool {
        self.suppression_overrides.warnings
    }

    /// Report suppressed PHP warnings anyway.
    pub fn ignore_suppression_of_php_warnings(&self) -> bool {
        self.suppression_overrides.php_warnings
    }

    /// Functions and methods that always count as deprecations.
    pub fn deprecation_triggers(&self) -> &DeprecationTriggers {
        &self.deprecation_triggers
    }

    /// All scope restriction flags.
    pub fn restrictions(&self) -> Restrictions {
        self.restrictions
    }

    /// All suppression override flags.
    pub fn suppression_overrides(&self) -> SuppressionOverrides {
        self.suppression_overrides
    }

    /// Whether issues of `kind` are only reported inside the scope.
    pub fn restricts(&self, kind: IssueKind) -> bool {
        self.restrictions.applies_to(kind)
    }

    /// Whether a suppressed issue of `kind` is reported anyway.
    pub fn ignores_suppression_of(&self, kind: IssueKind) -> bool {
        self.suppression_overrides.applies_to(kind)
    }

    /// Copy of this source with the four filter sets replaced.
    pub(crate) fn with_scope(
        &self,
        include_directories: FilterDirectoryCollection,
        include_files: FileCollection,
        exclude_directories: FilterDirectoryCollection,
        exclude_files: FileCollection,
    ) -> Source {
        Source {
            include_directories,
            include_files,
            exclude_directories,
            exclude_files,
            ..self.clone()
        }
    }
}

/// Builder for [`Source`].
///
/// All settings default to "off": no baseline, empty scope, no restrictions,
/// suppressions honored and no deprecation triggers.
#[derive(Debug, Clone, Default)]
pub struct SourceBuilder {
    source: Source,
}

impl SourceBuilder {
    /// Set the baseline.
    pub fn baseline(mut self, baseline: impl Into<String>) -> Self {
        self.source.baseline = Some(baseline.into());
        self
    }

    /// Set or clear the baseline.
    pub fn maybe_baseline(mut self, baseline: Option<String>) -> Self {
        self.source.baseline = baseline;
        self
    }

    /// Keep the baseline configured but do not use it this run.
    pub fn ignore_baseline(mut self, ignore: bool) -> Self {
        self.source.ignore_baseline = ignore;
        self
    }

    /// Set the included directories.
    pub fn include_directories(mut self, directories: FilterDirectoryCollection) -> Self {
        self.source.include_directories = directories;
        self
    }

    /// Set the included files.
    pub fn include_files(mut self, files: FileCollection) -> Self {
        self.source.include_files = files;
        self
    }

    /// Set the excluded directories.
    pub fn exclude_directories(mut self, directories: FilterDirectoryCollection) -> Self {
        self.source.exclude_directories = directories;
        self
    }

    /// Set the excluded files.
    pub fn exclude_files(mut self, files: FileCollection) -> Self {
        self.source.exclude_files = files;
        self
    }

    /// Set the scope restriction flags.
    pub fn restrictions(mut self, restrictions: Restrictions) -> Self {
        self.source.restrictions = restrictions;
        self
    }

    /// Set the suppression override flags.
    pub fn suppression_overrides(mut self, overrides: SuppressionOverrides) -> Self {
        self.source.suppression_overrides = overrides;
        self
    }

    /// Set the deprecation triggers.
    pub fn deprecation_triggers(mut self, triggers: DeprecationTriggers) -> Self {
        self.source.deprecation_triggers = triggers;
        self
    }

    /// Validate and build the source.
    ///
    /// Rejects an empty baseline and empty deprecation trigger names.
    pub fn build(self) -> Result<Source> {
        let source = self.source;

        if source.baseline.as_deref() == Some("") {
            return Err(SourceError::EmptyBaseline);
        }
        source.deprecation_triggers.validate()?;

        debug!(
            has_baseline = source.has_baseline(),
            use_baseline = source.use_baseline(),
            not_empty = source.not_empty(),
            "source configured"
        );

        Ok(source)
    }
}
