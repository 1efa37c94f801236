//! Issue reporting policy options.
//!
//! This module contains the flag sets that control how deprecations, notices,
//! warnings and errors found during a run are filtered and suppressed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of an issue raised while running tests.
///
/// The `Php*` variants are raised by the PHP runtime itself; the others are
/// triggered from userland code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Deprecation,
    PhpDeprecation,
    Error,
    Notice,
    PhpNotice,
    Warning,
    PhpWarning,
}

impl IssueKind {
    pub const ALL: [IssueKind; 7] = [
        IssueKind::Deprecation,
        IssueKind::PhpDeprecation,
        IssueKind::Error,
        IssueKind::Notice,
        IssueKind::PhpNotice,
        IssueKind::Warning,
        IssueKind::PhpWarning,
    ];

    /// Snake-case name, as accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Deprecation => "deprecation",
            IssueKind::PhpDeprecation => "php_deprecation",
            IssueKind::Error => "error",
            IssueKind::Notice => "notice",
            IssueKind::PhpNotice => "php_notice",
            IssueKind::Warning => "warning",
            IssueKind::PhpWarning => "php_warning",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "deprecation" | "deprecations" => Ok(IssueKind::Deprecation),
            "php_deprecation" | "php_deprecations" => Ok(IssueKind::PhpDeprecation),
            "error" | "errors" => Ok(IssueKind::Error),
            "notice" | "notices" => Ok(IssueKind::Notice),
            "php_notice" | "php_notices" => Ok(IssueKind::PhpNotice),
            "warning" | "warnings" => Ok(IssueKind::Warning),
            "php_warning" | "php_warnings" => Ok(IssueKind::PhpWarning),
            _ => Err(format!("Unknown issue kind: {}", s)),
        }
    }
}

/// Which issue categories are only reported when they originate inside the
/// source scope.
///
/// All flags default to `false` (issues from anywhere are reported).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restrictions {
    /// Restrict deprecations to the source scope
    pub deprecations: bool,
    /// Restrict notices to the source scope
    pub notices: bool,
    /// Restrict warnings to the source scope
    pub warnings: bool,
}

impl Restrictions {
    /// No restrictions (default)
    pub fn none() -> Self {
        Self::default()
    }

    /// Restrict every category
    pub fn all() -> Self {
        Self {
            deprecations: true,
            notices: true,
            warnings: true,
        }
    }

    /// Builder: set deprecation restriction
    pub fn with_deprecations(mut self, restrict: bool) -> Self {
        self.deprecations = restrict;
        self
    }

    /// Builder: set notice restriction
    pub fn with_notices(mut self, restrict: bool) -> Self {
        self.notices = restrict;
        self
    }

    /// Builder: set warning restriction
    pub fn with_warnings(mut self, restrict: bool) -> Self {
        self.warnings = restrict;
        self
    }

    /// Whether issues of `kind` are restricted to the source scope.
    ///
    /// Runtime and userland variants share a flag. Errors are never
    /// restricted.
    pub fn applies_to(&self, kind: IssueKind) -> bool {
        match kind {
            IssueKind::Deprecation | IssueKind::PhpDeprecation => self.deprecations,
            IssueKind::Notice | IssueKind::PhpNotice => self.notices,
            IssueKind::Warning | IssueKind::PhpWarning => self.warnings,
            IssueKind::Error => false,
        }
    }
}

/// Per-category switches for overriding inline suppression (`@`) at the
/// call site of an issue.
///
/// When a flag is `true`, a suppressed issue of that category is reported
/// anyway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppressionOverrides {
    pub deprecations: bool,
    pub php_deprecations: bool,
    pub errors: bool,
    pub notices: bool,
    pub php_notices: bool,
    pub warnings: bool,
    pub php_warnings: bool,
}

impl SuppressionOverrides {
    /// Honor every suppression (default)
    pub fn none() -> Self {
        Self::default()
    }

    /// Ignore suppression for every category
    pub fn all() -> Self {
        Self {
            deprecations: true,
            php_deprecations: true,
            errors: true,
            notices: true,
            php_notices: true,
            warnings: true,
            php_warnings: true,
        }
    }

    /// Builder: set the flag for a single category
    pub fn with(mut self, kind: IssueKind, ignore: bool) -> Self {
        *self.flag_mut(kind) = ignore;
        self
    }

    /// Builder: set the userland deprecation flag
    pub fn with_deprecations(self, ignore: bool) -> Self {
        self.with(IssueKind::Deprecation, ignore)
    }

    /// Builder: set the PHP deprecation flag
    pub fn with_php_deprecations(self, ignore: bool) -> Self {
        self.with(IssueKind::PhpDeprecation, ignore)
    }

    /// Builder: set the error flag
    pub fn with_errors(self, ignore: bool) -> Self {
        self.with(IssueKind::Error, ignore)
    }

    /// Builder: set the userland notice flag
    pub fn with_notices(self, ignore: bool) -> Self {
        self.with(IssueKind::Notice, ignore)
    }

    /// Builder: set the PHP notice flag
    pub fn with_php_notices(self, ignore: bool) -> Self {
        self.with(IssueKind::PhpNotice, ignore)
    }

    /// Builder: set the userland warning flag
    pub fn with_warnings(self, ignore: bool) -> Self {
        self.with(IssueKind::Warning, ignore)
    }

    /// Builder: set the PHP warning flag
    pub fn with_php_warnings(self, ignore: bool) -> Self {
        self.with(IssueKind::PhpWarning, ignore)
    }

    /// Whether suppression of `kind` issues is ignored.
    pub fn applies_to(&self, kind: IssueKind) -> bool {
        match kind {
            IssueKind::Deprecation => self.deprecations,
            IssueKind::PhpDeprecation => self.php_deprecations,
            IssueKind::Error => self.errors,
            IssueKind::Notice => self.notices,
            IssueKind::PhpNotice => self.php_notices,
            IssueKind::Warning => self.warnings,
            IssueKind::PhpWarning => self.php_warnings,
        }
    }

    fn flag_mut(&mut self, kind: IssueKind) -> &mut bool {
        match kind {
            IssueKind::Deprecation => &mut self.deprecations,
            IssueKind::PhpDeprecation => &mut self.php_deprecations,
            IssueKind::Error => &mut self.errors,
            IssueKind::Notice => &mut self.notices,
            IssueKind::PhpNotice => &mut self.php_notices,
            IssueKind::Warning => &mut self.warnings,
            IssueKind::PhpWarning => &mut self.php_warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restrictions_default() {
        let r = Restrictions::default();
        assert!(!r.deprecations);
        assert!(!r.notices);
        assert!(!r.warnings);
    }

    #[test]
    fn test_restrictions_builder() {
        let r = Restrictions::none().with_notices(true);
        assert!(!r.deprecations);
        assert!(r.notices);
        assert!(!r.warnings);
    }

    #[test]
    fn test_restrictions_share_flag_between_variants() {
        let r = Restrictions::none().with_deprecations(true);
        assert!(r.applies_to(IssueKind::Deprecation));
        assert!(r.applies_to(IssueKind::PhpDeprecation));
        assert!(!r.applies_to(IssueKind::Notice));
        assert!(!Restrictions::all().applies_to(IssueKind::Error));
    }

    #[test]
    fn test_suppression_overrides_are_independent() {
        for kind in IssueKind::ALL {
            let overrides = SuppressionOverrides::none().with(kind, true);
            for other in IssueKind::ALL {
                assert_eq!(overrides.applies_to(other), other == kind, "{kind} vs {other}");
            }
        }
    }

    #[test]
    fn test_suppression_overrides_all() {
        let overrides = SuppressionOverrides::all().with_php_notices(false);
        assert!(overrides.errors);
        assert!(!overrides.php_notices);
    }

    #[test]
    fn test_issue_kind_from_str() {
        assert_eq!(IssueKind::from_str("warnings").unwrap(), IssueKind::Warning);
        assert_eq!(
            IssueKind::from_str("php-deprecation").unwrap(),
            IssueKind::PhpDeprecation
        );
        assert!(IssueKind::from_str("fatal").is_err());
    }

    #[test]
    fn test_issue_kind_display_roundtrips() {
        for kind in IssueKind::ALL {
            assert_eq!(IssueKind::from_str(&kind.to_string()).unwrap(), kind);
        }
    }
}
