//! # sourcescope
//!
//! Source scope and issue-reporting policy for a PHP test run.
//!
//! ## Overview
//!
//! A test runner needs to know which code is "ours" for two reasons: code
//! coverage only instruments files in scope, and issue reporting can drop
//! deprecations, notices and warnings that come from third-party code. This
//! library models that configuration as one immutable value, [`Source`]:
//!
//! - **Scope**: include/exclude directory and file filters
//! - **Baseline**: an optional set of already-accepted issues, which can be
//!   ignored for a single run without forgetting it
//! - **Restrictions**: report issues of a category only from inside the scope
//! - **Suppression overrides**: report issues even when suppressed with `@`
//! - **Deprecation triggers**: functions and methods that always count as
//!   deprecations
//!
//! It also provides [`ConfigurationCombined`], the event announcing the
//! merged run configuration to listeners.
//!
//! Parsing configuration files or command-line flags into these types is
//! left to the host.
//!
//! ## Example
//!
//! ```rust
//! use std::path::Path;
//! use sourcescope::{
//!     File, FileCollection, FilterDirectory, FilterDirectoryCollection, IssueKind,
//!     Restrictions, Source,
//! };
//!
//! let source = Source::builder()
//!     .include_directories(FilterDirectoryCollection::from_vec(vec![
//!         FilterDirectory::new("src").unwrap().suffix(".php"),
//!     ]))
//!     .exclude_files(FileCollection::from_vec(vec![File::new("src/bootstrap.php")]))
//!     .restrictions(Restrictions::none().with_deprecations(true))
//!     .build()
//!     .unwrap();
//!
//! assert!(source.not_empty());
//! assert!(!source.use_baseline());
//! assert!(source.includes(Path::new("src/Kernel.php")));
//! assert!(!source.includes(Path::new("src/bootstrap.php")));
//! assert!(source.restricts(IssueKind::PhpDeprecation));
//! ```

pub mod error;
pub mod event;
pub mod filter;
pub mod mapper;
pub mod options;
pub mod source;
pub mod telemetry;

pub use error::SourceError;
pub use event::{Configuration, ConfigurationCombined, Event};
pub use filter::{File, FileCollection, FilterDirectory, FilterDirectoryCollection};
pub use mapper::{map_source, map_source_in};
pub use options::{IssueKind, Restrictions, SuppressionOverrides};
pub use source::{DeprecationTriggers, Source, SourceBuilder};
pub use telemetry::{format_duration, TelemetryInfo};

/// Result type for sourcescope operations
pub type Result<T> = std::result::Result<T, SourceError>;
