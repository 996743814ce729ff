//! Skill directory packaging with ignore-rule filtering.
//!
//! `skillpack-core` turns a skill directory into a distributable `.skill`
//! archive (a deflate-compressed ZIP). The directory must contain a
//! `SKILL.md` descriptor that passes validation; files matched by patterns
//! in an optional `.skillignore` file are left out.
//!
//! # Examples
//!
//! ```no_run
//! use skillpack_core::PackageRequest;
//! use skillpack_core::package_skill;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = PackageRequest::new("skills/my-skill").with_output_dir("dist");
//! let report = package_skill(&request)?;
//! println!(
//!     "Packaged {} files ({} excluded) into {}",
//!     report.files_added,
//!     report.files_excluded,
//!     report.archive_path.display()
//! );
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod builder;
pub mod config;
pub mod error;
pub mod ignore;
pub mod matcher;
pub mod package;
pub mod report;
pub mod validation;

// Re-export main API types
pub use builder::build_archive;
pub use builder::build_archive_with_progress;
pub use config::PackageConfig;
pub use error::PackageError;
pub use error::Result;
pub use matcher::ExclusionPattern;
pub use matcher::is_excluded;
pub use package::PackageRequest;
pub use package::Packager;
pub use package::PreparedPackage;
pub use package::package_skill;
pub use report::NoopProgress;
pub use report::PackageReport;
pub use report::ProgressCallback;
pub use validation::SkillValidator;
pub use validation::ValidationOutcome;
pub use validation::Validator;
