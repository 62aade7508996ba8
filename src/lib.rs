//! razorscope - build introspection for Razor web projects
//!
//! Answers the questions editor tooling and incremental builds ask of a
//! Razor project, reporting each answer as `<Kind>: <value>` lines:
//!
//! - which templates are up-to-date check inputs, and which compiled views
//!   assembly they produce (`UpToDateCheckInput`, `UpToDateCheckBuilt`)
//! - which file types may be reloaded without a rebuild
//!   (`UpToDateReloadFileTypes`)
//! - which files a watcher should track, with companion files such as scoped
//!   stylesheets grouped after their template (`Watch`)
//!
//! # Example Usage
//!
//! ```no_run
//! use razorscope::{introspect, BuildProperties, ProjectLoader, RealFileSystem, Target};
//! use std::path::Path;
//!
//! let fs = RealFileSystem::new();
//! let project = ProjectLoader::new(&fs)
//!     .load(Path::new("SimpleMvc"), &BuildProperties::new())
//!     .unwrap();
//!
//! for line in introspect(&project, Target::UpToDateCheck) {
//!     println!("{}", line);
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`project`]: project file loading, properties and item enumeration
//! - [`introspection`]: the three introspection targets
//! - [`fs`]: filesystem abstraction with real and in-memory implementations
//! - [`cli`]: command-line front end

pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod introspection;
pub mod project;
pub mod util;

pub use config::{ConfigError, RazorscopeConfig};
pub use error::ProjectError;
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use introspection::{
    introspect, InputOutputCollector, IntrospectionLine, ReloadTransform, ReloadTypeResolver,
    Target, UpToDateCheck, WatchEntry, WatchItemCollector,
};
pub use project::{BuildProperties, ItemKind, Project, ProjectItem, ProjectLoader};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
