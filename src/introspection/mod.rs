//! Build introspection targets
//!
//! Each target answers one question about a [`Project`] and reports the answer
//! as [`IntrospectionLine`]s, rendered one per line as `<Kind>: <value>`:
//!
//! - [`Target::UpToDateCheck`]: which templates are up-to-date-check inputs and
//!   which artifact they are compiled into
//! - [`Target::UpToDateReloadFileTypes`]: which file extensions may be reloaded
//!   without a rebuild
//! - [`Target::WatchItems`]: which files to watch, templates grouped with their
//!   companion files
//!
//! Targets are independent of one another and side-effect free; running one
//! twice against unchanged project state yields identical lines.

pub mod reload;
pub mod up_to_date;
pub mod watch;

pub use reload::{ReloadTransform, ReloadTypeResolver, DEFAULT_RELOAD_FILE_TYPES};
pub use up_to_date::{BuildOutputArtifact, InputOutputCollector, UpToDateCheck};
pub use watch::{WatchEntry, WatchItemCollector};

use crate::project::Project;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

/// One reported fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum IntrospectionLine {
    UpToDateCheckInput(PathBuf),
    UpToDateCheckBuilt(PathBuf),
    UpToDateReloadFileTypes(String),
    Watch(PathBuf),
}

impl fmt::Display for IntrospectionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntrospectionLine::UpToDateCheckInput(path) => {
                write!(f, "UpToDateCheckInput: {}", path.display())
            }
            IntrospectionLine::UpToDateCheckBuilt(path) => {
                write!(f, "UpToDateCheckBuilt: {}", path.display())
            }
            IntrospectionLine::UpToDateReloadFileTypes(types) => {
                write!(f, "UpToDateReloadFileTypes: {}", types)
            }
            IntrospectionLine::Watch(path) => write!(f, "Watch: {}", path.display()),
        }
    }
}

/// Named introspection entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    UpToDateCheck,
    UpToDateReloadFileTypes,
    WatchItems,
}

impl Target {
    pub const ALL: [Target; 3] = [
        Target::UpToDateCheck,
        Target::UpToDateReloadFileTypes,
        Target::WatchItems,
    ];

    /// Target name as the build engine spells it
    pub fn name(&self) -> &'static str {
        match self {
            Target::UpToDateCheck => "_IntrospectUpToDateCheck",
            Target::UpToDateReloadFileTypes => "_IntrospectUpToDateReloadFileTypes",
            Target::WatchItems => "_IntrospectWatchItems",
        }
    }

    fn short_name(&self) -> &'static str {
        match self {
            Target::UpToDateCheck => "up-to-date",
            Target::UpToDateReloadFileTypes => "reload-types",
            Target::WatchItems => "watch",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = String;

    /// Accepts the engine name (`_IntrospectWatchItems`, optionally without the
    /// leading underscore) or the short CLI name (`watch`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_start_matches('_');
        Target::ALL
            .into_iter()
            .find(|t| {
                t.name()[1..].eq_ignore_ascii_case(wanted) || t.short_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| {
                format!(
                    "Unknown target: {}. Valid targets: {}",
                    s,
                    Target::ALL.map(|t| t.name()).join(", ")
                )
            })
    }
}

/// Runs a single target against `project`.
pub fn introspect(project: &Project, target: Target) -> Vec<IntrospectionLine> {
    let lines = match target {
        Target::UpToDateCheck => introspect_up_to_date_check(project),
        Target::UpToDateReloadFileTypes => introspect_up_to_date_reload_file_types(project),
        Target::WatchItems => introspect_watch_items(project),
    };
    debug!(target = %target, project = %project.name, lines = lines.len(), "Introspection finished");
    lines
}

/// `UpToDateCheckInput` lines for every compiled template, then
/// `UpToDateCheckBuilt` lines for the artifacts they produce.
pub fn introspect_up_to_date_check(project: &Project) -> Vec<IntrospectionLine> {
    let check = InputOutputCollector::new(project).collect();

    check
        .inputs
        .into_iter()
        .map(IntrospectionLine::UpToDateCheckInput)
        .chain(
            check
                .built
                .into_iter()
                .map(|artifact| IntrospectionLine::UpToDateCheckBuilt(artifact.path)),
        )
        .collect()
}

/// A single `UpToDateReloadFileTypes` line.
pub fn introspect_up_to_date_reload_file_types(project: &Project) -> Vec<IntrospectionLine> {
    let resolved = ReloadTypeResolver::from_properties(&project.properties).resolve();
    vec![IntrospectionLine::UpToDateReloadFileTypes(resolved)]
}

/// `Watch` lines, each template followed by its companions.
pub fn introspect_watch_items(project: &Project) -> Vec<IntrospectionLine> {
    WatchItemCollector::new(project)
        .collect()
        .into_iter()
        .flat_map(|entry| {
            std::iter::once(entry.template)
                .chain(entry.companions)
                .map(IntrospectionLine::Watch)
        })
        .collect()
}
