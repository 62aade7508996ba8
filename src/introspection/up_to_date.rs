//! Up-to-date check inputs and outputs
//!
//! The incremental build skips compilation when every input is older than
//! every built artifact. Templates are inputs; the compiled views assembly is
//! the artifact.

use crate::project::{has_unevaluated_reference, Project, VIEW_EXTENSION};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Legacy view compilation switch; defaults to enabled
pub const COMPILE_ON_BUILD_PROPERTY: &str = "RazorCompileOnBuild";

const CONFIGURATION_PROPERTY: &str = "Configuration";
const TARGET_FRAMEWORK_PROPERTY: &str = "TargetFramework";
const TARGET_FRAMEWORKS_PROPERTY: &str = "TargetFrameworks";
const BASE_INTERMEDIATE_OUTPUT_PROPERTY: &str = "BaseIntermediateOutputPath";
const INTERMEDIATE_OUTPUT_PROPERTY: &str = "IntermediateOutputPath";

const DEFAULT_CONFIGURATION: &str = "Debug";
const DEFAULT_BASE_INTERMEDIATE_OUTPUT: &str = "obj";

/// A binary produced from the project's templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildOutputArtifact {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpToDateCheck {
    /// `UpToDateCheckInput` entries
    pub inputs: Vec<PathBuf>,
    /// `UpToDateCheckBuilt` entries
    pub built: Vec<BuildOutputArtifact>,
}

pub struct InputOutputCollector<'a> {
    project: &'a Project,
}

impl<'a> InputOutputCollector<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    pub fn collect(&self) -> UpToDateCheck {
        let templates = self.project.templates();

        let has_views = templates
            .iter()
            .any(|t| t.extension.eq_ignore_ascii_case(VIEW_EXTENSION));

        let inputs: Vec<PathBuf> = templates.into_iter().map(|t| t.path.clone()).collect();

        let built = if has_views {
            self.views_artifact().into_iter().collect()
        } else {
            Vec::new()
        };

        debug!(
            project = %self.project.name,
            inputs = inputs.len(),
            built = built.len(),
            "Collected up-to-date check items"
        );

        UpToDateCheck { inputs, built }
    }

    /// `<intermediate dir>/<ProjectName>.Views.dll`, or `None` when view
    /// compilation is off or no target framework can be determined.
    pub fn views_artifact(&self) -> Option<BuildOutputArtifact> {
        if !self
            .project
            .properties
            .get_bool(COMPILE_ON_BUILD_PROPERTY, true)
        {
            debug!(project = %self.project.name, "View compilation disabled");
            return None;
        }

        let dir = self.intermediate_output_dir()?;
        Some(BuildOutputArtifact {
            path: dir.join(format!("{}.Views.dll", self.project.name)),
        })
    }

    /// Per-configuration, per-framework intermediate output directory,
    /// relative to the project unless configured as an absolute path.
    pub fn intermediate_output_dir(&self) -> Option<PathBuf> {
        let props = &self.project.properties;

        if let Some(explicit) = props.get_evaluated(INTERMEDIATE_OUTPUT_PROPERTY) {
            return Some(native_path(explicit));
        }

        let Some(framework) = self.target_framework() else {
            warn!(
                project = %self.project.name,
                "No target framework set; cannot derive the compiled views path"
            );
            return None;
        };

        let configuration = props
            .get_evaluated(CONFIGURATION_PROPERTY)
            .unwrap_or(DEFAULT_CONFIGURATION);
        let base = props
            .get_evaluated(BASE_INTERMEDIATE_OUTPUT_PROPERTY)
            .unwrap_or(DEFAULT_BASE_INTERMEDIATE_OUTPUT);

        Some(native_path(base).join(configuration).join(framework))
    }

    /// `TargetFramework`, falling back to the first of `TargetFrameworks`.
    pub fn target_framework(&self) -> Option<String> {
        let props = &self.project.properties;
        props
            .get_evaluated(TARGET_FRAMEWORK_PROPERTY)
            .map(str::to_string)
            .or_else(|| {
                props
                    .get_list(TARGET_FRAMEWORKS_PROPERTY)
                    .into_iter()
                    .find(|tfm| !has_unevaluated_reference(tfm))
            })
    }
}

/// Turns an MSBuild path (either separator, optional trailing slash) into a
/// native path.
fn native_path(value: &str) -> PathBuf {
    let normalized = value.replace('\\', "/");
    let mut path = if normalized.starts_with('/') {
        PathBuf::from("/")
    } else {
        PathBuf::new()
    };
    for segment in normalized.split('/').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path
}
