use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating and reading a project before introspection.
///
/// The collectors themselves never fail; everything here happens while the
/// project's declared state is being materialized.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Project path does not exist: {0}")]
    NotFound(PathBuf),

    #[error("No project file found in {0}")]
    NoProjectFile(PathBuf),

    #[error("Multiple project files found in {dir}: {candidates:?}. Pass the project file explicitly")]
    AmbiguousProjectFile {
        dir: PathBuf,
        candidates: Vec<PathBuf>,
    },

    #[error("{0} is not an MSBuild project (expected a <Project> root element)")]
    NotAProject(PathBuf),

    #[error("Failed to parse project file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl ProjectError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: anyhow::Error) -> Self {
        Self::Io {
            path: path.into(),
            source: err.into(),
        }
    }
}
