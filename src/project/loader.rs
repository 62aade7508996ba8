//! Materializes a [`Project`] from an SDK-style project file
//!
//! This is deliberately shallow evaluation: unconditional `PropertyGroup`
//! children become properties, `Remove` attributes on the default item types
//! become exclusion globs, and every file under the project directory (minus
//! build output folders) becomes an item. Conditional elements are skipped
//! since conditions cannot be evaluated without the full build engine.

use super::{BuildProperties, Project, ProjectItem};
use crate::error::ProjectError;
use crate::fs::FileSystem;
use roxmltree::{Document, Node};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Top-level output folders that never contribute items
pub const EXCLUDED_DIRS: [&str; 2] = ["bin", "obj"];

/// Item types whose `Remove` globs take templates out of compilation
const REMOVABLE_ITEM_TYPES: [&str; 4] = ["Content", "None", "RazorGenerate", "RazorComponent"];

const PROJECT_FILE_EXTENSION: &str = "csproj";
const ASSEMBLY_NAME_PROPERTY: &str = "AssemblyName";

pub struct ProjectLoader<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> ProjectLoader<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Resolves `path` to a project file. A directory must contain exactly one
    /// `*.csproj`.
    pub fn locate(&self, path: &Path) -> Result<PathBuf, ProjectError> {
        if self.fs.is_file(path) {
            return Ok(path.to_path_buf());
        }
        if !self.fs.is_dir(path) {
            return Err(ProjectError::NotFound(path.to_path_buf()));
        }

        let entries = self
            .fs
            .read_dir(path)
            .map_err(|e| ProjectError::io(path, e))?;

        let mut candidates: Vec<PathBuf> = entries
            .into_iter()
            .filter(|entry| entry.is_file())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case(PROJECT_FILE_EXTENSION))
            })
            .map(|entry| entry.path)
            .collect();
        candidates.sort();

        match candidates.len() {
            0 => Err(ProjectError::NoProjectFile(path.to_path_buf())),
            1 => Ok(candidates.remove(0)),
            _ => Err(ProjectError::AmbiguousProjectFile {
                dir: path.to_path_buf(),
                candidates,
            }),
        }
    }

    /// Loads the project at `path` (file or directory), layering `global`
    /// properties over the ones declared in the file.
    pub fn load(&self, path: &Path, global: &BuildProperties) -> Result<Project, ProjectError> {
        let project_file = self.locate(path)?;
        let content = self
            .fs
            .read_to_string(&project_file)
            .map_err(|e| ProjectError::io(&project_file, e))?;

        let declared = parse_project_file(&project_file, &content)?;

        let mut properties = declared.properties;
        properties.overlay(global);

        let name = properties
            .get_evaluated(ASSEMBLY_NAME_PROPERTY)
            .map(str::to_string)
            .or_else(|| {
                project_file
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
            })
            .unwrap_or_default();

        let directory = match project_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let files = self
            .fs
            .walk_files(&directory, &EXCLUDED_DIRS)
            .map_err(|e| ProjectError::io(&directory, e))?;
        let items: Vec<ProjectItem> = files.into_iter().map(ProjectItem::new).collect();

        info!(
            project = %name,
            directory = %directory.display(),
            items = items.len(),
            properties = properties.len(),
            removals = declared.removals.len(),
            "Loaded project"
        );

        Ok(Project::new(name, directory, properties, items).with_removals(declared.removals))
    }
}

#[derive(Debug, Default)]
struct DeclaredState {
    properties: BuildProperties,
    removals: Vec<String>,
}

fn parse_project_file(path: &Path, content: &str) -> Result<DeclaredState, ProjectError> {
    let doc = Document::parse(content).map_err(|source| ProjectError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let root = doc.root_element();
    if !root.has_tag_name("Project") {
        return Err(ProjectError::NotAProject(path.to_path_buf()));
    }

    let mut state = DeclaredState::default();

    for group in root.children().filter(Node::is_element) {
        if is_conditional(&group) {
            debug!(element = group.tag_name().name(), "Skipping conditional group");
            continue;
        }

        match group.tag_name().name() {
            "PropertyGroup" => {
                for property in group.children().filter(Node::is_element) {
                    if is_conditional(&property) {
                        debug!(property = property.tag_name().name(), "Skipping conditional property");
                        continue;
                    }
                    let value = property.text().map(str::trim).unwrap_or("");
                    state.properties.set(property.tag_name().name(), value);
                }
            }
            "ItemGroup" => {
                for item in group.children().filter(Node::is_element) {
                    if is_conditional(&item)
                        || !REMOVABLE_ITEM_TYPES.contains(&item.tag_name().name())
                    {
                        continue;
                    }
                    if let Some(remove) = item.attribute("Remove") {
                        state.removals.extend(
                            remove
                                .split(';')
                                .map(str::trim)
                                .filter(|s| !s.is_empty())
                                .map(str::to_string),
                        );
                    }
                }
            }
            _ => {}
        }
    }

    Ok(state)
}

fn is_conditional(node: &Node<'_, '_>) -> bool {
    node.attribute("Condition")
        .is_some_and(|c| !c.trim().is_empty())
}
