//! File-watch registration for templates and their companion files
//!
//! A companion lives next to its template and is named after it with one extra
//! suffix: `Pages/Index.razor.css` (scoped styles) and `Pages/Index.razor.js`
//! (collocated module) both belong to `Pages/Index.razor`.

use crate::project::Project;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Companion suffixes used when the project does not override them
pub const DEFAULT_COMPANION_SUFFIXES: [&str; 2] = [".css", ".js"];

/// `;`-separated companion suffix override
pub const COMPANION_SUFFIXES_PROPERTY: &str = "RazorWatchCompanionSuffixes";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchEntry {
    pub template: PathBuf,
    pub companions: Vec<PathBuf>,
}

pub struct WatchItemCollector<'a> {
    project: &'a Project,
    suffixes: Vec<String>,
}

impl<'a> WatchItemCollector<'a> {
    pub fn new(project: &'a Project) -> Self {
        let mut suffixes = project.properties.get_list(COMPANION_SUFFIXES_PROPERTY);
        if suffixes.is_empty() {
            suffixes = DEFAULT_COMPANION_SUFFIXES.map(str::to_string).to_vec();
        }
        Self { project, suffixes }
    }

    pub fn with_suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.suffixes = suffixes;
        self
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// One entry per template in declaration order, companions in declaration
    /// order within each entry.
    pub fn collect(&self) -> Vec<WatchEntry> {
        let templates = self.project.templates();

        let mut companions: HashMap<PathBuf, Vec<PathBuf>> = HashMap::new();
        for item in self.project.retained_items() {
            if item.is_template() {
                continue;
            }
            if let Some(owner) = item.companion_owner(&self.suffixes) {
                companions.entry(owner).or_default().push(item.path.clone());
            }
        }

        let entries: Vec<WatchEntry> = templates
            .into_iter()
            .map(|template| WatchEntry {
                template: template.path.clone(),
                companions: companions.remove(&template.path).unwrap_or_default(),
            })
            .collect();

        debug!(
            project = %self.project.name,
            templates = entries.len(),
            companions = entries.iter().map(|e| e.companions.len()).sum::<usize>(),
            "Collected watch items"
        );

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{BuildProperties, ProjectItem};

    fn project(paths: &[&str], properties: BuildProperties) -> Project {
        let items = paths.iter().map(|p| ProjectItem::new(*p)).collect();
        Project::new("ComponentApp", "/src", properties, items)
    }

    #[test]
    fn test_component_app() {
        let project = project(
            &["App.razor", "Index.razor", "Index.razor.css", "Program.cs"],
            BuildProperties::new(),
        );

        let entries = WatchItemCollector::new(&project).collect();

        assert_eq!(
            entries,
            vec![
                WatchEntry {
                    template: PathBuf::from("App.razor"),
                    companions: vec![],
                },
                WatchEntry {
                    template: PathBuf::from("Index.razor"),
                    companions: vec![PathBuf::from("Index.razor.css")],
                },
            ]
        );
    }

    #[test]
    fn test_companions_require_same_directory() {
        let project = project(
            &["Pages/Index.razor", "Shared/Index.razor.css", "Shared/Nav.razor"],
            BuildProperties::new(),
        );

        let entries = WatchItemCollector::new(&project).collect();

        assert!(entries.iter().all(|e| e.companions.is_empty()));
    }

    #[test]
    fn test_js_and_css_companions_in_declaration_order() {
        let project = project(
            &[
                "Pages/Counter.razor",
                "Pages/Counter.razor.css",
                "Pages/Counter.razor.js",
                "Pages/Counter.razor.less",
                "Views/Home/Index.cshtml",
                "Views/Home/Index.cshtml.css",
            ],
            BuildProperties::new(),
        );

        let entries = WatchItemCollector::new(&project).collect();

        assert_eq!(
            entries[0].companions,
            vec![
                PathBuf::from("Pages/Counter.razor.css"),
                PathBuf::from("Pages/Counter.razor.js"),
            ]
        );
        assert_eq!(
            entries[1].companions,
            vec![PathBuf::from("Views/Home/Index.cshtml.css")]
        );
    }

    #[test]
    fn test_companions_are_exclusive() {
        let project = project(
            &["Index.razor", "Index.razor.css", "Other.razor", "Other.razor.css"],
            BuildProperties::new(),
        );

        let entries = WatchItemCollector::new(&project).collect();
        let owners_of_index_css: Vec<&PathBuf> = entries
            .iter()
            .filter(|e| e.companions.contains(&PathBuf::from("Index.razor.css")))
            .map(|e| &e.template)
            .collect();

        assert_eq!(owners_of_index_css, vec![&PathBuf::from("Index.razor")]);
    }

    #[test]
    fn test_suffix_override() {
        let props = BuildProperties::new().with(COMPANION_SUFFIXES_PROPERTY, ".scss");
        let project = project(&["Index.razor", "Index.razor.css", "Index.razor.scss"], props);

        let collector = WatchItemCollector::new(&project);
        assert_eq!(collector.suffixes(), &[".scss".to_string()]);

        let entries = collector.collect();
        assert_eq!(entries[0].companions, vec![PathBuf::from("Index.razor.scss")]);
    }

    #[test]
    fn test_with_suffixes() {
        let project = project(&["Index.razor", "Index.razor.js"], BuildProperties::new());

        let entries = WatchItemCollector::new(&project)
            .with_suffixes(vec![".css".to_string()])
            .collect();

        assert!(entries[0].companions.is_empty());
    }

    #[test]
    fn test_excluded_template_not_watched() {
        let project = project(
            &["Draft.razor", "Draft.razor.css", "Index.razor"],
            BuildProperties::new(),
        )
        .with_removals(vec!["Draft.razor".to_string()]);

        let entries = WatchItemCollector::new(&project).collect();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].template, PathBuf::from("Index.razor"));
    }

    #[test]
    fn test_no_templates() {
        let project = project(&["Program.cs"], BuildProperties::new());
        assert!(WatchItemCollector::new(&project).collect().is_empty());
    }
}
