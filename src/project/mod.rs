//! Project model shared by every introspection target
//!
//! A [`Project`] is the materialized view of a web project at one point in
//! time: its evaluated properties plus every file it declares, in declaration
//! order. All introspection results are derived from it; nothing here is cached
//! between invocations.

mod loader;
mod properties;

pub use loader::{ProjectLoader, EXCLUDED_DIRS};
pub use properties::BuildProperties;
pub(crate) use properties::has_unevaluated_reference;

use ignore::overrides::{Override, OverrideBuilder};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Legacy view-style templates (MVC views, Razor Pages, layouts, `_ViewStart`)
pub const VIEW_EXTENSION: &str = ".cshtml";

/// Component-style templates
pub const COMPONENT_EXTENSION: &str = ".razor";

/// Gates `.cshtml` templates; defaults to enabled
pub const ENABLE_VIEW_ITEMS_PROPERTY: &str = "EnableDefaultRazorGenerateItems";

/// Gates `.razor` templates; defaults to enabled
pub const ENABLE_COMPONENT_ITEMS_PROPERTY: &str = "EnableDefaultRazorComponentItems";

/// `;`-separated globs removed from every default item group
pub const DEFAULT_ITEM_EXCLUDES_PROPERTY: &str = "DefaultItemExcludes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Template,
    Stylesheet,
    Code,
    Resource,
}

impl ItemKind {
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            VIEW_EXTENSION | COMPONENT_EXTENSION => ItemKind::Template,
            ".css" => ItemKind::Stylesheet,
            ".cs" => ItemKind::Code,
            _ => ItemKind::Resource,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemKind::Template => "template",
            ItemKind::Stylesheet => "stylesheet",
            ItemKind::Code => "code",
            ItemKind::Resource => "resource",
        };
        f.write_str(name)
    }
}

/// A file declared by the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectItem {
    /// Path relative to the project directory, OS-native separators
    pub path: PathBuf,
    /// Final extension including the dot, empty when the file has none
    pub extension: String,
    pub kind: ItemKind,
    /// Template this stylesheet is scoped to (`Index.razor` for `Index.razor.css`)
    pub scope_css_owner: Option<PathBuf>,
}

impl ProjectItem {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        let kind = ItemKind::from_extension(&extension);

        Self {
            path,
            extension,
            kind,
            scope_css_owner: None,
        }
    }

    pub fn is_template(&self) -> bool {
        self.kind == ItemKind::Template
    }

    pub fn file_name(&self) -> &str {
        self.path.file_name().and_then(|n| n.to_str()).unwrap_or("")
    }

    /// Template this file would belong to if it were a companion with one of
    /// the given suffixes: `Pages/Index.razor.css` names `Pages/Index.razor`.
    ///
    /// Only the candidate path is computed; whether that template exists is
    /// up to the caller.
    pub fn companion_owner<S: AsRef<str>>(&self, suffixes: &[S]) -> Option<PathBuf> {
        let name = self.file_name();
        suffixes.iter().find_map(|suffix| {
            let stem = strip_suffix_ignore_case(name, suffix.as_ref())?;
            let owner = ProjectItem::new(stem);
            if !owner.is_template() {
                return None;
            }
            Some(match self.path.parent() {
                Some(parent) => parent.join(stem),
                None => PathBuf::from(stem),
            })
        })
    }
}

/// Materialized project state.
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub directory: PathBuf,
    pub properties: BuildProperties,
    items: Vec<ProjectItem>,
    removals: Vec<String>,
}

impl Project {
    /// Builds a project from items in declaration order and links scoped
    /// stylesheets to their templates.
    pub fn new(
        name: impl Into<String>,
        directory: impl Into<PathBuf>,
        properties: BuildProperties,
        items: Vec<ProjectItem>,
    ) -> Self {
        let mut project = Self {
            name: name.into(),
            directory: directory.into(),
            properties,
            items,
            removals: Vec::new(),
        };
        project.link_scoped_styles();
        project
    }

    /// Adds `Remove="..."` globs declared in the project file.
    pub fn with_removals(mut self, removals: Vec<String>) -> Self {
        self.removals = removals;
        self
    }

    pub fn items(&self) -> &[ProjectItem] {
        &self.items
    }

    pub fn removals(&self) -> &[String] {
        &self.removals
    }

    /// Template extensions enabled by the project's properties.
    pub fn template_extensions(&self) -> Vec<&'static str> {
        let mut extensions = Vec::with_capacity(2);
        if self.properties.get_bool(ENABLE_VIEW_ITEMS_PROPERTY, true) {
            extensions.push(VIEW_EXTENSION);
        }
        if self.properties.get_bool(ENABLE_COMPONENT_ITEMS_PROPERTY, true) {
            extensions.push(COMPONENT_EXTENSION);
        }
        extensions
    }

    /// Items not removed by a `Remove` glob or `DefaultItemExcludes`.
    pub fn retained_items(&self) -> impl Iterator<Item = &ProjectItem> {
        let exclusions = self.exclusions();
        self.items
            .iter()
            .filter(move |item| !matches_exclusion(&exclusions, &item.path))
    }

    /// Templates that take part in compilation, in declaration order.
    pub fn templates(&self) -> Vec<&ProjectItem> {
        let extensions = self.template_extensions();

        self.retained_items()
            .filter(|item| item.is_template())
            .filter(|item| {
                extensions
                    .iter()
                    .any(|ext| item.extension.eq_ignore_ascii_case(ext))
            })
            .collect()
    }

    /// Whether `path` is removed by a `Remove` glob or `DefaultItemExcludes`.
    pub fn is_excluded(&self, path: &Path) -> bool {
        matches_exclusion(&self.exclusions(), path)
    }

    fn exclusions(&self) -> Override {
        let patterns = self
            .removals
            .iter()
            .cloned()
            .chain(self.properties.get_list(DEFAULT_ITEM_EXCLUDES_PROPERTY));

        let mut builder = OverrideBuilder::new(&self.directory);
        let mut added = 0;
        for pattern in patterns {
            // Unevaluated references such as $(DefaultItemExcludes) carry no glob.
            if has_unevaluated_reference(&pattern) {
                continue;
            }
            let glob = anchor_glob(&pattern);
            match builder.add(&glob) {
                Ok(_) => added += 1,
                Err(err) => warn!(pattern = %pattern, error = %err, "Ignoring invalid exclusion glob"),
            }
        }

        if added == 0 {
            return Override::empty();
        }

        builder.build().unwrap_or_else(|err| {
            warn!(error = %err, "Failed to compile exclusion globs");
            Override::empty()
        })
    }

    fn link_scoped_styles(&mut self) {
        let templates: HashSet<PathBuf> = self
            .items
            .iter()
            .filter(|item| item.is_template())
            .map(|item| item.path.clone())
            .collect();

        for item in self
            .items
            .iter_mut()
            .filter(|item| item.kind == ItemKind::Stylesheet)
        {
            item.scope_css_owner = item
                .companion_owner(&[".css"])
                .filter(|owner| templates.contains(owner));
        }
    }
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    if !name.is_char_boundary(split) {
        return None;
    }
    let (stem, tail) = name.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(stem)
}

/// Item globs resolve against the project directory, so a bare `*.cshtml`
/// only covers top-level files. Gitignore would match it at any depth unless
/// the pattern is rooted.
fn anchor_glob(pattern: &str) -> String {
    let normalized = pattern.trim().replace('\\', "/");
    let normalized = normalized.trim_start_matches("./");
    if normalized.starts_with('/') || normalized.starts_with("**/") {
        normalized.to_string()
    } else {
        format!("/{}", normalized)
    }
}

fn matches_exclusion(exclusions: &Override, path: &Path) -> bool {
    exclusions.matched(path, false).is_whitelist()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(paths: &[&str], properties: BuildProperties) -> Project {
        let items = paths.iter().map(|p| ProjectItem::new(*p)).collect();
        Project::new("App", "/src/App", properties, items)
    }

    #[test]
    fn test_item_classification() {
        assert_eq!(ProjectItem::new("Views/Index.cshtml").kind, ItemKind::Template);
        assert_eq!(ProjectItem::new("Pages/Index.razor").kind, ItemKind::Template);
        assert_eq!(ProjectItem::new("Pages/Index.razor.css").kind, ItemKind::Stylesheet);
        assert_eq!(ProjectItem::new("Program.cs").kind, ItemKind::Code);
        assert_eq!(ProjectItem::new("Strings.resx").kind, ItemKind::Resource);
        assert_eq!(ProjectItem::new("LICENSE").kind, ItemKind::Resource);
    }

    #[test]
    fn test_item_extension_is_final_segment() {
        let item = ProjectItem::new("Pages/Index.razor.css");
        assert_eq!(item.extension, ".css");
        assert_eq!(ProjectItem::new("LICENSE").extension, "");
    }

    #[test]
    fn test_template_classification_ignores_case() {
        assert!(ProjectItem::new("Views/Legacy.CSHTML").is_template());
    }

    #[test]
    fn test_companion_owner() {
        let css = ProjectItem::new("Pages/Index.razor.css");
        assert_eq!(
            css.companion_owner(&[".css", ".js"]),
            Some(PathBuf::from("Pages/Index.razor"))
        );

        let js = ProjectItem::new("Index.razor.js");
        assert_eq!(
            js.companion_owner(&[".css", ".js"]),
            Some(PathBuf::from("Index.razor"))
        );
    }

    #[test]
    fn test_companion_owner_requires_template_stem() {
        assert_eq!(ProjectItem::new("wwwroot/site.css").companion_owner(&[".css"]), None);
        assert_eq!(ProjectItem::new("Index.razor.css").companion_owner(&[".js"]), None);
        assert_eq!(ProjectItem::new(".razor.css").companion_owner(&[".css"]), None);
    }

    #[test]
    fn test_scoped_styles_are_linked() {
        let project = project(
            &["Pages/Index.razor", "Pages/Index.razor.css", "Pages/Orphan.razor.css"],
            BuildProperties::new(),
        );

        let owners: Vec<Option<PathBuf>> = project
            .items()
            .iter()
            .map(|i| i.scope_css_owner.clone())
            .collect();
        assert_eq!(
            owners,
            vec![None, Some(PathBuf::from("Pages/Index.razor")), None]
        );
    }

    #[test]
    fn test_templates_default_to_both_extensions() {
        let project = project(
            &["Pages/Index.razor", "Program.cs", "Views/Index.cshtml"],
            BuildProperties::new(),
        );

        let templates: Vec<&Path> = project.templates().iter().map(|t| t.path.as_path()).collect();
        assert_eq!(
            templates,
            vec![Path::new("Pages/Index.razor"), Path::new("Views/Index.cshtml")]
        );
    }

    #[test]
    fn test_templates_respect_enable_properties() {
        let properties = BuildProperties::new().with(ENABLE_COMPONENT_ITEMS_PROPERTY, "false");
        let project = project(&["Pages/Index.razor", "Views/Index.cshtml"], properties);

        assert_eq!(project.template_extensions(), vec![VIEW_EXTENSION]);
        assert_eq!(project.templates().len(), 1);
        assert_eq!(project.templates()[0].path, PathBuf::from("Views/Index.cshtml"));
    }

    #[test]
    fn test_removals_exclude_templates() {
        let project = project(
            &["Views/Home/Index.cshtml", "Views/Legacy/Old.cshtml"],
            BuildProperties::new(),
        )
        .with_removals(vec!["Views\\Legacy\\**".to_string()]);

        assert!(project.is_excluded(Path::new("Views/Legacy/Old.cshtml")));
        assert_eq!(project.templates().len(), 1);
    }

    #[test]
    fn test_default_item_excludes_property() {
        let properties = BuildProperties::new().with(
            DEFAULT_ITEM_EXCLUDES_PROPERTY,
            "$(DefaultItemExcludes);Drafts/**",
        );
        let project = project(&["Drafts/Wip.razor", "Pages/Index.razor"], properties);

        let templates: Vec<&Path> = project.templates().iter().map(|t| t.path.as_path()).collect();
        assert_eq!(templates, vec![Path::new("Pages/Index.razor")]);
    }

    #[test]
    fn test_retained_items_skip_removed_files() {
        let project = project(&["Draft.razor", "Index.razor", "site.css"], BuildProperties::new())
            .with_removals(vec!["Draft.*".to_string()]);

        let retained: Vec<&Path> = project.retained_items().map(|i| i.path.as_path()).collect();
        assert_eq!(retained, vec![Path::new("Index.razor"), Path::new("site.css")]);
    }

    #[test]
    fn test_bare_removal_only_matches_project_root() {
        let project = project(&["Draft.razor", "Pages/Draft.razor"], BuildProperties::new())
            .with_removals(vec!["Draft.razor".to_string()]);

        let templates: Vec<&Path> = project.templates().iter().map(|t| t.path.as_path()).collect();
        assert_eq!(templates, vec![Path::new("Pages/Draft.razor")]);
    }

    #[test]
    fn test_root_wildcard_removal_keeps_nested_views() {
        let project = project(&["Old.cshtml", "Views/Home/Index.cshtml"], BuildProperties::new())
            .with_removals(vec!["*.cshtml".to_string()]);

        let templates: Vec<&Path> = project.templates().iter().map(|t| t.path.as_path()).collect();
        assert_eq!(templates, vec![Path::new("Views/Home/Index.cshtml")]);
    }

    #[test]
    fn test_recursive_removal_matches_any_depth() {
        let project = project(&["Old.cshtml", "Views/Home/Index.cshtml"], BuildProperties::new())
            .with_removals(vec!["**/*.cshtml".to_string()]);

        assert!(project.templates().is_empty());
    }

    #[test]
    fn test_anchor_glob() {
        assert_eq!(anchor_glob("Draft.razor"), "/Draft.razor");
        assert_eq!(anchor_glob("Views\\Legacy\\**"), "/Views/Legacy/**");
        assert_eq!(anchor_glob("./Old/*.cshtml"), "/Old/*.cshtml");
        assert_eq!(anchor_glob("**/*.user"), "**/*.user");
        assert_eq!(anchor_glob("/obj/**"), "/obj/**");
    }

    #[test]
    fn test_companion_suffix_ignores_case() {
        let css = ProjectItem::new("Pages/Index.razor.CSS");
        assert_eq!(
            css.companion_owner(&[".css"]),
            Some(PathBuf::from("Pages/Index.razor"))
        );

        let project = project(
            &["Pages/Index.razor", "Pages/Index.razor.CSS"],
            BuildProperties::new(),
        );
        assert_eq!(
            project.items()[1].scope_css_owner,
            Some(PathBuf::from("Pages/Index.razor"))
        );
    }

    #[test]
    fn test_no_exclusions_excludes_nothing() {
        let project = project(&["Pages/Index.razor"], BuildProperties::new());
        assert!(!project.is_excluded(Path::new("Pages/Index.razor")));
    }
}
