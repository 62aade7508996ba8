//! Hot-reload eligible file types
//!
//! The reported value is the default extension list joined with `;`, with an
//! optional override applied to that *serialized string*. The override is a
//! literal substring removal, so removing `.cshtml` leaves the separator that
//! preceded it: `;.cs;.razor;.resx;.cshtml` becomes `;.cs;.razor;.resx;`.

use crate::project::BuildProperties;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, error, warn};

/// Default reload-eligible extensions. The leading empty entry is kept so the
/// serialized form starts with `;`, matching the legacy property format.
pub const DEFAULT_RELOAD_FILE_TYPES: [&str; 5] = ["", ".cs", ".razor", ".resx", ".cshtml"];

/// Property carrying the user's override expression
pub const RELOAD_FILE_TYPES_PROPERTY: &str = "RazorUpToDateReloadFileTypes";

/// Property gating whether the override is honored; defaults to `true`
pub const ALLOW_WORKAROUND_PROPERTY: &str = "_RazorUpToDateReloadFileTypesAllowWorkaround";

const SEPARATOR: &str = ";";

/// `$(RazorUpToDateReloadFileTypes.Replace('<target>', ''))`, any case and spacing
const REPLACE_PATTERN: &str =
    r"(?i)^\$\(\s*RazorUpToDateReloadFileTypes\s*\.\s*Replace\(\s*'([^']*)'\s*,\s*''\s*\)\s*\)$";

fn replace_pattern() -> Result<&'static Regex, &'static regex::Error> {
    static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(REPLACE_PATTERN)).as_ref()
}

/// Transformation applied to the serialized default list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReloadTransform {
    #[default]
    Identity,
    /// Remove every occurrence of the target substring
    RemoveSubstring(String),
}

impl ReloadTransform {
    /// Parses an override expression.
    ///
    /// Recognized forms are a self-reference (`$(RazorUpToDateReloadFileTypes)`)
    /// and a replace-with-nothing call
    /// (`$(RazorUpToDateReloadFileTypes.Replace('.cshtml', ''))`). Anything else
    /// is not evaluated and yields `None`.
    pub fn parse(expression: &str) -> Option<Self> {
        let expression = expression.trim();

        let identity = format!("$({})", RELOAD_FILE_TYPES_PROPERTY);
        if expression.is_empty() || expression.eq_ignore_ascii_case(&identity) {
            return Some(ReloadTransform::Identity);
        }

        let re = match replace_pattern() {
            Ok(re) => re,
            Err(err) => {
                error!(error = %err, "Reload override pattern failed to compile");
                return None;
            }
        };
        let target = re
            .captures(expression)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())?;

        Some(ReloadTransform::remove(target))
    }

    pub fn remove(target: impl Into<String>) -> Self {
        let target = target.into();
        if target.is_empty() {
            ReloadTransform::Identity
        } else {
            ReloadTransform::RemoveSubstring(target)
        }
    }

    pub fn apply(&self, serialized: &str) -> String {
        match self {
            ReloadTransform::Identity => serialized.to_string(),
            ReloadTransform::RemoveSubstring(target) => serialized.replace(target.as_str(), ""),
        }
    }

    /// The expression form understood by [`ReloadTransform::parse`].
    pub fn to_expression(&self) -> String {
        match self {
            ReloadTransform::Identity => format!("$({})", RELOAD_FILE_TYPES_PROPERTY),
            ReloadTransform::RemoveSubstring(target) => {
                format!("$({}.Replace('{}', ''))", RELOAD_FILE_TYPES_PROPERTY, target)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadTypeResolver {
    transform: ReloadTransform,
    allow_workaround: bool,
}

impl Default for ReloadTypeResolver {
    fn default() -> Self {
        Self::new(ReloadTransform::Identity, true)
    }
}

impl ReloadTypeResolver {
    pub fn new(transform: ReloadTransform, allow_workaround: bool) -> Self {
        Self {
            transform,
            allow_workaround,
        }
    }

    /// Reads the override and the workaround flag from project properties.
    pub fn from_properties(properties: &BuildProperties) -> Self {
        let transform = match properties.get(RELOAD_FILE_TYPES_PROPERTY) {
            None => ReloadTransform::Identity,
            Some(expression) => ReloadTransform::parse(expression).unwrap_or_else(|| {
                warn!(
                    property = RELOAD_FILE_TYPES_PROPERTY,
                    value = expression,
                    "Unsupported reload file types override; using the default list"
                );
                ReloadTransform::Identity
            }),
        };
        let allow_workaround = properties.get_bool(ALLOW_WORKAROUND_PROPERTY, true);

        Self::new(transform, allow_workaround)
    }

    pub fn transform(&self) -> &ReloadTransform {
        &self.transform
    }

    pub fn allow_workaround(&self) -> bool {
        self.allow_workaround
    }

    /// Serialized reload-eligible extension list.
    pub fn resolve(&self) -> String {
        let serialized = DEFAULT_RELOAD_FILE_TYPES.join(SEPARATOR);

        if !self.allow_workaround {
            if self.transform != ReloadTransform::Identity {
                debug!(transform = ?self.transform, "Workaround disallowed; ignoring override");
            }
            return serialized;
        }

        self.transform.apply(&serialized)
    }
}
