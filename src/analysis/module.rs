//! Static reflection over a data-model module.
//!
//! The configured model module is a Python source file declaring pydantic
//! model classes. Instead of importing it at runtime, this module reads the
//! source and extracts the class definitions and their annotated fields,
//! which is all the completion feature needs.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::config::ImportStrategy;
use crate::error::{ServerError, ServerResult};
use crate::workspace::ResolvedSettings;

static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^class\s+([A-Za-z_][A-Za-z0-9_]*)\s*(?:\([^)]*\))?\s*:")
        .expect("valid class pattern")
});

static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]+([A-Za-z_][A-Za-z0-9_]*)\s*:\s*([^=#]+)").expect("valid field pattern")
});

/// An annotated field of a model class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelField {
    pub name: String,
    /// The declared type annotation, verbatim (e.g. `Optional[str]`).
    pub annotation: String,
}

/// A class defined in the model module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelClass {
    pub name: String,
    pub fields: Vec<ModelField>,
}

impl ModelClass {
    pub fn field(&self, name: &str) -> Option<&ModelField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// The reflected view of one model module: its classes in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelModule {
    pub classes: Vec<ModelClass>,
}

impl ModelModule {
    /// Extract class definitions and their directly-annotated fields.
    ///
    /// The first statement after a `class` header fixes the body indentation.
    /// Fields are the `name: Type` annotations at exactly that level; deeper
    /// lines belong to method bodies and are skipped, as are defaults after
    /// `=` and trailing comments.
    pub fn parse(source: &str) -> Self {
        let mut classes: Vec<ModelClass> = Vec::new();
        let mut in_class = false;
        let mut body_indent: Option<usize> = None;

        for raw_line in source.lines() {
            let line = raw_line.trim_end();
            if line.trim().is_empty() {
                continue;
            }

            if let Some(caps) = CLASS_RE.captures(line) {
                classes.push(ModelClass {
                    name: caps[1].to_string(),
                    fields: Vec::new(),
                });
                in_class = true;
                body_indent = None;
                continue;
            }

            let indent = line.len() - line.trim_start().len();
            if indent == 0 {
                // Any other top-level statement ends the current class body.
                in_class = false;
                continue;
            }

            if !in_class {
                continue;
            }

            let expected = *body_indent.get_or_insert(indent);
            if indent != expected {
                continue;
            }

            if let Some(caps) = FIELD_RE.captures(line) {
                if let Some(class) = classes.last_mut() {
                    class.fields.push(ModelField {
                        name: caps[1].to_string(),
                        annotation: caps[2].trim().to_string(),
                    });
                }
            }
        }

        Self { classes }
    }

    pub fn class(&self, name: &str) -> Option<&ModelClass> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|c| c.name.as_str())
    }
}

/// Unwrap generic nesting from a type annotation, reporting the underlying
/// type: the first type argument, applied recursively.
///
/// `Optional[str]` → `str`, `List[Dict[str, int]]` → `str`, `int` → `int`.
pub fn unwrap_annotation(annotation: &str) -> &str {
    let mut current = annotation.trim();
    while let Some(open) = current.find('[') {
        if !current.ends_with(']') {
            break;
        }
        let inner = &current[open + 1..current.len() - 1];
        current = first_type_argument(inner).trim();
    }
    current
}

/// The first comma-separated argument at bracket depth zero.
fn first_type_argument(args: &str) -> &str {
    let mut depth = 0usize;
    for (idx, ch) in args.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return &args[..idx],
            _ => {}
        }
    }
    args
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_user(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            if rest.is_empty() {
                return home;
            }
            if let Some(stripped) = rest.strip_prefix('/') {
                return home.join(stripped);
            }
        }
    }
    PathBuf::from(path)
}

/// Resolve the configured model-module path to a file on disk.
///
/// args[0] is the module path. Absolute paths (after `~` expansion) are used
/// as-is; relative paths are searched across the configured `path` entries
/// and the workspace cwd, ordered by the import strategy.
pub fn resolve_module_path(settings: &ResolvedSettings) -> ServerResult<PathBuf> {
    let raw = settings.args.first().ok_or(ServerError::ModulePathMissing)?;
    let expanded = expand_user(raw);
    if expanded.is_absolute() {
        return Ok(expanded);
    }

    let search_dirs: Vec<&Path> = settings.path.iter().map(Path::new).collect();
    let cwd = settings.cwd.as_path();

    let candidates: Vec<PathBuf> = match settings.import_strategy {
        ImportStrategy::UseBundled => search_dirs
            .iter()
            .map(|dir| dir.join(&expanded))
            .chain(std::iter::once(cwd.join(&expanded)))
            .collect(),
        ImportStrategy::FromEnvironment => std::iter::once(cwd.join(&expanded))
            .chain(search_dirs.iter().map(|dir| dir.join(&expanded)))
            .collect(),
    };

    candidates
        .into_iter()
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| ServerError::module_not_found(raw.clone()))
}

/// Read and reflect the configured model module.
///
/// No caching: the module is re-read on every request, so edits to the model
/// file are picked up immediately.
pub fn load_model_module(settings: &ResolvedSettings) -> ServerResult<ModelModule> {
    let path = resolve_module_path(settings)?;
    let source = std::fs::read_to_string(&path)?;
    Ok(ModelModule::parse(&source))
}
