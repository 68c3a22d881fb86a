//! Template source groups.
//!
//! Templates are organized in three groups:
//!
//! - `common/`: partials (macros) shared by every view.
//! - `views/`: pages and feeds. Each one is compiled together with all
//!   common partials.
//! - `standalone/`: self-contained pages compiled on their own.
//!
//! The groups are compiled into the binary by default
//! ([`TemplateSources::embedded`]). For theme development they can also be
//! read from a directory with the same layout ([`TemplateSources::from_dir`]).
//!
//! Within a group, files are always ordered by name, so the prelude built
//! from the common partials does not depend on the filesystem.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::LoadError;

/// Extensions recognized as template files.
pub const TEMPLATE_EXTENSIONS: &[&str] = &[".html", ".rss"];

const EMBEDDED_COMMON: &[(&str, &str)] = &[
    ("entry_meta.html", include_str!("../../templates/common/entry_meta.html")),
    ("feed.rss", include_str!("../../templates/common/feed.rss")),
    ("layout.html", include_str!("../../templates/common/layout.html")),
    ("pagination.html", include_str!("../../templates/common/pagination.html")),
];

const EMBEDDED_VIEWS: &[(&str, &str)] = &[
    (
        "category_entries_public.html",
        include_str!("../../templates/views/category_entries_public.html"),
    ),
    ("entries.rss", include_str!("../../templates/views/entries.rss")),
];

const EMBEDDED_STANDALONE: &[(&str, &str)] = &[(
    "offline.html",
    include_str!("../../templates/standalone/offline.html"),
)];

/// One template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// File name including its extension, e.g. `entries.rss`.
    pub name: String,
    pub content: String,
}

impl TemplateFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// The three template groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSources {
    pub common: Vec<TemplateFile>,
    pub views: Vec<TemplateFile>,
    pub standalone: Vec<TemplateFile>,
}

impl TemplateSources {
    /// The templates shipped with the crate.
    pub fn embedded() -> Self {
        Self::from_entries(EMBEDDED_COMMON, EMBEDDED_VIEWS, EMBEDDED_STANDALONE)
    }

    /// Builds the groups from `(name, content)` pairs.
    pub fn from_entries(
        common: &[(&str, &str)],
        views: &[(&str, &str)],
        standalone: &[(&str, &str)],
    ) -> Self {
        Self {
            common: files(common),
            views: files(views),
            standalone: files(standalone),
        }
    }

    /// Reads the groups from `root/common`, `root/views` and `root/standalone`.
    ///
    /// A missing group directory is an empty group. `root` itself must exist.
    pub fn from_dir(root: impl AsRef<Path>) -> Result<Self, LoadError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(LoadError::Read {
                path: root.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "not a directory"),
            });
        }

        Ok(Self {
            common: read_group(&root.join("common"))?,
            views: read_group(&root.join("views"))?,
            standalone: read_group(&root.join("standalone"))?,
        })
    }

    /// All common partials concatenated in name order.
    pub fn prelude(&self) -> String {
        self.common.iter().map(|f| f.content.as_str()).collect()
    }
}

fn files(entries: &[(&str, &str)]) -> Vec<TemplateFile> {
    let mut files: Vec<_> = entries
        .iter()
        .map(|(name, content)| TemplateFile::new(*name, *content))
        .collect();
    files.sort_by(|a, b| a.name.cmp(&b.name));
    files
}

fn is_template_file(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| TEMPLATE_EXTENSIONS.iter().any(|ext| name.ends_with(ext)))
}

fn read_error(path: &Path, source: io::Error) -> LoadError {
    LoadError::Read {
        path: path.to_path_buf(),
        source,
    }
}

fn read_group(dir: &Path) -> Result<Vec<TemplateFile>, LoadError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| read_error(dir, e))? {
        let path = entry.map_err(|e| read_error(dir, e))?.path();
        if is_template_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let content = fs::read_to_string(&path).map_err(|e| read_error(&path, e))?;
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(TemplateFile { name, content })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn names(files: &[TemplateFile]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_embedded_groups() {
        let sources = TemplateSources::embedded();
        assert_eq!(
            names(&sources.common),
            vec!["entry_meta.html", "feed.rss", "layout.html", "pagination.html"]
        );
        assert_eq!(
            names(&sources.views),
            vec!["category_entries_public.html", "entries.rss"]
        );
        assert_eq!(names(&sources.standalone), vec!["offline.html"]);
    }

    #[test]
    fn test_from_entries_sorts_by_name() {
        let sources = TemplateSources::from_entries(&[("b.html", "B"), ("a.html", "A")], &[], &[]);
        assert_eq!(names(&sources.common), vec!["a.html", "b.html"]);
        assert_eq!(sources.prelude(), "AB");
    }

    #[test]
    fn test_from_dir_reads_groups_in_order() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "common/zz.html", "Z");
        write(tmp.path(), "common/aa.rss", "A");
        write(tmp.path(), "views/home.html", "home");
        write(tmp.path(), "standalone/offline.html", "offline");

        let sources = TemplateSources::from_dir(tmp.path()).unwrap();
        assert_eq!(names(&sources.common), vec!["aa.rss", "zz.html"]);
        assert_eq!(sources.prelude(), "AZ");
        assert_eq!(sources.views, vec![TemplateFile::new("home.html", "home")]);
        assert_eq!(names(&sources.standalone), vec!["offline.html"]);
    }

    #[test]
    fn test_from_dir_skips_other_files() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "views/home.html", "home");
        write(tmp.path(), "views/README.md", "docs");
        write(tmp.path(), "views/nested/inner.html", "nested");

        let sources = TemplateSources::from_dir(tmp.path()).unwrap();
        assert_eq!(names(&sources.views), vec!["home.html"]);
    }

    #[test]
    fn test_from_dir_missing_group_is_empty() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "views/home.html", "home");

        let sources = TemplateSources::from_dir(tmp.path()).unwrap();
        assert!(sources.common.is_empty());
        assert!(sources.standalone.is_empty());
    }

    #[test]
    fn test_from_dir_missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        let err = TemplateSources::from_dir(&missing).unwrap_err();
        assert!(matches!(err, LoadError::Read { path, .. } if path == missing));
    }
}
