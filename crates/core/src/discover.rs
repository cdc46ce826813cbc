//! Font source discovery.

use std::path::{self, Component, Path, PathBuf};

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern, glob_with};

use crate::config::FONT_EXTENSIONS;

/// A discovered source font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSource {
    path: PathBuf,
    relative_path: PathBuf,
    relative_dir: PathBuf,
    file_name: String,
}

impl FontSource {
    /// Describe `path`, which must live under `root`.
    pub fn new(root: &Path, path: PathBuf) -> Result<Self> {
        let relative_path = path
            .strip_prefix(root)
            .with_context(|| {
                format!("{} is not under {}", path.display(), root.display())
            })?
            .to_path_buf();
        let relative_dir = relative_path.parent().map(Path::to_path_buf).unwrap_or_default();
        let file_name = path
            .file_name()
            .context("Font path has no file name")?
            .to_string_lossy()
            .into_owned();
        Ok(Self { path, relative_path, relative_dir, file_name })
    }

    /// Absolute path to the source file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path relative to the source root.
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Containing directory relative to the source root (empty at the root).
    pub fn relative_dir(&self) -> &Path {
        &self.relative_dir
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// First directory component under the source root, if any.
    pub fn top_folder(&self) -> Option<String> {
        self.relative_dir.components().find_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
    }

    /// Relative directory as URL path segments.
    pub fn web_dir(&self) -> String {
        self.relative_dir
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Recursively find `.ttf`/`.otf` files (any case) under `root`.
///
/// Dotfiles and anything under a dot-directory are ignored. A missing root
/// yields no sources. Results are sorted by path.
pub fn discover_fonts(root: &Path) -> Result<Vec<FontSource>> {
    let root = path::absolute(root)
        .with_context(|| format!("Failed to resolve source directory: {}", root.display()))?;
    if !root.is_dir() {
        log::debug!("Source directory {} does not exist", root.display());
        return Ok(Vec::new());
    }

    let root_str = root.to_str().context("Source directory is not valid UTF-8")?;
    let options = MatchOptions {
        case_sensitive: false,
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let mut paths = Vec::new();
    for ext in FONT_EXTENSIONS {
        let pattern = format!("{}/**/*.{ext}", Pattern::escape(root_str));
        let matches = glob_with(&pattern, options)
            .with_context(|| format!("Failed to glob pattern: {pattern}"))?;
        paths.extend(
            matches
                .filter_map(Result::ok)
                .filter(|p| p.is_file() && !is_hidden(&root, p)),
        );
    }
    paths.sort();
    paths.dedup();

    paths.into_iter().map(|p| FontSource::new(&root, p)).collect()
}

/// Whether any component of `path` below `root` starts with a dot.
fn is_hidden(root: &Path, path: &Path) -> bool {
    path.strip_prefix(root).is_ok_and(|rel| {
        rel.components()
            .any(|c| matches!(c, Component::Normal(s) if s.to_string_lossy().starts_with('.')))
    })
}

#[cfg(test)]
mod tests {
    use std::fs::{create_dir_all, write};

    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        create_dir_all(path.parent().unwrap()).unwrap();
        write(path, b"font").unwrap();
    }

    #[test]
    fn test_missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let found = discover_fonts(&dir.path().join("missing")).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_finds_fonts_recursively_any_case() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Inter/Inter-Regular.ttf");
        touch(dir.path(), "Inter/static/Inter-Bold.TTF");
        touch(dir.path(), "Roboto/Roboto-Light.otf");
        touch(dir.path(), "Roboto/LICENSE.txt");
        touch(dir.path(), "Loose.OTF");

        let found = discover_fonts(dir.path()).unwrap();
        let names: Vec<&str> = found.iter().map(|s| s.file_name()).collect();
        assert_eq!(names.len(), 4);
        assert!(names.contains(&"Inter-Bold.TTF"));
        assert!(names.contains(&"Loose.OTF"));
        assert!(!names.contains(&"LICENSE.txt"));
    }

    #[test]
    fn test_skips_dotfiles_and_dot_directories() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Inter/Inter-Bold.ttf");
        touch(dir.path(), "Inter/._Inter-Bold.ttf");
        touch(dir.path(), ".hidden/Old-Regular.ttf");
        touch(dir.path(), "Roboto/.cache/Roboto-Light.otf");

        let found = discover_fonts(dir.path()).unwrap();
        let paths: Vec<&Path> = found.iter().map(|s| s.relative_path()).collect();
        assert_eq!(paths, vec![Path::new("Inter/Inter-Bold.ttf")]);
    }

    #[test]
    fn test_hidden_root_is_scanned() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(".fonts");
        touch(&root, "Inter/Inter-Bold.ttf");

        assert_eq!(discover_fonts(&root).unwrap().len(), 1);
    }

    #[test]
    fn test_source_paths() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Inter/static/Inter-Bold.ttf");

        let found = discover_fonts(dir.path()).unwrap();
        let source = &found[0];
        assert!(source.path().is_absolute());
        assert_eq!(source.relative_path(), Path::new("Inter/static/Inter-Bold.ttf"));
        assert_eq!(source.relative_dir(), Path::new("Inter/static"));
        assert_eq!(source.top_folder().as_deref(), Some("Inter"));
        assert_eq!(source.web_dir(), "Inter/static");
    }

    #[test]
    fn test_root_level_source_has_no_folder() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Loose-Regular.ttf");

        let found = discover_fonts(dir.path()).unwrap();
        assert_eq!(found[0].relative_dir(), Path::new(""));
        assert_eq!(found[0].top_folder(), None);
        assert_eq!(found[0].web_dir(), "");
    }
}
