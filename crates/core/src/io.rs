//! Shared file I/O utilities.

use std::{
    env,
    fs::{create_dir_all, metadata, read, write},
    path::{self, Component, Path, PathBuf},
    time::SystemTime,
};

use anyhow::{Context, Result};

/// Read font data from a file.
pub fn read_font(path: &Path) -> Result<Vec<u8>> {
    read(path).with_context(|| format!("Failed to read font: {}", path.display()))
}

/// Write data to a file, creating its parent directory first.
pub fn write_output(path: &Path, data: impl AsRef<[u8]>) -> Result<()> {
    ensure_parent_dir(path)?;
    write(path, data).with_context(|| format!("Failed to write: {}", path.display()))
}

/// Create parent directory if it doesn't exist.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

/// Modification time of a file.
pub fn modified(path: &Path) -> Result<SystemTime> {
    metadata(path)
        .and_then(|m| m.modified())
        .with_context(|| format!("Failed to stat: {}", path.display()))
}

/// Whether `target` can be reused for a source last modified at `source_mtime`.
///
/// The target must exist, be non-empty, and be at least as new as the source.
pub fn is_up_to_date(target: &Path, source_mtime: SystemTime) -> bool {
    match metadata(target) {
        Ok(meta) => {
            meta.len() > 0 && meta.modified().is_ok_and(|target_mtime| target_mtime >= source_mtime)
        }
        Err(_) => false,
    }
}

/// Path relative to the working directory, for display.
///
/// Paths outside the working directory get `..` segments. The path is shown
/// as given when it is the working directory itself or shares no root with it.
pub fn display_path(path: &Path) -> PathBuf {
    let (Ok(cwd), Ok(absolute)) = (env::current_dir(), path::absolute(path)) else {
        return path.to_path_buf();
    };
    relative_to(&absolute, &cwd)
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| path.to_path_buf())
}

/// `path` relative to `base`, both absolute. `None` when they share no root.
pub fn relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    let target: Vec<Component> = path.components().collect();
    let from: Vec<Component> = base.components().collect();
    let common = target.iter().zip(&from).take_while(|(a, b)| a == b).count();
    if common == 0 {
        return None;
    }

    let mut relative = PathBuf::new();
    for _ in common..from.len() {
        relative.push(Component::ParentDir);
    }
    relative.extend(&target[common..]);
    Some(relative)
}

#[cfg(test)]
mod tests {
    use std::{
        fs::File,
        time::{Duration, SystemTime},
    };

    use super::*;

    #[test]
    fn test_relative_to() {
        assert_eq!(
            relative_to(Path::new("/work/app/fonts"), Path::new("/work/app")),
            Some(PathBuf::from("fonts"))
        );
        assert_eq!(
            relative_to(Path::new("/work/shared/fonts"), Path::new("/work/app/site")),
            Some(PathBuf::from("../../shared/fonts"))
        );
        assert_eq!(relative_to(Path::new("/work"), Path::new("/work")), Some(PathBuf::new()));
    }

    #[test]
    fn test_display_path_outside_cwd_uses_parent_segments() {
        let cwd = env::current_dir().unwrap();
        let Some(parent) = cwd.parent() else { return };
        let sibling = parent.join("fontbake-sibling/fonts");
        assert_eq!(display_path(&sibling), PathBuf::from("../fontbake-sibling/fonts"));
        assert_eq!(display_path(&cwd.join("fonts")), PathBuf::from("fonts"));
        assert_eq!(display_path(&cwd), cwd);
    }

    #[test]
    fn test_missing_target_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_up_to_date(&dir.path().join("nope.woff2"), SystemTime::UNIX_EPOCH));
    }

    #[test]
    fn test_empty_target_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("empty.woff2");
        File::create(&target).unwrap();
        assert!(!is_up_to_date(&target, SystemTime::UNIX_EPOCH));
    }

    #[test]
    fn test_target_newer_than_source_is_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("font.woff2");
        write(&target, b"wOF2").unwrap();
        assert!(is_up_to_date(&target, SystemTime::UNIX_EPOCH));
    }

    #[test]
    fn test_target_older_than_source_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("font.woff2");
        write(&target, b"wOF2").unwrap();
        let future = SystemTime::now() + Duration::from_secs(3600);
        assert!(!is_up_to_date(&target, future));
    }

    #[test]
    fn test_write_output_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a/b/c.css");
        write_output(&target, "x").unwrap();
        assert_eq!(read(&target).unwrap(), b"x");
    }
}
