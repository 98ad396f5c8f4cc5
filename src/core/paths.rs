// src/core/paths.rs

//! Path helpers shared by discovery, settings and validation.

use crate::constants::{SETTINGS_DIR, SETTINGS_FILENAME};
use std::path::{Component, Path, PathBuf};

/// Returns the path of the user settings file (`~/.config/nightingale/nightingale.toml`
/// on Linux), or `None` when the system has no config directory.
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILENAME))
}

/// Turns a user-supplied file reference into an absolute, resolved path.
///
/// `~` is expanded, relative references are joined onto `base_dir`, and
/// symbolic links are resolved when the file exists. A file that does not
/// exist yet still gets an absolute path with `.` and `..` folded away.
pub fn canonicalize(base_dir: &Path, reference: &str) -> PathBuf {
    let expanded = shellexpand::tilde(reference);
    let raw = Path::new(expanded.as_ref());
    let joined = if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        absolute_base(base_dir).join(raw)
    };

    match dunce::canonicalize(&joined) {
        Ok(resolved) => resolved,
        Err(_) => normalize(&joined),
    }
}

fn absolute_base(base_dir: &Path) -> PathBuf {
    if base_dir.is_absolute() {
        return base_dir.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(base_dir))
        .unwrap_or_else(|_| base_dir.to_path_buf())
}

/// Lexically removes `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `..` at the root stays at the root.
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component.as_os_str()),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_canonicalize_existing_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("main.tex"), "").unwrap();

        let resolved = canonicalize(dir.path(), "./main.tex");

        assert!(resolved.is_absolute());
        assert_eq!(
            resolved,
            dunce::canonicalize(dir.path().join("main.tex")).unwrap()
        );
    }

    #[test]
    fn test_canonicalize_missing_file_is_normalized() {
        let dir = tempdir().unwrap();
        let resolved = canonicalize(dir.path(), "chapters/../appendix.tex");
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("appendix.tex"));
        assert!(!resolved.to_string_lossy().contains(".."));
    }

    #[test]
    fn test_canonicalize_absolute_reference_ignores_base() {
        let dir = tempdir().unwrap();
        let other = tempdir().unwrap();
        let target = other.path().join("b.tex");
        let resolved = canonicalize(dir.path(), &target.to_string_lossy());
        assert!(resolved.ends_with("b.tex"));
        assert!(!resolved.starts_with(dunce::canonicalize(dir.path()).unwrap()));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
    }
}
