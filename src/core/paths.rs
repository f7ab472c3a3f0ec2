//! Path resolution for rendered scenario output and logs.

use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::core::config::Config;
use crate::core::errors::{DrillError, Result};

/// Pick the directory faulty manifests are rendered into.
///
/// CLI override wins over the configured default; either way the result is
/// absolute so log entries and the brief can reference it unambiguously.
#[must_use]
pub fn rendered_dir(config: &Config, cli_override: Option<&Path>) -> PathBuf {
    let chosen = cli_override.unwrap_or(&config.paths.rendered_dir);
    absolute(chosen)
}

/// Create the rendered directory (and parents) if absent.
pub fn ensure_rendered_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| DrillError::io(dir, source))
}

/// Make a path absolute without requiring it to exist.
///
/// Existing paths are canonicalized (resolving symlinks); nonexistent ones are
/// joined onto CWD with `.`/`..` components resolved syntactically.
fn absolute(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
    };

    if let Ok(canonical) = fs::canonicalize(&joined) {
        return canonical;
    }

    let mut components = Vec::new();
    for component in joined.components() {
        match component {
            Component::Prefix(..) | Component::RootDir | Component::Normal(_) => {
                components.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(Component::Normal(_)) = components.last() {
                    components.pop();
                }
            }
        }
    }
    components.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_override_beats_config() {
        let config = Config::default();
        let dir = rendered_dir(&config, Some(Path::new("/tmp/drill-out")));
        assert_eq!(dir, Path::new("/tmp/drill-out"));
    }

    #[test]
    fn config_default_is_made_absolute() {
        let config = Config::default();
        let dir = rendered_dir(&config, None);
        assert!(dir.is_absolute(), "expected absolute path, got {dir:?}");
        assert!(dir.ends_with("challenges/rendered"));
    }

    #[test]
    fn nonexistent_override_normalized_syntactically() {
        let config = Config::default();
        let dir = rendered_dir(
            &config,
            Some(Path::new("/nonexistent-kfd/foo/../rendered")),
        );
        assert_eq!(dir, Path::new("/nonexistent-kfd/rendered"));
    }
}
