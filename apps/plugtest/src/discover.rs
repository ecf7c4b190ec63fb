//! Plugin discovery.
//!
//! Expected layout under the plugins root:
//!
//! ```text
//! <root>/<plugin>/<version>/{skills/, agents/, plugin.json}
//! ```
//!
//! A version directory counts as a plugin when it holds at least one of
//! those entries.

use crate::error::{Error, Result};
use glob::Pattern;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const PLUGIN_MARKERS: &[&str] = &["skills", "agents", "plugin.json"];

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: String,
    pub version: String,
    pub path: PathBuf,
}

/// Find plugins under `root`, optionally keeping only names matching the
/// `name_filter` glob. A missing root yields no plugins.
pub fn discover_plugins(root: &Path, name_filter: Option<&str>) -> Result<Vec<PluginInfo>> {
    let filter = name_filter
        .map(|pat| {
            Pattern::new(pat).map_err(|source| Error::Filter {
                pattern: pat.to_string(),
                source,
            })
        })
        .transpose()?;

    if !root.is_dir() {
        debug!(root = %root.display(), "plugins root does not exist");
        return Ok(Vec::new());
    }

    let mut plugins = Vec::new();
    for plugin_dir in sorted_subdirs(root)? {
        let name = file_name(&plugin_dir);
        if let Some(pat) = filter.as_ref() {
            if !pat.matches(&name) {
                continue;
            }
        }
        for version_dir in sorted_subdirs(&plugin_dir)? {
            if PLUGIN_MARKERS.iter().any(|m| version_dir.join(m).exists()) {
                plugins.push(PluginInfo {
                    name: name.clone(),
                    version: file_name(&version_dir),
                    path: version_dir,
                });
            }
        }
    }
    debug!(count = plugins.len(), "discovered plugins");
    Ok(plugins)
}

/// Immediate subdirectories of `dir`, sorted by path.
pub(crate) fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn layout(root: &Path) {
        fs::create_dir_all(root.join("alpha/1.0.0/skills")).unwrap();
        fs::create_dir_all(root.join("alpha/2.0.0/agents")).unwrap();
        fs::create_dir_all(root.join("beta/0.1.0")).unwrap();
        fs::write(root.join("beta/0.1.0/plugin.json"), "{}").unwrap();
        fs::create_dir_all(root.join("gamma/0.1.0/docs")).unwrap();
        fs::write(root.join("stray.txt"), "").unwrap();
    }

    #[test]
    fn test_discover_plugins_with_markers() {
        let dir = tempdir().unwrap();
        layout(dir.path());
        let found = discover_plugins(dir.path(), None).unwrap();
        let ids: Vec<_> = found
            .iter()
            .map(|p| format!("{}@{}", p.name, p.version))
            .collect();
        assert_eq!(ids, vec!["alpha@1.0.0", "alpha@2.0.0", "beta@0.1.0"]);
        assert_eq!(found[2].path, dir.path().join("beta/0.1.0"));
    }

    #[test]
    fn test_discover_with_glob_filter() {
        let dir = tempdir().unwrap();
        layout(dir.path());
        let found = discover_plugins(dir.path(), Some("b*")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "beta");

        let found = discover_plugins(dir.path(), Some("alpha")).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_missing_root_and_bad_filter() {
        let dir = tempdir().unwrap();
        let found = discover_plugins(&dir.path().join("nope"), None).unwrap();
        assert!(found.is_empty());
        let err = discover_plugins(dir.path(), Some("[")).unwrap_err();
        assert!(matches!(err, Error::Filter { .. }));
    }
}
