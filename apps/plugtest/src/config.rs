//! Configuration discovery and effective settings resolution.
//!
//! plugtest reads `plugtest.toml|yaml|yml` from the working directory (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `path`: `~/.claude/plugins/cache`
//! - `filter`: none
//! - `workers`: 4
//! - `output`: `human`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::runner::DEFAULT_WORKERS;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_PLUGINS_PATH: &str = "~/.claude/plugins/cache";
const CONFIG_TOML: &str = "plugtest.toml";
const CONFIG_YAML: &[&str] = &["plugtest.yaml", "plugtest.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `plugtest.toml|yaml`.
pub struct PlugtestConfig {
    pub path: Option<String>,
    pub filter: Option<String>,
    pub workers: Option<usize>,
    pub output: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub plugins_root: PathBuf,
    pub filter: Option<String>,
    pub workers: usize,
    pub output: String,
}

#[derive(Debug, Default, Clone)]
/// CLI-provided overrides; `None` defers to config or defaults.
pub struct Overrides<'a> {
    pub path: Option<&'a str>,
    pub filter: Option<&'a str>,
    pub workers: Option<usize>,
    pub output: Option<&'a str>,
}

/// Walk upward from `start` to find the directory holding the config.
///
/// Stops at a `plugtest.toml|yaml|yml` or a `.git` directory.
pub fn detect_config_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if config_files().any(|f| cur.join(f).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

fn config_files() -> impl Iterator<Item = &'static str> {
    std::iter::once(CONFIG_TOML).chain(CONFIG_YAML.iter().copied())
}

/// Load `PlugtestConfig` from `plugtest.toml` or `plugtest.yaml|yml`.
///
/// Unreadable or invalid files are logged and treated as absent.
pub fn load_config(root: &Path) -> Option<PlugtestConfig> {
    let toml_path = root.join(CONFIG_TOML);
    if toml_path.exists() {
        let s = read_logged(&toml_path)?;
        return toml::from_str(&s)
            .map_err(|e| warn!(path = %toml_path.display(), error = %e, "ignoring invalid config"))
            .ok();
    }
    for yml in CONFIG_YAML {
        let p = root.join(yml);
        if p.exists() {
            let s = read_logged(&p)?;
            return serde_yaml::from_str(&s)
                .map_err(|e| warn!(path = %p.display(), error = %e, "ignoring invalid config"))
                .ok();
        }
    }
    None
}

fn read_logged(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .map_err(|e| warn!(path = %path.display(), error = %e, "cannot read config"))
        .ok()
}

/// Resolve `Effective` by merging CLI overrides, discovered config, and
/// defaults. `cwd` is where config discovery starts.
pub fn resolve_effective(cwd: &Path, cli: &Overrides<'_>) -> Effective {
    let cfg = load_config(&detect_config_root(cwd)).unwrap_or_default();

    let path = cli
        .path
        .map(str::to_string)
        .or(cfg.path)
        .unwrap_or_else(|| DEFAULT_PLUGINS_PATH.to_string());
    let filter = cli.filter.map(str::to_string).or(cfg.filter);
    let workers = cli.workers.or(cfg.workers).unwrap_or(DEFAULT_WORKERS).max(1);
    let output = cli
        .output
        .map(str::to_string)
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    Effective {
        plugins_root: expand_home(&path),
        filter,
        workers,
        output,
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("plugtest.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
path = "/srv/plugins"
filter = "acme-*"
workers = 8
output = "json"
    "#
        )
        .unwrap();

        let eff = resolve_effective(root, &Overrides::default());
        assert_eq!(eff.plugins_root, PathBuf::from("/srv/plugins"));
        assert_eq!(eff.filter.as_deref(), Some("acme-*"));
        assert_eq!(eff.workers, 8);
        assert_eq!(eff.output, "json");
    }

    #[test]
    fn test_load_yaml_from_nested_dir() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("plugtest.yaml"), "path: /opt/plugins\nworkers: 2\n").unwrap();
        let nested = root.join("a/b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(detect_config_root(&nested), root.to_path_buf());
        let eff = resolve_effective(&nested, &Overrides::default());
        assert_eq!(eff.plugins_root, PathBuf::from("/opt/plugins"));
        assert_eq!(eff.workers, 2);
        assert_eq!(eff.output, "human");
        assert!(eff.filter.is_none());
    }

    #[test]
    fn test_cli_takes_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("plugtest.toml"),
            "path = \"/srv/plugins\"\nworkers = 8\noutput = \"json\"\n",
        )
        .unwrap();
        let cli = Overrides {
            path: Some("/tmp/other"),
            filter: Some("x*"),
            workers: Some(0),
            output: Some("human"),
        };
        let eff = resolve_effective(root, &cli);
        assert_eq!(eff.plugins_root, PathBuf::from("/tmp/other"));
        assert_eq!(eff.filter.as_deref(), Some("x*"));
        // zero workers is clamped
        assert_eq!(eff.workers, 1);
        assert_eq!(eff.output, "human");
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join("plugtest.toml"), "workers = \"many\"").unwrap();
        assert!(load_config(root).is_none());
        let eff = resolve_effective(root, &Overrides::default());
        assert_eq!(eff.workers, DEFAULT_WORKERS);
        assert_eq!(eff.plugins_root, expand_home(DEFAULT_PLUGINS_PATH));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(expand_home("~user/x"), PathBuf::from("~user/x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/plugins"), home.join("plugins"));
            assert_eq!(expand_home("~"), home);
        }
    }
}
