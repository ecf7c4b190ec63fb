//! Plugin run orchestration: discover components, validate, score.
//!
//! A failure reading or parsing one component becomes a degraded
//! `ValidationResult`; a failure of a whole plugin becomes a degraded
//! `PluginRun`. Neither aborts the batch.

use crate::discover::{file_name, sorted_subdirs, PluginInfo};
use crate::error::{Error, Result};
use crate::frontmatter::read_component;
use crate::models::component::PluginContext;
use crate::models::report::ScoreReport;
use crate::models::{ValidationIssue, ValidationResult};
use crate::scoring;
use crate::validators::{Validator, ValidatorRegistry};
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

pub const DEFAULT_WORKERS: usize = 4;

#[derive(Serialize, Debug, Clone)]
/// Outcome of running one plugin.
pub struct PluginRun {
    pub plugin_name: String,
    pub plugin_version: String,
    pub plugin_path: String,
    pub validation_results: Vec<ValidationResult>,
    pub score: ScoreReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PluginRun {
    fn failed(plugin: &PluginInfo, error: &Error) -> Self {
        PluginRun {
            plugin_name: plugin.name.clone(),
            plugin_version: plugin.version.clone(),
            plugin_path: plugin.path.to_string_lossy().to_string(),
            validation_results: Vec::new(),
            score: ScoreReport::default(),
            error: Some(error.to_string()),
        }
    }

    /// True when any component failed validation.
    pub fn has_errors(&self) -> bool {
        self.validation_results.iter().any(|r| !r.is_valid())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
/// Totals across many plugin runs.
pub struct RunSummary {
    pub total_plugins: usize,
    pub total_components: usize,
    pub avg_structural_score: f64,
    pub plugins_with_errors: usize,
    pub plugins_clean: usize,
}

/// Progress hook: `(completed, total, plugin_name)`.
pub type Progress<'a> = &'a (dyn Fn(usize, usize, &str) + Sync);

pub struct Runner {
    workers: usize,
    validators: ValidatorRegistry,
}

impl Runner {
    pub fn new(workers: usize) -> Self {
        Self::with_validators(workers, ValidatorRegistry::default())
    }

    pub fn with_validators(workers: usize, validators: ValidatorRegistry) -> Self {
        Runner {
            workers: workers.max(1),
            validators,
        }
    }

    /// Validate every component of one plugin and score the results.
    pub fn run(&self, plugin: &PluginInfo) -> Result<PluginRun> {
        debug!(plugin = %plugin.name, version = %plugin.version, "running plugin");
        let context = PluginContext::new();
        let mut results = Vec::new();
        for validator in self.validators.iter() {
            let dir = plugin.path.join(validator.component_dir());
            if !dir.is_dir() {
                continue;
            }
            for folder in sorted_subdirs(&dir)? {
                let file = folder.join(validator.canonical_file());
                if file.is_file() {
                    results.push(validate_file(validator, &file, &file_name(&folder), &context));
                }
            }
        }
        let score = scoring::score(&results);
        Ok(PluginRun {
            plugin_name: plugin.name.clone(),
            plugin_version: plugin.version.clone(),
            plugin_path: plugin.path.to_string_lossy().to_string(),
            validation_results: results,
            score,
            error: None,
        })
    }

    /// Run many plugins on a worker pool. Output order matches input order.
    pub fn run_all(
        &self,
        plugins: &[PluginInfo],
        progress: Option<Progress<'_>>,
    ) -> Result<Vec<PluginRun>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()?;
        let total = plugins.len();
        let completed = AtomicUsize::new(0);
        let runs: Vec<PluginRun> = pool.install(|| {
            plugins
                .par_iter()
                .map(|plugin| {
                    let run = self.run(plugin).unwrap_or_else(|e| {
                        warn!(plugin = %plugin.name, error = %e, "plugin run failed");
                        PluginRun::failed(plugin, &e)
                    });
                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    if let Some(cb) = progress {
                        cb(done, total, &plugin.name);
                    }
                    run
                })
                .collect()
        });
        Ok(runs)
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(DEFAULT_WORKERS)
    }
}

/// Parse and validate one component file, degrading parse failures into a
/// single `parsing` error.
fn validate_file(
    validator: &dyn Validator,
    file: &Path,
    folder_name: &str,
    context: &PluginContext,
) -> ValidationResult {
    match read_component(file, folder_name) {
        Ok(component) => validator.validate(&component, context),
        Err(e) => {
            warn!(file = %file.display(), error = %e, "failed to parse component");
            parse_failure(validator.component_type(), folder_name, file, &e)
        }
    }
}

/// Synthetic result for a component that could not be parsed.
pub fn parse_failure(
    component_type: &str,
    component_name: &str,
    file: &Path,
    error: &Error,
) -> ValidationResult {
    let path = file.to_string_lossy();
    ValidationResult::from_issues(
        component_type,
        component_name,
        &path,
        vec![ValidationIssue::error(
            "parsing",
            format!("Failed to parse {} file: {}", component_type, error),
            &path,
        )],
        None,
    )
}

/// Summarize many plugin runs.
pub fn aggregate_results(runs: &[PluginRun]) -> RunSummary {
    let total_plugins = runs.len();
    let avg_structural_score = if runs.is_empty() {
        0.0
    } else {
        runs.iter().map(|r| r.score.overall_score).sum::<f64>() / total_plugins as f64
    };
    let plugins_with_errors = runs.iter().filter(|r| r.has_errors()).count();
    RunSummary {
        total_plugins,
        total_components: runs.iter().map(|r| r.validation_results.len()).sum(),
        avg_structural_score,
        plugins_with_errors,
        plugins_clean: total_plugins - plugins_with_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discover::discover_plugins;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::tempdir;

    const GOOD: &str = "---\nname: good-skill\ndescription: \"Manages releases. Use when the user mentions \\\"release\\\".\"\n---\n\n## Examples\n\n```sh\nrelease\n```\n";

    fn write_skill(root: &Path, plugin: &str, folder: &str, content: &str) {
        let dir = root.join(plugin).join("1.0.0/skills").join(folder);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("SKILL.md"), content).unwrap();
    }

    #[test]
    fn test_run_validates_each_skill_folder() {
        let dir = tempdir().unwrap();
        write_skill(dir.path(), "p", "good-skill", GOOD);
        write_skill(dir.path(), "p", "broken", "---\nname: [oops\n---\n");
        // folder without SKILL.md is ignored
        fs::create_dir_all(dir.path().join("p/1.0.0/skills/empty")).unwrap();

        let plugins = discover_plugins(dir.path(), None).unwrap();
        let run = Runner::default().run(&plugins[0]).unwrap();
        assert!(run.error.is_none());
        assert_eq!(run.validation_results.len(), 2);

        let broken = &run.validation_results[0];
        assert_eq!(broken.component_name, "broken");
        assert!(!broken.is_valid());
        assert_eq!(broken.errors().len(), 1);
        assert_eq!(broken.errors()[0].category, "parsing");
        assert!(broken.scores().is_none());

        let good = &run.validation_results[1];
        assert!(good.is_valid(), "{:?}", good.errors());
        assert_eq!(good.scores().unwrap().structural, 100.0);

        assert_eq!(run.score.total_components, 2);
        assert_eq!(run.score.valid_components, 1);
        assert_eq!(run.score.overall_score, 50.0);
        assert!(run.has_errors());
    }

    #[test]
    fn test_run_all_preserves_order_and_reports_progress() {
        let dir = tempdir().unwrap();
        write_skill(dir.path(), "a", "good-skill", GOOD);
        write_skill(dir.path(), "b", "good-skill", GOOD);
        write_skill(dir.path(), "c", "good-skill", "---\nname: x\n---\n");
        let plugins = discover_plugins(dir.path(), None).unwrap();

        let seen = Mutex::new(Vec::new());
        let cb = |done: usize, total: usize, _name: &str| {
            seen.lock().unwrap().push((done, total));
        };
        let runs = Runner::new(2).run_all(&plugins, Some(&cb)).unwrap();
        let names: Vec<_> = runs.iter().map(|r| r.plugin_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        let mut seen = seen.into_inner().unwrap();
        seen.sort();
        assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);

        let summary = aggregate_results(&runs);
        assert_eq!(summary.total_plugins, 3);
        assert_eq!(summary.total_components, 3);
        assert_eq!(summary.plugins_with_errors, 1);
        assert_eq!(summary.plugins_clean, 2);
    }

    #[test]
    fn test_plugin_without_components_yields_empty_run() {
        let missing = PluginInfo {
            name: "ghost".into(),
            version: "0.0.1".into(),
            path: tempdir().unwrap().path().join("gone"),
        };
        let runs = Runner::new(1).run_all(&[missing], None).unwrap();
        assert_eq!(runs.len(), 1);
        assert!(runs[0].validation_results.is_empty());
        assert_eq!(runs[0].score, ScoreReport::default());
    }

    #[test]
    fn test_aggregate_empty() {
        let s = aggregate_results(&[]);
        assert_eq!(s.total_plugins, 0);
        assert_eq!(s.avg_structural_score, 0.0);
    }
}
