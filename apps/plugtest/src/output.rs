//! Output rendering for discover, validate, test, and score commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON forms are built
//! by pure `compose_*` helpers so their shape can be tested.

use crate::discover::PluginInfo;
use crate::models::Severity;
use crate::runner::{PluginRun, RunSummary};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

const SHOWN_ERRORS: usize = 3;
const SHOWN_WARNINGS: usize = 2;
const SHOWN_RECOMMENDATIONS: usize = 5;
const RULE: &str = "============================================================";

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn print_json(value: &JsonVal) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("{} {}", error_prefix(), e),
    }
}

fn severity_tag(sev: Severity, color: bool) -> String {
    let tag = match sev {
        Severity::Error => "ERROR",
        Severity::Warning => "WARN",
        Severity::Info => "INFO",
    };
    if !color {
        return tag.to_string();
    }
    match sev {
        Severity::Error => tag.red().bold().to_string(),
        Severity::Warning => tag.yellow().bold().to_string(),
        Severity::Info => tag.blue().bold().to_string(),
    }
}

fn heading(title: &str, color: bool) {
    println!("\n{}", RULE);
    if color {
        println!("{}", title.bold());
    } else {
        println!("{}", title);
    }
    println!("{}\n", RULE);
}

/// Prefix for fatal CLI messages on stderr.
pub fn error_prefix() -> String {
    if std::env::var_os("NO_COLOR").is_none() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// Print discovered plugins.
pub fn print_discover(plugins: &[PluginInfo], output: &str) {
    if output == "json" {
        print_json(&compose_discover_json(plugins));
        return;
    }
    if plugins.is_empty() {
        println!("No plugins found.");
        return;
    }
    let color = use_colors(output);
    println!("Found {} plugin(s):\n", plugins.len());
    for p in plugins {
        if color {
            println!("  • {} (v{})", p.name.bold(), p.version);
        } else {
            println!("  • {} (v{})", p.name, p.version);
        }
        println!("    {}", p.path.to_string_lossy());
    }
}

/// Print per-component validation status for one plugin.
pub fn print_validate(run: &PluginRun, output: &str) {
    if output == "json" {
        print_json(&compose_validate_json(run));
        return;
    }
    let color = use_colors(output);
    heading(
        &format!("Plugin: {} v{}", run.plugin_name, run.plugin_version),
        color,
    );
    if let Some(err) = &run.error {
        println!("{} {}", error_prefix(), err);
    }
    if run.validation_results.is_empty() {
        println!("No components found to validate.");
        return;
    }
    for vr in &run.validation_results {
        let status = match (vr.is_valid(), color) {
            (true, true) => "✓".green().to_string(),
            (true, false) => "✓".to_string(),
            (false, true) => "✗".red().to_string(),
            (false, false) => "✗".to_string(),
        };
        println!("{} {}: {}", status, vr.component_type, vr.component_name);
        for e in vr.errors().iter().take(SHOWN_ERRORS) {
            println!("  └─ {}: {}", severity_tag(Severity::Error, color), e.message);
        }
        for w in vr.warnings().iter().take(SHOWN_WARNINGS) {
            println!("  └─ {}: {}", severity_tag(Severity::Warning, color), w.message);
        }
    }
    println!(
        "\nValidation: {}/{} components valid",
        run.score.valid_components, run.score.total_components
    );
}

/// Print the quality score for one plugin.
pub fn print_score(run: &PluginRun, output: &str) {
    if output == "json" {
        print_json(&compose_score_json(run));
        return;
    }
    let color = use_colors(output);
    let score = &run.score;
    heading(
        &format!("Quality Score: {} v{}", run.plugin_name, run.plugin_version),
        color,
    );
    let overall = format!("Overall Score: {:.1}/100", score.overall_score);
    if color {
        println!("{}", overall.bold());
    } else {
        println!("{}", overall);
    }
    println!(
        "Components: {}/{} valid\n",
        score.valid_components, score.total_components
    );
    if !score.breakdown_by_type.is_empty() {
        println!("Breakdown by Type:");
        for (ty, data) in &score.breakdown_by_type {
            println!(
                "  • {}: {:.1}/100 ({} components)",
                ty, data.avg_score, data.count
            );
        }
    }
    if !score.recommendations.is_empty() {
        println!("\nRecommendations:");
        for rec in score.recommendations.iter().take(SHOWN_RECOMMENDATIONS) {
            println!("  [{}] {}", severity_tag(rec.severity, color), rec.message);
        }
    }
}

/// Print a progress line for `test` runs.
pub fn print_progress(done: usize, total: usize, plugin: &str, output: &str) {
    if output != "json" {
        println!("[{}/{}] Testing {}...", done, total, plugin);
    }
}

/// Print the cross-plugin summary for `test` runs.
pub fn print_summary(runs: &[PluginRun], summary: &RunSummary, output: &str) {
    if output == "json" {
        print_json(&compose_test_json(runs, summary));
        return;
    }
    let color = use_colors(output);
    heading("Test Summary", color);
    println!("Total Plugins: {}", summary.total_plugins);
    println!("Total Components: {}", summary.total_components);
    println!("Average Score: {:.1}/100", summary.avg_structural_score);
    if color {
        println!("Plugins Clean: {}", summary.plugins_clean.green());
        println!("Plugins with Issues: {}", summary.plugins_with_errors.red());
    } else {
        println!("Plugins Clean: {}", summary.plugins_clean);
        println!("Plugins with Issues: {}", summary.plugins_with_errors);
    }
    for run in runs.iter().filter(|r| r.error.is_some()) {
        if let Some(err) = &run.error {
            println!("{} {}: {}", error_prefix(), run.plugin_name, err);
        }
    }
}

/// Compose discover JSON (pure) for testing/snapshot purposes.
pub fn compose_discover_json(plugins: &[PluginInfo]) -> JsonVal {
    json!({
        "plugins": plugins,
        "summary": { "total": plugins.len() },
    })
}

/// Compose validate JSON: per-component results plus valid/total counts.
pub fn compose_validate_json(run: &PluginRun) -> JsonVal {
    json!({
        "plugin": run.plugin_name,
        "version": run.plugin_version,
        "path": run.plugin_path,
        "results": run.validation_results,
        "error": run.error,
        "summary": {
            "valid": run.score.valid_components,
            "total": run.score.total_components,
        },
    })
}

/// Compose score JSON: the full report for one plugin.
pub fn compose_score_json(run: &PluginRun) -> JsonVal {
    json!({
        "plugin": run.plugin_name,
        "version": run.plugin_version,
        "score": run.score,
    })
}

/// Compose test JSON: every run plus the aggregate summary.
pub fn compose_test_json(runs: &[PluginRun], summary: &RunSummary) -> JsonVal {
    json!({
        "results": runs,
        "summary": summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Scores, ValidationIssue, ValidationResult};
    use crate::runner::aggregate_results;
    use crate::scoring;
    use std::path::PathBuf;

    fn sample_run() -> PluginRun {
        let results = vec![
            ValidationResult::from_issues(
                "skill",
                "ok-skill",
                "/p/skills/ok-skill/SKILL.md",
                vec![],
                Some(Scores {
                    structural: 100.0,
                    functional: 60.0,
                    documentation: 50.0,
                }),
            ),
            ValidationResult::from_issues(
                "skill",
                "ab",
                "/p/skills/ab/SKILL.md",
                vec![ValidationIssue::error("naming", "too short", "/p/skills/ab/SKILL.md")],
                None,
            ),
        ];
        let score = scoring::score(&results);
        PluginRun {
            plugin_name: "demo".into(),
            plugin_version: "1.0.0".into(),
            plugin_path: "/p".into(),
            validation_results: results,
            score,
            error: None,
        }
    }

    #[test]
    fn test_compose_validate_json_shape() {
        let out = compose_validate_json(&sample_run());
        assert_eq!(out["summary"]["valid"], 1);
        assert_eq!(out["summary"]["total"], 2);
        assert_eq!(out["results"][1]["valid"], false);
        assert_eq!(out["results"][1]["errors"][0]["severity"], "error");
        assert!(out["results"][1].get("scores").is_none());
        assert_eq!(out["results"][0]["scores"]["structural"], 100.0);
        assert!(out["error"].is_null());
    }

    #[test]
    fn test_compose_score_and_test_json() {
        let run = sample_run();
        let out = compose_score_json(&run);
        assert_eq!(out["score"]["overall_score"], 50.0);
        assert_eq!(out["score"]["breakdown_by_type"]["skill"]["valid_count"], 1);
        assert_eq!(out["score"]["recommendations"][0]["category"], "naming");
        assert_eq!(out["score"]["recommendations"][0]["priority"], 3);

        let runs = vec![run];
        let summary = aggregate_results(&runs);
        let out = compose_test_json(&runs, &summary);
        assert_eq!(out["summary"]["plugins_with_errors"], 1);
        assert_eq!(out["results"][0]["plugin_name"], "demo");
    }

    #[test]
    fn test_compose_discover_json() {
        let plugins = vec![PluginInfo {
            name: "demo".into(),
            version: "1.0.0".into(),
            path: PathBuf::from("/p/demo/1.0.0"),
        }];
        let out = compose_discover_json(&plugins);
        assert_eq!(out["summary"]["total"], 1);
        assert_eq!(out["plugins"][0]["path"], "/p/demo/1.0.0");
    }
}
