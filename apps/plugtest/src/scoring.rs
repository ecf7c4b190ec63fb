//! Plugin-level aggregation of component results.
//!
//! `score` folds many `ValidationResult`s into a `ScoreReport`:
//! - `overall_score`: mean structural score (validity fallback 100/0).
//! - `breakdown_by_category`: issue counts, dominant severity, examples.
//! - `breakdown_by_type`: per component type count, mean score, valid count.
//! - `recommendations`: one per category with errors or warnings, sorted by
//!   priority then severity.
//!
//! The scorer only reads its input and performs no I/O.

use crate::models::report::{
    CategoryBreakdown, IssueExample, Recommendation, ScoreReport, TypeBreakdown,
};
use crate::models::{Severity, ValidationResult};
use std::collections::BTreeMap;

const MAX_EXAMPLES: usize = 3;
const DEFAULT_PRIORITY: u8 = 3;

/// Remediation message and priority per known category.
const RECOMMENDATION_TEMPLATES: &[(&str, &str, u8)] = &[
    (
        "required_fields",
        "Add missing required fields to component frontmatter",
        1,
    ),
    (
        "schema_compliance",
        "Fix schema violations (description length, field formats)",
        1,
    ),
    (
        "yaml_validity",
        "Fix YAML/JSON parsing errors in frontmatter",
        1,
    ),
    (
        "file_organization",
        "Rename files to match conventions (SKILL.md case-sensitive)",
        2,
    ),
    (
        "naming_convention",
        "Update component names to kebab-case (3-50 chars, lowercase)",
        2,
    ),
];

/// Aggregate component results into one plugin report.
pub fn score(results: &[ValidationResult]) -> ScoreReport {
    if results.is_empty() {
        return ScoreReport::default();
    }

    let total: f64 = results.iter().map(|r| r.structural_or_fallback()).sum();
    let breakdown_by_category = categorize_issues(results);
    let recommendations = recommendations(&breakdown_by_category);

    ScoreReport {
        overall_score: total / results.len() as f64,
        total_components: results.len(),
        valid_components: results.iter().filter(|r| r.is_valid()).count(),
        breakdown_by_category,
        breakdown_by_type: breakdown_by_type(results),
        recommendations,
    }
}

fn categorize_issues(results: &[ValidationResult]) -> BTreeMap<String, CategoryBreakdown> {
    let mut out: BTreeMap<String, CategoryBreakdown> = BTreeMap::new();
    for issue in results.iter().flat_map(|r| r.all_issues()) {
        let entry = out
            .entry(issue.category.clone())
            .or_insert_with(|| CategoryBreakdown {
                count: 0,
                severity: issue.severity,
                examples: Vec::new(),
            });
        entry.count += 1;
        // Error < Warning < Info, so min is the most severe
        entry.severity = entry.severity.min(issue.severity);
        if entry.examples.len() < MAX_EXAMPLES {
            entry.examples.push(IssueExample {
                message: issue.message.clone(),
                file: issue.file_path.clone(),
            });
        }
    }
    out
}

fn breakdown_by_type(results: &[ValidationResult]) -> BTreeMap<String, TypeBreakdown> {
    let mut sums: BTreeMap<&str, (usize, f64, usize)> = BTreeMap::new();
    for r in results {
        let e = sums.entry(r.component_type.as_str()).or_default();
        e.0 += 1;
        e.1 += r.structural_or_fallback();
        if r.is_valid() {
            e.2 += 1;
        }
    }
    sums.into_iter()
        .map(|(ty, (count, total, valid_count))| {
            (
                ty.to_string(),
                TypeBreakdown {
                    count,
                    avg_score: total / count as f64,
                    valid_count,
                },
            )
        })
        .collect()
}

fn recommendations(categories: &BTreeMap<String, CategoryBreakdown>) -> Vec<Recommendation> {
    let mut recs: Vec<Recommendation> = categories
        .iter()
        .filter(|(_, data)| data.severity != Severity::Info)
        .map(|(category, data)| {
            let (message, priority) = template_for(category);
            Recommendation {
                category: category.clone(),
                severity: data.severity,
                message,
                affected_count: data.count,
                priority,
            }
        })
        .collect();
    recs.sort_by_key(|r| (r.priority, r.severity.rank()));
    recs
}

fn template_for(category: &str) -> (String, u8) {
    RECOMMENDATION_TEMPLATES
        .iter()
        .find(|(cat, _, _)| *cat == category)
        .map(|(_, msg, prio)| (msg.to_string(), *prio))
        .unwrap_or_else(|| (format!("Address {} issues", category), DEFAULT_PRIORITY))
}
