//! Skill validator (`skills/<name>/SKILL.md`).

use super::Validator;
use crate::models::component::{Component, PluginContext};
use crate::models::{Scores, Severity, ValidationIssue, ValidationResult};
use crate::rules::{
    check_description_quality, check_naming, check_required_fields, check_xml_injection,
};
use serde_json::Value as Json;

const COMPONENT_TYPE: &str = "skill";
const CANONICAL_FILE: &str = "SKILL.md";
const REQUIRED_FIELDS: &[&str] = &["name", "description"];
const DESCRIPTION_MAX: usize = 1024;

const ERROR_PENALTY: f64 = 15.0;
const WARNING_PENALTY: f64 = 5.0;

#[derive(Debug, Default, Clone, Copy)]
pub struct SkillValidator;

impl Validator for SkillValidator {
    fn component_type(&self) -> &'static str {
        COMPONENT_TYPE
    }

    fn component_dir(&self) -> &'static str {
        "skills"
    }

    fn canonical_file(&self) -> &'static str {
        CANONICAL_FILE
    }

    /// Run the skill checks in order and compute dimension scores.
    ///
    /// Missing `name` or `description` ends validation early: later checks
    /// read both fields.
    fn validate(&self, component: &Component, _context: &PluginContext) -> ValidationResult {
        let path = component.file_path.as_str();

        let missing = check_required_fields(&component.frontmatter, REQUIRED_FIELDS, path);
        if !missing.is_empty() {
            let name = component
                .field_text("name")
                .unwrap_or_else(|| "unknown".to_string());
            return ValidationResult::from_issues(COMPONENT_TYPE, name, path, missing, None);
        }

        let mut issues: Vec<ValidationIssue> = Vec::new();
        issues.extend(check_field_types(component, path));

        let name = component.field_text("name").unwrap_or_default();
        let description = component.field_text("description").unwrap_or_default();

        issues.extend(check_naming(&name, path));

        let expected_suffix = format!("/{}", CANONICAL_FILE);
        if !path.ends_with(&expected_suffix) {
            issues.push(
                ValidationIssue::error(
                    "file_organization",
                    format!("Skill file must be named '{}' (exact case)", CANONICAL_FILE),
                    path,
                )
                .with_suggestion(format!("Rename to {}", CANONICAL_FILE)),
            );
        }

        if !component.folder_name.is_empty() && component.folder_name != name {
            issues.push(
                ValidationIssue::warning(
                    "file_organization",
                    format!(
                        "Folder name '{}' doesn't match skill name '{}'",
                        component.folder_name, name
                    ),
                    path,
                )
                .with_suggestion(format!("Rename folder to '{}'", name)),
            );
        }

        let (functional, desc_issues) = check_description_quality(&description, path);
        issues.extend(desc_issues);

        issues.extend(check_xml_injection(&description, path));

        let desc_len = description.chars().count();
        if desc_len > DESCRIPTION_MAX {
            issues.push(
                ValidationIssue::error(
                    "schema_compliance",
                    format!(
                        "Description too long ({} characters, max {})",
                        desc_len, DESCRIPTION_MAX
                    ),
                    path,
                )
                .with_suggestion("Shorten description or move details to SKILL.md body"),
            );
        }

        let scores = Scores {
            structural: structural_score(&issues),
            functional: f64::from(functional),
            documentation: documentation_score(&component.body),
        };
        ValidationResult::from_issues(COMPONENT_TYPE, name, path, issues, Some(scores))
    }
}

/// Required fields must be YAML strings; other types are reported and then
/// checked by their textual form.
fn check_field_types(component: &Component, path: &str) -> Vec<ValidationIssue> {
    REQUIRED_FIELDS
        .iter()
        .filter(|key| !matches!(component.frontmatter.get(**key), Some(Json::String(_))))
        .map(|key| {
            ValidationIssue::error(
                "schema_compliance",
                format!("Field '{}' must be a string", key),
                path,
            )
            .with_suggestion(format!("Quote the '{}' value in frontmatter", key))
        })
        .collect()
}

/// 100 minus 15 per error and 5 per warning, floored at 0.
pub fn structural_score(issues: &[ValidationIssue]) -> f64 {
    let penalty: f64 = issues
        .iter()
        .map(|i| match i.severity {
            Severity::Error => ERROR_PENALTY,
            Severity::Warning => WARNING_PENALTY,
            Severity::Info => 0.0,
        })
        .sum();
    (100.0 - penalty).max(0.0)
}

/// Body completeness: length, an examples section, headings, code fences.
///
/// Bodies above 5000 words earn no length bonus.
pub fn documentation_score(body: &str) -> f64 {
    let mut score = 0.0;

    let words = body.split_whitespace().count();
    score += match words {
        0..=199 => 10.0,
        200..=499 => 20.0,
        500..=5000 => 30.0,
        _ => 0.0,
    };

    if body.contains("## Example") || body.to_lowercase().contains("## examples") {
        score += 25.0;
    }

    score += match body.matches("##").count() {
        0 => 0.0,
        1 | 2 => 10.0,
        _ => 20.0,
    };

    if body.contains("```") {
        score += 15.0;
    }

    f64::min(score, 100.0)
}
