//! Shared data models for validation outcomes.
//!
//! Submodules hold the parsed component record (`component`) and the
//! aggregated plugin report (`report`).

pub mod component;
pub mod report;

use serde::Serialize;
use std::fmt;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
/// Issue severity. Variant order is display order: errors first.
pub enum Severity {
    /// Blocks validity.
    Error,
    /// Reduces score.
    Warning,
    /// Informational only.
    Info,
}

impl Severity {
    /// Sort rank used when ordering recommendations.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Error => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
/// A single validation issue produced by a rule.
pub struct ValidationIssue {
    pub severity: Severity,
    /// Semantic grouping, e.g. `naming` or `required_fields`.
    pub category: String,
    pub message: String,
    pub file_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    pub fn new(
        severity: Severity,
        category: &str,
        message: impl Into<String>,
        file_path: &str,
    ) -> Self {
        ValidationIssue {
            severity,
            category: category.to_string(),
            message: message.into(),
            file_path: file_path.to_string(),
            line_number: None,
            suggestion: None,
        }
    }

    pub fn error(category: &str, message: impl Into<String>, file_path: &str) -> Self {
        Self::new(Severity::Error, category, message, file_path)
    }

    pub fn warning(category: &str, message: impl Into<String>, file_path: &str) -> Self {
        Self::new(Severity::Warning, category, message, file_path)
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
/// Per-component dimension scores, each in `[0, 100]`.
pub struct Scores {
    pub structural: f64,
    pub functional: f64,
    pub documentation: f64,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IssueCounts {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

#[derive(Serialize, Debug, Clone)]
/// Result of validating one component.
///
/// Built only through [`ValidationResult::from_issues`], so `valid` always
/// equals "no errors".
pub struct ValidationResult {
    pub component_type: String,
    pub component_name: String,
    pub component_path: String,
    valid: bool,
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
    info: Vec<ValidationIssue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scores: Option<Scores>,
}

impl ValidationResult {
    /// Partition `issues` by their own severity, preserving insertion order
    /// within each bucket.
    pub fn from_issues(
        component_type: &str,
        component_name: impl Into<String>,
        component_path: &str,
        issues: Vec<ValidationIssue>,
        scores: Option<Scores>,
    ) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut info = Vec::new();
        for issue in issues {
            match issue.severity {
                Severity::Error => errors.push(issue),
                Severity::Warning => warnings.push(issue),
                Severity::Info => info.push(issue),
            }
        }
        ValidationResult {
            component_type: component_type.to_string(),
            component_name: component_name.into(),
            component_path: component_path.to_string(),
            valid: errors.is_empty(),
            errors,
            warnings,
            info,
            scores,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[ValidationIssue] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ValidationIssue] {
        &self.warnings
    }

    pub fn info(&self) -> &[ValidationIssue] {
        &self.info
    }

    pub fn scores(&self) -> Option<&Scores> {
        self.scores.as_ref()
    }

    /// Errors, then warnings, then info.
    pub fn all_issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.info.iter())
    }

    pub fn issue_count(&self) -> IssueCounts {
        IssueCounts {
            errors: self.errors.len(),
            warnings: self.warnings.len(),
            info: self.info.len(),
        }
    }

    /// Structural score, or 100/0 by validity when no scores were computed.
    pub fn structural_or_fallback(&self) -> f64 {
        match self.scores {
            Some(s) => s.structural,
            None if self.valid => 100.0,
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_issues_routes_by_severity_and_sets_valid() {
        let issues = vec![
            ValidationIssue::warning("naming", "w1", "/p/SKILL.md"),
            ValidationIssue::error("security", "e1", "/p/SKILL.md"),
            ValidationIssue::new(Severity::Info, "misc", "i1", "/p/SKILL.md"),
            ValidationIssue::error("naming", "e2", "/p/SKILL.md"),
        ];
        let res = ValidationResult::from_issues("skill", "x", "/p/SKILL.md", issues, None);
        assert!(!res.is_valid());
        let msgs: Vec<_> = res.all_issues().map(|i| i.message.as_str()).collect();
        assert_eq!(msgs, vec!["e1", "e2", "w1", "i1"]);
        assert_eq!(
            res.issue_count(),
            IssueCounts {
                errors: 2,
                warnings: 1,
                info: 1
            }
        );
    }

    #[test]
    fn test_warnings_only_is_valid() {
        let issues = vec![ValidationIssue::warning("naming", "w", "/p/SKILL.md")];
        let res = ValidationResult::from_issues("skill", "x", "/p/SKILL.md", issues, None);
        assert!(res.is_valid());
        assert_eq!(res.structural_or_fallback(), 100.0);
    }

    #[test]
    fn test_severity_order_and_json() {
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Warning < Severity::Info);
        let v = serde_json::to_value(Severity::Warning).unwrap();
        assert_eq!(v, "warning");
    }
}
