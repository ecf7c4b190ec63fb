//! Reusable component checks.
//!
//! Every check is a pure function of its inputs and returns the issues it
//! found; an empty vector means the check passed. Validators compose these
//! in a fixed order.

use crate::models::ValidationIssue;
use regex::Regex;
use serde_json::{Map, Value as Json};
use std::sync::LazyLock;

pub const RESERVED_PREFIXES: &[&str] = &["claude-", "anthropic-"];

const NAME_MIN: usize = 3;
const NAME_MAX: usize = 50;
const DESCRIPTION_MIN: usize = 10;

const ACTION_VERBS: &[&str] = &[
    "creates",
    "manages",
    "analyzes",
    "generates",
    "validates",
    "converts",
    "processes",
    "monitors",
    "configures",
    "deploys",
    "builds",
    "tests",
    "runs",
    "executes",
    "handles",
];

const TRIGGER_PHRASES: &[&str] = &[
    "use when",
    "use this",
    "trigger",
    "ask to",
    "asks for",
    "mentions",
    "says",
    "requests",
    "use for",
];

const VAGUE_PHRASES: &[&str] = &[
    "helps with",
    "does things",
    "general purpose",
    "various tasks",
    "stuff",
];

static RE_KEBAB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*[a-z0-9]$").unwrap());
static RE_QUOTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""[^"]{3,}""#).unwrap());
static RE_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s_]+").unwrap());
static RE_NOT_KEBAB: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9-]").unwrap());
static RE_HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// Validate the kebab-case naming convention.
///
/// Length, format, and reserved-prefix checks are independent; every one
/// that applies yields its own issue.
pub fn check_naming(name: &str, file_path: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let len = name.chars().count();

    if len < NAME_MIN {
        issues.push(
            ValidationIssue::error(
                "naming",
                format!("Name '{}' is too short (minimum {} characters)", name, NAME_MIN),
                file_path,
            )
            .with_suggestion("Use a more descriptive name (3-50 characters)"),
        );
    }
    if len > NAME_MAX {
        issues.push(ValidationIssue::error(
            "naming",
            format!("Name '{}' is too long (maximum {} characters)", name, NAME_MAX),
            file_path,
        ));
    }
    if !RE_KEBAB.is_match(name) {
        issues.push(
            ValidationIssue::error(
                "naming",
                format!("Name '{}' must be kebab-case (lowercase, hyphens only)", name),
                file_path,
            )
            .with_suggestion(format!("Suggested: '{}'", to_kebab_case(name))),
        );
    }
    if RESERVED_PREFIXES.iter().any(|p| name.starts_with(p)) {
        issues.push(
            ValidationIssue::error(
                "naming",
                format!(
                    "Name '{}' uses reserved prefix ({})",
                    name,
                    RESERVED_PREFIXES.join(", ")
                ),
                file_path,
            )
            .with_suggestion("Choose a different name without reserved prefixes"),
        );
    }
    issues
}

/// Emit one error per required key missing from `data`.
pub fn check_required_fields(
    data: &Map<String, Json>,
    required: &[&str],
    file_path: &str,
) -> Vec<ValidationIssue> {
    required
        .iter()
        .filter(|key| !data.contains_key(**key))
        .map(|key| {
            ValidationIssue::error(
                "required_fields",
                format!("Missing required field: '{}'", key),
                file_path,
            )
            .with_suggestion(format!("Add '{}' field to frontmatter", key))
        })
        .collect()
}

/// Heuristic description score in `[0, 100]` plus the issues found.
///
/// Descriptions under 10 characters short-circuit with a score of 0.
pub fn check_description_quality(description: &str, file_path: &str) -> (u8, Vec<ValidationIssue>) {
    let mut issues = Vec::new();
    let len = description.chars().count();

    if len < DESCRIPTION_MIN {
        issues.push(
            ValidationIssue::error(
                "description_quality",
                format!(
                    "Description too short (minimum {} characters)",
                    DESCRIPTION_MIN
                ),
                file_path,
            )
            .with_suggestion(
                "Expand description with what the component does and when to use it",
            ),
        );
        return (0, issues);
    }

    let mut score: i32 = match len {
        100.. => 20,
        50..=99 => 10,
        _ => 5,
    };

    let lower = description.to_lowercase();

    if ACTION_VERBS.iter().any(|v| lower.contains(v)) {
        score += 20;
    } else {
        issues.push(
            ValidationIssue::warning(
                "description_quality",
                "Description lacks clear action statement",
                file_path,
            )
            .with_suggestion(
                "Start with what the component does (e.g., 'Manages...', 'Analyzes...')",
            ),
        );
    }

    let triggers = TRIGGER_PHRASES.iter().filter(|p| lower.contains(*p)).count() as i32;
    score += (triggers * 10).min(30);
    if triggers == 0 {
        issues.push(
            ValidationIssue::warning(
                "description_quality",
                "Description missing trigger conditions",
                file_path,
            )
            .with_suggestion("Add 'Use when...' with specific user phrases"),
        );
    }

    let quoted = RE_QUOTED.find_iter(description).count() as i32;
    score += (quoted * 5).min(20);

    if VAGUE_PHRASES.iter().any(|v| lower.contains(v)) {
        score -= 10;
        issues.push(
            ValidationIssue::warning(
                "description_quality",
                "Description contains vague language",
                file_path,
            )
            .with_suggestion("Be specific about what the component does"),
        );
    }

    (score.clamp(0, 100) as u8, issues)
}

/// Flag angle brackets, which could smuggle markup into prompts.
pub fn check_xml_injection(text: &str, file_path: &str) -> Vec<ValidationIssue> {
    if text.contains('<') || text.contains('>') {
        vec![ValidationIssue::error(
            "security",
            "XML angle brackets detected in frontmatter (security risk)",
            file_path,
        )
        .with_suggestion("Remove < and > characters from frontmatter")]
    } else {
        Vec::new()
    }
}

/// Best-effort kebab-case rewrite used for naming suggestions.
pub fn to_kebab_case(text: &str) -> String {
    let hyphenated = RE_SEPARATORS.replace_all(text, "-");
    let lower = hyphenated.to_lowercase();
    let stripped = RE_NOT_KEBAB.replace_all(&lower, "");
    let collapsed = RE_HYPHENS.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}
