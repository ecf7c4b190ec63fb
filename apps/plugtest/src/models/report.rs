//! Plugin-level quality report produced by the scorer.

use super::Severity;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct IssueExample {
    pub message: String,
    pub file: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
/// Issues grouped under one category.
pub struct CategoryBreakdown {
    pub count: usize,
    /// Highest severity seen for the category.
    pub severity: Severity,
    /// Up to three examples, first seen first.
    pub examples: Vec<IssueExample>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TypeBreakdown {
    pub count: usize,
    pub avg_score: f64,
    pub valid_count: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub category: String,
    pub severity: Severity,
    pub message: String,
    pub affected_count: usize,
    /// 1 is most urgent.
    pub priority: u8,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct ScoreReport {
    pub overall_score: f64,
    pub total_components: usize,
    pub valid_components: usize,
    pub breakdown_by_category: BTreeMap<String, CategoryBreakdown>,
    pub breakdown_by_type: BTreeMap<String, TypeBreakdown>,
    pub recommendations: Vec<Recommendation>,
}
