use plugtest::discover::discover_plugins;
use plugtest::models::Severity;
use plugtest::runner::{aggregate_results, Runner};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &str) {
    let p = root.join(rel);
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(p, content).unwrap();
}

const CLEAN_SKILL: &str = r#"---
name: db-helper
description: 'Manages database workflows. Use when user mentions "database", "SQL".'
---

# DB Helper

## Usage

Connect and run queries.

## Examples

```sql
select 1;
```
"#;

const MESSY_SKILL: &str = r#"---
name: Messy_Skill
description: Does stuff
---
body
"#;

#[test]
fn test_discover_run_and_score_plugins() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "clean/1.0.0/skills/db-helper/SKILL.md", CLEAN_SKILL);
    write(root, "clean/1.0.0/plugin.json", "{}");
    write(root, "messy/0.2.0/skills/messy/SKILL.md", MESSY_SKILL);
    write(root, "messy/0.2.0/skills/nofm/SKILL.md", "just a body, no frontmatter");

    let plugins = discover_plugins(root, None).unwrap();
    assert_eq!(plugins.len(), 2);

    let runs = Runner::new(2).run_all(&plugins, None).unwrap();
    let clean = &runs[0];
    assert_eq!(clean.plugin_name, "clean");
    assert_eq!(clean.score.total_components, 1);
    assert_eq!(clean.score.valid_components, 1);
    assert_eq!(clean.score.overall_score, 100.0);
    assert!(clean.score.recommendations.is_empty());

    let messy = &runs[1];
    assert_eq!(messy.score.total_components, 2);
    assert_eq!(messy.score.valid_components, 0);

    // folders are visited in name order: messy, nofm
    let first = &messy.validation_results[0];
    assert_eq!(first.component_name, "Messy_Skill");
    let cats: Vec<_> = first.errors().iter().map(|i| i.category.as_str()).collect();
    assert_eq!(cats, vec!["naming"]);
    // folder mismatch, no action verb, no trigger, vague
    assert_eq!(first.warnings().len(), 4);
    // 100 - 15 - 4*5
    assert_eq!(first.scores().unwrap().structural, 65.0);

    let second = &messy.validation_results[1];
    assert_eq!(second.component_name, "unknown");
    assert_eq!(second.errors().len(), 2);
    assert!(second.scores().is_none());

    // (65 + 0) / 2
    assert_eq!(messy.score.overall_score, 32.5);
    let recs: Vec<_> = messy
        .score
        .recommendations
        .iter()
        .map(|r| (r.category.as_str(), r.severity))
        .collect();
    assert_eq!(
        recs,
        vec![
            ("required_fields", Severity::Error),
            ("file_organization", Severity::Warning),
            ("naming", Severity::Error),
            ("description_quality", Severity::Warning),
        ]
    );

    let summary = aggregate_results(&runs);
    assert_eq!(summary.total_plugins, 2);
    assert_eq!(summary.total_components, 3);
    assert_eq!(summary.plugins_clean, 1);
    assert_eq!(summary.avg_structural_score, (100.0 + 32.5) / 2.0);
}
