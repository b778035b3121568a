//! Human-readable summary renderer for audit diffs.

use crate::diff::model::AuditDiff;
use crate::schema::join_path;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Render a Markdown summary of an [`AuditDiff`], one line per changed leaf.
///
/// Informational only; the structured diff is what gets persisted.
pub fn render_human_summary(diff: &AuditDiff) -> String {
    let mut out = String::from("## Audit Diff\n\n");

    if diff.is_empty() {
        out.push_str("_No reportable changes._\n");
        return out;
    }

    let mut lines = Vec::new();
    collect_lines(Some(&diff.before), Some(&diff.after), "", &mut lines);

    out.push_str(&format!("**Changed fields**: {}\n\n", lines.len()));
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn collect_lines(
    before: Option<&Map<String, Value>>,
    after: Option<&Map<String, Value>>,
    prefix: &str,
    lines: &mut Vec<String>,
) {
    let keys: BTreeSet<&String> = before
        .into_iter()
        .chain(after)
        .flat_map(|m| m.keys())
        .collect();

    for key in keys {
        let path = join_path(prefix, key);
        let b = before.and_then(|m| m.get(key));
        let a = after.and_then(|m| m.get(key));

        match (b, a) {
            (Some(Value::Object(bm)), Some(Value::Object(am))) => {
                collect_lines(Some(bm), Some(am), &path, lines);
            }
            (None, Some(Value::Object(am))) => collect_lines(None, Some(am), &path, lines),
            (Some(Value::Object(bm)), None) => collect_lines(Some(bm), None, &path, lines),
            _ => lines.push(format!("- `{}`: {} → {}", path, show(b), show(a))),
        }
    }
}

fn show(value: Option<&Value>) -> String {
    match value {
        None => "_(absent)_".to_string(),
        Some(v) => format!("`{}`", v),
    }
}
