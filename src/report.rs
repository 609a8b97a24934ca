//! Markdown rendering of an accumulated benchmark store.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;

use crate::schema::ContractRecord;
use crate::store::BenchmarkStore;

/// Title line of every rendered report.
pub const REPORT_TITLE: &str = "Contract bench status";

/// Render the store into a Markdown document. `name` is echoed into the
/// report's `commit:` line.
///
/// Sections follow the store's insertion order; rows within each table are
/// sorted by name. Rendering the same store twice yields byte-identical
/// output.
pub fn render(store: &BenchmarkStore, name: &str) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "# {REPORT_TITLE}\n");
    let _ = writeln!(md, "commit: {name}\n");

    for (key, record) in store.iter() {
        let _ = writeln!(md, "## {}:\n", basename(key));

        push_table(&mut md, "Metric", "Value", scalar_rows(record));

        if let Some(builtins) = &record.builtin_instances {
            push_table(&mut md, "Builtin", "Instances", counter_rows(builtins));
        }

        if let Some(functions) = &record.function_steps {
            push_table(&mut md, "Function", "Steps", counter_rows(functions));
        }
    }

    md
}

/// Render the store at `json_path` into `md_path`, creating the stats
/// directory if missing. Unlike the updaters there is no empty-store
/// fallback: a missing accumulator file is an error.
pub fn write_report(json_path: &Path, md_path: &Path, name: &str) -> io::Result<()> {
    let store = BenchmarkStore::load(json_path)?;

    if let Some(parent) = md_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(md_path, render(&store, name))
}

/// Section headings use only the last path segment of the key, so
/// path-keyed artifact entries read like contract-keyed ones.
fn basename(key: &str) -> &str {
    Path::new(key)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(key)
}

fn push_table(md: &mut String, left: &str, right: &str, rows: Vec<(String, String)>) {
    let _ = writeln!(md, "| {left} | {right} |");
    md.push_str("| --- | --- |\n");
    for (name, value) in rows {
        let _ = writeln!(md, "| {name} | {value} |");
    }
    md.push('\n');
}

/// All scalar fields of a record, sorted by field name. The two nested
/// fields are excluded; they get their own sub-tables.
fn scalar_rows(record: &ContractRecord) -> Vec<(String, String)> {
    let mut rows = BTreeMap::new();

    if let Some(steps) = record.steps {
        rows.insert("steps".to_string(), steps.to_string());
    }
    if let Some(size) = &record.json_size {
        rows.insert("json_size".to_string(), size.clone());
    }
    for (name, value) in &record.extra {
        if ContractRecord::NESTED_FIELDS.contains(&name.as_str()) {
            continue;
        }
        rows.insert(name.clone(), scalar_value(value));
    }

    rows.into_iter().collect()
}

fn counter_rows(counters: &BTreeMap<String, u64>) -> Vec<(String, String)> {
    counters
        .iter()
        .map(|(name, count)| (name.clone(), count.to_string()))
        .collect()
}

/// Strings render bare (no quotes); anything else falls back to its JSON
/// form.
fn scalar_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::{AddressBook, DeployResult, ExecutionResources, InvokeResult};
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn deploy_result(n_steps: u64, builtins: &[(&str, u64)]) -> DeployResult {
        DeployResult {
            resources: ExecutionResources {
                n_steps,
                builtin_instance_counter: builtins
                    .iter()
                    .map(|(name, count)| (name.to_string(), *count))
                    .collect(),
            },
        }
    }

    #[test]
    fn test_scalar_row_rendering() {
        let mut store = BenchmarkStore::new();
        store.record_deploy_steps("Foo", &deploy_result(120, &[]));

        let md = render(&store, "data");
        assert!(md.starts_with("# Contract bench status\n\n"));
        assert!(md.contains("commit: data\n\n"));
        assert!(md.contains("## Foo:\n\n"));
        assert!(md.contains("| Metric | Value |\n| --- | --- |\n| steps | 120 |\n"));
    }

    #[test]
    fn test_builtin_rows_sorted_by_name() {
        let mut store = BenchmarkStore::new();
        store.record_builtin_instances(
            "Bar",
            &deploy_result(0, &[("range_check", 5), ("pedersen", 2)]),
        );

        let md = render(&store, "data");
        assert!(md.contains("| Builtin | Instances |\n| --- | --- |\n"));

        let pedersen = md.find("| pedersen | 2 |").unwrap();
        let range_check = md.find("| range_check | 5 |").unwrap();
        assert!(pedersen < range_check);
    }

    #[test]
    fn test_function_steps_table() {
        let mut store = BenchmarkStore::new();
        let mut book = AddressBook::new();
        book.insert("0x1", "Token");

        let result = InvokeResult {
            contract_address: "0x1".to_string(),
            resources: ExecutionResources {
                n_steps: 340,
                builtin_instance_counter: BTreeMap::new(),
            },
        };
        store.record_invoke_steps(&book, "transfer", &result);

        let md = render(&store, "data");
        assert!(md.contains("## Token:\n\n"));
        assert!(md.contains("| Function | Steps |\n| --- | --- |\n| transfer | 340 |\n"));
    }

    #[test]
    fn test_scalar_rows_sorted_and_exclude_nested_fields() {
        let mut store = BenchmarkStore::new();
        store.record_deploy_steps("Foo", &deploy_result(120, &[("pedersen", 1)]));
        store.record_builtin_instances("Foo", &deploy_result(120, &[("pedersen", 1)]));

        let record = store.get("Foo").unwrap();
        let rows = scalar_rows(record);
        assert_eq!(rows, vec![("steps".to_string(), "120".to_string())]);
    }

    #[test]
    fn test_extra_fields_render_as_plain_rows() {
        let json = serde_json::json!({
            "Foo": { "steps": 120, "compile_time": "3.2 s" }
        });
        let store: BenchmarkStore = serde_json::from_value(json).unwrap();

        let md = render(&store, "data");
        // Lexicographic: compile_time before steps.
        let compile = md.find("| compile_time | 3.2 s |").unwrap();
        let steps = md.find("| steps | 120 |").unwrap();
        assert!(compile < steps);
    }

    #[test]
    fn test_heading_uses_last_path_segment() {
        let json = serde_json::json!({
            "build_output/ERC20.json": { "json_size": "2.0 KB" }
        });
        let store: BenchmarkStore = serde_json::from_value(json).unwrap();

        let md = render(&store, "data");
        assert!(md.contains("## ERC20.json:\n\n"));
        assert!(md.contains("| json_size | 2.0 KB |\n"));
    }

    #[test]
    fn test_sections_follow_insertion_order() {
        let mut store = BenchmarkStore::new();
        store.record_deploy_steps("Zebra", &deploy_result(1, &[]));
        store.record_deploy_steps("Apple", &deploy_result(2, &[]));

        let md = render(&store, "data");
        let zebra = md.find("## Zebra:").unwrap();
        let apple = md.find("## Apple:").unwrap();
        assert!(zebra < apple);
    }

    #[test]
    fn test_write_report_is_idempotent() {
        let dir = tempdir().unwrap();
        let json_path = dir.path().join("data.json");
        let md_path = dir.path().join("stats").join("data.md");

        let mut store = BenchmarkStore::new();
        store.record_deploy_steps("Foo", &deploy_result(120, &[("pedersen", 2)]));
        store.record_builtin_instances("Foo", &deploy_result(120, &[("pedersen", 2)]));
        store.save(&json_path).unwrap();

        write_report(&json_path, &md_path, "data").unwrap();
        let first = std::fs::read(&md_path).unwrap();

        write_report(&json_path, &md_path, "data").unwrap();
        let second = std::fs::read(&md_path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_write_report_missing_store_fails() {
        let dir = tempdir().unwrap();
        let json_path = dir.path().join("absent.json");
        let md_path = dir.path().join("stats").join("absent.md");

        assert!(write_report(&json_path, &md_path, "absent").is_err());
    }
}
