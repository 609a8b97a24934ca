//! The benchmark store: a JSON accumulator keyed by contract name or
//! artifact path.
//!
//! The store grows across a run as the harness reports execution events and
//! is read once at the end to render the Markdown report. Two usage styles
//! are supported:
//!
//! - the `update_*` free functions, the per-event surface: each call does a
//!   full load-or-init, set one field, rewrite-the-file cycle;
//! - [`BenchmarkStore`] held in memory, mutated repeatedly, and saved once,
//!   which avoids the redundant I/O when the caller controls the whole run.
//!
//! Neither style is safe against concurrent writers (last writer wins); the
//! intended usage is single-threaded, sequential test runs.

use std::fs;
use std::io;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::execution::{AddressBook, DeployResult, InvokeResult};
use crate::schema::ContractRecord;

/// Accumulator files are pretty-printed with 3-space indentation.
const INDENT: &[u8] = b"   ";

/// In-memory form of the accumulator file.
///
/// Entries keep insertion order; report sections are rendered in the order
/// contracts were first measured, not sorted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkStore {
    entries: IndexMap<String, ContractRecord>,
}

impl BenchmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the store file at `path`. Unlike the updaters, rendering has
    /// no empty-store fallback, so a missing file is an error here.
    pub fn load(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        serde_json::from_slice(&bytes).map_err(io::Error::other)
    }

    /// Parse the store file at `path`, or start from an empty store if the
    /// file does not exist yet.
    pub fn load_or_default(path: &Path) -> io::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Rewrite the whole store file, creating parent directories lazily on
    /// the first save.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut buf = Vec::new();
        let fmt = serde_json::ser::PrettyFormatter::with_indent(INDENT);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
        self.serialize(&mut ser).map_err(io::Error::other)?;

        fs::write(path, buf)
    }

    pub fn get(&self, key: &str) -> Option<&ContractRecord> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ContractRecord)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&mut self, key: &str) -> &mut ContractRecord {
        self.entries.entry(key.to_string()).or_default()
    }

    /// Record the step count of a contract's deployment transaction.
    pub fn record_deploy_steps(&mut self, contract: &str, result: &DeployResult) {
        self.entry(contract).steps = Some(result.resources.n_steps);
    }

    /// Record the step count of a single function call, filed under the
    /// contract name resolved from the call's address. Unresolved addresses
    /// land in the `"UNKNOWN"` bucket.
    pub fn record_invoke_steps(
        &mut self,
        book: &AddressBook,
        function: &str,
        result: &InvokeResult,
    ) {
        let contract = book.resolve(&result.contract_address).to_string();
        self.entry(&contract)
            .function_steps
            .get_or_insert_with(Default::default)
            .insert(function.to_string(), result.resources.n_steps);
    }

    /// Record the full builtin-instance counter map of a deployment
    /// transaction.
    pub fn record_builtin_instances(&mut self, contract: &str, result: &DeployResult) {
        self.entry(contract).builtin_instances =
            Some(result.resources.builtin_instance_counter.clone());
    }

    /// Record an artifact's on-disk size, keyed by its path.
    pub fn record_file_size(&mut self, artifact: &Path) -> io::Result<()> {
        let len = fs::metadata(artifact)?.len();
        self.entry(&artifact.to_string_lossy()).json_size = Some(format_kb(len));
        Ok(())
    }

    /// Record sizes for every `.json` artifact under `dir`, in sorted path
    /// order. Returns the number of artifacts recorded.
    pub fn record_artifact_sizes(&mut self, dir: &Path) -> io::Result<usize> {
        let mut artifacts = Vec::new();
        for entry in walkdir::WalkDir::new(dir).follow_links(false) {
            let entry = entry?;
            if entry.file_type().is_file()
                && entry.path().extension().and_then(|e| e.to_str()) == Some("json")
            {
                artifacts.push(entry.path().to_path_buf());
            }
        }
        artifacts.sort();

        for artifact in &artifacts {
            self.record_file_size(artifact)?;
        }
        Ok(artifacts.len())
    }
}

/// Byte size as `"<kb> KB"`. Debug float formatting keeps the trailing
/// `.0` on integral values, so 2048 bytes renders as `"2.0 KB"`.
fn format_kb(bytes: u64) -> String {
    format!("{:?} KB", bytes as f64 / 1024.0)
}

fn update_store(
    path: &Path,
    f: impl FnOnce(&mut BenchmarkStore) -> io::Result<()>,
) -> io::Result<()> {
    let mut store = BenchmarkStore::load_or_default(path)?;
    f(&mut store)?;
    store.save(path)
}

/// One-shot variant of [`BenchmarkStore::record_deploy_steps`]: rewrites the
/// store file at `path` with the one field set.
pub fn update_deploy_steps(path: &Path, contract: &str, result: &DeployResult) -> io::Result<()> {
    update_store(path, |store| {
        store.record_deploy_steps(contract, result);
        Ok(())
    })
}

/// One-shot variant of [`BenchmarkStore::record_invoke_steps`].
pub fn update_invoke_steps(
    path: &Path,
    book: &AddressBook,
    function: &str,
    result: &InvokeResult,
) -> io::Result<()> {
    update_store(path, |store| {
        store.record_invoke_steps(book, function, result);
        Ok(())
    })
}

/// One-shot variant of [`BenchmarkStore::record_builtin_instances`].
pub fn update_builtin_instances(
    path: &Path,
    contract: &str,
    result: &DeployResult,
) -> io::Result<()> {
    update_store(path, |store| {
        store.record_builtin_instances(contract, result);
        Ok(())
    })
}

/// One-shot variant of [`BenchmarkStore::record_file_size`].
pub fn update_file_size(path: &Path, artifact: &Path) -> io::Result<()> {
    update_store(path, |store| store.record_file_size(artifact))
}
