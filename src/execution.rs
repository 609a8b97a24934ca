//! Inputs handed over by the transaction-execution harness.
//!
//! These mirror what the harness exposes after running a transaction; the
//! store only ever reads the counters out of them.

use std::collections::BTreeMap;

/// Bucket used when an invoke result's contract address has no entry in the
/// caller's [`AddressBook`].
pub const UNKNOWN_CONTRACT: &str = "UNKNOWN";

/// Resource counters for a single executed transaction or call.
#[derive(Debug, Clone, Default)]
pub struct ExecutionResources {
    pub n_steps: u64,
    pub builtin_instance_counter: BTreeMap<String, u64>,
}

/// Outcome of a deployment transaction.
#[derive(Debug, Clone)]
pub struct DeployResult {
    pub resources: ExecutionResources,
}

/// Outcome of a single contract call.
#[derive(Debug, Clone)]
pub struct InvokeResult {
    pub contract_address: String,
    pub resources: ExecutionResources,
}

/// Contract address -> contract name lookup, owned by the caller and passed
/// explicitly into the invoke-measurement path.
#[derive(Debug, Clone, Default)]
pub struct AddressBook {
    names: BTreeMap<String, String>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: impl Into<String>, name: impl Into<String>) {
        self.names.insert(address.into(), name.into());
    }

    /// Resolve an address to its contract name. Unknown addresses degrade
    /// to the [`UNKNOWN_CONTRACT`] bucket rather than failing the run.
    pub fn resolve(&self, address: &str) -> &str {
        self.names
            .get(address)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CONTRACT)
    }
}
