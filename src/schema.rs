use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One accumulator entry, keyed by contract name or artifact path.
///
/// Every field is optional: callers only ever set the fields their
/// measurement produced, and absent fields are omitted from the JSON
/// entirely (no null placeholders).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    /// Step count of the deployment transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<u64>,

    /// Builtin name -> invocation count for the deployment transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub builtin_instances: Option<BTreeMap<String, u64>>,

    /// Function name -> step count for invoke transactions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_steps: Option<BTreeMap<String, u64>>,

    /// Artifact size rendered as `"<kb> KB"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_size: Option<String>,

    /// The store is not schema-validated: any other fields callers have
    /// written are kept as-is and surface in the report as plain metric
    /// rows.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ContractRecord {
    /// Nested field names that the renderer expands into their own
    /// sub-tables instead of scalar metric rows.
    pub const NESTED_FIELDS: [&'static str; 2] = ["builtin_instances", "function_steps"];
}
