use std::path::PathBuf;

/// Filesystem layout of a benchmarks directory.
///
/// The JSON accumulator for a run named `N` lives at `<root>/json/N.json`,
/// and the rendered report at `<root>/stats/N.md`.
#[derive(Debug, Clone)]
pub struct BenchLayout {
    root: PathBuf,
}

impl BenchLayout {
    /// Benchmarks root used when the caller does not pick one.
    pub const DEFAULT_ROOT: &'static str = "benchmark";

    /// Report name used when the CLI is invoked without arguments.
    pub const DEFAULT_NAME: &'static str = "data";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn json_path(&self, name: &str) -> PathBuf {
        self.root.join("json").join(format!("{name}.json"))
    }

    pub fn stats_path(&self, name: &str) -> PathBuf {
        self.root.join("stats").join(format!("{name}.md"))
    }
}

impl Default for BenchLayout {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ROOT)
    }
}
