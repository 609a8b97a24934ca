use clap::Parser;
use contract_bench_report::layout::BenchLayout;
use contract_bench_report::report;
use contract_bench_report::store::BenchmarkStore;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "contract-bench-report")]
#[command(about = "Render accumulated contract benchmark data to Markdown")]
struct Args {
    /// Report name; selects `<dir>/json/<NAME>.json` as input,
    /// `<dir>/stats/<NAME>.md` as output, and is echoed into the report's
    /// commit line.
    #[arg(value_name = "NAME", default_value = BenchLayout::DEFAULT_NAME)]
    name: String,

    /// Root of the benchmarks directory.
    #[arg(long, value_name = "DIR", default_value = BenchLayout::DEFAULT_ROOT)]
    benchmark_dir: PathBuf,

    /// Record artifact sizes for every .json file under DIR into the store
    /// before rendering.
    #[arg(long, value_name = "DIR")]
    artifacts: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let layout = BenchLayout::new(&args.benchmark_dir);
    let json_path = layout.json_path(&args.name);

    if let Some(dir) = &args.artifacts {
        let mut store = BenchmarkStore::load_or_default(&json_path)?;
        let recorded = store.record_artifact_sizes(dir)?;
        store.save(&json_path)?;
        eprintln!("recorded {recorded} artifact sizes from {}", dir.display());
    }

    let md_path = layout.stats_path(&args.name);
    report::write_report(&json_path, &md_path, &args.name)?;
    eprintln!("{} -> {}", args.name, md_path.display());

    Ok(())
}
