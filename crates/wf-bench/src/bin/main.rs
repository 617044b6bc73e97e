//! Standalone benchmark runner for wellflow.

use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;
use wf_app::Driver;
use wf_bench::{BenchmarkSuite, default_benchmarks, run_scenario};

const RUNS: usize = 5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    // Repo root is two levels up from the crate root.
    let crate_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let repo_root = crate_path
        .parent()
        .and_then(|p| p.parent())
        .ok_or("Could not determine repo root")?
        .to_path_buf();

    println!("Wellflow Benchmark Suite");
    println!("========================\n");

    let driver = Driver::new();
    let benchmarks = default_benchmarks();
    println!("Running {} benchmarks, {RUNS} runs each...\n", benchmarks.len());

    let mut results = Vec::new();
    for (idx, scenario) in benchmarks.iter().enumerate() {
        print!("[{}/{}] {} ... ", idx + 1, benchmarks.len(), scenario.name);
        std::io::Write::flush(&mut std::io::stdout())?;

        match run_scenario(&driver, scenario, RUNS) {
            Ok(result) => {
                println!("OK ({:.4}s median)", result.aggregate.total_time_median_s);
                results.push(result);
            }
            Err(e) => {
                println!("FAILED");
                eprintln!("  Error: {e}");
            }
        }
    }

    println!("\n========================");
    println!("Benchmark Results Summary");
    println!("========================\n");

    for result in &results {
        let agg = &result.aggregate;
        println!("{} [{}]", result.scenario.name, result.scenario.model);
        println!(
            "  Total time:      {:.4}s (median), min: {:.4}s, max: {:.4}s",
            agg.total_time_median_s, agg.total_time_min_s, agg.total_time_max_s
        );
        println!("  Per point:       {:.3e}s (median)", agg.time_per_point_median_s);
        println!("  Step responses:  {}", agg.step_responses);
        if agg.failed_points > 0 {
            println!("  Failed points:   {}", agg.failed_points);
        }
        if let Some(err) = agg.max_relative_error {
            println!("  Max rel. error:  {err:.2e}");
        }
        println!();
    }

    let timestamp = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)?
        .as_secs();
    let baseline_json = serde_json::to_string_pretty(&BenchmarkSuite {
        timestamp: format!("timestamp_{timestamp}"),
        results,
    })?;

    let baseline_dir = repo_root.join("benchmarks");
    fs::create_dir_all(&baseline_dir)?;
    let baseline_path = baseline_dir.join("baseline.json");
    fs::write(&baseline_path, baseline_json)?;

    println!("Baseline saved to: {}", baseline_path.display());

    Ok(())
}
