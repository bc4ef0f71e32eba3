use anyhow::Context;
use clap::Parser;
use log::info;

use benchgen::bench::run_benchmarks;
use benchgen::conf::Config;
use benchgen::core::{CliArgs, Command, setup_logging};
use benchgen::driver::{CropRequest, DatasetGenerator, WorkloadSpec, inspect};

fn main() -> anyhow::Result<()> {
    setup_logging();
    let args = CliArgs::parse();
    info!(args = &args; "Benchgen started.");

    let config = Config::load(args.config.as_deref()).context("loading configuration")?;

    match args.command {
        Command::Generate(generate) => {
            let spec = WorkloadSpec {
                subset_count: generate.subset_count,
                eq_count: generate.eq_count,
                selectivities: generate.selectivities.0,
                rg_count: generate.rg_count,
            };
            DatasetGenerator::new(config.generator).generate_all(generate.size, &spec)?;
        }
        Command::Crop(crop) => {
            let request = CropRequest {
                source: crop.source,
                size: crop.size,
                width: crop.width,
                label: crop.label,
                spec: WorkloadSpec {
                    subset_count: crop.subsets,
                    eq_count: crop.eq_count,
                    selectivities: crop.selectivities.0,
                    rg_count: crop.rg_count,
                },
            };
            DatasetGenerator::new(config.generator).crop(&request)?;
        }
        Command::Inspect(target) => {
            let summary = inspect(&target.file, target.width)
                .with_context(|| format!("inspecting {}", target.file.display()))?;
            println!("{summary}");
        }
        Command::Bench(bench) => {
            let mut bench_config = config.bench;
            if let Some(executable) = bench.executable {
                bench_config.executable = executable;
            }
            if let Some(iterations) = bench.iterations {
                bench_config.iterations = iterations;
            }
            let plan = run_benchmarks(&bench_config, bench.dry_run)?;
            info!(
                "{} benchmark runs, {} skipped",
                plan.invocations.len(),
                plan.skipped.len()
            );
        }
    }
    Ok(())
}
