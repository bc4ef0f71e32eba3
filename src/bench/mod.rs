//! Pairs generated artifacts into runs of the external benchmark binary.

mod catalog;
mod runner;

pub use catalog::{Catalog, CatalogEntry};
pub use runner::{BenchPlan, Invocation, existing_results, plan, run_benchmarks};
