//! Stress harness - randomized concurrent schedules against one registry
//!
//! Each worker draws operations from its own seeded RNG over a shared name
//! pool. Listings are checked as they are produced, and once every worker has
//! finished the whole registry is checked again.

use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::Arc;
use tombgraph_core::{GraphConfig, Registry};

/// Stress run configuration
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Concurrent workers
    pub threads: usize,
    /// Operations per worker
    pub operations_per_thread: usize,
    /// Distinct node names to draw from
    pub name_pool: usize,
    /// Base seed; worker `i` uses `seed + i`
    pub seed: u64,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            threads: 8,
            operations_per_thread: 10_000,
            name_pool: 64,
            seed: 42,
        }
    }
}

/// Counts collected during a stress run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StressReport {
    /// `create` calls
    pub creates: u64,
    /// `connect` calls
    pub connects: u64,
    /// `remove` calls
    pub removes: u64,
    /// `show` calls
    pub shows: u64,
    /// Point child lookups
    pub lookups: u64,
    /// Operations the registry refused (`AlreadyExists`/`NotFound`)
    pub rejected: u64,
    /// Listings that were not well formed; must stay zero
    pub malformed: u64,
    /// Nodes registered when the run ended
    pub final_nodes: usize,
}

impl StressReport {
    /// Check if the run observed no malformed state
    pub fn passed(&self) -> bool {
        self.malformed == 0
    }

    /// Total operations executed
    pub fn total_operations(&self) -> u64 {
        self.creates + self.connects + self.removes + self.shows + self.lookups
    }

    fn merge(mut self, other: Self) -> Self {
        self.creates += other.creates;
        self.connects += other.connects;
        self.removes += other.removes;
        self.shows += other.shows;
        self.lookups += other.lookups;
        self.rejected += other.rejected;
        self.malformed += other.malformed;
        self
    }

    /// Generate a text report
    pub fn generate_text(&self) -> String {
        let mut report = String::new();

        report.push_str("=== tombgraph Stress Report ===\n\n");
        report.push_str(&format!("Total Operations: {}\n", self.total_operations()));
        report.push_str(&format!("  create:  {}\n", self.creates));
        report.push_str(&format!("  connect: {}\n", self.connects));
        report.push_str(&format!("  remove:  {}\n", self.removes));
        report.push_str(&format!("  show:    {}\n", self.shows));
        report.push_str(&format!("  lookup:  {}\n", self.lookups));
        report.push_str(&format!("Rejected: {}\n", self.rejected));
        report.push_str(&format!("Malformed: {}\n", self.malformed));
        report.push_str(&format!("Final Nodes: {}\n", self.final_nodes));
        report.push_str(&format!(
            "\n=== Result: {} ===\n",
            if self.passed() { "PASS" } else { "FAIL" }
        ));

        report
    }
}

/// Run a stress test
pub fn run_stress(config: &StressConfig, graph: GraphConfig) -> StressReport {
    let registry = Registry::with_config(graph);
    let names: Vec<String> = (0..config.name_pool.max(1)).map(|i| format!("N{i}")).collect();

    tracing::info!(
        threads = config.threads,
        operations = config.operations_per_thread,
        names = names.len(),
        seed = config.seed,
        "starting stress run"
    );

    let mut report = (0..config.threads)
        .into_par_iter()
        .map(|worker| {
            let seed = config.seed.wrapping_add(u64::try_from(worker).unwrap_or(u64::MAX));
            run_worker(&registry, &names, seed, config.operations_per_thread)
        })
        .reduce(StressReport::default, StressReport::merge);

    report.malformed += quiescent_violations(&registry);
    report.final_nodes = registry.len();

    if report.passed() {
        tracing::info!(operations = report.total_operations(), "stress run passed");
    } else {
        tracing::error!(malformed = report.malformed, "stress run observed malformed state");
    }
    report
}

fn run_worker(registry: &Registry, names: &[String], seed: u64, operations: usize) -> StressReport {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut report = StressReport::default();

    for _ in 0..operations {
        let a = &names[rng.gen_range(0..names.len())];
        let b = &names[rng.gen_range(0..names.len())];

        match rng.gen_range(0..10) {
            0 | 1 => {
                report.creates += 1;
                if registry.create(a, "stress").is_err() {
                    report.rejected += 1;
                }
            }
            2..=4 => {
                report.connects += 1;
                if registry.connect(a, b).is_err() {
                    report.rejected += 1;
                }
            }
            5 => {
                report.removes += 1;
                if registry.remove(a).is_err() {
                    report.rejected += 1;
                }
            }
            6 => {
                report.lookups += 1;
                let found = registry.get(a).and_then(|node| node.child(b));
                if found.is_some_and(|child| child.name() != b.as_str()) {
                    report.malformed += 1;
                }
            }
            _ => {
                report.shows += 1;
                if !registry.show(a).is_well_formed(names) {
                    report.malformed += 1;
                }
            }
        }
    }

    report
}

/// After all workers are done, every listed child must be the node currently
/// registered under that name.
fn quiescent_violations(registry: &Registry) -> u64 {
    let mut violations = 0;
    for name in registry.names() {
        let Some(node) = registry.get(&name) else {
            continue;
        };
        if node.is_dead() {
            violations += 1;
        }
        for child in node.valid_children() {
            let current = registry.get(child.name());
            if !current.is_some_and(|current| Arc::ptr_eq(&current, &child)) {
                tracing::error!(parent = %name, child = child.name(), "stale child listed");
                violations += 1;
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_run_passes() {
        let config = StressConfig {
            threads: 4,
            operations_per_thread: 2_000,
            name_pool: 16,
            seed: 7,
        };
        let report = run_stress(&config, GraphConfig::default().with_compaction_frequency(3));
        assert!(report.passed(), "{}", report.generate_text());
        assert_eq!(report.total_operations(), 8_000);
    }

    #[test]
    fn report_text_shows_result() {
        let report = StressReport {
            malformed: 1,
            ..Default::default()
        };
        assert!(report.generate_text().contains("Result: FAIL"));
        assert!(StressReport::default().generate_text().contains("Result: PASS"));
    }
}
