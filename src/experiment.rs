//! Timing experiment comparing full enumeration with the two rank lookups.
//!
//! For every `n` up to [`ExperimentConfig::max_symbols`] a tree is built over the characters
//! `'1', '2', ...`, a handful of random ranks is drawn, and each retrieval strategy is timed.

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use tracing::{debug, info};

use crate::{BuildError, PermutationTree};

/// Parameters of [`run`].
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    /// Largest number of symbols to build a tree for. Trees are built for `1..=max_symbols`.
    pub max_symbols: usize,
    /// Number of random ranks looked up per tree; lookup times are averaged over them.
    pub samples: usize,
    /// Seed for the rank generator. `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            max_symbols: 10,
            samples: 3,
            seed: None,
        }
    }
}

/// Timings for one tree size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentRow {
    pub num_symbols: usize,
    pub total_permutations: u64,
    /// Time of one [`PermutationTree::all_permutations`] call.
    pub all_permutations: Duration,
    /// Mean time of one [`PermutationTree::permutation_by_traversal`] call.
    pub by_traversal: Duration,
    /// Mean time of one [`PermutationTree::permutation_by_factorial`] call.
    pub by_factorial: Duration,
}

/// The symbols used for a tree of size `n`: successive characters starting at `'1'`.
pub fn experiment_symbols(n: usize) -> Vec<char> {
    (0..n as u32)
        .filter_map(|offset| char::from_u32('1' as u32 + offset))
        .collect()
}

/// Run the experiment, one row per tree size.
pub fn run(config: &ExperimentConfig) -> Result<Vec<ExperimentRow>, BuildError> {
    let mut rng = match config.seed {
        Some(seed) => XorShiftRng::seed_from_u64(seed),
        None => XorShiftRng::from_entropy(),
    };

    let mut rows = Vec::with_capacity(config.max_symbols);
    for n in 1..=config.max_symbols {
        let tree = PermutationTree::new(&experiment_symbols(n))?;
        let total = tree.total_permutations();
        let ranks: Vec<u64> = (0..config.samples)
            .map(|_| rng.gen_range(1..=total))
            .collect();
        debug!(n, ?ranks, "timing lookups");

        let start = Instant::now();
        let all = tree.all_permutations();
        let all_permutations = start.elapsed();
        debug_assert_eq!(all.len() as u64, total);
        drop(all);

        let by_traversal = mean_time(&ranks, |rank| tree.permutation_by_traversal(rank));
        let by_factorial = mean_time(&ranks, |rank| tree.permutation_by_factorial(rank));

        info!(
            n,
            all_us = all_permutations.as_micros() as u64,
            traversal_us = by_traversal.as_micros() as u64,
            factorial_us = by_factorial.as_micros() as u64,
            "experiment row"
        );
        rows.push(ExperimentRow {
            num_symbols: n,
            total_permutations: total,
            all_permutations,
            by_traversal,
            by_factorial,
        });
    }
    Ok(rows)
}

fn mean_time<R>(ranks: &[u64], mut lookup: impl FnMut(u64) -> R) -> Duration {
    if ranks.is_empty() {
        return Duration::ZERO;
    }
    let start = Instant::now();
    for &rank in ranks {
        std::hint::black_box(lookup(rank));
    }
    start.elapsed().div_f64(ranks.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experiment_symbols() {
        assert_eq!(experiment_symbols(0), Vec::<char>::new());
        assert_eq!(experiment_symbols(3), vec!['1', '2', '3']);
        // past '9' the characters keep counting up through ASCII
        assert_eq!(experiment_symbols(10)[9], ':');
    }

    #[test]
    fn test_run_produces_one_row_per_size() {
        let config = ExperimentConfig {
            max_symbols: 5,
            samples: 4,
            seed: Some(1234),
        };
        let rows = run(&config).unwrap();
        assert_eq!(rows.len(), 5);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.num_symbols, i + 1);
        }
        assert_eq!(
            rows.iter().map(|row| row.total_permutations).collect::<Vec<_>>(),
            vec![1, 2, 6, 24, 120]
        );
    }

    #[test]
    fn test_run_without_samples() {
        let config = ExperimentConfig {
            max_symbols: 2,
            samples: 0,
            seed: Some(7),
        };
        let rows = run(&config).unwrap();
        assert!(rows.iter().all(|row| row.by_traversal == Duration::ZERO));
        assert!(rows.iter().all(|row| row.by_factorial == Duration::ZERO));
    }

    #[test]
    fn test_mean_time_divides_by_sample_count() {
        let ranks = [1, 2, 3, 4];
        let mut calls = 0;
        let start = Instant::now();
        let mean = mean_time(&ranks, |_| {
            calls += 1;
            std::thread::sleep(Duration::from_millis(2));
        });
        let total = start.elapsed();
        assert_eq!(calls, 4);
        assert!(mean >= Duration::from_millis(2), "mean = {:?}", mean);
        assert!(mean * 4 <= total, "mean = {:?}, total = {:?}", mean, total);
        assert_eq!(mean_time(&[], |_| ()), Duration::ZERO);
    }
}
