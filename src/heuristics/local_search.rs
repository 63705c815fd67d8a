//! Local search improvement heuristics.
//!
//! Every operator scans positions in increasing order and takes the first
//! move that shortens the tour by more than [`IMPROVEMENT_EPSILON`], so the
//! outcome depends only on the input tour and graph. The start node at
//! position 0 never moves.

use crate::graph::DistanceGraph;
use crate::tour::Tour;

/// Minimum gain (km) for a move to count as an improvement.
pub const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// Default cap on improvement sweeps per operator
pub const DEFAULT_MAX_PASSES: usize = 1000;

/// Trait for local search improvement methods
pub trait LocalSearch {
    fn improve(&self, graph: &DistanceGraph, tour: &mut Tour) -> bool;
    fn name(&self) -> &str;
}

/// 2-Opt Local Search
///
/// Reverses segments of the tour to remove crossing edges.
pub struct TwoOptSearch {
    /// Maximum number of sweeps over all (i, j) pairs
    pub max_passes: usize,
}

impl TwoOptSearch {
    pub fn new() -> Self {
        TwoOptSearch {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    pub fn with_max_passes(max_passes: usize) -> Self {
        TwoOptSearch { max_passes }
    }
}

impl Default for TwoOptSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalSearch for TwoOptSearch {
    fn improve(&self, graph: &DistanceGraph, tour: &mut Tour) -> bool {
        let n = tour.len();
        if n < 3 {
            return false;
        }

        let mut total_improved = false;

        for _ in 0..self.max_passes {
            let mut improved = false;

            for i in 0..n - 2 {
                for j in i + 2..n {
                    let delta = tour.two_opt_delta(graph, i, j);
                    if delta < -IMPROVEMENT_EPSILON {
                        tour.apply_two_opt(i, j);
                        tour.length += delta;
                        improved = true;
                    }
                }
            }

            if !improved {
                break;
            }
            total_improved = true;
        }

        tour.validate(graph);
        total_improved
    }

    fn name(&self) -> &str {
        "2-Opt"
    }
}

/// Or-Opt Local Search
///
/// Relocates segments of 1, 2, or 3 consecutive nodes to other positions.
pub struct OrOptSearch {
    /// Maximum segment length to consider
    pub max_segment_length: usize,
    /// Maximum number of sweeps; each accepted move starts a new sweep
    pub max_passes: usize,
}

impl OrOptSearch {
    pub fn new() -> Self {
        OrOptSearch {
            max_segment_length: 3,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    pub fn with_max_passes(max_passes: usize) -> Self {
        OrOptSearch {
            max_passes,
            ..Self::new()
        }
    }

    fn find_first_improvement(&self, graph: &DistanceGraph, tour: &Tour) -> Option<(usize, usize, usize, f64)> {
        let n = tour.len();
        for len in 1..=self.max_segment_length.min(n.saturating_sub(2)) {
            for start in 1..=n - len {
                let end = start + len - 1;
                for pos in 0..n {
                    if pos + 1 >= start && pos <= end {
                        continue;
                    }
                    let delta = tour.or_opt_delta(graph, start, len, pos);
                    if delta < -IMPROVEMENT_EPSILON {
                        return Some((start, len, pos, delta));
                    }
                }
            }
        }
        None
    }
}

impl Default for OrOptSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalSearch for OrOptSearch {
    fn improve(&self, graph: &DistanceGraph, tour: &mut Tour) -> bool {
        if tour.len() < 3 {
            return false;
        }

        let mut total_improved = false;

        for _ in 0..self.max_passes {
            match self.find_first_improvement(graph, tour) {
                Some((start, len, pos, delta)) => {
                    tour.apply_or_opt(start, len, pos);
                    tour.length += delta;
                    total_improved = true;
                }
                None => break,
            }
        }

        tour.validate(graph);
        total_improved
    }

    fn name(&self) -> &str {
        "Or-Opt"
    }
}

/// Variable Neighborhood Descent (VND)
///
/// Applies operators in order, going back to the first one after any success.
pub struct VND {
    /// List of local search operators
    operators: Vec<Box<dyn LocalSearch + Send + Sync>>,
    /// Cap on operator invocations
    pub max_rounds: usize,
}

impl VND {
    pub fn with_standard_operators(max_passes: usize) -> Self {
        let operators: Vec<Box<dyn LocalSearch + Send + Sync>> = vec![
            Box::new(TwoOptSearch::with_max_passes(max_passes)),
            Box::new(OrOptSearch::with_max_passes(max_passes)),
        ];

        VND {
            operators,
            max_rounds: 100,
        }
    }
}

impl Default for VND {
    fn default() -> Self {
        Self::with_standard_operators(DEFAULT_MAX_PASSES)
    }
}

impl LocalSearch for VND {
    fn improve(&self, graph: &DistanceGraph, tour: &mut Tour) -> bool {
        let mut total_improved = false;
        let mut k = 0;
        let mut rounds = 0;

        while k < self.operators.len() && rounds < self.max_rounds {
            let before = tour.length;
            if self.operators[k].improve(graph, tour) {
                log::debug!(
                    "{} improved tour: {:.3} -> {:.3} km",
                    self.operators[k].name(),
                    before,
                    tour.length
                );
                total_improved = true;
                k = 0;
            } else {
                k += 1;
            }
            rounds += 1;
        }

        total_improved
    }

    fn name(&self) -> &str {
        "VND"
    }
}
