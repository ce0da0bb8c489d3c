//! Isolation forest: an ensemble of random partitioning trees.
//!
//! Points that are isolated after few random splits are anomalous. The
//! scoring follows the classic formulation:
//!
//! - `score_samples(x) = -2^(-E[h(x)] / c(psi))`, in `[-1, 0)`
//! - `offset` = the `contamination` quantile of the training scores
//! - `decision_function(x) = score_samples(x) - offset`
//!
//! Lower values are more anomalous; `decision_function < 0` marks an outlier.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Fitting parameters.
#[derive(Debug, Clone)]
pub struct IsolationForestParams {
    pub n_estimators: usize,
    /// Sub-sample size per tree; capped at the number of points.
    pub max_samples: usize,
    pub contamination: f64,
    pub seed: u64,
}

impl Default for IsolationForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_samples: 256,
            contamination: 0.2,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
    Leaf {
        size: usize,
    },
}

/// A fitted forest.
#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<Node>,
    sample_size: usize,
    offset: f64,
}

impl IsolationForest {
    /// Fit a forest over `points` (row-major, equal-length rows).
    ///
    /// # Panics
    /// Panics if fewer than two points are supplied. Callers enforce their
    /// own minimum before fitting.
    pub fn fit(points: &[Vec<f64>], params: &IsolationForestParams) -> Self {
        assert!(points.len() >= 2, "isolation forest: need at least 2 points");

        let n = points.len();
        let dim = points[0].len();
        let sample_size = params.max_samples.clamp(2, n);
        let height_limit = (sample_size as f64).log2().ceil() as usize;

        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut trees = Vec::with_capacity(params.n_estimators);

        for _ in 0..params.n_estimators {
            let sample = rand::seq::index::sample(&mut rng, n, sample_size).into_vec();
            trees.push(build_tree(points, sample, dim, 0, height_limit, &mut rng));
        }

        let mut forest = Self {
            trees,
            sample_size,
            offset: 0.0,
        };

        let mut training: Vec<f64> = points.iter().map(|p| forest.score_sample(p)).collect();
        forest.offset = percentile(&mut training, params.contamination);
        forest
    }

    /// Opposite of the anomaly score: lower means more anomalous.
    pub fn score_sample(&self, point: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let mean_depth: f64 = self
            .trees
            .iter()
            .map(|tree| path_length(tree, point, 0))
            .sum::<f64>()
            / self.trees.len() as f64;

        -(2f64.powf(-mean_depth / average_path_length(self.sample_size)))
    }

    /// `score_sample - offset`. Negative for predicted outliers.
    pub fn decision_function(&self, point: &[f64]) -> f64 {
        self.score_sample(point) - self.offset
    }

    pub fn is_outlier(&self, point: &[f64]) -> bool {
        self.decision_function(point) < 0.0
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }
}

fn build_tree(
    points: &[Vec<f64>],
    indices: Vec<usize>,
    dim: usize,
    depth: usize,
    height_limit: usize,
    rng: &mut StdRng,
) -> Node {
    if depth >= height_limit || indices.len() <= 1 {
        return Node::Leaf { size: indices.len() };
    }

    // Only features with spread can separate this node's samples.
    let candidates: Vec<(usize, f64, f64)> = (0..dim)
        .filter_map(|f| {
            let (lo, hi) = indices.iter().fold((f64::MAX, f64::MIN), |(lo, hi), &i| {
                (lo.min(points[i][f]), hi.max(points[i][f]))
            });
            (hi > lo).then_some((f, lo, hi))
        })
        .collect();

    if candidates.is_empty() {
        return Node::Leaf { size: indices.len() };
    }

    let (feature, lo, hi) = candidates[rng.gen_range(0..candidates.len())];
    // threshold in [lo, hi): both sides are non-empty.
    let threshold = rng.gen_range(lo..hi);

    let (left, right): (Vec<usize>, Vec<usize>) = indices
        .into_iter()
        .partition(|&i| points[i][feature] <= threshold);

    Node::Split {
        feature,
        threshold,
        left: Box::new(build_tree(points, left, dim, depth + 1, height_limit, rng)),
        right: Box::new(build_tree(points, right, dim, depth + 1, height_limit, rng)),
    }
}

fn path_length(node: &Node, point: &[f64], depth: usize) -> f64 {
    match node {
        Node::Leaf { size } => depth as f64 + average_path_length(*size),
        Node::Split {
            feature,
            threshold,
            left,
            right,
        } => {
            if point[*feature] <= *threshold {
                path_length(left, point, depth + 1)
            } else {
                path_length(right, point, depth + 1)
            }
        }
    }
}

/// Average path length of an unsuccessful BST search over `n` points, `c(n)`.
pub(crate) fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Linear-interpolated quantile `q` in `[0, 1]`. Sorts `values` in place.
pub(crate) fn percentile(values: &mut [f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let pos = q.clamp(0.0, 1.0) * (values.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    values[lo] + (values[hi] - values[lo]) * (pos - lo as f64)
}
