//! Random connected graphs at a target density.
//!
//! Generation is reproducible: the same configuration and the same seeded
//! [`SmallRng`] always yield the same graph.

use std::collections::HashSet;

use rand::Rng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

use crate::error::SyntheticError;
use crate::graph::Graph;

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 42;

/// Parameters for [`connected_graph`].
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use spanwise_core::synthetic::{SyntheticConfig, connected_graph};
///
/// let config = SyntheticConfig::new(3, 12, 0.5);
/// let graph = connected_graph(&config, &mut SmallRng::seed_from_u64(42))?;
/// assert_eq!(graph.vertex_count(), 12);
/// assert_eq!(graph.edge_count(), 33);
/// assert!(graph.is_connected());
/// # Ok::<(), spanwise_core::SyntheticError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SyntheticConfig {
    /// Identifier given to the generated graph.
    pub id: u64,
    /// Number of vertices, named `N0` upwards.
    pub vertex_count: usize,
    /// Fraction of all vertex pairs to join, within `[0, 1]`.
    pub density: f64,
    /// Largest edge weight; weights are uniform in `1..=max_weight`.
    pub max_weight: u32,
}

impl SyntheticConfig {
    /// Creates a configuration with the default maximum weight of 100.
    #[must_use]
    pub fn new(id: u64, vertex_count: usize, density: f64) -> Self {
        Self {
            id,
            vertex_count,
            density,
            max_weight: 100,
        }
    }

    /// Overrides the maximum edge weight.
    #[must_use]
    pub fn with_max_weight(mut self, max_weight: u32) -> Self {
        self.max_weight = max_weight;
        self
    }

    /// Number of edges the generated graph will have: the density target,
    /// but never fewer than a spanning tree needs.
    #[must_use]
    pub fn target_edges(&self) -> usize {
        let pairs = max_pairs(self.vertex_count);
        let wanted = (pairs as f64 * self.density).floor() as usize;
        wanted.clamp(self.vertex_count.saturating_sub(1), pairs)
    }
}

fn max_pairs(vertex_count: usize) -> usize {
    vertex_count.saturating_mul(vertex_count.saturating_sub(1)) / 2
}

/// Generates a connected simple graph.
///
/// A random spanning tree is laid first: vertices are visited in random
/// order and each is joined to a random vertex already in the tree. Distinct
/// extra pairs are then added until [`SyntheticConfig::target_edges`] is
/// reached.
///
/// # Errors
/// Returns [`SyntheticError::InvalidDensity`] when the density is not a
/// finite value in `[0, 1]` and [`SyntheticError::InvalidMaxWeight`] when the
/// maximum weight is zero.
#[instrument(
    name = "synthetic.graph",
    err,
    skip(config, rng),
    fields(id = config.id, vertices = config.vertex_count, density = config.density),
)]
pub fn connected_graph(
    config: &SyntheticConfig,
    rng: &mut SmallRng,
) -> Result<Graph, SyntheticError> {
    if !(0.0..=1.0).contains(&config.density) {
        return Err(SyntheticError::InvalidDensity {
            density: config.density,
        });
    }
    if config.max_weight == 0 {
        return Err(SyntheticError::InvalidMaxWeight);
    }

    let n = config.vertex_count;
    let names: Vec<String> = (0..n).map(|index| format!("N{index}")).collect();
    let mut graph = Graph::new(config.id);
    for name in &names {
        graph.add_vertex(name.as_str())?;
    }

    let target = config.target_edges();
    let mut used: HashSet<(usize, usize)> = HashSet::with_capacity(target);
    let mut edges: Vec<(usize, usize)> = Vec::with_capacity(target);

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    for position in 1..order.len() {
        let anchor = order[rng.gen_range(0..position)];
        let joined = order[position];
        used.insert(pair(anchor, joined));
        edges.push((anchor, joined));
    }

    let missing = target - edges.len();
    if missing * 2 > max_pairs(n) - edges.len() {
        // Dense targets: pick from the explicit complement instead of
        // rejection sampling.
        let mut free: Vec<(usize, usize)> = (0..n)
            .flat_map(|low| ((low + 1)..n).map(move |high| (low, high)))
            .filter(|candidate| !used.contains(candidate))
            .collect();
        free.shuffle(rng);
        edges.extend(free.into_iter().take(missing));
    } else {
        while edges.len() < target {
            let from = rng.gen_range(0..n);
            let to = rng.gen_range(0..n);
            if from != to && used.insert(pair(from, to)) {
                edges.push((from, to));
            }
        }
    }

    for (from, to) in edges {
        let weight = rng.gen_range(1..=i64::from(config.max_weight));
        graph.add_edge(&names[from], &names[to], weight)?;
    }
    debug!(edges = graph.edge_count(), "generated graph");
    Ok(graph)
}

fn pair(left: usize, right: usize) -> (usize, usize) {
    if left <= right { (left, right) } else { (right, left) }
}

/// Size classes for benchmark datasets.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DatasetTier {
    /// Five graphs under 30 vertices, density 0.40 to 0.70.
    Small,
    /// Ten graphs under 300 vertices, density 0.25 to 0.50.
    Medium,
    /// Ten graphs under 1000 vertices, density 0.15 to 0.35.
    Large,
    /// Five graphs under 3000 vertices, density 0.10 to 0.25.
    ExtraLarge,
}

impl DatasetTier {
    /// Every tier, smallest first.
    pub const ALL: [Self; 4] = [Self::Small, Self::Medium, Self::Large, Self::ExtraLarge];

    /// Returns the snake-case tier name used in file names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::ExtraLarge => "extra_large",
        }
    }

    /// Returns the vertex count of each graph in the tier.
    #[must_use]
    pub const fn sizes(self) -> &'static [usize] {
        match self {
            Self::Small => &[8, 15, 22, 25, 28],
            Self::Medium => &[50, 80, 120, 150, 180, 210, 240, 270, 290, 295],
            Self::Large => &[300, 400, 500, 600, 700, 800, 850, 900, 950, 980],
            Self::ExtraLarge => &[1000, 1500, 2000, 2500, 2800],
        }
    }

    /// Returns the half-open density range graphs are drawn from.
    #[must_use]
    pub const fn density_range(self) -> (f64, f64) {
        match self {
            Self::Small => (0.4, 0.7),
            Self::Medium => (0.25, 0.5),
            Self::Large => (0.15, 0.35),
            Self::ExtraLarge => (0.1, 0.25),
        }
    }
}

/// Generates every graph of `tier`, with ids `1..=k` in size order.
///
/// # Errors
/// Propagates [`connected_graph`] failures.
#[instrument(name = "synthetic.tier", err, skip(tier, rng), fields(tier = tier.name()))]
pub fn generate_tier(tier: DatasetTier, rng: &mut SmallRng) -> Result<Vec<Graph>, SyntheticError> {
    let (low, high) = tier.density_range();
    (1_u64..)
        .zip(tier.sizes())
        .map(|(id, &vertex_count)| {
            let density = rng.gen_range(low..high);
            connected_graph(&SyntheticConfig::new(id, vertex_count, density), rng)
        })
        .collect()
}
