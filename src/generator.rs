//! Synthetic client datasets.
//!
//! Clients are scattered in gaussian clusters over a rectangular map, which gives the optimizer
//! dense regions worth covering and sparse regions worth ignoring.

use crate::models::Client;
use rand::Rng;
use rand_distr::{Distribution, Normal, NormalError};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Attempts at drawing an in-map coordinate before clamping.
const MAX_SAMPLE_ATTEMPTS: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("cluster count must be at least 1")]
    NoClusters,
    #[error("map size must be finite and non-negative. width={width}, height={height}")]
    InvalidMap { width: f64, height: f64 },
    #[error("Distribution error: {0}")]
    Distribution(#[from] NormalError),
}

/// Parameters of a synthetic dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterLayout {
    pub count: usize,
    pub clusters: usize,
    pub width: f64,
    pub height: f64,
}

impl Default for ClusterLayout {
    fn default() -> Self {
        Self {
            count: 1000 * 1000 / 16,
            clusters: 4,
            width: 1000.0,
            height: 1000.0,
        }
    }
}

struct Cluster {
    x: Normal<f64>,
    y: Normal<f64>,
    size: usize,
}

fn sample_coordinate<R: Rng>(rng: &mut R, distribution: &Normal<f64>, upper: f64) -> f64 {
    let mut value = distribution.mean();
    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        value = distribution.sample(rng);
        if (0.0..=upper).contains(&value) {
            break;
        }
    }
    value.clamp(0.0, upper).round()
}

/// Generates `layout.count` clients with integer coordinates and ids `C001`, `C002`, ...
///
/// Every cluster receives at least one client; fewer clients than clusters reduces the number
/// of clusters.
#[instrument(level = "debug", skip(rng), fields(count = layout.count, clusters = layout.clusters))]
pub fn generate_clients<R: Rng>(
    rng: &mut R,
    layout: &ClusterLayout,
) -> Result<Vec<Client>, GeneratorError> {
    if layout.clusters == 0 {
        return Err(GeneratorError::NoClusters);
    }

    let (width, height) = (layout.width, layout.height);
    if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
        return Err(GeneratorError::InvalidMap { width, height });
    }

    if layout.count == 0 {
        return Ok(Vec::new());
    }

    let cluster_count = layout.clusters.min(layout.count);
    let mut sizes = vec![1usize; cluster_count];
    for _ in 0..layout.count - cluster_count {
        sizes[rng.random_range(0..cluster_count)] += 1;
    }

    let shortest_side = width.min(height);
    let clusters = sizes
        .into_iter()
        .map(|size| -> Result<Cluster, GeneratorError> {
            let center_x = rng.random_range(0.0..=width);
            let center_y = rng.random_range(0.0..=height);
            let spread = rng.random_range(0.025..=0.05) * shortest_side;
            Ok(Cluster {
                x: Normal::new(center_x, spread)?,
                y: Normal::new(center_y, spread)?,
                size,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut clients = Vec::with_capacity(layout.count);
    for cluster in &clusters {
        for _ in 0..cluster.size {
            let x = sample_coordinate(rng, &cluster.x, width);
            let y = sample_coordinate(rng, &cluster.y, height);
            clients.push(Client::new(format!("C{:03}", clients.len() + 1), x, y));
        }
    }

    Ok(clients)
}
