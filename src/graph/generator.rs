//! Synthetic dataset generation
//!
//! Generators sit behind the `DatasetGenerator` trait so callers (and tests)
//! can swap the random source for a seeded, reproducible one.

use super::dataset::Dataset;
use super::entity::Entity;
use super::property::keys;
use super::types::EntityId;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Source of a dataset snapshot
pub trait DatasetGenerator {
    fn generate(&self) -> Dataset;
}

/// Shape of a synthetic dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of entities
    pub entity_count: usize,
    /// Upper bound on upstream ids per entity
    pub max_upstream: usize,
    /// Upper bound on downstream ids per entity
    pub max_downstream: usize,
    /// Risk factors are drawn from 1..=max_risk
    pub max_risk: i64,
    /// Recovery tiers are drawn from "tier 1"..="tier {tiers}"
    pub tiers: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            entity_count: 1000,
            max_upstream: 3,
            max_downstream: 3,
            max_risk: 5,
            tiers: 6,
        }
    }
}

/// Random AIT table generator
///
/// Each entity gets up to `max_upstream` upstream ids and up to
/// `max_downstream` downstream ids, drawn without replacement from the other
/// entities, so upstream and downstream never overlap and there are no self
/// loops.
#[derive(Debug, Clone, Default)]
pub struct SyntheticGenerator {
    config: GeneratorConfig,
    seed: Option<u64>,
}

impl SyntheticGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config, seed: None }
    }

    /// Generator with the default shape and `entity_count` entities
    pub fn with_count(entity_count: usize) -> Self {
        Self::new(GeneratorConfig {
            entity_count,
            ..GeneratorConfig::default()
        })
    }

    /// Fix the random seed; output becomes fully deterministic
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl DatasetGenerator for SyntheticGenerator {
    fn generate(&self) -> Dataset {
        let n = self.config.entity_count;
        let mut rng = self.rng();
        let mut entities = Vec::with_capacity(n);

        for i in 0..n {
            let others = n - 1;
            let upstream_len = self.config.max_upstream.min(others);
            let downstream_len = self.config.max_downstream.min(others - upstream_len);

            // Indices into "every entity except i"; shift past i to get a position.
            let picks: Vec<u64> = index::sample(&mut rng, others, upstream_len + downstream_len)
                .into_iter()
                .map(|j| {
                    let position = if j >= i { j + 1 } else { j };
                    position as u64 + 1
                })
                .collect();
            let (upstream, downstream) = picks.split_at(upstream_len);

            let risk = rng.gen_range(1..=self.config.max_risk.max(1));
            let tier = rng.gen_range(1..=self.config.tiers.max(1));
            let status = if rng.gen_bool(0.5) { "online" } else { "offline" };

            entities.push(
                Entity::new(EntityId::from(i as u64 + 1), format!("AIT{}", i + 1))
                    .with_upstream(upstream.iter().copied())
                    .with_downstream(downstream.iter().copied())
                    .with_attribute(keys::RISK_FACTOR, risk)
                    .with_attribute(keys::RECOVERY_TIME, format!("tier {}", tier))
                    .with_attribute(keys::BUSINESS_NAME, format!("Business {}", column_name(i)))
                    .with_attribute(keys::STATUS, status),
            );
        }

        info!(entities = n, seed = ?self.seed, "generated synthetic dataset");

        // ids are 1..=n and the status is always text
        Dataset::new(entities).unwrap_or_default()
    }
}

/// Spreadsheet-style column name: 0 -> A, 25 -> Z, 26 -> AA
fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8(name).unwrap_or_default()
}
