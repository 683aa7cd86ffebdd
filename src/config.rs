//! Configuration for puzzle generation.

use rand::{rngs::StdRng, SeedableRng};
use serde::Deserialize;

use crate::{placement::PlacementStrategy, Error};

/// The configuration for puzzle generation. See [`Puzzle::generate`] for details.
///
/// Every field has a default, so an empty JSON object is a valid configuration.
///
/// [`Puzzle::generate`]: crate::Puzzle::generate
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Fixed grid dimension. When absent it is computed from the word list.
    pub grid_size: Option<usize>,

    /// How positions are searched for each word.
    pub strategy: PlacementStrategy,

    /// Seed for the random source, making the output reproducible.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    /// Parses a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// A random source seeded from [`GeneratorConfig::seed`], or from entropy when unset.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
