//! Configuration of [`FrozenLake`](super::FrozenLake).
use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

const MAP_4X4: [&str; 4] = ["SFFF", "FHFH", "FFFH", "HFFG"];

const MAP_8X8: [&str; 8] = [
    "SFFFFFFF", "FFFFFFFF", "FFFHFFFF", "FFFFFHFF", "FFFHFFFF", "FHHFFFHF", "FHFFHFHF",
    "FFFHFFFG",
];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
/// Configuration of [`FrozenLake`](super::FrozenLake).
///
/// Each row of `map` is a string of tiles:
///
/// * `S` - start, safe
/// * `F` - frozen surface, safe
/// * `H` - hole, ends the episode
/// * `G` - goal, ends the episode with reward 1
pub struct FrozenLakeConfig {
    /// Rows of the grid, top to bottom.
    pub map: Vec<String>,

    /// If `true`, a move goes to the intended or either perpendicular
    /// direction with probability 1/3 each.
    pub is_slippery: bool,
}

impl Default for FrozenLakeConfig {
    /// The slippery 4x4 lake.
    fn default() -> Self {
        Self {
            map: MAP_4X4.iter().map(|s| s.to_string()).collect(),
            is_slippery: true,
        }
    }
}

impl FrozenLakeConfig {
    /// The 4x4 lake without slipping.
    pub fn not_slippery() -> Self {
        Self::default().is_slippery(false)
    }

    /// The slippery 8x8 lake.
    pub fn map_8x8() -> Self {
        Self::default().map(MAP_8X8.iter().map(|s| s.to_string()).collect())
    }

    /// Sets the map.
    pub fn map(mut self, v: Vec<String>) -> Self {
        self.map = v;
        self
    }

    /// Sets if the ice is slippery.
    pub fn is_slippery(mut self, v: bool) -> Self {
        self.is_slippery = v;
        self
    }

    /// Rolling average return at which the lake counts as solved.
    pub fn solved_threshold(&self) -> f64 {
        if self.is_slippery {
            0.6
        } else {
            0.98
        }
    }

    /// Constructs [`FrozenLakeConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        info!("Load config of Frozen Lake from {}", path_.display());
        Ok(b)
    }

    /// Saves [`FrozenLakeConfig`] to YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Save config of Frozen Lake into {}", path_.display());
        Ok(())
    }
}
