//! Pokemon payload
//!
//! The subset of the `pokemon` resource the client keeps in its Pokedex.

use std::fmt;

use serde::Deserialize;

use super::NamedResource;

/// A pokemon record, as stored once caught.
#[derive(Debug, Clone, Deserialize)]
pub struct Pokemon {
    pub name: String,
    /// Higher values make the pokemon harder to catch
    #[serde(default)]
    pub base_experience: Option<u32>,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonType {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

impl Pokemon {
    /// Base experience, treating a missing value as zero.
    pub fn experience(&self) -> u32 {
        self.base_experience.unwrap_or(0)
    }
}

impl fmt::Display for Pokemon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Height: {}", self.height)?;
        writeln!(f, "Weight: {}", self.weight)?;
        writeln!(f, "Stats:")?;
        for stat in &self.stats {
            writeln!(f, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(f, "Types:")?;
        for kind in &self.types {
            writeln!(f, "  - {}", kind.kind.name)?;
        }
        Ok(())
    }
}
