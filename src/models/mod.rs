//! Catalog payload models
//!
//! Serde types for the JSON bodies returned by the PokeAPI. Only the fields
//! the client uses are declared; everything else is ignored.

pub mod location;
pub mod pokemon;

// Re-export commonly used types
pub use location::{LocationAreaDetail, LocationAreaPage, NamedResource, PokemonEncounter};
pub use pokemon::{Pokemon, PokemonStat, PokemonType};
