//! Pokedex - An interactive PokeAPI client
//!
//! Browses location areas, explores them and catches pokemon. Raw API
//! responses are kept in a time-expiring cache so repeated requests within
//! the cache interval never hit the network.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
pub mod tasks;

pub use cache::Cache;
pub use client::PokeClient;
pub use config::Config;
pub use error::{PokedexError, Result};
pub use tasks::ReaperHandle;
