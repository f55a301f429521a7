//! Client Module
//!
//! HTTP access to the catalog API. Every request goes through the injected
//! response cache before touching the network.

mod poke;

pub use poke::PokeClient;
