//! Error types for the Pokedex client
//!
//! Provides unified error handling using thiserror. The cache itself never
//! fails; these errors come from fetching, decoding and command handling.

use reqwest::StatusCode;
use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for the client and its commands.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// The HTTP request could not be completed
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Unexpected status {status} for {url}")]
    Status { status: StatusCode, url: String },

    /// The response body was not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A command was invoked without a required argument
    #[error("need at least an argument, the {0}")]
    MissingArgument(&'static str),

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the client.
pub type Result<T> = std::result::Result<T, PokedexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_argument_message() {
        let err = PokedexError::MissingArgument("location area");
        assert_eq!(err.to_string(), "need at least an argument, the location area");
    }

    #[test]
    fn test_status_message() {
        let err = PokedexError::Status {
            status: StatusCode::NOT_FOUND,
            url: "https://pokeapi.co/api/v2/pokemon/missingno/".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unexpected status 404 Not Found for https://pokeapi.co/api/v2/pokemon/missingno/"
        );
    }

    #[test]
    fn test_decode_from_serde() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: PokedexError = source.into();
        assert!(matches!(err, PokedexError::Decode(_)));
    }
}
