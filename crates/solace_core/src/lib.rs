//! Shared foundation for the Solace companion core.
//!
//! Holds the types every other crate agrees on: the safety-signal data
//! model, the store error taxonomy, and the TOML configuration
//! (including the versioned keyword lexicon the detector runs on).

pub mod config;
pub mod error;
pub mod signal;

pub use config::{CompanionConfig, Lexicon, SolaceConfig, StoreConfig};
pub use error::StoreError;
pub use signal::{Sentiment, SignalRecord, SignalReport};
