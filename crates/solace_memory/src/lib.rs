//! The Fact Store: durable key/value memory of facts about the user.
//!
//! Facts are learned by matching utterances against a fixed rule table
//! (see [`rules`]), persisted as one JSON document, and rendered into a
//! text preamble for the response generator (context injection).

pub mod rules;
pub mod store;

pub use store::{FactStore, FactValue, Facts};
