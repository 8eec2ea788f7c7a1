//! Scrutin common core types.

pub mod id;

pub use id::{ElectionId, IdParseError, VoterId};
