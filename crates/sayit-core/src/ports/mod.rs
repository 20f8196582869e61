//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No HTTP, audio-device, or filesystem types in any signature
//! - Adapter errors are mapped to the port error types at the boundary
//! - Traits are minimal and intent-based

pub mod audio;
pub mod preferences;
pub mod speech;

use thiserror::Error;

pub use audio::{AudioPlayerError, AudioPlayerPort};
pub use preferences::PreferencesRepository;
pub use speech::{
    AudioResource, SpeechBackendPort, SpeechPortError, SynthesisOutcome, SynthesisRequest,
};

/// Errors from persistence-backed repositories.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// The underlying storage failed (I/O, permissions, ...).
    #[error("storage error: {0}")]
    Storage(String),

    /// Stored data could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}
