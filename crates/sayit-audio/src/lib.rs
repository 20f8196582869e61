#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod error;
pub mod player;
pub mod thread;

// Re-export key types for convenience
pub use error::PlayerError;
pub use player::{PlaybackFinishedCallback, RodioPlayer, probe_duration};
pub use thread::PlayerHandle;
