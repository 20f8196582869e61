#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod port;
pub mod url;

// Re-export primary types for convenient access
pub use client::{DefaultSpeechClient, SpeechApiClient};
pub use config::{ApiConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, ApiResult};
pub use http::{HttpBackend, ReqwestBackend};

// Silence unused dev-dependency warnings (integration tests drive the
// async client through tokio)
#[cfg(test)]
use tokio as _;
