//! Remote audio analysis.
//!
//! - `client.rs` - two-step upload/predict exchange with the Space
//! - `wire.rs` - request/response shapes of the Space's HTTP API

mod client;
pub mod wire;

pub use client::{AudioAnalyzer, SpaceClient};
pub use wire::{AnalysisResult, FileRef, PredictRequest, Spectrogram};
