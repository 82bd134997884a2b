// src/core/mod.rs
pub mod config;
pub mod orchestrator;

pub use orchestrator::{GenerationError, GenerationOrchestrator};
