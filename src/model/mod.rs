//! Model loading functionality
//!
//! Turns serialized source models into target models behind a profile key.

pub mod loader;

pub use loader::{LoadError, MimModelLoader, ModelLoader, SourceFormat};
