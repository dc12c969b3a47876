//! Texture Lifecycle
//!
//! The process-wide [`TextureTracker`] registry plus the off-thread debug
//! export worker.

pub mod export;
pub mod tracker;

pub use tracker::{BindCallback, TextureResource, TextureTracker};
