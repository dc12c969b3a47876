//! Uniform Management
//!
//! Change-detected uniform wrappers and their supporting pieces:
//!
//! - [`CachedUniform`]: one program slot, cached last-written value
//! - [`ProgramUniforms`]: fluent per-program collection
//! - [`ValueUpdateNotifier`]: producer-side re-arm for `OnNotify` bindings
//! - [`CapturedRenderState`]: per-frame values shared with suppliers

pub mod holder;
pub mod notifier;
pub mod state;
pub mod uniform;

pub use holder::ProgramUniforms;
pub use notifier::ValueUpdateNotifier;
pub use state::CapturedRenderState;
pub use uniform::{CachedUniform, UniformSlot, UniformUpdateFrequency, UniformValue};
