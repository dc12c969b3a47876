//! Pipeline Orchestration
//!
//! Everything between the host's draw-loop hooks and the GPU command
//! surface: the rendering-phase state machine, the phase → program
//! selector, the per-pack ownership root and the session context the hooks
//! talk to.

pub mod pack;
pub mod phase;
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod selector;
pub mod session;

pub use pack::{ColorSpace, ImageDeclaration, PhasePrograms, ProgramId, ShaderPackConfig};
pub use phase::{TerrainLayer, WorldRenderingPhase};
pub use pipeline::PackPipeline;
pub use selector::{CompiledProgram, ProgramSelector, Selection};
pub use session::RenderSession;
