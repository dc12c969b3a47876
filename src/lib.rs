#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod culling;
pub mod errors;
pub mod gl;
pub mod pipeline;
pub mod targets;
pub mod textures;
pub mod uniforms;

pub use culling::{BoxCuller, BoxIntersection};
pub use errors::PrismError;
pub use gl::{FramebufferHandle, ProgramHandle, RenderDevice, TextureHandle, UniformLocation};
pub use pipeline::{
    ColorSpace, CompiledProgram, PackPipeline, PhasePrograms, ProgramId, ProgramSelector,
    RenderSession, Selection, ShaderPackConfig, TerrainLayer, WorldRenderingPhase,
};
pub use targets::{ClearFlags, FullClearPass, ImageClearPass, ImageFormat, ImageResource, PixelKind};
pub use textures::{TextureResource, TextureTracker};
pub use uniforms::{
    CapturedRenderState, ProgramUniforms, UniformUpdateFrequency, ValueUpdateNotifier,
};
