//! Shader Pack Descriptor
//!
//! The configuration an external pack parser hands this crate: which
//! program each rendering phase uses, optional PBR-aware variants and
//! framebuffer overrides, and the auxiliary images the pack declares.
//! Parsing the pack text itself is out of scope.

use rustc_hash::FxHashMap;

use crate::errors::{PrismError, Result};
use crate::gl::FramebufferHandle;
use crate::pipeline::phase::WorldRenderingPhase;
use crate::targets::image::ImageFormat;

/// Name of a program within a shader pack.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ProgramId(pub String);

impl ProgramId {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl std::fmt::Display for ProgramId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Color space a pack declares for its output.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ColorSpace {
    #[default]
    Srgb,
    DciP3,
    DisplayP3,
    Rec2020,
    AdobeRgb,
}

impl ColorSpace {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Srgb => "sRGB",
            Self::DciP3 => "DCI-P3",
            Self::DisplayP3 => "Display P3",
            Self::Rec2020 => "Rec. 2020",
            Self::AdobeRgb => "Adobe RGB",
        }
    }
}

/// Program selection for one rendering phase.
#[derive(Clone, Debug)]
pub struct PhasePrograms {
    pub program: ProgramId,
    /// Variant to swap in while the primary sampling unit holds a texture
    /// with paired PBR data.
    pub pbr_variant: Option<ProgramId>,
    /// Framebuffer to bind alongside the program; `None` keeps the host's
    /// current draw target.
    pub framebuffer: Option<FramebufferHandle>,
}

impl PhasePrograms {
    #[must_use]
    pub fn new(program: ProgramId) -> Self {
        Self {
            program,
            pbr_variant: None,
            framebuffer: None,
        }
    }

    #[must_use]
    pub fn with_pbr_variant(mut self, variant: ProgramId) -> Self {
        self.pbr_variant = Some(variant);
        self
    }

    #[must_use]
    pub fn with_framebuffer(mut self, framebuffer: FramebufferHandle) -> Self {
        self.framebuffer = Some(framebuffer);
        self
    }
}

/// Auxiliary image the pack declares, allocated at pipeline load.
#[derive(Clone, Debug)]
pub struct ImageDeclaration {
    pub name: String,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

/// Parsed shader pack configuration.
pub struct ShaderPackConfig {
    pub name: String,
    pub color_space: ColorSpace,
    pub phase_programs: FxHashMap<WorldRenderingPhase, PhasePrograms>,
    pub images: Vec<ImageDeclaration>,
}

impl ShaderPackConfig {
    /// Builds a config from a list of phase mappings, rejecting duplicate
    /// phase entries.
    pub fn from_entries(
        name: impl Into<String>,
        color_space: ColorSpace,
        entries: Vec<(WorldRenderingPhase, PhasePrograms)>,
        images: Vec<ImageDeclaration>,
    ) -> Result<Self> {
        let mut phase_programs = FxHashMap::default();
        for (phase, programs) in entries {
            if phase_programs.insert(phase, programs).is_some() {
                return Err(PrismError::InvalidPackDescriptor(format!(
                    "phase {phase:?} is mapped twice"
                )));
            }
        }

        Ok(Self {
            name: name.into(),
            color_space,
            phase_programs,
            images,
        })
    }
}
