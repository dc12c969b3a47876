//! Pack Pipeline
//!
//! Ownership root for one loaded shader pack: the compiled program registry
//! (inside the [`ProgramSelector`]), the pack's auxiliary images, and the
//! clear passes that zero them at frame start. Created when a pack is
//! (re)loaded, destroyed when the pack is unloaded or the host reloads
//! resources — always on the render thread, always in a fixed order so no
//! wrapper outlives the resource it targets.

use std::cell::RefCell;
use std::rc::Rc;

use log::info;

use crate::errors::Result;
use crate::gl::RenderDevice;
use crate::pipeline::pack::{ColorSpace, ShaderPackConfig};
use crate::pipeline::selector::{ProgramSelector, Selection};
use crate::pipeline::phase::WorldRenderingPhase;
use crate::targets::clear_pass::{FullClearPass, ImageClearPass};
use crate::targets::image::ImageResource;

use rustc_hash::FxHashMap;

use crate::pipeline::pack::ProgramId;
use crate::pipeline::selector::CompiledProgram;

/// A loaded shader pack with all its GPU-side state.
pub struct PackPipeline {
    name: String,
    color_space: ColorSpace,
    /// Shared with the texture tracker's rebind callback; `RefCell` because
    /// both the session and the callback run on the render thread and never
    /// hold a borrow across each other.
    selector: Rc<RefCell<ProgramSelector>>,
    images: Vec<ImageResource>,
    clear_passes: Vec<ImageClearPass>,
    full_clears: Vec<FullClearPass>,
    destroyed: bool,
}

impl PackPipeline {
    /// Allocates the pack's declared images and builds their clear passes.
    ///
    /// `programs` is the compiled program registry produced by the (out of
    /// scope) pack compiler; ownership transfers here, so on any construction
    /// failure every resource allocated so far is released before the error
    /// is returned — the handed-off compiled programs included.
    pub fn new(
        device: &mut dyn RenderDevice,
        config: ShaderPackConfig,
        mut programs: FxHashMap<ProgramId, CompiledProgram>,
        full_clears: Vec<FullClearPass>,
    ) -> Result<Self> {
        let mut images = Vec::with_capacity(config.images.len());
        let mut clear_passes = Vec::with_capacity(config.images.len());

        for declaration in &config.images {
            let handle = device.create_image(declaration.format, declaration.width, declaration.height);
            let image = ImageResource::new(handle, declaration.format, declaration.width, declaration.height);

            match ImageClearPass::new(device, &image) {
                Ok(pass) => {
                    images.push(image);
                    clear_passes.push(pass);
                }
                Err(err) => {
                    let mut image = image;
                    image.destroy(device);
                    for pass in &mut clear_passes {
                        pass.destroy(device);
                    }
                    for image in &mut images {
                        image.destroy(device);
                    }
                    // Ownership of the registry already transferred; the
                    // caller cannot free these handles after an Err.
                    for (_, program) in programs.drain() {
                        device.delete_program(program.handle);
                    }
                    return Err(err);
                }
            }
        }

        info!(
            "loaded shader pack '{}' ({} programs, {} images)",
            config.name,
            programs.len(),
            images.len()
        );

        Ok(Self {
            name: config.name.clone(),
            color_space: config.color_space,
            selector: Rc::new(RefCell::new(ProgramSelector::new(
                config.name,
                config.phase_programs,
                programs,
            ))),
            images,
            clear_passes,
            full_clears,
            destroyed: false,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    pub(crate) fn selector(&self) -> Rc<RefCell<ProgramSelector>> {
        Rc::clone(&self.selector)
    }

    /// Runs the frame-start clears: main-target full clears first, then the
    /// typed zero clears of every pack image.
    pub fn begin_frame(&self, device: &mut dyn RenderDevice) {
        debug_assert!(!self.destroyed, "pipeline used after destroy");

        for clear in &self.full_clears {
            clear.execute(device);
        }
        for pass in &self.clear_passes {
            pass.execute(device);
        }
        device.bind_framebuffer(None);
    }

    /// Resolves and binds the program for `phase`.
    pub fn select(&self, device: &mut dyn RenderDevice, phase: WorldRenderingPhase) -> Selection {
        debug_assert!(!self.destroyed, "pipeline used after destroy");
        self.selector.borrow_mut().select(device, phase)
    }

    /// Appends this pack's diagnostic lines to a host debug overlay.
    pub fn add_debug_lines(&self, out: &mut Vec<String>) {
        out.push(format!("Shader pack: {}", self.name));
        out.push(format!("Color space: {}", self.color_space.label()));
        out.push(format!(
            "Pack images: {} ({} clear passes)",
            self.images.len(),
            self.clear_passes.len()
        ));
    }

    /// Tears the pack down: programs (with their uniform wrappers) first,
    /// then clear-pass framebuffers, then the images themselves.
    pub fn destroy(&mut self, device: &mut dyn RenderDevice) {
        debug_assert!(!self.destroyed, "pipeline destroyed twice");

        self.selector.borrow_mut().destroy(device);
        for pass in &mut self.clear_passes {
            pass.destroy(device);
        }
        for image in &mut self.images {
            image.destroy(device);
        }
        self.destroyed = true;

        info!("unloaded shader pack '{}'", self.name);
    }
}
