//! Program Selector
//!
//! Resolves the current rendering phase to a compiled program and
//! framebuffer configuration, and binds them in place of the host's default
//! program for that phase. Phases without a mapping pass through to the
//! host untouched.
//!
//! # Failure policy
//!
//! A mapped phase whose program never compiled must not cost the frame:
//! selection falls back to the last valid pack program (or pass-through if
//! none has bound yet) and logs a diagnostic naming the phase and pack —
//! once per missing program, so a broken pack does not flood the log every
//! frame.

use log::warn;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::gl::{ProgramHandle, RenderDevice};
use crate::pipeline::pack::{PhasePrograms, ProgramId};
use crate::pipeline::phase::WorldRenderingPhase;
use crate::textures::tracker::TextureResource;
use crate::uniforms::holder::ProgramUniforms;

/// A compiled, linked pack program together with its uniform bindings.
///
/// The uniforms live and die with this entry, which keeps the teardown
/// ordering trivially correct: a wrapper can never outlive its program.
pub struct CompiledProgram {
    pub handle: ProgramHandle,
    pub uniforms: ProgramUniforms,
}

/// Outcome of a phase selection.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Selection {
    /// No program bound; the host default runs unmodified.
    PassThrough,
    /// The given pack program is bound for the next batch of draws.
    Bound(ProgramHandle),
}

/// Phase → program resolution and binding state for one loaded pack.
pub struct ProgramSelector {
    pack_name: String,
    table: FxHashMap<WorldRenderingPhase, PhasePrograms>,
    programs: FxHashMap<ProgramId, CompiledProgram>,
    current_phase: WorldRenderingPhase,
    bound: Option<ProgramHandle>,
    last_valid: Option<ProgramHandle>,
    pbr_bound: bool,
    missing_logged: FxHashSet<ProgramId>,
}

impl ProgramSelector {
    #[must_use]
    pub fn new(
        pack_name: impl Into<String>,
        table: FxHashMap<WorldRenderingPhase, PhasePrograms>,
        programs: FxHashMap<ProgramId, CompiledProgram>,
    ) -> Self {
        Self {
            pack_name: pack_name.into(),
            table,
            programs,
            current_phase: WorldRenderingPhase::None,
            bound: None,
            last_valid: None,
            pbr_bound: false,
            missing_logged: FxHashSet::default(),
        }
    }

    /// Resolves and binds the program for `phase`, refreshing its uniforms.
    ///
    /// Unmapped phases pass through; repeated pass-through selections issue
    /// no further GPU calls.
    pub fn select(&mut self, device: &mut dyn RenderDevice, phase: WorldRenderingPhase) -> Selection {
        self.current_phase = phase;
        self.pbr_bound = false;

        let Some(entry) = self.table.get(&phase).cloned() else {
            return self.pass_through(device);
        };

        if let Some(handle) = self.bind_by_id(device, &entry) {
            if let Some(framebuffer) = entry.framebuffer {
                device.bind_framebuffer(Some(framebuffer));
            }
            return Selection::Bound(handle);
        }

        self.log_missing_once(&entry.program, phase);

        // Recovered locally: previous valid program, or vanilla.
        match self.last_valid {
            Some(previous) => {
                if self.bound != Some(previous) {
                    device.bind_program(Some(previous));
                    self.bound = Some(previous);
                }
                Selection::Bound(previous)
            }
            None => self.pass_through(device),
        }
    }

    /// Reacts to a rebind of the primary sampling unit: swaps to the PBR
    /// variant of the current phase's program when the new texture carries
    /// PBR data, and back when it does not.
    pub fn on_primary_texture_changed(
        &mut self,
        device: &mut dyn RenderDevice,
        resource: Option<&TextureResource>,
    ) {
        let Some(entry) = self.table.get(&self.current_phase).cloned() else {
            return;
        };
        let Some(variant_id) = entry.pbr_variant.clone() else {
            return;
        };

        let wants_pbr = resource.is_some_and(|r| r.has_pbr);
        if wants_pbr == self.pbr_bound {
            return;
        }

        if wants_pbr {
            if let Some(variant) = self.programs.get_mut(&variant_id) {
                device.bind_program(Some(variant.handle));
                variant.uniforms.update_all(device);
                self.bound = Some(variant.handle);
                self.last_valid = Some(variant.handle);
                self.pbr_bound = true;
            } else {
                self.log_missing_once(&variant_id, self.current_phase);
            }
        } else if self.bind_by_id(device, &entry).is_some() {
            self.pbr_bound = false;
        }
    }

    /// Currently bound pack program, if any.
    #[must_use]
    pub fn bound_program(&self) -> Option<ProgramHandle> {
        self.bound
    }

    #[must_use]
    pub fn current_phase(&self) -> WorldRenderingPhase {
        self.current_phase
    }

    /// Deletes every compiled program, dropping its uniform wrappers with
    /// it, and restores the host default program.
    pub fn destroy(&mut self, device: &mut dyn RenderDevice) {
        if self.bound.take().is_some() {
            device.bind_program(None);
        }
        self.last_valid = None;

        for (_, program) in self.programs.drain() {
            device.delete_program(program.handle);
        }
    }

    fn bind_by_id(
        &mut self,
        device: &mut dyn RenderDevice,
        entry: &PhasePrograms,
    ) -> Option<ProgramHandle> {
        let compiled = self.programs.get_mut(&entry.program)?;

        device.bind_program(Some(compiled.handle));
        compiled.uniforms.update_all(device);
        self.bound = Some(compiled.handle);
        self.last_valid = Some(compiled.handle);
        self.bound
    }

    fn pass_through(&mut self, device: &mut dyn RenderDevice) -> Selection {
        if self.bound.take().is_some() {
            device.bind_program(None);
        }
        Selection::PassThrough
    }

    fn log_missing_once(&mut self, id: &ProgramId, phase: WorldRenderingPhase) {
        if self.missing_logged.insert(id.clone()) {
            warn!(
                "shader pack '{}': no compiled program '{id}' for phase {phase:?}; \
                 rendering that phase with fallback",
                self.pack_name
            );
        }
    }
}
