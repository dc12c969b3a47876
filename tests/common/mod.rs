//! Shared test fixtures: a recording mock of the GPU command surface.
//!
//! Every command is appended to `calls` in issue order, so tests can assert
//! both what was issued and in which sequence. Framebuffer and image handles
//! are allocated from counters with distinct bases so the two handle spaces
//! never collide in assertions.

#![allow(dead_code)]

use glam::{IVec2, IVec3, Mat4, Vec2, Vec3, Vec4};

use prism::gl::{FramebufferHandle, ProgramHandle, RenderDevice, TextureHandle, UniformLocation};
use prism::{ClearFlags, ImageFormat};

/// Routes `log` output through the test harness. Safe to call repeatedly.
pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One recorded GPU command.
#[derive(Clone, PartialEq, Debug)]
pub enum GpuCall {
    BindProgram(Option<ProgramHandle>),
    DeleteProgram(ProgramHandle),
    Uniform1i(UniformLocation, i32),
    Uniform1f(UniformLocation, f32),
    Uniform2f(UniformLocation, Vec2),
    Uniform3f(UniformLocation, Vec3),
    Uniform4f(UniformLocation, Vec4),
    Uniform2i(UniformLocation, IVec2),
    Uniform3i(UniformLocation, IVec3),
    UniformMatrix4f(UniformLocation, Mat4),
    CreateFramebuffer(FramebufferHandle),
    BindFramebuffer(Option<FramebufferHandle>),
    DeleteFramebuffer(FramebufferHandle),
    AttachColor(FramebufferHandle, u32, TextureHandle),
    ClearColorF(u32, [f32; 4]),
    ClearColorI(u32, [i32; 4]),
    ClearColorU(u32, [u32; 4]),
    Clear(ClearFlags, Vec4),
    BindTexture(u32, TextureHandle),
    DeleteTexture(TextureHandle),
    CreateImage(TextureHandle, ImageFormat, u32, u32),
}

/// [`RenderDevice`] implementation that records every command.
#[derive(Default)]
pub struct RecordingDevice {
    pub calls: Vec<GpuCall>,
    next_framebuffer: u32,
    next_image: u32,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of uniform writes of any type.
    pub fn uniform_writes(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    GpuCall::Uniform1i(..)
                        | GpuCall::Uniform1f(..)
                        | GpuCall::Uniform2f(..)
                        | GpuCall::Uniform3f(..)
                        | GpuCall::Uniform4f(..)
                        | GpuCall::Uniform2i(..)
                        | GpuCall::Uniform3i(..)
                        | GpuCall::UniformMatrix4f(..)
                )
            })
            .count()
    }

    /// Program binds in issue order.
    pub fn program_binds(&self) -> Vec<Option<ProgramHandle>> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                GpuCall::BindProgram(program) => Some(*program),
                _ => None,
            })
            .collect()
    }

    /// Framebuffers created but never deleted.
    pub fn live_framebuffers(&self) -> Vec<FramebufferHandle> {
        let mut live = Vec::new();
        for call in &self.calls {
            match call {
                GpuCall::CreateFramebuffer(handle) => live.push(*handle),
                GpuCall::DeleteFramebuffer(handle) => live.retain(|h| h != handle),
                _ => {}
            }
        }
        live
    }

    /// Images created but never deleted.
    pub fn live_images(&self) -> Vec<TextureHandle> {
        let mut live = Vec::new();
        for call in &self.calls {
            match call {
                GpuCall::CreateImage(handle, ..) => live.push(*handle),
                GpuCall::DeleteTexture(handle) => live.retain(|h| h != handle),
                _ => {}
            }
        }
        live
    }

    /// Handles deleted through `delete_program`.
    pub fn deleted_programs(&self) -> Vec<ProgramHandle> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                GpuCall::DeleteProgram(handle) => Some(*handle),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&GpuCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }
}

impl RenderDevice for RecordingDevice {
    fn bind_program(&mut self, program: Option<ProgramHandle>) {
        self.calls.push(GpuCall::BindProgram(program));
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        self.calls.push(GpuCall::DeleteProgram(program));
    }

    fn uniform1i(&mut self, location: UniformLocation, value: i32) {
        self.calls.push(GpuCall::Uniform1i(location, value));
    }

    fn uniform1f(&mut self, location: UniformLocation, value: f32) {
        self.calls.push(GpuCall::Uniform1f(location, value));
    }

    fn uniform2f(&mut self, location: UniformLocation, value: Vec2) {
        self.calls.push(GpuCall::Uniform2f(location, value));
    }

    fn uniform3f(&mut self, location: UniformLocation, value: Vec3) {
        self.calls.push(GpuCall::Uniform3f(location, value));
    }

    fn uniform4f(&mut self, location: UniformLocation, value: Vec4) {
        self.calls.push(GpuCall::Uniform4f(location, value));
    }

    fn uniform2i(&mut self, location: UniformLocation, value: IVec2) {
        self.calls.push(GpuCall::Uniform2i(location, value));
    }

    fn uniform3i(&mut self, location: UniformLocation, value: IVec3) {
        self.calls.push(GpuCall::Uniform3i(location, value));
    }

    fn uniform_matrix4f(&mut self, location: UniformLocation, value: &Mat4) {
        self.calls.push(GpuCall::UniformMatrix4f(location, *value));
    }

    fn create_framebuffer(&mut self) -> FramebufferHandle {
        self.next_framebuffer += 1;
        let handle = FramebufferHandle(100 + self.next_framebuffer);
        self.calls.push(GpuCall::CreateFramebuffer(handle));
        handle
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferHandle>) {
        self.calls.push(GpuCall::BindFramebuffer(framebuffer));
    }

    fn delete_framebuffer(&mut self, framebuffer: FramebufferHandle) {
        self.calls.push(GpuCall::DeleteFramebuffer(framebuffer));
    }

    fn attach_color(&mut self, framebuffer: FramebufferHandle, index: u32, texture: TextureHandle) {
        self.calls
            .push(GpuCall::AttachColor(framebuffer, index, texture));
    }

    fn clear_color_f(&mut self, draw_buffer: u32, value: [f32; 4]) {
        self.calls.push(GpuCall::ClearColorF(draw_buffer, value));
    }

    fn clear_color_i(&mut self, draw_buffer: u32, value: [i32; 4]) {
        self.calls.push(GpuCall::ClearColorI(draw_buffer, value));
    }

    fn clear_color_u(&mut self, draw_buffer: u32, value: [u32; 4]) {
        self.calls.push(GpuCall::ClearColorU(draw_buffer, value));
    }

    fn clear(&mut self, flags: ClearFlags, color: Vec4) {
        self.calls.push(GpuCall::Clear(flags, color));
    }

    fn bind_texture(&mut self, unit: u32, texture: TextureHandle) {
        self.calls.push(GpuCall::BindTexture(unit, texture));
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        self.calls.push(GpuCall::DeleteTexture(texture));
    }

    fn create_image(&mut self, format: ImageFormat, width: u32, height: u32) -> TextureHandle {
        self.next_image += 1;
        let handle = TextureHandle(500 + self.next_image);
        self.calls
            .push(GpuCall::CreateImage(handle, format, width, height));
        handle
    }
}
