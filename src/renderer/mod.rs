//! Rendering interface
//!
//! The game never talks to a graphics API directly. Each frame it emits
//! textured quads and text lines into a [`RenderSink`]; the backend (GPU,
//! terminal, test buffer) decides what to do with them. The sink is write-only
//! and is never queried for game state.

pub mod scene;

use glam::Vec2;

use crate::assets::TextureHandle;

pub use scene::render_scene;

/// RGBA, each channel 0..=1
pub type Color = [f32; 4];

pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];

/// One textured quad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub texture: TextureHandle,
    /// Bottom-left corner, y-up screen space
    pub pos: Vec2,
    pub size: Vec2,
    /// Degrees, about the quad centre
    pub rotation: f32,
    pub tint: Color,
}

impl DrawCommand {
    pub fn new(texture: TextureHandle, pos: Vec2, size: Vec2) -> Self {
        Self {
            texture,
            pos,
            size,
            rotation: 0.0,
            tint: WHITE,
        }
    }

    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn tinted(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }
}

/// A line of text anchored at its bottom-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub text: String,
    pub pos: Vec2,
    pub color: Color,
}

/// Receives draw commands for one frame
pub trait RenderSink {
    fn draw(&mut self, cmd: DrawCommand);
    fn text(&mut self, cmd: TextCommand);
}

/// Records a frame's commands in submission order
#[derive(Debug, Default)]
pub struct CommandBuffer {
    pub draws: Vec<DrawCommand>,
    pub texts: Vec<TextCommand>,
}

impl CommandBuffer {
    pub fn clear(&mut self) {
        self.draws.clear();
        self.texts.clear();
    }
}

impl RenderSink for CommandBuffer {
    fn draw(&mut self, cmd: DrawCommand) {
        self.draws.push(cmd);
    }

    fn text(&mut self, cmd: TextCommand) {
        self.texts.push(cmd);
    }
}
