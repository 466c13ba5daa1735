//! CPU rasterizer.
//!
//! [`Software`] owns the per-frame scratch and screen metrics; the free
//! [`render_frame`] is a one-shot convenience over it. Output goes into a
//! [`Framebuffer`], a plain in-memory pixel array the caller presents
//! however it likes.

pub mod software;

pub use software::Software;

use crate::{
    defs::{SCREEN_HEIGHT, SCREEN_WIDTH},
    world::{Camera, Texture, World},
};

/// 0xAARRGGBB pixel.
pub type Rgba = u32;

/// Fixed-size 32-bit frame store: row-major, origin top-left, `(x, y)` at
/// `x + y·SCREEN_WIDTH`.
pub struct Framebuffer {
    pixels: Vec<Rgba>,
}

impl Framebuffer {
    pub fn new() -> Self {
        Self {
            pixels: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }

    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    #[inline]
    pub fn put(&mut self, x: usize, y: usize, color: Rgba) {
        self.pixels[x + y * SCREEN_WIDTH] = color;
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgba {
        self.pixels[x + y * SCREEN_WIDTH]
    }

    /// Whole frame as one slice, e.g. for `Window::update_with_buffer`.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render one frame with throwaway renderer state. Overwrites every pixel of
/// `fb`; rendering itself never fails.
pub fn render_frame(
    world: &World,
    camera: &Camera,
    wall_tex: &Texture,
    plane_tex: &Texture,
    fb: &mut Framebuffer,
) {
    Software::new().render_frame(world, camera, wall_tex, plane_tex, fb);
}
