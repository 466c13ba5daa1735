//! Floor and ceiling spans by per-pixel inverse projection.

use glam::Vec2;

use crate::{
    defs::PLANE_TILE,
    renderer::{Framebuffer, software::Software},
    world::{Camera, Texture},
};

impl Software {
    /// Fill rows `start_row..=end_row` of screen column `x` with the plane
    /// at `view_plane_height` (height relative to the eye: negative for a
    /// floor, positive for a ceiling).
    ///
    /// Each pixel is cast back through the projection onto the plane, the
    /// hit point mapped to world space and tiled every [`PLANE_TILE`] units.
    /// Samples on a texture border row or column become solid black, which
    /// draws the tile grid.
    pub(super) fn draw_plane_column(
        &self,
        x: usize,
        start_row: i32,
        end_row: i32,
        view_plane_height: f32,
        camera: &Camera,
        tex: &Texture,
        fb: &mut Framebuffer,
    ) {
        let normalized_x = (x as f32 + 0.5 - self.half_w) / self.half_w;

        for y in start_row..=end_row {
            let normalized_y = (self.half_h - y as f32 + 0.5) / (self.half_h * self.y_scale);

            let view_y = view_plane_height * self.focal / normalized_y;
            let view_x = normalized_x / self.focal * view_y;

            let hit = camera.to_world(Vec2::new(view_x, view_y));

            let tile_x = hit.x / PLANE_TILE;
            let tile_y = hit.y / PLANE_TILE;

            let tex_x = (((tile_x - tile_x.floor()) * tex.w as f32) as i32)
                .clamp(0, tex.w as i32 - 1) as usize;
            let tex_y = (((tile_y - tile_y.floor()) * tex.h as f32) as i32)
                .clamp(0, tex.h as i32 - 1) as usize;

            if tex_x == 0 || tex_x == tex.w - 1 || tex_y == 0 || tex_y == tex.h - 1 {
                fb.put(x, y as usize, 0xFF_000000);
                continue;
            }

            fb.put(x, y as usize, tex.pixels[tex_x + tex_y * tex.w]);
        }
    }
}
