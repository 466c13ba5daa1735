//! Wall projection, clipping, and column rasterization.

use glam::Vec2;

use crate::{
    defs::{EPSILON, FOV, SCREEN_HEIGHT, SCREEN_WIDTH},
    renderer::{Framebuffer, software::Software},
    world::{Camera, LineSegment, Texture, World, point_side, segment_intersect, signed_angle},
};

/// Frustum edge rays need to outreach any wall; world units.
const FRUSTUM_REACH: f32 = 10_000.0;

impl Software {
    /// Project one wall into screen space and draw its textured strip,
    /// together with the floor and ceiling runs above and below it.
    pub(super) fn render_seg(
        &self,
        seg: LineSegment,
        world: &World,
        camera: &Camera,
        wall_tex: &Texture,
        plane_tex: &Texture,
        fb: &mut Framebuffer,
    ) {
        let (w1, w2) = world.seg_endpoints(seg);
        let mut v1 = camera.to_view(w1);
        let mut v2 = camera.to_view(w2);

        let view_floor = world.floor_height - camera.height;
        let view_ceiling = world.ceiling_height - camera.height;

        // entirely behind the eye
        if v1.y <= 0.0 && v2.y <= 0.0 {
            return;
        }

        // single-sided walls: the eye must sit on the visible side
        if point_side(v1, v2, Vec2::ZERO) != 1 {
            return;
        }

        // clip against the two frustum edge rays; a trimmed endpoint gives
        // up the matching share of its texture interval
        let edge_l = Vec2::from_angle(FOV * 0.5).rotate(Vec2::new(0.0, FRUSTUM_REACH));
        let edge_r = Vec2::from_angle(-FOV * 0.5).rotate(Vec2::new(0.0, FRUSTUM_REACH));
        let clip_l = segment_intersect(Vec2::ZERO, edge_l, v1, v2);
        let clip_r = segment_intersect(Vec2::ZERO, edge_r, v1, v2);

        let len = (v2 - v1).length();
        let mut u_start = 0.0;
        let mut u_end = len / wall_tex.w as f32;
        let v_start = 0.0;
        let v_end = (view_ceiling - view_floor) / wall_tex.h as f32;

        if let Some(p) = clip_l {
            u_start = (p - v1).length() / wall_tex.w as f32;
            v1 = p;
        }
        if let Some(p) = clip_r {
            u_end -= (p - v2).length() / wall_tex.w as f32;
            v2 = p;
        }

        // whatever survived clipping must still lie inside the view cone
        let angle1 = signed_angle(Vec2::Y, v1);
        let angle2 = signed_angle(Vec2::Y, v2);
        if angle1 < -FOV * 0.5 || angle2 > FOV * 0.5 {
            return;
        }

        // perspective projection to screen space
        let sx1 = self.half_w + v1.x / v1.y * self.focal * self.half_w;
        let sx2 = self.half_w + v2.x / v2.y * self.focal * self.half_w;
        let sy1_top = self.half_h - view_ceiling / v1.y * self.focal * self.half_h * self.y_scale;
        let sy1_bot = self.half_h - view_floor / v1.y * self.focal * self.half_h * self.y_scale;
        let sy2_top = self.half_h - view_ceiling / v2.y * self.focal * self.half_h * self.y_scale;
        let sy2_bot = self.half_h - view_floor / v2.y * self.focal * self.half_h * self.y_scale;

        let dx = sx2 - sx1;
        if dx.abs() < EPSILON {
            return;
        }
        let slope_top = (sy2_top - sy1_top) / dx;
        let slope_bot = (sy2_bot - sy1_bot) / dx;

        let start_col = (sx1 + 0.5) as i32;
        let end_col = (sx2 - 0.5) as i32;
        let width = (end_col - start_col + 1) as f32;

        let mut top = sy1_top;
        let mut bot = sy1_bot;

        for x in start_col..=end_col {
            // frustum clipping keeps columns on screen save for boundary
            // jitter; anything else is skipped, not wrapped
            if x < 0 || x >= SCREEN_WIDTH as i32 {
                top += slope_top;
                bot += slope_bot;
                continue;
            }

            let y1 = (top + 0.5) as i32;
            let y2 = (bot - 0.5) as i32;

            if y1 >= SCREEN_HEIGHT as i32 || y2 < 0 || y2 < y1 {
                top += slope_top;
                bot += slope_bot;
                continue;
            }

            // perspective-correct horizontal texture coordinate
            let tx = (x as f32 + 0.5 - sx1) / width;
            let u = ((1.0 - tx) * u_start / v1.y + tx * u_end / v2.y)
                / ((1.0 - tx) / v1.y + tx / v2.y);
            let tex_x = ((u - u.floor()) * wall_tex.w as f32) as usize;

            self.draw_wall_column(
                x as usize,
                tex_x,
                y1.clamp(0, SCREEN_HEIGHT as i32 - 1),
                y2.clamp(0, SCREEN_HEIGHT as i32 - 1),
                top,
                bot,
                v_start,
                v_end,
                wall_tex,
                fb,
            );

            // the floor fills everything below the strip, the ceiling
            // everything above it
            if view_floor < 0.0 {
                let first = ((bot + 0.5) as i32).max(0);
                self.draw_plane_column(
                    x as usize,
                    first,
                    SCREEN_HEIGHT as i32 - 1,
                    view_floor,
                    camera,
                    plane_tex,
                    fb,
                );
            }
            if view_ceiling > 0.0 {
                let last = ((top - 0.5) as i32).min(SCREEN_HEIGHT as i32 - 1);
                self.draw_plane_column(x as usize, 0, last, view_ceiling, camera, plane_tex, fb);
            }

            top += slope_top;
            bot += slope_bot;
        }
    }

    /// One textured vertical strip. `sy_top`/`sy_bot` are the unrounded
    /// screen extents; V advances linearly between them and is sampled at
    /// pixel centers.
    fn draw_wall_column(
        &self,
        x: usize,
        tex_x: usize,
        y1: i32,
        y2: i32,
        sy_top: f32,
        sy_bot: f32,
        v_start: f32,
        v_end: f32,
        tex: &Texture,
        fb: &mut Framebuffer,
    ) {
        let slope = (v_end - v_start) / (sy_bot - sy_top);
        let mut v = slope * (y1 as f32 + 0.5 - sy_top) + v_start;

        for y in y1..=y2 {
            // fp drift can push v a hair negative
            if v < 0.0 {
                v = 0.0;
            }
            let tex_y = ((v - v.floor()) * tex.h as f32) as usize;
            fb.put(x, y as usize, tex.pixels[tex_x + tex_y * tex.w]);
            v += slope;
        }
    }
}
