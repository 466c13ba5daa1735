//! Eye position and the world ↔ view transform.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, TAU};

/// First-person view-point in world space.
///
/// * Only heading is simulated; the view never pitches.
/// * `height` is the eye's altitude in world units. Nothing pins it inside
///   `[floor, ceiling]`; flying above the ceiling just yields the degenerate
///   (ceiling-less) view.
/// * `view_angle` is in radians; π/2 looks along +Y.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub pos: Vec2,
    pub height: f32,
    pub view_angle: f32,
}

impl Camera {
    pub fn new(pos: Vec2, height: f32, view_angle: f32) -> Self {
        Self {
            pos,
            height,
            view_angle,
        }
    }

    /// Map a world-space point into view space: the eye at the origin,
    /// looking along +Y, +X to the right.
    #[inline]
    pub fn to_view(&self, p: Vec2) -> Vec2 {
        Vec2::from_angle(FRAC_PI_2 - self.view_angle).rotate(p - self.pos)
    }

    /// Inverse of [`to_view`](Self::to_view); the plane rasterizer uses it to
    /// find the world point under a screen pixel.
    #[inline]
    pub fn to_world(&self, v: Vec2) -> Vec2 {
        Vec2::from_angle(self.view_angle - FRAC_PI_2).rotate(v) + self.pos
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector the camera looks along.
    #[inline]
    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.view_angle)
    }

    /// Unit vector to the camera's right.
    #[inline]
    pub fn right(&self) -> Vec2 {
        let f = self.forward();
        Vec2::new(f.y, -f.x)
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Move by `forward` units along the view direction and `side` units of
    /// strafe, preserving eye height.
    pub fn step(&mut self, forward: f32, side: f32) {
        self.pos += self.forward() * forward + self.right() * side;
    }

    /// Turn left by `delta` radians (negative turns right).
    pub fn turn(&mut self, delta: f32) {
        self.view_angle = (self.view_angle + delta).rem_euclid(TAU);
    }

    /// Raise or lower the eye.
    pub fn fly(&mut self, delta: f32) {
        self.height += delta;
    }
}
