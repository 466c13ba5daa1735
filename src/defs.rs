//! Fixed numeric constants of the renderer core.

use std::f32::consts::FRAC_PI_2;

pub const SCREEN_WIDTH: usize = 640;
pub const SCREEN_HEIGHT: usize = 400;

/// Horizontal field of view, radians.
pub const FOV: f32 = FRAC_PI_2;

/// Tolerance for side tests and intersection determinants.
pub const EPSILON: f32 = 1e-6;

/// Floors and ceilings repeat their texture every this many world units.
pub const PLANE_TILE: f32 = 32.0;

/// Aspect correction applied to vertical screen coordinates.
pub const Y_SCALE: f32 = SCREEN_WIDTH as f32 / SCREEN_HEIGHT as f32;

/// Distance from the eye to a projection plane of unit half-width.
#[inline]
pub fn focal_length() -> f32 {
    1.0 / (FOV * 0.5).tan()
}
