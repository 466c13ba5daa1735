//! A Doom-era software renderer.
//!
//! The world is strictly 2-D: a pool of vertices and directed wall segments.
//! [`world::build_world`] compiles the segments into a BSP tree whose leaves
//! are convex sectors; [`renderer::render_frame`] walks that tree relative to
//! the camera and rasterizes textured walls plus per-pixel projected floors
//! and ceilings into a [`renderer::Framebuffer`].
//!
//! The crate draws; it does not present. Window creation, input and frame
//! pacing live in the `view` binary.

pub mod defs;
pub mod renderer;
pub mod world;

pub use renderer::{Framebuffer, Rgba, Software, render_frame};
pub use world::{BuildError, Camera, LineSegment, World, build_world};
