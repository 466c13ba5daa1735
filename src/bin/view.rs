//! First-person viewer for the built-in demo map.
//!
//! ```bash
//! cargo run --release -- --scale 2
//! ```
//!
//! W/S or ↑/↓ move, A/D strafe, ←/→ turn, Q/E lower/raise the eye,
//! Esc quits.

use clap::Parser;
use minifb::{Key, Scale, Window, WindowOptions};
use std::time::{Duration, Instant};

use glam::{Vec2, vec2};
use sectorcast::{
    defs::{SCREEN_HEIGHT, SCREEN_WIDTH},
    renderer::{Framebuffer, Software},
    world::{Camera, LineSegment, Texture, World, build_world},
};

const MOVE_SPEED: f32 = 1.0; // world units per frame
const TURN_SPEED: f32 = 0.04; // radians per frame
const FLY_SPEED: f32 = 0.5;

#[derive(Parser)]
#[command(about = "First-person viewer for the built-in demo map")]
struct Args {
    /// Integer window scale factor (1, 2 or 4; 1 = 640x400)
    #[arg(short, long, default_value_t = 2)]
    scale: u8,

    /// Eye height above the floor at spawn
    #[arg(long, default_value_t = 40.0)]
    eye: f32,

    /// Cap presentation at this many frames per second
    #[arg(long, default_value_t = 60)]
    fps: usize,
}

/// Cross-shaped 512×512 room with a square pillar. Walls wind so the room
/// interior is on their right; the pillar winds the other way so its outer
/// faces are the visible ones.
fn demo_world() -> anyhow::Result<World> {
    let vertices = [
        vec2(-256.0, 256.0),
        vec2(-128.0, 256.0),
        vec2(-128.0, 128.0),
        vec2(0.0, 128.0),
        vec2(128.0, 128.0),
        vec2(128.0, 256.0),
        vec2(256.0, 256.0),
        vec2(256.0, -256.0),
        vec2(128.0, -256.0),
        vec2(128.0, -128.0),
        vec2(0.0, -128.0),
        vec2(-128.0, -128.0),
        vec2(-128.0, -256.0),
        vec2(-256.0, -256.0),
        vec2(32.0, 32.0),
        vec2(-32.0, 32.0),
        vec2(-32.0, -32.0),
        vec2(32.0, -32.0),
    ];
    let segments: Vec<LineSegment> = (0..14)
        .map(|i| LineSegment::new(i, (i + 1) % 14))
        .chain((14..18).map(|i| LineSegment::new(i, 14 + (i - 13) % 4)))
        .collect();

    Ok(build_world(&vertices, &segments, 0.0, 64.0)?)
}

/// Mortared brick courses for the walls.
fn brick_texture() -> Texture {
    const W: usize = 64;
    const H: usize = 64;
    const MORTAR: u32 = 0xFF_6E6E6E;
    let mut pixels = vec![0u32; W * H];
    for y in 0..H {
        let course = y / 16;
        for x in 0..W {
            // stagger alternate courses by half a brick
            let xx = x + if course & 1 == 0 { 0 } else { 16 };
            let in_mortar = y % 16 >= 14 || xx % 32 >= 30;
            let shade = 0x90 + ((x * 7 + y * 13) % 0x18) as u32;
            pixels[x + y * W] = if in_mortar {
                MORTAR
            } else {
                0xFF_000000 | (shade << 16) | (0x40 << 8) | 0x30
            };
        }
    }
    Texture { w: W, h: H, pixels }
}

/// Stone slabs for the floor and ceiling; the renderer draws the tile grid
/// on top of this.
fn slab_texture() -> Texture {
    const W: usize = 32;
    const H: usize = 32;
    let mut pixels = vec![0u32; W * H];
    for y in 0..H {
        for x in 0..W {
            let shade = 0x58 + ((x * 3 + y * 5 + (x * y) % 11) % 0x20) as u32;
            pixels[x + y * W] = 0xFF_000000 | (shade << 16) | (shade << 8) | shade;
        }
    }
    Texture { w: W, h: H, pixels }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let world = demo_world()?;

    let wall_tex = brick_texture();
    let plane_tex = slab_texture();

    let mut camera = Camera::new(Vec2::ZERO, args.eye, 90_f32.to_radians());
    let mut renderer = Software::new();
    let mut fb = Framebuffer::new();

    let scale = match args.scale {
        1 => Scale::X1,
        2 => Scale::X2,
        _ => Scale::X4,
    };
    let mut win = Window::new(
        "sectorcast",
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        WindowOptions {
            scale,
            ..WindowOptions::default()
        },
    )?;
    win.set_target_fps(args.fps);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();

        /* ─────────────── input → camera ─────────────── */
        let mut forward = 0.0;
        let mut strafe = 0.0;
        if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
            forward += MOVE_SPEED;
        }
        if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
            forward -= MOVE_SPEED;
        }
        if win.is_key_down(Key::A) {
            strafe -= MOVE_SPEED;
        }
        if win.is_key_down(Key::D) {
            strafe += MOVE_SPEED;
        }
        camera.step(forward, strafe);

        if win.is_key_down(Key::Left) {
            camera.turn(TURN_SPEED);
        }
        if win.is_key_down(Key::Right) {
            camera.turn(-TURN_SPEED);
        }
        if win.is_key_down(Key::E) {
            camera.fly(FLY_SPEED);
        }
        if win.is_key_down(Key::Q) {
            camera.fly(-FLY_SPEED);
        }

        /* ─────────────── draw & present ─────────────── */
        renderer.render_frame(&world, &camera, &wall_tex, &plane_tex, &mut fb);

        acc_time += t0.elapsed();
        acc_frames += 1;
        win.update_with_buffer(fb.pixels(), SCREEN_WIDTH, SCREEN_HEIGHT)?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            println!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
