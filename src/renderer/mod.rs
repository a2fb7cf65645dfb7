//! Frame snapshots and canvas drawing
//!
//! The simulation never draws. Each display refresh the host captures a
//! [`Frame`] - a read-only description of everything visible - and hands it
//! to the canvas-2d draw routine (wasm) or inspects it directly (tests,
//! native). The aim-preview path is sampled fresh from the current target
//! here; it is never part of world state.

use glam::Vec2;
use serde::Serialize;

use crate::Settings;
use crate::consts::GROUND_HEIGHT;
use crate::sim::{World, ballistics};

/// A filled rectangle to draw.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RectShape {
    pub pos: Vec2,
    pub size: Vec2,
    /// CSS color
    pub color: &'static str,
}

/// A filled circle to draw.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CircleShape {
    pub pos: Vec2,
    pub radius: f32,
    /// CSS color
    pub color: &'static str,
}

/// Everything the rendering collaborator needs for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub ground: RectShape,
    pub character: RectShape,
    pub blocks: Vec<RectShape>,
    pub zombies: Vec<RectShape>,
    pub bullets: Vec<CircleShape>,
    /// Dashed aim-preview polyline (empty when disabled or degenerate)
    pub aim_path: Vec<Vec2>,
}

impl Frame {
    /// Snapshot the world for drawing.
    pub fn capture(world: &World, settings: &Settings) -> Self {
        let aim_path = if settings.show_aim_path {
            ballistics::aim_path(world.character.muzzle(), world.aim_target)
        } else {
            Vec::new()
        };

        Self {
            width: world.width,
            height: world.height,
            ground: RectShape {
                pos: Vec2::new(0.0, world.height - GROUND_HEIGHT),
                size: Vec2::new(world.width, GROUND_HEIGHT),
                color: "green",
            },
            character: RectShape {
                pos: world.character.pos,
                size: world.character.size,
                color: "blue",
            },
            blocks: world
                .blocks
                .iter()
                .map(|b| RectShape {
                    pos: b.pos,
                    size: b.size,
                    color: "gray",
                })
                .collect(),
            zombies: world
                .zombies
                .iter()
                .map(|z| RectShape {
                    pos: z.pos,
                    size: z.size,
                    color: "red",
                })
                .collect(),
            bullets: world
                .bullets
                .iter()
                .map(|b| CircleShape {
                    pos: b.pos,
                    radius: b.radius,
                    color: "black",
                })
                .collect(),
            aim_path,
        }
    }
}

/// Paint a frame onto a 2d canvas context.
#[cfg(target_arch = "wasm32")]
pub fn draw(ctx: &web_sys::CanvasRenderingContext2d, frame: &Frame) {
    ctx.clear_rect(0.0, 0.0, frame.width as f64, frame.height as f64);

    fill_rect(ctx, &frame.ground);
    fill_rect(ctx, &frame.character);
    for block in &frame.blocks {
        fill_rect(ctx, block);
    }
    for zombie in &frame.zombies {
        fill_rect(ctx, zombie);
    }
    for bullet in &frame.bullets {
        ctx.set_fill_style_str(bullet.color);
        ctx.begin_path();
        let _ = ctx.arc(
            bullet.pos.x as f64,
            bullet.pos.y as f64,
            bullet.radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        ctx.fill();
        ctx.close_path();
    }

    if frame.aim_path.len() > 1 {
        ctx.set_stroke_style_str("rgba(0, 0, 0, 0.5)");
        let dash = js_sys::Array::of2(&5.0.into(), &15.0.into());
        let _ = ctx.set_line_dash(&dash);
        ctx.begin_path();
        for point in &frame.aim_path {
            ctx.line_to(point.x as f64, point.y as f64);
        }
        ctx.stroke();
        ctx.close_path();
    }
}

#[cfg(target_arch = "wasm32")]
fn fill_rect(ctx: &web_sys::CanvasRenderingContext2d, rect: &RectShape) {
    ctx.set_fill_style_str(rect.color);
    ctx.fill_rect(
        rect.pos.x as f64,
        rect.pos.y as f64,
        rect.size.x as f64,
        rect.size.y as f64,
    );
}
