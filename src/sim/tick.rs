//! Per-tick orchestration
//!
//! One call to [`tick`] advances the whole simulation by a single display
//! refresh: drain input, poll the producers, run the zombie state machines,
//! integrate bullets, resolve collisions. The host keeps calling `tick` even
//! after a loss; only the producers stop, so entities already in flight keep
//! animating over the game-over screen.

use glam::Vec2;

use super::collision::{reached_character, resolve_bullet_hits};
use super::input::{InputEvent, InputQueue};
use super::state::{Bullet, World, Zombie};
use crate::consts::{ZOMBIE_SIZE, ZOMBIE_SPEED};

/// Advance the world by one tick at wall-clock time `now_ms`.
pub fn tick(world: &mut World, input: &mut InputQueue, now_ms: f64) {
    apply_input(world, input);

    let waves = world.spawn_timer.fire_count(now_ms);
    for _ in 0..waves {
        spawn_wave(world);
    }
    let shots = world.fire_timer.fire_count(now_ms);
    for _ in 0..shots {
        if world.firing {
            fire_bullet(world);
        }
    }

    advance_zombies(world, now_ms);
    advance_bullets(world);
    resolve_bullet_hits(&mut world.bullets, &mut world.zombies);

    world.time_ticks += 1;
    // Tick boundary: producer output becomes live for the next tick
    world.flush_pending();
}

/// Drain the input queue into character position, aim target, and fire
/// intent. Input stays live after a loss; only the producers are cancelled.
fn apply_input(world: &mut World, input: &mut InputQueue) {
    for event in input.drain() {
        match event {
            InputEvent::MoveLeft => world.character.pos.x -= world.character.speed,
            InputEvent::MoveRight => world.character.pos.x += world.character.speed,
            InputEvent::Aim(target) => world.aim_target = target,
            InputEvent::TriggerDown => world.firing = true,
            InputEvent::TriggerUp => world.firing = false,
        }
    }
}

/// One spawn-timer firing: a zombie at each side edge, marching inward.
fn spawn_wave(world: &mut World) {
    let ground_y = world.ground_y();
    world.queue_zombie(Zombie::new(Vec2::new(0.0, ground_y), ZOMBIE_SPEED));
    world.queue_zombie(Zombie::new(
        Vec2::new(world.width - ZOMBIE_SIZE, ground_y),
        -ZOMBIE_SPEED,
    ));
    log::info!("Spawned zombie wave at tick {}", world.time_ticks);
}

/// One fire-timer firing with the trigger held: a bullet from the muzzle
/// toward the current aim target. A degenerate aim produces no bullet.
fn fire_bullet(world: &mut World) {
    if let Some(bullet) = Bullet::aimed_at(world.character.muzzle(), world.aim_target) {
        world.queue_bullet(bullet);
    }
}

/// Run each zombie's per-tick sequence: block-state transition, then the
/// player-overlap check, then movement.
fn advance_zombies(world: &mut World, now_ms: f64) {
    let mut reached = false;
    for zombie in &mut world.zombies {
        zombie.update_blocking(&world.blocks, now_ms);
        if reached_character(zombie, &world.character) {
            reached = true;
        }
        zombie.advance();
    }
    if reached {
        world.declare_loss();
    }
}

/// Integrate every bullet, then prune the ones that left the world. Pruning
/// runs before collision resolution, so an escaped bullet never scores.
fn advance_bullets(world: &mut World) {
    for bullet in &mut world.bullets {
        bullet.integrate();
    }
    let (width, height) = (world.width, world.height);
    world.bullets.retain(|b| !b.out_of_bounds(width, height));
}
