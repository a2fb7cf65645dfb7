//! World state and core entity types
//!
//! Everything the simulation mutates lives in the [`World`] aggregate, passed
//! explicitly through the tick function. Entities are plain structs; their
//! behavior is free functions and inherent methods, so the whole sim runs
//! without a rendering or timer harness.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ballistics;
use super::collision::Aabb;
use super::scheduler::IntervalTimer;
use crate::consts::*;

/// Whether the session is still live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Normal play
    Playing,
    /// A zombie reached the character. One-way.
    Lost,
}

/// Out-of-band notifications for the host, drained once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// Emitted exactly once, on the Playing -> Lost transition.
    Lost,
}

/// Index into the world's block registry.
///
/// The registry is built once and never mutated, so an index is a stable
/// reference for the lifetime of the session.
pub type BlockId = usize;

/// The player-controlled character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Character {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Where bullets originate: top-center of the character.
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y)
    }
}

/// A static obstacle. Created at init, never mutated or destroyed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Block {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Zombie movement state.
///
/// Carrying the timestamp and block reference inside the `Blocked` variant
/// makes "blockedSince is set iff blocked" impossible to violate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Advancing along its travel direction
    Moving,
    /// Held in place by an obstacle since `since_ms`
    Blocked { since_ms: f64, block: BlockId },
}

/// An adversary agent marching toward the character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zombie {
    pub pos: Vec2,
    pub size: Vec2,
    /// Signed horizontal speed; the sign encodes travel direction.
    pub speed: f32,
    pub health: u8,
    pub motion: Motion,
}

impl Zombie {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            size: Vec2::splat(ZOMBIE_SIZE),
            speed,
            health: ZOMBIE_START_HEALTH,
            motion: Motion::Moving,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self.motion, Motion::Blocked { .. })
    }

    /// Run the Moving/Blocked transitions against the block registry.
    ///
    /// - Moving -> Blocked on first AABB overlap; the first overlapping block
    ///   in registry order is recorded (tie-break for simultaneous overlaps).
    /// - Blocked -> Moving immediately once no block overlaps, in place.
    /// - Blocked -> Moving after the timeout while still overlapping; the
    ///   zombie is repositioned one pixel past the recorded block's far edge
    ///   in its travel direction.
    pub fn update_blocking(&mut self, blocks: &[Block], now_ms: f64) {
        let overlapping = blocks.iter().position(|b| self.aabb().overlaps(&b.aabb()));

        match (self.motion, overlapping) {
            (Motion::Moving, Some(block)) => {
                self.motion = Motion::Blocked {
                    since_ms: now_ms,
                    block,
                };
                log::info!("Zombie blocked at x={}", self.pos.x);
            }
            (Motion::Blocked { .. }, None) => {
                self.motion = Motion::Moving;
            }
            (Motion::Blocked { since_ms, block }, Some(_)) => {
                if now_ms - since_ms > BLOCK_TIMEOUT_MS {
                    // Force past the block recorded at transition time, even
                    // if a different block overlaps now.
                    if let Some(b) = blocks.get(block) {
                        self.pos.x = if self.speed > 0.0 {
                            b.pos.x + b.size.x + 1.0
                        } else {
                            b.pos.x - self.size.x - 1.0
                        };
                    }
                    self.motion = Motion::Moving;
                    log::info!("Zombie unblocked and moved to x={}", self.pos.x);
                }
            }
            (Motion::Moving, None) => {}
        }
    }

    /// Apply one tick of movement. Blocked zombies hold position.
    pub fn advance(&mut self) {
        if !self.is_blocked() {
            self.pos.x += self.speed;
        }
    }
}

/// A ballistic projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Bullet {
    /// Build a bullet at `start` whose trajectory passes through `target`.
    ///
    /// Returns `None` for a zero-distance aim (degenerate-aim guard).
    pub fn aimed_at(start: Vec2, target: Vec2) -> Option<Self> {
        let (vel, _flight_time) = ballistics::launch_velocity(start, target)?;
        Some(Self {
            pos: start,
            vel,
            radius: BULLET_RADIUS,
        })
    }

    /// One discrete Euler step: gravity, then displacement. One step per
    /// tick regardless of elapsed wall time.
    pub fn integrate(&mut self) {
        self.vel.y += BULLET_GRAVITY;
        self.pos += self.vel;
    }

    /// True once the bullet has left through an open edge.
    pub fn out_of_bounds(&self, width: f32, height: f32) -> bool {
        self.pos.y > height || self.pos.x > width || self.pos.x < 0.0
    }
}

/// The full simulation state for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// World width in pixels
    pub width: f32,
    /// World height in pixels
    pub height: f32,
    /// The player character
    pub character: Character,
    /// Static obstacle registry (set once at construction)
    pub blocks: Vec<Block>,
    /// Live zombies
    pub zombies: Vec<Zombie>,
    /// Live bullets
    pub bullets: Vec<Bullet>,
    /// Current aim target (pointer position)
    pub aim_target: Vec2,
    /// Fire-intent flag (trigger held)
    pub firing: bool,
    /// Session status
    pub status: GameStatus,
    /// Zombie-wave producer
    pub spawn_timer: IntervalTimer,
    /// Shot producer
    pub fire_timer: IntervalTimer,
    /// Tick counter
    pub time_ticks: u64,
    /// Host notifications, drained via [`World::take_events`]
    #[serde(skip)]
    events: Vec<WorldEvent>,
    /// Zombies queued mid-tick, appended at the tick boundary
    #[serde(skip)]
    pending_zombies: Vec<Zombie>,
    /// Bullets queued mid-tick, appended at the tick boundary
    #[serde(skip)]
    pending_bullets: Vec<Bullet>,
}

impl World {
    /// Create a fresh session for a `width` x `height` surface.
    ///
    /// Blocks sit at a quarter and three quarters of the width; the character
    /// starts centered. All ground entities stand `STAND_OFFSET` above the
    /// bottom edge.
    pub fn new(width: f32, height: f32, now_ms: f64) -> Self {
        let ground_y = height - STAND_OFFSET;
        let character = Character {
            pos: Vec2::new(width / 2.0 - CHARACTER_SIZE / 2.0, ground_y),
            size: Vec2::splat(CHARACTER_SIZE),
            speed: CHARACTER_SPEED,
        };
        let blocks = vec![
            Block {
                pos: Vec2::new(width / 4.0, ground_y),
                size: Vec2::splat(BLOCK_SIZE),
            },
            Block {
                pos: Vec2::new(3.0 * width / 4.0, ground_y),
                size: Vec2::splat(BLOCK_SIZE),
            },
        ];

        Self {
            width,
            height,
            character,
            blocks,
            zombies: Vec::new(),
            bullets: Vec::new(),
            aim_target: Vec2::ZERO,
            firing: false,
            status: GameStatus::Playing,
            spawn_timer: IntervalTimer::new(SPAWN_INTERVAL_MS, now_ms),
            fire_timer: IntervalTimer::new(FIRE_INTERVAL_MS, now_ms),
            time_ticks: 0,
            events: Vec::new(),
            pending_zombies: Vec::new(),
            pending_bullets: Vec::new(),
        }
    }

    /// Y coordinate where ground entities stand.
    pub fn ground_y(&self) -> f32 {
        self.height - STAND_OFFSET
    }

    /// Queue a zombie for append at the next tick boundary.
    ///
    /// Producers go through this buffer rather than pushing into the live
    /// collection, so a firing that lands mid-pass can never corrupt an
    /// in-progress traversal.
    pub fn queue_zombie(&mut self, zombie: Zombie) {
        self.pending_zombies.push(zombie);
    }

    /// Queue a bullet for append at the next tick boundary.
    pub fn queue_bullet(&mut self, bullet: Bullet) {
        self.pending_bullets.push(bullet);
    }

    /// Move queued entities into the live collections. Called between ticks,
    /// never while a pass is iterating.
    pub fn flush_pending(&mut self) {
        self.zombies.append(&mut self.pending_zombies);
        self.bullets.append(&mut self.pending_bullets);
    }

    /// Transition to Lost. One-way and idempotent: the first call cancels
    /// both producers and emits [`WorldEvent::Lost`]; later calls do nothing.
    pub fn declare_loss(&mut self) {
        if self.status == GameStatus::Lost {
            return;
        }
        self.status = GameStatus::Lost;
        self.spawn_timer.cancel();
        self.fire_timer.cancel();
        self.events.push(WorldEvent::Lost);
        log::info!("Character overrun at tick {}, game lost", self.time_ticks);
    }

    /// Drain pending host notifications.
    pub fn take_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_world() -> World {
        World::new(800.0, 600.0, 0.0)
    }

    #[test]
    fn test_world_layout() {
        let world = test_world();
        assert_eq!(world.blocks.len(), 2);
        assert_eq!(world.blocks[0].pos, Vec2::new(200.0, 540.0));
        assert_eq!(world.blocks[1].pos, Vec2::new(600.0, 540.0));
        assert_eq!(world.character.pos, Vec2::new(375.0, 540.0));
        assert_eq!(world.status, GameStatus::Playing);
    }

    #[test]
    fn test_zombie_blocks_on_first_overlap_in_registry_order() {
        let blocks = vec![
            Block {
                pos: Vec2::new(100.0, 0.0),
                size: Vec2::splat(BLOCK_SIZE),
            },
            Block {
                pos: Vec2::new(110.0, 0.0),
                size: Vec2::splat(BLOCK_SIZE),
            },
        ];
        // Overlaps both blocks at once
        let mut zombie = Zombie::new(Vec2::new(120.0, 0.0), ZOMBIE_SPEED);
        zombie.update_blocking(&blocks, 1000.0);
        assert_eq!(
            zombie.motion,
            Motion::Blocked {
                since_ms: 1000.0,
                block: 0
            }
        );
    }

    #[test]
    fn test_blocked_zombie_holds_position() {
        let blocks = vec![Block {
            pos: Vec2::new(100.0, 0.0),
            size: Vec2::splat(BLOCK_SIZE),
        }];
        let mut zombie = Zombie::new(Vec2::new(70.0, 0.0), ZOMBIE_SPEED);
        zombie.update_blocking(&blocks, 0.0);
        assert!(zombie.is_blocked());

        let before = zombie.pos;
        zombie.advance();
        assert_eq!(zombie.pos, before);
    }

    #[test]
    fn test_unblocks_in_place_when_overlap_clears() {
        let blocks = vec![Block {
            pos: Vec2::new(100.0, 0.0),
            size: Vec2::splat(BLOCK_SIZE),
        }];
        let mut zombie = Zombie::new(Vec2::new(70.0, 0.0), ZOMBIE_SPEED);
        zombie.update_blocking(&blocks, 0.0);
        assert!(zombie.is_blocked());

        // Overlap gone (zombie displaced externally), well before the timeout
        zombie.pos.x = 0.0;
        zombie.update_blocking(&blocks, 1000.0);
        assert_eq!(zombie.motion, Motion::Moving);
        assert_eq!(zombie.pos.x, 0.0);
    }

    #[test]
    fn test_timeout_forces_past_block_rightward() {
        let blocks = vec![Block {
            pos: Vec2::new(100.0, 0.0),
            size: Vec2::splat(BLOCK_SIZE),
        }];
        let mut zombie = Zombie::new(Vec2::new(70.0, 0.0), ZOMBIE_SPEED);
        zombie.update_blocking(&blocks, 0.0);
        assert!(zombie.is_blocked());

        // Exactly at the timeout: still blocked (strict inequality)
        zombie.update_blocking(&blocks, BLOCK_TIMEOUT_MS);
        assert!(zombie.is_blocked());

        zombie.update_blocking(&blocks, BLOCK_TIMEOUT_MS + 1.0);
        assert_eq!(zombie.motion, Motion::Moving);
        assert_eq!(zombie.pos.x, 100.0 + BLOCK_SIZE + 1.0);
    }

    #[test]
    fn test_timeout_forces_past_block_leftward() {
        let blocks = vec![Block {
            pos: Vec2::new(100.0, 0.0),
            size: Vec2::splat(BLOCK_SIZE),
        }];
        let mut zombie = Zombie::new(Vec2::new(130.0, 0.0), -ZOMBIE_SPEED);
        zombie.update_blocking(&blocks, 0.0);
        assert!(zombie.is_blocked());

        zombie.update_blocking(&blocks, BLOCK_TIMEOUT_MS + 1.0);
        assert_eq!(zombie.motion, Motion::Moving);
        assert_eq!(zombie.pos.x, 100.0 - ZOMBIE_SIZE - 1.0);
    }

    #[test]
    fn test_bullet_integration_step() {
        let mut bullet = Bullet {
            pos: Vec2::new(0.0, 0.0),
            vel: Vec2::new(20.0, -2.5),
            radius: BULLET_RADIUS,
        };
        bullet.integrate();
        // Gravity applies before displacement
        assert_eq!(bullet.vel, Vec2::new(20.0, -2.0));
        assert_eq!(bullet.pos, Vec2::new(20.0, -2.0));
    }

    #[test]
    fn test_bullet_bounds_predicate() {
        let bullet = |x, y| Bullet {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            radius: BULLET_RADIUS,
        };
        assert!(!bullet(400.0, 300.0).out_of_bounds(800.0, 600.0));
        assert!(bullet(-0.1, 300.0).out_of_bounds(800.0, 600.0));
        assert!(bullet(800.1, 300.0).out_of_bounds(800.0, 600.0));
        assert!(bullet(400.0, 600.1).out_of_bounds(800.0, 600.0));
        // The top edge is closed: lobbed shots may arc above the world
        assert!(!bullet(400.0, -50.0).out_of_bounds(800.0, 600.0));
    }

    #[test]
    fn test_loss_is_one_way_and_emits_once() {
        let mut world = test_world();
        world.declare_loss();
        assert_eq!(world.status, GameStatus::Lost);
        assert_eq!(world.take_events(), vec![WorldEvent::Lost]);
        assert!(world.spawn_timer.is_cancelled());
        assert!(world.fire_timer.is_cancelled());

        world.declare_loss();
        assert!(world.take_events().is_empty());
    }

    #[test]
    fn test_pending_entities_land_on_flush() {
        let mut world = test_world();
        world.queue_zombie(Zombie::new(Vec2::new(0.0, 540.0), ZOMBIE_SPEED));
        world.queue_bullet(Bullet {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::ZERO,
            radius: BULLET_RADIUS,
        });
        assert!(world.zombies.is_empty());
        assert!(world.bullets.is_empty());

        world.flush_pending();
        assert_eq!(world.zombies.len(), 1);
        assert_eq!(world.bullets.len(), 1);
    }
}
