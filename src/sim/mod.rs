//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - One integration step per tick, independent of wall time
//! - Injectable clock (the host passes `now_ms` in)
//! - Stable iteration order; removals compact after the full pass
//! - No rendering or platform dependencies

pub mod ballistics;
pub mod collision;
pub mod input;
pub mod scheduler;
pub mod state;
pub mod tick;

pub use collision::{Aabb, bullet_hitbox, reached_character, resolve_bullet_hits};
pub use input::{InputEvent, InputQueue};
pub use scheduler::IntervalTimer;
pub use state::{
    Block, BlockId, Bullet, Character, GameStatus, Motion, World, WorldEvent, Zombie,
};
pub use tick::tick;
