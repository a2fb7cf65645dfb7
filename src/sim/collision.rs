//! Collision detection and resolution
//!
//! Everything is axis-aligned rectangles. The one deliberate quirk: a bullet
//! participates as a square anchored at its position with the radius as both
//! extents, not as a circle and not centered. That reproduces the original
//! hit behavior exactly (it biases hits toward a zombie's lower-right), and
//! gameplay is tuned around it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Bullet, Character, Zombie};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Strict-overlap test: touching edges do not collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }
}

/// The bullet's collision square (see module docs for why it is lopsided).
pub fn bullet_hitbox(bullet: &Bullet) -> Aabb {
    Aabb::new(bullet.pos, Vec2::splat(bullet.radius))
}

/// Resolve bullet hits against zombies for one tick.
///
/// Each bullet scores at most one hit, against the first overlapping zombie
/// in collection order: the zombie loses one health (floored at zero) and the
/// bullet is consumed. A zombie whose health reaches exactly zero is removed.
///
/// Both collections are traversed over their length at pass start and
/// compacted only after the full pass, so no entity is skipped or
/// double-processed even if something is appended mid-pass.
///
/// Returns the number of hits resolved.
pub fn resolve_bullet_hits(bullets: &mut Vec<Bullet>, zombies: &mut Vec<Zombie>) -> u32 {
    let bullet_count = bullets.len();
    let zombie_count = zombies.len();
    let mut bullet_spent = vec![false; bullet_count];
    let mut zombie_dead = vec![false; zombie_count];
    let mut hits = 0;

    for (bi, spent) in bullet_spent.iter_mut().enumerate() {
        let hitbox = bullet_hitbox(&bullets[bi]);
        for zi in 0..zombie_count {
            if zombie_dead[zi] {
                continue;
            }
            if hitbox.overlaps(&zombies[zi].aabb()) {
                let zombie = &mut zombies[zi];
                zombie.health = zombie.health.saturating_sub(1);
                *spent = true;
                hits += 1;
                if zombie.health == 0 {
                    zombie_dead[zi] = true;
                    log::info!("Zombie down at x={}", zombie.pos.x);
                }
                break;
            }
        }
    }

    compact(bullets, &bullet_spent);
    compact(zombies, &zombie_dead);
    hits
}

/// Whether a zombie has reached the character. Evaluated per zombie, after
/// its block-state transition and before it moves.
pub fn reached_character(zombie: &Zombie, character: &Character) -> bool {
    zombie.aabb().overlaps(&character.aabb())
}

/// Drop entities flagged during the pass. Entities appended after the pass
/// started (beyond the flag slice) are always kept.
fn compact<T>(entities: &mut Vec<T>, remove: &[bool]) {
    let mut index = 0;
    entities.retain(|_| {
        let keep = !remove.get(index).copied().unwrap_or(false);
        index += 1;
        keep
    });
}
