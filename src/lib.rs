//! Barricade - a 2D side-view zombie defense game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state machines, ballistics, collisions)
//! - `renderer`: Read-only frame snapshots and canvas drawing
//! - `settings`: Presentation preferences

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Character dimensions (square)
    pub const CHARACTER_SIZE: f32 = 50.0;
    /// Horizontal displacement per directional key event
    pub const CHARACTER_SPEED: f32 = 5.0;

    /// Ground strip height along the bottom edge
    pub const GROUND_HEIGHT: f32 = 10.0;
    /// Vertical offset from the bottom edge where ground entities stand
    pub const STAND_OFFSET: f32 = 60.0;

    /// Zombie dimensions (square)
    pub const ZOMBIE_SIZE: f32 = 40.0;
    /// Zombie starting health
    pub const ZOMBIE_START_HEALTH: u8 = 3;
    /// Zombie horizontal speed magnitude (pixels per tick)
    pub const ZOMBIE_SPEED: f32 = 1.0;
    /// How long a zombie stays blocked before forcing its way past (ms)
    pub const BLOCK_TIMEOUT_MS: f64 = 5000.0;

    /// Block dimensions (square)
    pub const BLOCK_SIZE: f32 = 50.0;

    /// Bullet radius
    pub const BULLET_RADIUS: f32 = 5.0;
    /// Downward acceleration applied to bullets each tick
    pub const BULLET_GRAVITY: f32 = 0.5;
    /// Divisor converting aim distance into flight time (bigger = faster shots)
    pub const SHOT_SPEED_SCALE: f32 = 20.0;

    /// Interval between zombie spawn waves (ms)
    pub const SPAWN_INTERVAL_MS: f64 = 10_000.0;
    /// Interval between shots while the trigger is held (ms)
    pub const FIRE_INTERVAL_MS: f64 = 100.0;

    /// Time step used when sampling the aim-preview path
    pub const AIM_PATH_STEP: f32 = 0.1;

    /// Maximum buffered input events per tick
    pub const INPUT_QUEUE_CAP: usize = 64;
}
