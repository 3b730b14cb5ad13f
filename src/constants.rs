// Field geometry (normalized coordinate space)
pub const FIELD_SIZE: f64 = 100.0;
pub const FIELD_MAX: f64 = 99.0;
pub const COLLISION_TOLERANCE: f64 = 2.0;

// Default axis step; a logical resolution of 1920x1080 maps to (1, 2)
pub const DEFAULT_STEP: f64 = 1.0;
pub const REFERENCE_WIDTH: f64 = 1920.0;
pub const REFERENCE_HEIGHT: f64 = 1080.0;

// Speed progression (tick period is MAX_SPEED - speed, in ms)
pub const MAX_SPEED: u32 = 400;
pub const SPEED_INCREMENT: u32 = 5;

// Scoring and lifecycle
pub const FOOD_PRIZE: u32 = 5;
pub const RESPAWN_DELAY_MS: u64 = 2000;

// Scheduler
pub const MAX_FRAME_MS: u64 = 500;
pub const REALTIME_FRAME_MS: u64 = 16; // ~60 FPS redraw

// Players
pub const PLAYER_COUNT: usize = 2;
pub const DEFAULT_PLAYER_NAMES: [&str; PLAYER_COUNT] = ["Player1", "Player2"];
