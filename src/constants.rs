// World geometry (canvas coordinates, y grows downward)
pub const CANVAS_WIDTH: f64 = 1024.0;
pub const CANVAS_HEIGHT: f64 = 480.0;
pub const GROUND_Y: f64 = 400.0;
pub const GROUND_STRIP_Y: f64 = 450.0;
pub const GROUND_STRIP_HEIGHT: f64 = 2.0;
pub const GROUND_DETAIL_COUNT: usize = 15;

// Player
pub const PLAYER_X: f64 = 100.0;
pub const PLAYER_WIDTH: f64 = 50.0;
pub const PLAYER_NORMAL_HEIGHT: f64 = 50.0;
pub const PLAYER_DUCK_HEIGHT: f64 = 25.0;
pub const DEFAULT_GRAVITY: f64 = 1.5;
pub const DEFAULT_JUMP_STRENGTH: f64 = -24.0;
pub const DEFAULT_INVINCIBILITY_FRAMES: u32 = 60;
/// Period of the invincibility flash, in wall-clock milliseconds.
pub const INVINCIBLE_FLASH_MS: u64 = 100;

// Ground / difficulty
pub const DEFAULT_BASE_SPEED: f64 = 10.0;
pub const SPEED_SCORE_DIVISOR: f64 = 200.0;
pub const SPEED_CAP_BONUS: f64 = 10.0;

// Spawner
pub const OBSTACLE_SPAWN_X: f64 = 1024.0;
pub const DEFAULT_MIN_SPAWN_FRAMES: f64 = 45.0;
pub const DEFAULT_MAX_SPAWN_FRAMES: f64 = 90.0;
pub const SPAWN_RAMP_SCORE: f64 = 500.0;
pub const SPAWN_RAMP_DIVISOR: f64 = 500.0;
pub const MIN_SPAWN_FLOOR: f64 = 35.0;
pub const REPEAT_REJECT_CHANCE: f64 = 0.7;
pub const MAX_SPAWN_REDRAWS: u32 = 8;

// Obstacles
pub const COLLISION_BUFFER: f64 = 5.0;
pub const BIRD_MIN_Y: f64 = 300.0;
pub const BIRD_Y_RANGE: f64 = 100.0;
pub const BIRD_BOB_AMPLITUDE: f64 = 2.0;
pub const BIRD_BOB_PERIOD: f64 = 30.0;
pub const BIRD_WING_FRAMES: u32 = 15;

// Clouds
pub const MIN_CLOUDS: usize = 3;
pub const CLOUD_SPAWN_FRAMES: u32 = 120;

// Score
pub const DEFAULT_SCORE_RATE: f64 = 0.2;
pub const MILESTONE_INTERVAL: f64 = 100.0;

// Driver
pub const DEFAULT_FRAME_MS: u64 = 16;
pub const DEFAULT_KEY_HOLD_MS: u64 = 150;
pub const APP_DIR_NAME: &str = ".dino-runner";
pub const HIGH_SCORE_FILE: &str = "high_score.json";
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "dino-runner.log";
