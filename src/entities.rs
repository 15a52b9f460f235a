/// All game data types — geometry, configuration, counters and sprites.

// Base values for the dynamic settings block, restored at the start of
// every round by `initialize_dynamic_settings`.  Speeds are cells/tick
// at the 60 Hz cap.
const BASE_SHIP_SPEED: f32 = 0.6;
const BASE_BULLET_SPEED: f32 = 0.8;
const BASE_ALIEN_SPEED: f32 = 0.12;
const BASE_ALIEN_POINTS: u32 = 50;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounding rectangle; every collision test in the game
/// runs through this type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap — rects that merely share an edge do not collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Game configuration.  The static block is fixed for the lifetime of
/// the state; the dynamic block resets on every new round and scales at
/// each level-up.
#[derive(Clone, Debug)]
pub struct Settings {
    pub screen_width: u16,
    pub screen_height: u16,
    pub bg_color: (u8, u8, u8),
    /// Ships the player gets per round.
    pub ship_limit: u32,
    /// On-screen bullet cap.
    pub bullets_allowed: usize,
    /// Cells the whole fleet drops when it reaches a side.
    pub fleet_drop_speed: i32,
    pub speedup_scale: f32,
    pub score_scale: f32,
    // Fixed entity footprints, (width, height) in cells.
    pub ship_size: (f32, f32),
    pub bullet_size: (f32, f32),
    pub alien_size: (f32, f32),
    // Dynamic block.
    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub alien_speed: f32,
    pub alien_points: u32,
    /// +1 = fleet marching right, -1 = marching left.
    pub fleet_direction: i32,
}

impl Settings {
    /// Terminal-tuned defaults for a play field of the given cell size.
    pub fn new(screen_width: u16, screen_height: u16) -> Self {
        let mut settings = Settings {
            screen_width,
            screen_height,
            bg_color: (12, 12, 24),
            ship_limit: 3,
            bullets_allowed: 3,
            fleet_drop_speed: 1,
            speedup_scale: 1.1,
            score_scale: 1.5,
            ship_size: (3.0, 2.0),
            bullet_size: (1.0, 1.0),
            alien_size: (3.0, 2.0),
            ship_speed: 0.0,
            bullet_speed: 0.0,
            alien_speed: 0.0,
            alien_points: 0,
            fleet_direction: 1,
        };
        settings.initialize_dynamic_settings();
        settings
    }

    /// Reset everything that changes over a round back to base values.
    pub fn initialize_dynamic_settings(&mut self) {
        self.ship_speed = BASE_SHIP_SPEED;
        self.bullet_speed = BASE_BULLET_SPEED;
        self.alien_speed = BASE_ALIEN_SPEED;
        self.alien_points = BASE_ALIEN_POINTS;
        self.fleet_direction = 1;
    }

    /// Level-up scaling: the speeds and the per-alien score both grow.
    pub fn increase_speed(&mut self) {
        self.ship_speed *= self.speedup_scale;
        self.bullet_speed *= self.speedup_scale;
        self.alien_speed *= self.speedup_scale;
        self.alien_points = (self.alien_points as f32 * self.score_scale) as u32;
    }
}

// ── Counters ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GameStats {
    pub ships_left: u32,
    pub score: u32,
    pub level: u32,
    /// Best score across rounds — survives `reset_stats`.
    pub high_score: u32,
}

impl GameStats {
    pub fn new(settings: &Settings) -> Self {
        GameStats {
            ships_left: settings.ship_limit,
            score: 0,
            level: 1,
            high_score: 0,
        }
    }

    /// Per-round counters back to their starting values.  The high
    /// score is deliberately left alone.
    pub fn reset_stats(&mut self, settings: &Settings) {
        self.ships_left = settings.ship_limit;
        self.score = 0;
        self.level = 1;
    }
}

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Anything that occupies the play field: advances one tick and exposes
/// the bounding rect used for collision tests.
pub trait Sprite {
    fn update(&mut self, settings: &Settings);
    fn rect(&self) -> Rect;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Ship {
    pub fn new(settings: &Settings) -> Self {
        let (width, height) = settings.ship_size;
        let mut ship = Ship {
            x: 0.0,
            y: 0.0,
            width,
            height,
            moving_left: false,
            moving_right: false,
        };
        ship.center(settings);
        ship
    }

    /// Bottom-centre of the screen.
    pub fn center(&mut self, settings: &Settings) {
        self.x = (settings.screen_width as f32 - self.width) / 2.0;
        self.y = settings.screen_height as f32 - self.height;
    }
}

impl Sprite for Ship {
    // Positions are not clamped: holding a key can carry the ship past
    // the screen edge.  Rendering clips, the simulation does not.
    fn update(&mut self, settings: &Settings) {
        if self.moving_right {
            self.x += settings.ship_speed;
        }
        if self.moving_left {
            self.x -= settings.ship_speed;
        }
    }

    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bullet {
    /// Spawn at the ship's top centre.
    pub fn new(settings: &Settings, ship: &Ship) -> Self {
        let (width, height) = settings.bullet_size;
        Bullet {
            x: ship.x + (ship.width - width) / 2.0,
            y: ship.y,
            width,
            height,
        }
    }
}

impl Sprite for Bullet {
    fn update(&mut self, settings: &Settings) {
        self.y -= settings.bullet_speed;
    }

    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Alien {
    pub fn new(x: f32, y: f32, settings: &Settings) -> Self {
        let (width, height) = settings.alien_size;
        Alien { x, y, width, height }
    }

    /// True when the bounding rect touches or crosses either vertical
    /// screen edge.
    pub fn at_edge(&self, settings: &Settings) -> bool {
        let rect = self.rect();
        rect.right() >= settings.screen_width as f32 || rect.left() <= 0.0
    }
}

impl Sprite for Alien {
    fn update(&mut self, settings: &Settings) {
        self.x += settings.alien_speed * settings.fleet_direction as f32;
    }

    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Loop state ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GamePhase {
    /// Attract screen: waiting on the start control.
    Inactive,
    Playing,
    /// Brief freeze after losing a ship; counts down to `Playing`.
    Paused { ticks_left: u32 },
}

impl GamePhase {
    /// A round is underway (playing, or in the post-hit freeze).
    pub fn is_active(&self) -> bool {
        !matches!(self, GamePhase::Inactive)
    }
}

/// What happened during a tick that collaborators outside the
/// simulation (scoreboard, cursor handling, logging) react to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickEvent {
    ScoreChanged,
    LevelUp,
    ShipHit,
    GameOver,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire simulation state.  Cloneable so the pure update functions
/// can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub settings: Settings,
    pub stats: GameStats,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub aliens: Vec<Alien>,
    pub phase: GamePhase,
    pub tick_count: u64,
}
