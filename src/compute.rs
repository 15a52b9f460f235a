/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` and returns a brand-new `GameState`; `tick` also returns
/// the events collaborators outside the simulation need to react to.
/// Nothing here touches the terminal, and nothing is random — the whole
/// simulation is deterministic.

use crate::entities::{
    Alien, Bullet, GamePhase, GameState, GameStats, Settings, Ship, Sprite, TickEvent,
};

/// Freeze length after losing a ship: half a second at 60 ticks/sec.
pub const SHIP_HIT_PAUSE_TICKS: u32 = 30;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial state: fleet already laid out for the attract
/// screen, ship centred, simulation inactive until the start control
/// is used.
pub fn new_game(settings: Settings, high_score: u32) -> GameState {
    let mut stats = GameStats::new(&settings);
    stats.high_score = high_score;
    let ship = Ship::new(&settings);
    let aliens = layout_fleet(&settings);
    GameState {
        settings,
        stats,
        ship,
        bullets: Vec::new(),
        aliens,
        phase: GamePhase::Inactive,
        tick_count: 0,
    }
}

/// Lay out a full fleet for the current screen size.
///
/// Aliens are spaced one alien-width apart within a row and one
/// alien-height between rows, leaving two widths of right margin and
/// three heights of bottom clearance for the ship.  The grid depends
/// only on the screen and alien dimensions, so identical settings
/// always produce the identical fleet.
pub fn layout_fleet(settings: &Settings) -> Vec<Alien> {
    let (alien_width, alien_height) = settings.alien_size;
    let mut aliens = Vec::new();

    let mut current_y = alien_height;
    while current_y < settings.screen_height as f32 - 3.0 * alien_height {
        let mut current_x = alien_width;
        while current_x < settings.screen_width as f32 - 2.0 * alien_width {
            aliens.push(Alien::new(current_x, current_y, settings));
            current_x += 2.0 * alien_width;
        }
        current_y += 2.0 * alien_height;
    }
    aliens
}

// ── Input-driven state transitions ───────────────────────────────────────────

/// The single inactive→active transition: reset the dynamic settings
/// and counters, clear the field, rebuild the fleet and re-centre the
/// ship.
pub fn start_game(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.settings.initialize_dynamic_settings();
    next.stats.reset_stats(&next.settings);
    next.bullets.clear();
    next.aliens = layout_fleet(&next.settings);
    next.ship = Ship::new(&next.settings);
    next.phase = GamePhase::Playing;
    next
}

/// Fire request: adds a bullet at the ship's top centre unless the
/// on-screen cap has been reached, in which case it is a no-op.
pub fn fire_bullet(state: &GameState) -> GameState {
    if state.phase != GamePhase::Playing
        || state.bullets.len() >= state.settings.bullets_allowed
    {
        return state.clone();
    }
    let mut next = state.clone();
    let bullet = Bullet::new(&next.settings, &next.ship);
    next.bullets.push(bullet);
    next
}

// ── Per-tick simulation step ─────────────────────────────────────────────────

/// Advance the simulation by one tick.
///
/// Update order, which the collision tests observe:
///   1. ship movement           4. ship–alien contact
///   2. bullet movement/purge   5. alien reaches the bottom
///   3. fleet edges + advance   6. bullet–alien hits, then level-up
///
/// A ship hit ends the tick: with lives remaining the handler has
/// already cleared the field, and on game over no further scoring may
/// occur.
pub fn tick(state: &GameState) -> (GameState, Vec<TickEvent>) {
    let mut next = state.clone();
    let mut events = Vec::new();
    next.tick_count += 1;

    match next.phase {
        GamePhase::Inactive => return (next, events),
        GamePhase::Paused { ticks_left } => {
            next.phase = if ticks_left <= 1 {
                GamePhase::Playing
            } else {
                GamePhase::Paused { ticks_left: ticks_left - 1 }
            };
            return (next, events);
        }
        GamePhase::Playing => {}
    }

    // 1. Ship follows its movement flags.
    next.ship.update(&next.settings);

    // 2. Bullets climb; anything fully past the top edge is purged.
    for bullet in &mut next.bullets {
        bullet.update(&next.settings);
    }
    next.bullets.retain(|bullet| bullet.rect().bottom() > 0.0);

    // 3. One edge reaction for the whole formation, then advance every
    // alien with the (possibly flipped) direction.
    if next.aliens.iter().any(|alien| alien.at_edge(&next.settings)) {
        for alien in &mut next.aliens {
            alien.y += next.settings.fleet_drop_speed as f32;
        }
        next.settings.fleet_direction = -next.settings.fleet_direction;
    }
    for alien in &mut next.aliens {
        alien.update(&next.settings);
    }

    // 4. An alien touching the ship costs a life.
    let ship_rect = next.ship.rect();
    if next.aliens.iter().any(|alien| alien.rect().intersects(&ship_rect)) {
        ship_hit(&mut next, &mut events);
        return (next, events);
    }

    // 5. An alien reaching the bottom edge is treated like a ship hit.
    let floor = next.settings.screen_height as f32;
    if next.aliens.iter().any(|alien| alien.rect().bottom() >= floor) {
        ship_hit(&mut next, &mut events);
        return (next, events);
    }

    // 6. Bullet–alien collisions, then a fresh wave once the fleet is
    // cleared.
    resolve_bullet_hits(&mut next, &mut events);
    if next.aliens.is_empty() {
        next.bullets.clear();
        next.settings.increase_speed();
        next.aliens = layout_fleet(&next.settings);
        next.stats.level += 1;
        events.push(TickEvent::LevelUp);
    }

    (next, events)
}

/// Full pairwise resolution: every bullet overlapping at least one
/// alien is spent, every alien overlapped by at least one bullet dies.
/// A single bullet crossing two aliens takes out both.
fn resolve_bullet_hits(state: &mut GameState, events: &mut Vec<TickEvent>) {
    let mut bullet_spent = vec![false; state.bullets.len()];
    let mut alien_dead = vec![false; state.aliens.len()];

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let bullet_rect = bullet.rect();
        for (ai, alien) in state.aliens.iter().enumerate() {
            if bullet_rect.intersects(&alien.rect()) {
                bullet_spent[bi] = true;
                alien_dead[ai] = true;
            }
        }
    }

    let destroyed = alien_dead.iter().filter(|&&dead| dead).count() as u32;
    if destroyed == 0 {
        return;
    }

    let mut index = 0;
    state.bullets.retain(|_| {
        let spent = bullet_spent[index];
        index += 1;
        !spent
    });
    let mut index = 0;
    state.aliens.retain(|_| {
        let dead = alien_dead[index];
        index += 1;
        !dead
    });

    state.stats.score += state.settings.alien_points * destroyed;
    if state.stats.score > state.stats.high_score {
        state.stats.high_score = state.stats.score;
    }
    events.push(TickEvent::ScoreChanged);
}

/// Shared response to the ship being caught, by alien contact or by the
/// fleet reaching the bottom.  The lost ship is deducted first; the
/// round ends when none remain, otherwise the field resets and the loop
/// freezes briefly before play resumes.
fn ship_hit(state: &mut GameState, events: &mut Vec<TickEvent>) {
    state.stats.ships_left = state.stats.ships_left.saturating_sub(1);
    if state.stats.ships_left == 0 {
        // Leave the field frozen behind the attract screen.
        state.phase = GamePhase::Inactive;
        events.push(TickEvent::GameOver);
        return;
    }

    state.bullets.clear();
    state.aliens = layout_fleet(&state.settings);
    state.ship.center(&state.settings);
    state.phase = GamePhase::Paused {
        ticks_left: SHIP_HIT_PAUSE_TICKS,
    };
    events.push(TickEvent::ShipHit);
}
