mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use alien_invasion::compute::{fire_bullet, new_game, start_game, tick};
use alien_invasion::entities::{GamePhase, GameState, Settings, TickEvent};
use alien_invasion::scoreboard::Scoreboard;

use display::PlayButton;

/// Tick cap: one simulation/render pass every ~16.7 ms.
const TICK: Duration = Duration::from_micros(16_667); // 60 Hz

/// A key is considered "held" if its last press/repeat event arrived
/// within this many ticks.  Covers terminals that don't emit
/// key-release events: the OS key-repeat rate refreshes the entry long
/// before the window expires.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` ticks.
fn is_held(key_tick: &HashMap<KeyCode, u64>, key: &KeyCode, tick_no: u64) -> bool {
    key_tick
        .get(key)
        .map(|&last| tick_no.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── High-score persistence ────────────────────────────────────────────────────

fn high_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".alien_invasion_score")
}

fn load_high_score() -> u32 {
    std::fs::read_to_string(high_score_path())
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn save_high_score(score: u32) {
    let _ = std::fs::write(high_score_path(), score.to_string());
}

// ── Round start ───────────────────────────────────────────────────────────────

/// Shared response to the start control: reset the simulation, refresh
/// every scoreboard string, hide the cursor for the round.
fn begin_round<W: Write>(
    out: &mut W,
    state: &GameState,
    scoreboard: &mut Scoreboard,
) -> Result<GameState> {
    let next = start_game(state);
    scoreboard.prep_score(&next.stats);
    scoreboard.prep_level(&next.stats);
    scoreboard.prep_high_score(&next.stats);
    out.execute(cursor::Hide)?;
    log::info!("round started");
    Ok(next)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// One tick = drain input → (if a round is active) advance the
/// simulation → dispatch its events → render → sleep the remainder.
///
/// Input model: instead of acting on each key event individually, a
/// `key_tick` map records the tick of the last press/repeat event for
/// every key, and the ship's movement flags follow whichever direction
/// keys are still "fresh".  This gives KeyDown/KeyUp steering on
/// keyboard-enhancement terminals (real release events) and degrades
/// gracefully on classic terminals, where held keys stay live through
/// OS key-repeat and expire after `HOLD_WINDOW` ticks of silence.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> Result<()> {
    let (width, height) = terminal::size().context("querying terminal size")?;
    log::info!("play area {}x{} cells", width, height);

    let settings = Settings::new(width, height);
    let button = PlayButton::new(&settings);
    let mut state = new_game(settings, load_high_score());
    let mut scoreboard = Scoreboard::new(&state.stats);

    let mut key_tick: HashMap<KeyCode, u64> = HashMap::new();
    let mut tick_no: u64 = 0;

    loop {
        let tick_start = Instant::now();
        tick_no += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    // Press: record key + handle one-shot actions
                    KeyEventKind::Press => {
                        key_tick.insert(code, tick_no);
                        match code {
                            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                            KeyCode::Char('c')
                                if modifiers.contains(KeyModifiers::CONTROL) =>
                            {
                                return Ok(());
                            }
                            KeyCode::Char(' ') if state.phase == GamePhase::Playing => {
                                state = fire_bullet(&state);
                            }
                            KeyCode::Char('p') | KeyCode::Char('P')
                                if state.phase == GamePhase::Inactive =>
                            {
                                state = begin_round(out, &state, &mut scoreboard)?;
                            }
                            _ => {}
                        }
                    }
                    // Repeat: refresh timestamp so the key stays "held"
                    KeyEventKind::Repeat => {
                        key_tick.insert(code, tick_no);
                    }
                    // Release: remove key immediately (enhancement path)
                    KeyEventKind::Release => {
                        key_tick.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    if state.phase == GamePhase::Inactive && button.contains(column, row) {
                        state = begin_round(out, &state, &mut scoreboard)?;
                    }
                }
                _ => {}
            }
        }

        // Steering flags follow whichever direction keys are held.
        state.ship.moving_left = is_held(&key_tick, &KeyCode::Left, tick_no)
            || is_held(&key_tick, &KeyCode::Char('a'), tick_no)
            || is_held(&key_tick, &KeyCode::Char('A'), tick_no);
        state.ship.moving_right = is_held(&key_tick, &KeyCode::Right, tick_no)
            || is_held(&key_tick, &KeyCode::Char('d'), tick_no)
            || is_held(&key_tick, &KeyCode::Char('D'), tick_no);

        if state.phase.is_active() {
            let (next, events) = tick(&state);
            state = next;
            for ev in events {
                match ev {
                    TickEvent::ScoreChanged => {
                        scoreboard.prep_score(&state.stats);
                        scoreboard.check_high_score(&state.stats);
                    }
                    TickEvent::LevelUp => {
                        scoreboard.prep_level(&state.stats);
                        log::debug!("level {} reached", state.stats.level);
                    }
                    TickEvent::ShipHit => {
                        log::debug!("ship lost, {} left", state.stats.ships_left);
                    }
                    TickEvent::GameOver => {
                        out.execute(cursor::Show)?;
                        save_high_score(state.stats.high_score);
                        log::info!("round over, final score {}", state.stats.score);
                    }
                }
            }
        }

        display::render(out, &state, &scoreboard, &button)?;

        let elapsed = tick_start.elapsed();
        if elapsed < TICK {
            thread::sleep(TICK - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the
    // hold-window model.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending
    // them through a channel so the game loop never blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
