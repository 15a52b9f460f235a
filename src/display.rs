/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.  Entity positions are fractional cells
/// and get rounded here; anything outside the screen is clipped, never
/// drawn.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use alien_invasion::entities::{Alien, Bullet, GamePhase, GameState, Settings, Ship};
use alien_invasion::scoreboard::Scoreboard;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SHIP: Color = Color::White;
const C_ALIEN: Color = Color::Green;
const C_BULLET: Color = Color::Cyan;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Cyan;
const C_HUD_SHIPS: Color = Color::Red;
const C_BUTTON: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

// ── Start control ─────────────────────────────────────────────────────────────

/// The clickable start control, shown while the simulation is inactive.
pub struct PlayButton {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl PlayButton {
    pub fn new(settings: &Settings) -> Self {
        let width = 12;
        let height = 3;
        PlayButton {
            x: (settings.screen_width / 2).saturating_sub(width / 2),
            y: (settings.screen_height / 2).saturating_sub(height / 2),
            width,
            height,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x + self.width
            && row >= self.y
            && row < self.y + self.height
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame: field, HUD, and the start control when no
/// round is underway.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    scoreboard: &Scoreboard,
    button: &PlayButton,
) -> std::io::Result<()> {
    let (r, g, b) = state.settings.bg_color;
    out.queue(style::SetBackgroundColor(Color::Rgb { r, g, b }))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for bullet in &state.bullets {
        draw_bullet(out, bullet, &state.settings)?;
    }
    draw_ship(out, &state.ship, &state.settings)?;
    for alien in &state.aliens {
        draw_alien(out, alien, &state.settings)?;
    }

    draw_hud(out, state, scoreboard)?;

    if state.phase == GamePhase::Inactive {
        draw_button(out, button)?;
        draw_controls_hint(out, button, &state.settings)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, state.settings.screen_height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Sprite rows ───────────────────────────────────────────────────────────────

/// Print one row of a sprite, skipping rows that fall outside the
/// screen.  Rows are clipped whole; a sprite straddling an edge simply
/// loses that row.
fn draw_row<W: Write>(
    out: &mut W,
    col: i32,
    row: i32,
    text: &str,
    settings: &Settings,
) -> std::io::Result<()> {
    let cols = text.chars().count() as i32;
    if row < 0 || row >= settings.screen_height as i32 {
        return Ok(());
    }
    if col < 0 || col + cols > settings.screen_width as i32 {
        return Ok(());
    }
    out.queue(cursor::MoveTo(col as u16, row as u16))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_ship<W: Write>(out: &mut W, ship: &Ship, settings: &Settings) -> std::io::Result<()> {
    // 3x2 sprite:
    //    ▲      ← tip
    //   /█\     ← fuselage + wings
    let col = ship.x.round() as i32;
    let row = ship.y.round() as i32;
    out.queue(style::SetForegroundColor(C_SHIP))?;
    draw_row(out, col + 1, row, "▲", settings)?;
    draw_row(out, col, row + 1, "/█\\", settings)?;
    Ok(())
}

fn draw_alien<W: Write>(out: &mut W, alien: &Alien, settings: &Settings) -> std::io::Result<()> {
    // 3x2 sprite:
    //   /O\     ← dome
    //   \_/     ← saucer hull
    let col = alien.x.round() as i32;
    let row = alien.y.round() as i32;
    out.queue(style::SetForegroundColor(C_ALIEN))?;
    draw_row(out, col, row, "/O\\", settings)?;
    draw_row(out, col, row + 1, "\\_/", settings)?;
    Ok(())
}

fn draw_bullet<W: Write>(out: &mut W, bullet: &Bullet, settings: &Settings) -> std::io::Result<()> {
    let col = bullet.x.round() as i32;
    let row = bullet.y.round() as i32;
    out.queue(style::SetForegroundColor(C_BULLET))?;
    draw_row(out, col, row, "│", settings)?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    state: &GameState,
    scoreboard: &Scoreboard,
) -> std::io::Result<()> {
    let width = state.settings.screen_width;

    // Score and best — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "{}  {}",
        scoreboard.score_text, scoreboard.high_score_text
    )))?;

    // Level — centre
    let lx = (width / 2).saturating_sub(scoreboard.level_text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&scoreboard.level_text))?;

    // Remaining ships — right
    let ships: String = "▲".repeat(state.stats.ships_left as usize);
    let ships_str = format!("Ships:{}", ships);
    let rx = width.saturating_sub(ships_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SHIPS))?;
    out.queue(Print(&ships_str))?;

    Ok(())
}

// ── Start control & hint ──────────────────────────────────────────────────────

fn draw_button<W: Write>(out: &mut W, button: &PlayButton) -> std::io::Result<()> {
    let inner = "─".repeat(button.width.saturating_sub(2) as usize);
    let label = format!("{:^width$}", "PLAY", width = button.width.saturating_sub(2) as usize);

    out.queue(style::SetForegroundColor(C_BUTTON))?;
    out.queue(cursor::MoveTo(button.x, button.y))?;
    out.queue(Print(format!("┌{}┐", inner)))?;
    out.queue(cursor::MoveTo(button.x, button.y + 1))?;
    out.queue(Print(format!("│{}│", label)))?;
    out.queue(cursor::MoveTo(button.x, button.y + 2))?;
    out.queue(Print(format!("└{}┘", inner)))?;
    Ok(())
}

fn draw_controls_hint<W: Write>(
    out: &mut W,
    button: &PlayButton,
    settings: &Settings,
) -> std::io::Result<()> {
    let hint = "← → / A D : Move   SPACE : Shoot   Q : Quit   P / click : Play";
    let col = (settings.screen_width / 2).saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, button.y + 4))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}
