//! Terminal renderer — all terminal output lives here.
//!
//! Draw commands arrive in playfield coordinates (800×600) and are buffered
//! until `present`, which scales them onto the current terminal size, clears
//! the screen and writes the whole frame at once.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use invader_duel::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use invader_duel::entities::EnemyKind;
use invader_duel::interfaces::{ExplosionColor, Image, Renderer, Rgb, Text};
use invader_duel::GameError;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SHIP: Color = Color::White;
const C_OTHER: Color = Color::Cyan;
const C_SQUID: Color = Color::Magenta;
const C_CRAB: Color = Color::Blue;
const C_OCTOPUS: Color = Color::Green;
const C_MYSTERY: Color = Color::Red;
const C_LASER: Color = Color::Cyan;
const C_ENEMY_LASER: Color = Color::Yellow;
const C_LIFE: Color = Color::Red;

enum Command {
    Glyph { x: i32, y: i32, glyph: &'static str, color: Color },
    Text { x: i32, y: i32, message: String, color: Color },
    Line { from: (i32, i32), to: (i32, i32), color: Color },
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    commands: Vec<Command>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            commands: Vec::new(),
        }
    }
}

fn rgb(color: Rgb) -> Color {
    Color::Rgb {
        r: color.0,
        g: color.1,
        b: color.2,
    }
}

fn sprite(image: Image) -> (&'static str, Color) {
    match image {
        Image::Ship => ("/^\\", C_SHIP),
        Image::Other => ("/A\\", C_OTHER),
        Image::Mystery => ("<=O=>", C_MYSTERY),
        Image::Enemy { kind, frame } => match (kind, frame) {
            (EnemyKind::Squid, 0) => ("{@}", C_SQUID),
            (EnemyKind::Squid, _) => ("}@{", C_SQUID),
            (EnemyKind::Crab, 0) => ("/M\\", C_CRAB),
            (EnemyKind::Crab, _) => ("\\M/", C_CRAB),
            (EnemyKind::Octopus, 0) => ("<W>", C_OCTOPUS),
            (EnemyKind::Octopus, _) => (">W<", C_OCTOPUS),
        },
        Image::Explosion { color, large } => {
            let color = match color {
                ExplosionColor::Purple => C_SQUID,
                ExplosionColor::Blue => C_CRAB,
                ExplosionColor::Green => C_OCTOPUS,
            };
            (if large { "\\*/" } else { "*" }, color)
        }
        Image::Laser => ("|", C_LASER),
        Image::EnemyLaser => ("!", C_ENEMY_LASER),
        Image::Life => ("^", C_LIFE),
    }
}

/// Map a playfield point onto a terminal cell, or `None` when off-screen.
fn to_cell(x: i32, y: i32, cols: u16, rows: u16) -> Option<(u16, u16)> {
    if !(0..SCREEN_WIDTH).contains(&x) || !(0..SCREEN_HEIGHT).contains(&y) {
        return None;
    }
    let col = x as i64 * cols as i64 / SCREEN_WIDTH as i64;
    let row = y as i64 * rows as i64 / SCREEN_HEIGHT as i64;
    Some((col as u16, row as u16))
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn blit(&mut self, image: Image, x: i32, y: i32) {
        let (glyph, color) = sprite(image);
        self.commands.push(Command::Glyph { x, y, glyph, color });
    }

    fn draw_text(&mut self, text: &Text) {
        self.commands.push(Command::Text {
            x: text.x,
            y: text.y,
            message: text.message.clone(),
            color: rgb(text.color),
        });
    }

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgb) {
        self.commands.push(Command::Line {
            from,
            to,
            color: rgb(color),
        });
    }

    fn present(&mut self) -> Result<(), GameError> {
        let (cols, rows) = terminal::size()?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        for command in self.commands.drain(..) {
            match command {
                Command::Glyph { x, y, glyph, color } => {
                    if let Some((col, row)) = to_cell(x, y, cols, rows) {
                        self.out.queue(cursor::MoveTo(col, row))?;
                        self.out.queue(style::SetForegroundColor(color))?;
                        self.out.queue(Print(glyph))?;
                    }
                }
                Command::Text { x, y, message, color } => {
                    if let Some((col, row)) = to_cell(x, y, cols, rows) {
                        let room = cols.saturating_sub(col) as usize;
                        let clipped: String = message.chars().take(room).collect();
                        self.out.queue(cursor::MoveTo(col, row))?;
                        self.out.queue(style::SetForegroundColor(color))?;
                        self.out.queue(Print(clipped))?;
                    }
                }
                // Only vertical lines are ever drawn (the centre divider).
                Command::Line { from, to, color } => {
                    let Some((col, top)) = to_cell(from.0, from.1.min(to.1), cols, rows) else {
                        continue;
                    };
                    let bottom = to_cell(to.0, to.1.max(from.1).min(SCREEN_HEIGHT - 1), cols, rows)
                        .map(|(_, row)| row)
                        .unwrap_or(top);
                    self.out.queue(style::SetForegroundColor(color))?;
                    for row in top..=bottom {
                        self.out.queue(cursor::MoveTo(col, row))?;
                        self.out.queue(Print("│"))?;
                    }
                }
            }
        }

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }
}
