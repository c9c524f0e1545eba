//! Terminal rendering. All crossterm output lives here.
//!
//! The game hands out world-space draw calls through `render::Canvas`;
//! `TerminalCanvas` rasterizes them into a cell buffer which `render`
//! then writes out with queued crossterm commands.  No game logic is
//! performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_shooter::entities::GameState;
use space_shooter::render::{draw_frame, Canvas, Visual};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_LABEL: Color = Color::DarkGrey;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_SHIELD: Color = Color::Cyan;
const C_HUD_LIVES: Color = Color::Red;
const C_STAR: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::White;
const C_PLAYER_SHIELD: Color = Color::Cyan;
const C_ENEMY: Color = Color::Green;
const C_ENEMY_SHIELD: Color = Color::DarkGreen;
const C_LASER_PLAYER: Color = Color::Cyan;
const C_LASER_ENEMY: Color = Color::Magenta;
const C_EXPLOSION: Color = Color::Red;
const C_PARTICLES: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// ── Layout ────────────────────────────────────────────────────────────────────

/// HUD labels (row 0) and values (row 1).
const HUD_ROWS: u16 = 2;

/// Maps the world rectangle onto the play area inside the border.
///
/// World y grows upward, terminal rows grow downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub left: u16,
    pub top: u16,
    pub cols: u16,
    pub rows: u16,
    pub world_width: f32,
    pub world_height: f32,
}

impl Projection {
    /// Layout for a terminal of `width × height`: two HUD rows, a border
    /// row above and below the field, and a hint row at the bottom.
    pub fn for_terminal(width: u16, height: u16, world_width: f32, world_height: f32) -> Self {
        Self {
            left: 1,
            top: HUD_ROWS + 1,
            cols: width.saturating_sub(2).max(1),
            rows: height.saturating_sub(HUD_ROWS + 3).max(1),
            world_width,
            world_height,
        }
    }

    fn col_at(&self, x: f32) -> f32 {
        x * self.cols as f32 / self.world_width
    }

    fn row_at(&self, y: f32) -> f32 {
        (self.world_height - y) * self.rows as f32 / self.world_height
    }

    /// Cells covered by a world rectangle, relative to the play area, as
    /// inclusive `(col0, row0, col1, row1)`; `None` when fully off-field.
    /// Anything thinner than a cell still covers one.
    pub fn cells(&self, x: f32, y: f32, width: f32, height: f32) -> Option<(u16, u16, u16, u16)> {
        let c0 = self.col_at(x).floor();
        let c1 = (self.col_at(x + width).ceil() - 1.0).max(c0);
        let r0 = self.row_at(y + height).floor();
        let r1 = (self.row_at(y).ceil() - 1.0).max(r0);

        let (max_c, max_r) = (self.cols as f32 - 1.0, self.rows as f32 - 1.0);
        if c1 < 0.0 || r1 < 0.0 || c0 > max_c || r0 > max_r {
            return None;
        }
        Some((
            c0.max(0.0) as u16,
            r0.max(0.0) as u16,
            c1.min(max_c) as u16,
            r1.min(max_r) as u16,
        ))
    }

    /// Unproject a terminal cell to the world point at its center.
    pub fn screen_to_world(&self, col: u16, row: u16) -> (f32, f32) {
        let c = col as f32 - self.left as f32 + 0.5;
        let r = row as f32 - self.top as f32 + 0.5;
        (
            c * self.world_width / self.cols as f32,
            self.world_height - r * self.world_height / self.rows as f32,
        )
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

type Cell = Option<(char, Color)>;

pub struct TerminalCanvas {
    projection: Projection,
    cells: Vec<Cell>,
}

impl TerminalCanvas {
    pub fn new(projection: Projection) -> Self {
        let len = projection.cols as usize * projection.rows as usize;
        Self {
            projection,
            cells: vec![None; len],
        }
    }

    fn index(&self, col: u16, row: u16) -> usize {
        row as usize * self.projection.cols as usize + col as usize
    }

    fn fill(&mut self, x: f32, y: f32, w: f32, h: f32, glyph: char, color: Color) {
        if let Some((c0, r0, c1, r1)) = self.projection.cells(x, y, w, h) {
            for row in r0..=r1 {
                for col in c0..=c1 {
                    let i = self.index(col, row);
                    self.cells[i] = Some((glyph, color));
                }
            }
        }
    }

    /// Recolour cells that already hold a glyph.
    fn tint(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        if let Some((c0, r0, c1, r1)) = self.projection.cells(x, y, w, h) {
            for row in r0..=r1 {
                for col in c0..=c1 {
                    let i = self.index(col, row);
                    if let Some((glyph, _)) = self.cells[i] {
                        self.cells[i] = Some((glyph, color));
                    }
                }
            }
        }
    }

    /// Sparse stars; each layer uses a different density and scrolls with
    /// its own offset.
    fn stars(&mut self, layer: usize, y: f32) {
        let p = self.projection;
        let shift = (-y / p.world_height * p.rows as f32) as usize;
        let spacing = 37 + layer * 11;
        for row in 0..p.rows {
            for col in 0..p.cols {
                let i = self.index(col, row);
                let seed = col as usize * 7 + (row as usize + p.rows as usize - shift % p.rows as usize) * 13;
                if self.cells[i].is_none() && seed % spacing == 0 {
                    self.cells[i] = Some(('.', C_STAR));
                }
            }
        }
    }

    /// Queue the buffer, one run of cells per row.
    fn flush_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let p = self.projection;
        for row in 0..p.rows {
            for col in 0..p.cols {
                if let Some((glyph, color)) = self.cells[self.index(col, row)] {
                    out.queue(cursor::MoveTo(p.left + col, p.top + row))?;
                    out.queue(style::SetForegroundColor(color))?;
                    out.queue(Print(glyph))?;
                }
            }
        }
        Ok(())
    }
}

impl Canvas for TerminalCanvas {
    fn draw(&mut self, visual: Visual, x: f32, y: f32, width: f32, height: f32) {
        match visual {
            Visual::Background { layer } => self.stars(layer, y),
            Visual::PlayerShip => self.fill(x, y, width, height, '▲', C_PLAYER),
            Visual::EnemyShip => self.fill(x, y, width, height, '▼', C_ENEMY),
            Visual::PlayerShield => self.tint(x, y, width, height, C_PLAYER_SHIELD),
            Visual::EnemyShield => self.tint(x, y, width, height, C_ENEMY_SHIELD),
            Visual::PlayerLaser => self.fill(x, y, width, height, '║', C_LASER_PLAYER),
            Visual::EnemyLaser => self.fill(x, y, width, height, '↓', C_LASER_ENEMY),
            Visual::Explosion { frame } => {
                const GLYPHS: [char; 4] = ['*', '✶', '✹', '·'];
                let glyph = GLYPHS[(frame as usize / 4).min(GLYPHS.len() - 1)];
                self.fill(x, y, width, height, glyph, C_EXPLOSION);
            }
            Visual::Particles { progress } => {
                let glyph = if progress < 0.5 { '∗' } else { '·' };
                self.fill(x, y, width, height, glyph, C_PARTICLES);
            }
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let projection =
        Projection::for_terminal(width, height, state.world_width(), state.world_height());

    let mut canvas = TerminalCanvas::new(projection);
    draw_frame(state, &mut canvas);

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out, &projection)?;
    draw_hud(out, state, width)?;
    canvas.flush_to(out)?;
    draw_controls_hint(out, height)?;

    if state.is_game_over() {
        draw_game_over(out, state, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, p: &Projection) -> std::io::Result<()> {
    let w = p.cols as usize;
    let top = p.top - 1;
    let bottom = p.top + p.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, top))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;

    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in p.top..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(p.left + p.cols, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (rows 0–1) ────────────────────────────────────────────────────────────

/// Three equal sections: score left, shield centre, lives right.
fn draw_hud<W: Write>(out: &mut W, state: &GameState, width: u16) -> std::io::Result<()> {
    let hud = state.hud();
    let section = width / 3;
    let fields = [
        ("Score", format!("{:06}", hud.score), C_HUD_SCORE),
        ("Shield", format!("{:02}", hud.shield), C_HUD_SHIELD),
        ("Lives", format!("{:02}", hud.lives.max(0)), C_HUD_LIVES),
    ];

    for (i, (label, value, color)) in fields.iter().enumerate() {
        let x0 = section * i as u16;
        let lx = x0 + section.saturating_sub(label.len() as u16) / 2;
        let vx = x0 + section.saturating_sub(value.len() as u16) / 2;

        out.queue(cursor::MoveTo(lx, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_LABEL))?;
        out.queue(Print(*label))?;

        out.queue(cursor::MoveTo(vx, 1))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(value))?;
    }

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑→↓ / WASD : Move   Mouse : Steer   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:06}", state.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
