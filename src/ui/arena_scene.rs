//! Arena rendering.
//!
//! Uses half-block pixel rendering. The 100x100 field is scaled down to the
//! available area; each field cell maps to a colored pixel and pairs of
//! vertical pixels are packed into one terminal row using `▀` with fg=top,
//! bg=bottom colors.

use crate::config::SnakeColor;
use crate::constants::FIELD_SIZE;
use crate::sim::{MatchSnapshot, SnakeSnapshot, Vector2};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

// ── Border characters ────────────────────────────────────────────────
const BORDER_H: char = '\u{2500}'; // ─
const BORDER_V: char = '\u{2502}'; // │
const BORDER_TL: char = '\u{250C}'; // ┌
const BORDER_TR: char = '\u{2510}'; // ┐
const BORDER_BL: char = '\u{2514}'; // └
const BORDER_BR: char = '\u{2518}'; // ┘
const HALF_TOP: char = '\u{2580}'; // ▀
const FULL_BLOCK: char = '\u{2588}'; // █

const FOOD_COLOR: Color = Color::Rgb(60, 200, 60);
const CRASHED_COLOR: Color = Color::Rgb(90, 90, 90);
const EMPTY_BG: Color = Color::Rgb(12, 12, 18);
const BORDER_COLOR: Color = Color::Rgb(80, 80, 80);

const ARENA_TITLE: &str = " Snake Duel ";
const ARENA_BORDER_COLOR: Color = Color::LightGreen;
const FIELD_MIN_WIDTH: u16 = 20;
const FIELD_MIN_HEIGHT: u16 = 10;
const STATUS_HEIGHT: u16 = 2;
// Swatch, spacing and the panel's own borders around the longest line
const SCOREBOARD_PADDING: usize = 6;
const SCOREBOARD_MIN_WIDTH: usize = 22;
const SCOREBOARD_MAX_WIDTH: usize = 40;

/// Pixel grid in row-major order: `pixels[y][x]`.
pub type PixelGrid = Vec<Vec<Option<Color>>>;

/// (head, body) shades for a snake color. Heads are the darker shade.
pub fn snake_palette(color: SnakeColor) -> (Color, Color) {
    match color {
        SnakeColor::Red => (Color::Rgb(139, 0, 0), Color::Rgb(255, 70, 70)),
        SnakeColor::Blue => (Color::Rgb(0, 0, 139), Color::Rgb(80, 120, 255)),
        SnakeColor::Green => (Color::Rgb(0, 100, 0), Color::Rgb(80, 220, 80)),
        SnakeColor::Yellow => (Color::Rgb(150, 130, 0), Color::Rgb(255, 230, 60)),
        SnakeColor::Magenta => (Color::Rgb(120, 0, 120), Color::Rgb(240, 90, 240)),
        SnakeColor::Cyan => (Color::Rgb(0, 110, 110), Color::Rgb(80, 230, 230)),
    }
}

/// Screen regions of the arena.
struct ArenaLayout {
    field: Rect,
    status: Rect,
    scoreboard: Rect,
}

/// Scoreboard width: the longest scoreboard line plus the swatch and borders,
/// never narrower than the legend.
fn scoreboard_width(snapshot: &MatchSnapshot) -> u16 {
    let longest = snapshot
        .snakes
        .iter()
        .map(|snake| snake.scoreboard_line().chars().count())
        .max()
        .unwrap_or(0);
    (longest + SCOREBOARD_PADDING).clamp(SCOREBOARD_MIN_WIDTH, SCOREBOARD_MAX_WIDTH) as u16
}

/// Outer frame with the field and a status strip on the left and the
/// scoreboard on the right.
fn arena_layout(frame: &mut Frame, area: Rect, snapshot: &MatchSnapshot) -> ArenaLayout {
    frame.render_widget(Clear, area);

    let outer = Block::default()
        .title(ARENA_TITLE)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ARENA_BORDER_COLOR));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let [left, right] = split2(
        inner,
        Direction::Horizontal,
        [
            Constraint::Min(FIELD_MIN_WIDTH),
            Constraint::Length(scoreboard_width(snapshot)),
        ],
    );
    let [field, status] = split2(
        left,
        Direction::Vertical,
        [Constraint::Min(FIELD_MIN_HEIGHT), Constraint::Length(STATUS_HEIGHT)],
    );

    ArenaLayout {
        field,
        status,
        scoreboard: right,
    }
}

fn split2(area: Rect, direction: Direction, constraints: [Constraint; 2]) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(direction)
        .constraints(constraints)
        .split(area);
    [chunks[0], chunks[1]]
}

/// Render the whole arena screen.
pub fn render_arena_scene(
    frame: &mut Frame,
    area: Rect,
    snapshot: &MatchSnapshot,
    controls: &[(String, String)],
) {
    let layout = arena_layout(frame, area, snapshot);

    render_play_field(frame, layout.field, snapshot);
    render_status(frame, layout.status, snapshot, controls);
    render_scoreboard(frame, layout.scoreboard, snapshot);
}

/// Status line naming crashed players, then the key hints.
fn status_message(snapshot: &MatchSnapshot) -> (String, Color) {
    let crashed: Vec<&str> = snapshot
        .snakes
        .iter()
        .filter(|snake| !snake.alive)
        .map(|snake| snake.name.as_str())
        .collect();
    if crashed.is_empty() {
        ("Slither!".to_string(), Color::Green)
    } else {
        (
            format!("{} crashed, respawning...", crashed.join(" and ")),
            Color::Red,
        )
    }
}

fn render_status(
    frame: &mut Frame,
    area: Rect,
    snapshot: &MatchSnapshot,
    controls: &[(String, String)],
) {
    if area.height == 0 {
        return;
    }

    let (message, color) = status_message(snapshot);
    frame.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center),
        Rect { height: 1, ..area },
    );

    if area.height < 2 || controls.is_empty() {
        return;
    }
    let mut spans = Vec::with_capacity(controls.len() * 3);
    for (i, (keys, who)) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(keys.as_str(), Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {who}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
    );
}

/// Map a field coordinate onto a grid of `cells` cells. Out-of-field
/// coordinates (a freshly grown tail can sit one step outside) map to `None`.
fn to_cell(coord: f64, cells: usize) -> Option<usize> {
    if !(0.0..FIELD_SIZE).contains(&coord) {
        return None;
    }
    let cell = (coord * cells as f64 / FIELD_SIZE) as usize;
    Some(cell.min(cells.saturating_sub(1)))
}

fn plot(pixels: &mut PixelGrid, pos: Vector2, color: Color) {
    let grid_h = pixels.len();
    let grid_w = pixels.first().map_or(0, Vec::len);
    if let (Some(x), Some(y)) = (to_cell(pos.x, grid_w), to_cell(pos.y, grid_h)) {
        pixels[y][x] = Some(color);
    }
}

/// Build the colored pixel grid for a snapshot. Heads are drawn last so they
/// stay visible where bodies overlap.
pub fn build_pixels(snapshot: &MatchSnapshot, grid_w: usize, grid_h: usize) -> PixelGrid {
    let mut pixels: PixelGrid = vec![vec![None; grid_w]; grid_h];
    if grid_w == 0 || grid_h == 0 {
        return pixels;
    }

    plot(&mut pixels, snapshot.food, FOOD_COLOR);

    for snake in &snapshot.snakes {
        let (_, body) = snake_colors(snake);
        for &pos in snake.segments.iter().skip(1) {
            plot(&mut pixels, pos, body);
        }
    }
    for snake in &snapshot.snakes {
        let (head, _) = snake_colors(snake);
        if let Some(&pos) = snake.segments.first() {
            plot(&mut pixels, pos, head);
        }
    }

    pixels
}

fn snake_colors(snake: &SnakeSnapshot) -> (Color, Color) {
    if snake.alive {
        snake_palette(snake.color)
    } else {
        (CRASHED_COLOR, CRASHED_COLOR)
    }
}

/// Render the play field with a thin border.
fn render_play_field(frame: &mut Frame, area: Rect, snapshot: &MatchSnapshot) {
    if area.height < 3 || area.width < 5 {
        return;
    }

    let field = FIELD_SIZE as usize;
    let grid_w = field.min(area.width as usize - 2);
    let grid_h = field.min((area.height as usize - 2) * 2);
    let pixels = build_pixels(snapshot, grid_w, grid_h);

    let content_rows = grid_h.div_ceil(2);
    let render_w = (grid_w + 2) as u16;
    let x_off = area.x + (area.width.saturating_sub(render_w)) / 2;
    let y_off = area.y;
    let border = Style::default().fg(BORDER_COLOR);

    // ── Top border ──────────────────────────────────────────────
    let mut top = String::with_capacity(grid_w + 2);
    top.push(BORDER_TL);
    top.extend(std::iter::repeat(BORDER_H).take(grid_w));
    top.push(BORDER_TR);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(top, border))),
        Rect::new(x_off, y_off, render_w, 1),
    );

    // ── Field rows ──────────────────────────────────────────────
    let empty_row: Vec<Option<Color>> = vec![None; grid_w];
    for term_row in 0..content_rows {
        let top_row = pixels.get(term_row * 2).unwrap_or(&empty_row);
        let bot_row = pixels.get(term_row * 2 + 1).unwrap_or(&empty_row);

        let mut spans: Vec<Span> = vec![Span::styled(BORDER_V.to_string(), border)];

        // Batch consecutive cells with the same colors
        let mut cur_fg = Color::Reset;
        let mut cur_bg = Color::Reset;
        let mut cur_text = String::new();
        for (&top_c, &bot_c) in top_row.iter().zip(bot_row.iter()) {
            let fg = top_c.unwrap_or(EMPTY_BG);
            let bg = bot_c.unwrap_or(EMPTY_BG);
            if (fg != cur_fg || bg != cur_bg) && !cur_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut cur_text),
                    Style::default().fg(cur_fg).bg(cur_bg),
                ));
            }
            cur_fg = fg;
            cur_bg = bg;
            cur_text.push(HALF_TOP);
        }
        if !cur_text.is_empty() {
            spans.push(Span::styled(
                cur_text,
                Style::default().fg(cur_fg).bg(cur_bg),
            ));
        }
        spans.push(Span::styled(BORDER_V.to_string(), border));

        let row_y = y_off + 1 + term_row as u16;
        if row_y < area.y + area.height {
            frame.render_widget(
                Paragraph::new(Line::from(spans)),
                Rect::new(x_off, row_y, render_w, 1),
            );
        }
    }

    // ── Bottom border ───────────────────────────────────────────
    let bot_y = y_off + 1 + content_rows as u16;
    if bot_y < area.y + area.height {
        let mut bottom = String::with_capacity(grid_w + 2);
        bottom.push(BORDER_BL);
        bottom.extend(std::iter::repeat(BORDER_H).take(grid_w));
        bottom.push(BORDER_BR);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(bottom, border))),
            Rect::new(x_off, bot_y, render_w, 1),
        );
    }
}

/// Per-player scoreboard plus a legend.
fn render_scoreboard(frame: &mut Frame, area: Rect, snapshot: &MatchSnapshot) {
    let block = Block::default()
        .title(" Scores ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for snake in &snapshot.snakes {
        let (head, body) = snake_palette(snake.color);
        let text_style = if snake.alive {
            Style::default().fg(body).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{FULL_BLOCK} "), Style::default().fg(head)),
            Span::styled(snake.scoreboard_line(), text_style),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  Length: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                snake.segments.len().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::styled("  Speed: ", Style::default().fg(Color::DarkGray)),
            Span::styled(snake.speed.to_string(), Style::default().fg(Color::White)),
        ]));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Legend:",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(vec![
        Span::styled(format!(" {FULL_BLOCK} "), Style::default().fg(FOOD_COLOR)),
        Span::styled("Food", Style::default().fg(Color::DarkGray)),
    ]));
    lines.push(Line::from(vec![
        Span::styled(format!(" {FULL_BLOCK} "), Style::default().fg(CRASHED_COLOR)),
        Span::styled("Wreck", Style::default().fg(Color::DarkGray)),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}
