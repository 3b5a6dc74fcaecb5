use std::f64::consts::PI;

use cairo::{Context, FontSlant, FontWeight};

use crate::game::field::BOARD_SIZE;
use crate::game::logic::{GameSession, SessionState};
use crate::game::types::{Outcome, Player};
use crate::i18n::I18n;
use crate::storage::Rgb;

// Design-time (reference) dimensions. Everything is laid out in this space
// and scaled uniformly to the widget.
pub const REF_WIDTH: f64 = 600.0;
pub const REF_HEIGHT: f64 = 640.0;

const CELL_SIZE: f64 = REF_WIDTH / BOARD_SIZE as f64;
const GRID_HEIGHT: f64 = CELL_SIZE * BOARD_SIZE as f64;
const MARK_INSET: f64 = 40.0;
const MARK_LINE_WIDTH: f64 = 14.0;
const STATUS_BASELINE: f64 = GRID_HEIGHT + 28.0;

/// Colors the marks are drawn with.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub x: Rgb,
    pub o: Rgb,
}

impl Palette {
    fn of(&self, player: Player) -> Rgb {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }
}

/// Text lines shown below (status) and over (result) the board.
pub struct Captions<'a> {
    pub status: &'a str,
    pub result: Option<&'a str>,
}

/// Render the board, marks and captions, scaled to fit (widget_w, widget_h).
pub fn render(
    cr: &Context,
    session: &GameSession,
    palette: Palette,
    captions: Captions<'_>,
    hovered: Option<(usize, usize)>,
    widget_w: i32,
    widget_h: i32,
) {
    let (scale, offset_x, offset_y) = layout(widget_w, widget_h);

    let _ = cr.save();
    cr.translate(offset_x, offset_y);
    cr.scale(scale, scale);

    cr.set_source_rgb(1.0, 1.0, 1.0);
    cr.rectangle(0.0, 0.0, REF_WIDTH, REF_HEIGHT);
    let _ = cr.fill();

    // Hover shadow on squares that would accept a click
    if let Some((row, col)) = hovered {
        if session.is_valid_move(row, col) {
            cr.set_source_rgba(0.0, 0.0, 0.0, 0.06);
            cr.rectangle(col as f64 * CELL_SIZE, row as f64 * CELL_SIZE, CELL_SIZE, CELL_SIZE);
            let _ = cr.fill();
        }
    }

    draw_grid(cr);

    let board = session.board();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            if let Some(player) = board.get(row, col).player() {
                draw_mark(cr, player, row, col, palette.of(player));
            }
        }
    }

    cr.set_source_rgb(0.0, 0.0, 0.0);
    cr.select_font_face("Sans", FontSlant::Normal, FontWeight::Normal);
    cr.set_font_size(26.0);
    cr.move_to(20.0, STATUS_BASELINE);
    let _ = cr.show_text(captions.status);

    if let Some(result) = captions.result {
        draw_result_overlay(cr, result);
    }

    let _ = cr.restore();
}

fn layout(widget_w: i32, widget_h: i32) -> (f64, f64, f64) {
    let w = widget_w as f64;
    let h = widget_h as f64;
    let scale = (w / REF_WIDTH).min(h / REF_HEIGHT);
    let offset_x = (w - REF_WIDTH * scale) / 2.0;
    let offset_y = (h - REF_HEIGHT * scale) / 2.0;
    (scale, offset_x, offset_y)
}

fn draw_grid(cr: &Context) {
    cr.set_source_rgb(0.0, 0.0, 0.0);
    cr.set_line_width(2.0);
    for i in 0..=BOARD_SIZE {
        let p = i as f64 * CELL_SIZE;
        cr.move_to(p, 0.0);
        cr.line_to(p, GRID_HEIGHT);
        cr.move_to(0.0, p);
        cr.line_to(REF_WIDTH, p);
    }
    let _ = cr.stroke();
}

fn draw_mark(cr: &Context, player: Player, row: usize, col: usize, color: Rgb) {
    let [r, g, b] = color.map(|c| c as f64 / 255.0);
    let x = col as f64 * CELL_SIZE;
    let y = row as f64 * CELL_SIZE;

    cr.set_source_rgb(r, g, b);
    cr.set_line_width(MARK_LINE_WIDTH);
    cr.set_line_cap(cairo::LineCap::Round);
    match player {
        Player::X => {
            cr.move_to(x + MARK_INSET, y + MARK_INSET);
            cr.line_to(x + CELL_SIZE - MARK_INSET, y + CELL_SIZE - MARK_INSET);
            cr.move_to(x + CELL_SIZE - MARK_INSET, y + MARK_INSET);
            cr.line_to(x + MARK_INSET, y + CELL_SIZE - MARK_INSET);
        }
        Player::O => {
            let radius = CELL_SIZE / 2.0 - MARK_INSET;
            cr.new_sub_path();
            cr.arc(x + CELL_SIZE / 2.0, y + CELL_SIZE / 2.0, radius, 0.0, 2.0 * PI);
        }
    }
    let _ = cr.stroke();
}

/// White veil over the board with the result centred on it.
fn draw_result_overlay(cr: &Context, text: &str) {
    cr.set_source_rgba(1.0, 1.0, 1.0, 0.85);
    cr.rectangle(0.0, 0.0, REF_WIDTH, GRID_HEIGHT);
    let _ = cr.fill();

    cr.set_source_rgb(0.0, 0.0, 0.0);
    cr.select_font_face("Sans", FontSlant::Normal, FontWeight::Bold);
    cr.set_font_size(56.0);
    if let Ok(ext) = cr.text_extents(text) {
        cr.move_to(
            (REF_WIDTH - ext.width()) / 2.0 - ext.x_bearing(),
            (GRID_HEIGHT - ext.height()) / 2.0 - ext.y_bearing(),
        );
        let _ = cr.show_text(text);
    }
}

/// Convert widget-space mouse coordinates to a board (row, col).
pub fn mouse_to_cell(x: f64, y: f64, widget_w: i32, widget_h: i32) -> Option<(usize, usize)> {
    let (scale, offset_x, offset_y) = layout(widget_w, widget_h);
    if scale <= 0.0 {
        return None;
    }

    let rx = (x - offset_x) / scale;
    let ry = (y - offset_y) / scale;
    if rx < 0.0 || ry < 0.0 || rx >= REF_WIDTH || ry >= GRID_HEIGHT {
        return None;
    }

    let col = (rx / CELL_SIZE).floor() as usize;
    let row = (ry / CELL_SIZE).floor() as usize;
    (row < BOARD_SIZE && col < BOARD_SIZE).then_some((row, col))
}

/// Status line text for the current session state.
pub fn status_message(session: &GameSession, i18n: &I18n) -> String {
    match session.current_state() {
        SessionState::AwaitingMove(player) => i18n.t_arg("turn", "player", player.symbol()),
        SessionState::Terminal(outcome) => result_message(outcome, i18n).unwrap_or_default(),
    }
}

pub fn result_message(outcome: Outcome, i18n: &I18n) -> Option<String> {
    match outcome {
        Outcome::InProgress => None,
        Outcome::Win(player) => Some(i18n.t_arg("result-win", "player", player.symbol())),
        Outcome::Draw => Some(i18n.t("result-draw")),
    }
}
