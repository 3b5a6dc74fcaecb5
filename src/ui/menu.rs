use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Align, Box as GtkBox, Button, DrawingArea, Label, Orientation, Switch};

use super::state::AppState;
use crate::game::types::{Player, Statistics};
use crate::i18n::I18n;
use crate::storage::Rgb;

const BUTTON_WIDTH: i32 = 300;

/// Button colors, matching the CSS classes installed by the app.
#[derive(Debug, Clone, Copy)]
pub enum Tone {
    Green,
    Yellow,
    Blue,
    Red,
}

impl Tone {
    fn css_class(self) -> &'static str {
        match self {
            Tone::Green => "menu-green",
            Tone::Yellow => "menu-yellow",
            Tone::Blue => "menu-blue",
            Tone::Red => "menu-red",
        }
    }
}

/// A centred column with a title, ready for buttons.
pub fn menu_page(title: &str) -> GtkBox {
    let page = GtkBox::new(Orientation::Vertical, 10);
    page.set_valign(Align::Center);
    page.set_halign(Align::Center);
    page.set_margin_top(24);
    page.set_margin_bottom(24);

    let heading = Label::new(Some(title));
    heading.add_css_class("menu-title");
    heading.set_margin_bottom(24);
    page.append(&heading);
    page
}

pub fn add_button(page: &GtkBox, label: &str, tone: Tone, on_click: impl Fn() + 'static) -> Button {
    let button = Button::with_label(label);
    button.add_css_class("menu-button");
    button.add_css_class(tone.css_class());
    button.set_size_request(BUTTON_WIDTH, -1);
    button.connect_clicked(move |_| on_click());
    page.append(&button);
    button
}

/// Statistics screen labels, refreshed each time the screen is shown.
pub struct StatsView {
    pub root: GtkBox,
    x_wins: Label,
    o_wins: Label,
    draws: Label,
    games: Label,
}

impl StatsView {
    pub fn new(i18n: &I18n) -> Self {
        let root = menu_page(&i18n.t("stats-title"));
        let make = || {
            let label = Label::new(None);
            label.add_css_class("stat-label");
            label.set_halign(Align::Start);
            root.append(&label);
            label
        };
        let view = Self {
            x_wins: make(),
            o_wins: make(),
            draws: make(),
            games: make(),
            root: root.clone(),
        };
        view.games.set_margin_bottom(16);
        view
    }

    pub fn refresh(&self, stats: &Statistics, i18n: &I18n) {
        self.x_wins.set_text(&i18n.t_arg("stats-x-wins", "count", stats.x_wins));
        self.o_wins.set_text(&i18n.t_arg("stats-o-wins", "count", stats.o_wins));
        self.draws.set_text(&i18n.t_arg("stats-draws", "count", stats.draws));
        self.games.set_text(&i18n.t_arg("stats-games", "count", stats.games));
    }
}

/// Settings screen: mark colors, who opens against the computer, statistics reset.
pub struct SettingsView {
    pub root: GtkBox,
    x_swatch: DrawingArea,
    o_swatch: DrawingArea,
    computer_begins: Switch,
}

impl SettingsView {
    pub fn new(state: Rc<RefCell<AppState>>, i18n: &I18n) -> Self {
        let root = menu_page(&i18n.t("settings-title"));

        let x_swatch = color_swatch(state.clone(), Player::X);
        let o_swatch = color_swatch(state.clone(), Player::O);
        for (player, swatch, label_id, tone) in [
            (Player::X, &x_swatch, "settings-x-color", Tone::Blue),
            (Player::O, &o_swatch, "settings-o-color", Tone::Red),
        ] {
            let row = GtkBox::new(Orientation::Horizontal, 8);
            let state = state.clone();
            let swatch_for_click = swatch.clone();
            let button = Button::with_label(&i18n.t(label_id));
            button.add_css_class("menu-button");
            button.add_css_class(tone.css_class());
            button.set_size_request(BUTTON_WIDTH - 48, -1);
            button.connect_clicked(move |_| {
                state
                    .borrow_mut()
                    .randomize_color(player, &mut rand::thread_rng());
                swatch_for_click.queue_draw();
            });
            row.append(&button);
            row.append(swatch);
            root.append(&row);
        }

        let begins_row = GtkBox::new(Orientation::Horizontal, 8);
        let begins_label = Label::new(Some(&i18n.t("settings-computer-begins")));
        begins_label.set_hexpand(true);
        begins_label.set_halign(Align::Start);
        let computer_begins = Switch::new();
        {
            let state = state.clone();
            computer_begins.connect_active_notify(move |sw| {
                let active = sw.is_active();
                if state.borrow().settings.computer_begins != active {
                    state.borrow_mut().set_computer_begins(active);
                }
            });
        }
        begins_row.append(&begins_label);
        begins_row.append(&computer_begins);
        root.append(&begins_row);

        Self {
            root,
            x_swatch,
            o_swatch,
            computer_begins,
        }
    }

    /// Callers must not hold a borrow of the app state: toggling the switch
    /// re-enters it through the notify handler.
    pub fn refresh(&self, computer_begins: bool) {
        self.computer_begins.set_active(computer_begins);
        self.x_swatch.queue_draw();
        self.o_swatch.queue_draw();
    }
}

fn color_swatch(state: Rc<RefCell<AppState>>, player: Player) -> DrawingArea {
    let swatch = DrawingArea::new();
    swatch.set_content_width(40);
    swatch.set_content_height(40);
    swatch.set_draw_func(move |_area, cr, w, h| {
        let palette = state.borrow().palette();
        let rgb: Rgb = match player {
            Player::X => palette.x,
            Player::O => palette.o,
        };
        let [r, g, b] = rgb.map(|c| c as f64 / 255.0);
        cr.set_source_rgb(r, g, b);
        cr.rectangle(0.0, 0.0, w as f64, h as f64);
        let _ = cr.fill();
    });
    swatch
}
