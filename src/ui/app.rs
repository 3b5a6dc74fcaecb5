use std::cell::{OnceCell, RefCell};
use std::path::Path;
use std::rc::{Rc, Weak};

use gtk4::gdk::Display;
use gtk4::prelude::*;
use gtk4::{
    Application, ApplicationWindow, Box as GtkBox, Button, CssProvider, DrawingArea, HeaderBar,
    Label, Orientation, Stack, StackTransitionType, STYLE_PROVIDER_PRIORITY_APPLICATION,
};
use tracing::{debug, info};

use super::board;
use super::dialogs;
use super::menu::{self, SettingsView, StatsView, Tone};
use super::navigation::Screen;
use super::state::AppState;
use crate::game::types::{Difficulty, GameMode};
use crate::i18n::I18n;
use crate::storage::{JsonStatsStore, SettingsStore};

const CSS: &str = "
    .title-label  { font-weight: 700; font-size: 15px; }
    .menu-title   { font-weight: 700; font-size: 28px; }
    .menu-button  { font-size: 18px; padding: 8px; }
    .menu-green   { background: #00c000; color: white; }
    .menu-yellow  { background: #ffff00; color: black; }
    .menu-blue    { background: #0000ff; color: white; }
    .menu-red     { background: #ff0000; color: white; }
    .stat-label   { font-size: 18px; margin: 0 6px; }
";

/// Widgets and state shared by every screen's callbacks.
struct Shell {
    window: ApplicationWindow,
    stack: Stack,
    state: Rc<RefCell<AppState>>,
    i18n: Rc<I18n>,
    stats_view: StatsView,
    settings_view: SettingsView,
    board: OnceCell<DrawingArea>,
    difficulty_buttons: OnceCell<Vec<(Difficulty, Button)>>,
}

impl Shell {
    fn open(&self, screen: Screen) {
        let screen = self.state.borrow_mut().open(screen);
        self.show(screen);
    }

    fn back(&self) {
        let screen = self.state.borrow_mut().back();
        self.show(screen);
    }

    fn start_game(&self, mode: GameMode) {
        info!(?mode, "starting game");
        self.state.borrow_mut().start_game(mode);
        self.open(Screen::Game);
    }

    /// Result pause over: swap the board for the statistics screen.
    fn finish_game(&self) {
        let screen = {
            let mut st = self.state.borrow_mut();
            if !st.showing_result || st.navigator.current() != Screen::Game {
                return;
            }
            st.showing_result = false;
            st.session = None;
            st.navigator.replace(Screen::Statistics)
        };
        self.show(screen);
    }

    fn show(&self, screen: Screen) {
        debug!(?screen, depth = self.state.borrow().navigator.depth(), "show screen");
        match screen {
            Screen::Statistics => {
                let stats = self.state.borrow().statistics();
                self.stats_view.refresh(&stats, &self.i18n);
            }
            Screen::Settings => {
                let computer_begins = self.state.borrow().settings.computer_begins;
                self.settings_view.refresh(computer_begins);
            }
            Screen::Game => {
                if let Some(board) = self.board.get() {
                    board.queue_draw();
                }
            }
            Screen::MainMenu | Screen::GameMode | Screen::Difficulty => {}
        }
        self.stack.set_visible_child_name(screen.page_name());

        if screen == Screen::Difficulty {
            let last = self.state.borrow().last_difficulty();
            let buttons = self.difficulty_buttons.get();
            if let Some((_, button)) = buttons.and_then(|b| b.iter().find(|(d, _)| *d == last)) {
                button.grab_focus();
            }
        }
    }
}

/// Build and present the main application window.
pub fn build_ui(app: &Application, resources_dir: &Path, data_dir: &Path) {
    let state = Rc::new(RefCell::new(AppState::new(
        SettingsStore::in_dir(data_dir),
        JsonStatsStore::in_dir(data_dir),
    )));
    let i18n = Rc::new(I18n::load_from_dir(resources_dir));
    info!(lang = i18n.current_language(), "translations loaded");

    // ── CSS ──
    let provider = CssProvider::new();
    provider.load_from_data(CSS);
    if let Some(display) = Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }

    // ── Window ──
    let window = ApplicationWindow::builder()
        .application(app)
        .title(i18n.t("app-title"))
        .default_width(600)
        .default_height(700)
        .resizable(true)
        .build();
    {
        let st = state.borrow();
        if let (Some(w), Some(h)) = (st.settings.window_width, st.settings.window_height) {
            window.set_default_size(w, h);
        }
    }

    let header = HeaderBar::new();
    header.set_show_title_buttons(true);
    let header_title = Label::new(Some(&i18n.t("app-title")));
    header_title.add_css_class("title-label");
    header.set_title_widget(Some(&header_title));

    let stack = Stack::new();
    stack.set_transition_type(StackTransitionType::Crossfade);

    let shell = Rc::new(Shell {
        window: window.clone(),
        stack: stack.clone(),
        state: state.clone(),
        i18n: i18n.clone(),
        stats_view: StatsView::new(&i18n),
        settings_view: SettingsView::new(state.clone(), &i18n),
        board: OnceCell::new(),
        difficulty_buttons: OnceCell::new(),
    });

    build_main_menu(&shell);
    build_mode_menu(&shell);
    build_difficulty_menu(&shell);
    build_settings(&shell);
    build_statistics(&shell);
    build_game(&shell);
    shell.show(Screen::MainMenu);

    // ── Close-request handler (warn if game in progress) ──
    // The window owns the only strong reference to the shell from here on.
    window.connect_close_request(move |win| {
        let running = {
            let st = shell.state.borrow();
            st.navigator.current() == Screen::Game && st.game_in_progress()
        };
        if running {
            let win = win.clone();
            dialogs::confirm_close(&shell.window, &shell.i18n, move || win.destroy());
            gtk4::Inhibit(true)
        } else {
            gtk4::Inhibit(false)
        }
    });

    // Persist window size so it can be restored on next startup.
    {
        let state = state.clone();
        window.connect_destroy(move |win| {
            state.borrow_mut().set_window_size(win.width(), win.height());
        });
    }

    window.set_titlebar(Some(&header));
    window.set_child(Some(&stack));
    window.present();
}

/// Wrap a `Shell` method for a button callback without keeping the shell alive.
fn on<F>(shell: &Rc<Shell>, f: F) -> impl Fn() + Clone + 'static
where
    F: Fn(&Shell) + Clone + 'static,
{
    let weak: Weak<Shell> = Rc::downgrade(shell);
    move || {
        if let Some(shell) = weak.upgrade() {
            f(&shell);
        }
    }
}

fn build_main_menu(shell: &Rc<Shell>) {
    let i18n = &shell.i18n;
    let page = menu::menu_page(&i18n.t("app-title"));
    menu::add_button(
        &page,
        &i18n.t("menu-play"),
        Tone::Green,
        on(shell, |s| s.open(Screen::GameMode)),
    );
    menu::add_button(
        &page,
        &i18n.t("menu-settings"),
        Tone::Yellow,
        on(shell, |s| s.open(Screen::Settings)),
    );
    menu::add_button(
        &page,
        &i18n.t("menu-statistics"),
        Tone::Blue,
        on(shell, |s| s.open(Screen::Statistics)),
    );
    menu::add_button(
        &page,
        &i18n.t("menu-exit"),
        Tone::Red,
        on(shell, |s| {
            let win = s.window.clone();
            dialogs::confirm_exit(&s.window, &s.i18n, move || win.destroy());
        }),
    );
    shell.stack.add_named(&page, Some(Screen::MainMenu.page_name()));
}

fn build_mode_menu(shell: &Rc<Shell>) {
    let i18n = &shell.i18n;
    let page = menu::menu_page(&i18n.t("mode-title"));
    menu::add_button(
        &page,
        &i18n.t("mode-friend"),
        Tone::Green,
        on(shell, |s| s.start_game(GameMode::TwoPlayer)),
    );
    menu::add_button(
        &page,
        &i18n.t("mode-computer"),
        Tone::Yellow,
        on(shell, |s| s.open(Screen::Difficulty)),
    );
    menu::add_button(&page, &i18n.t("back"), Tone::Red, on(shell, Shell::back));
    shell.stack.add_named(&page, Some(Screen::GameMode.page_name()));
}

fn build_difficulty_menu(shell: &Rc<Shell>) {
    let i18n = &shell.i18n;
    let page = menu::menu_page(&i18n.t("difficulty-title"));
    let tones = [Tone::Green, Tone::Yellow, Tone::Red];
    let buttons = Difficulty::ALL
        .into_iter()
        .zip(tones)
        .map(|(difficulty, tone)| {
            let button = menu::add_button(
                &page,
                &i18n.t(difficulty.label_id()),
                tone,
                on(shell, move |s| s.start_game(GameMode::VersusComputer(difficulty))),
            );
            (difficulty, button)
        })
        .collect();
    let _ = shell.difficulty_buttons.set(buttons);
    menu::add_button(&page, &i18n.t("back"), Tone::Blue, on(shell, Shell::back));
    shell.stack.add_named(&page, Some(Screen::Difficulty.page_name()));
}

fn build_settings(shell: &Rc<Shell>) {
    let page = &shell.settings_view.root;
    menu::add_button(
        page,
        &shell.i18n.t("settings-reset"),
        Tone::Yellow,
        on(shell, |s| {
            let state = s.state.clone();
            dialogs::confirm_reset(&s.window, &s.i18n, move || {
                state.borrow_mut().reset_statistics();
            });
        }),
    );
    menu::add_button(page, &shell.i18n.t("back"), Tone::Red, on(shell, Shell::back));
    shell.stack.add_named(page, Some(Screen::Settings.page_name()));
}

fn build_statistics(shell: &Rc<Shell>) {
    let page = &shell.stats_view.root;
    menu::add_button(page, &shell.i18n.t("back"), Tone::Red, on(shell, Shell::back));
    shell.stack.add_named(page, Some(Screen::Statistics.page_name()));
}

fn build_game(shell: &Rc<Shell>) {
    let page = GtkBox::new(Orientation::Vertical, 8);
    let drawing_area = board::create_board(
        shell.state.clone(),
        shell.i18n.clone(),
        on(shell, Shell::finish_game),
    );
    page.append(&drawing_area);

    let back = menu::add_button(&page, &shell.i18n.t("back"), Tone::Red, on(shell, Shell::back));
    back.set_halign(gtk4::Align::Center);
    back.set_margin_bottom(8);

    let _ = shell.board.set(drawing_area);
    shell.stack.add_named(&page, Some(Screen::Game.page_name()));
}
