use rand::Rng;

use super::navigation::{Navigator, Screen};
use super::rendering::Palette;
use crate::game::logic::GameSession;
use crate::game::types::{Difficulty, GameMode, Player, Statistics};
use crate::storage::{JsonStatsStore, Settings, SettingsStore, StatsStore};

/// Everything the window shares between its screens.
pub struct AppState {
    pub navigator: Navigator,
    pub session: Option<GameSession>,
    pub settings: Settings,
    pub hovered: Option<(usize, usize)>,
    /// Set while a finished game's result is on screen; clicks are ignored.
    pub showing_result: bool,
    settings_store: SettingsStore,
    stats_store: JsonStatsStore,
}

impl AppState {
    pub fn new(settings_store: SettingsStore, stats_store: JsonStatsStore) -> Self {
        Self {
            navigator: Navigator::new(),
            session: None,
            settings: settings_store.load(),
            hovered: None,
            showing_result: false,
            settings_store,
            stats_store,
        }
    }

    /// Begin a fresh game, dropping any unfinished one.
    pub fn start_game(&mut self, mode: GameMode) {
        if let GameMode::VersusComputer(difficulty) = mode {
            self.update_settings(|s| s.difficulty = difficulty);
        }
        self.session = Some(GameSession::new(
            mode,
            self.settings.computer_begins,
            Box::new(self.stats_store.clone()),
        ));
        self.hovered = None;
        self.showing_result = false;
    }

    /// A game has been started and is not finished.
    pub fn game_in_progress(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| !s.outcome().is_terminal() && s.moves_made() > 0)
    }

    /// Difficulty of the most recent computer game, kept across restarts.
    pub fn last_difficulty(&self) -> Difficulty {
        self.settings.difficulty
    }

    pub fn statistics(&self) -> Statistics {
        self.stats_store.load()
    }

    pub fn reset_statistics(&mut self) {
        let mut stats = self.stats_store.load();
        stats.reset();
        if let Err(e) = self.stats_store.save(&stats) {
            tracing::warn!(error = %e, "failed to reset statistics");
        }
    }

    pub fn palette(&self) -> Palette {
        Palette {
            x: self.settings.x_color,
            o: self.settings.o_color,
        }
    }

    /// Give `player`'s marks a new random color.
    pub fn randomize_color<R: Rng + ?Sized>(&mut self, player: Player, rng: &mut R) {
        let color = [rng.gen(), rng.gen(), rng.gen()];
        self.update_settings(|s| match player {
            Player::X => s.x_color = color,
            Player::O => s.o_color = color,
        });
    }

    pub fn set_computer_begins(&mut self, enabled: bool) {
        self.update_settings(|s| s.computer_begins = enabled);
    }

    pub fn set_window_size(&mut self, width: i32, height: i32) {
        self.update_settings(|s| {
            s.window_width = Some(width);
            s.window_height = Some(height);
        });
    }

    pub fn open(&mut self, screen: Screen) -> Screen {
        self.navigator.open(screen)
    }

    /// Leaving the board abandons the game without recording it.
    pub fn back(&mut self) -> Screen {
        if self.navigator.current() == Screen::Game {
            self.session = None;
            self.showing_result = false;
        }
        self.navigator.back()
    }

    fn update_settings(&mut self, edit: impl FnOnce(&mut Settings)) {
        self.settings = self.settings_store.update(edit);
    }
}
