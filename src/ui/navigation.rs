/// Screens reachable from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    GameMode,
    Difficulty,
    Settings,
    Statistics,
    Game,
}

impl Screen {
    /// Name of the page inside the window's `gtk4::Stack`.
    pub fn page_name(self) -> &'static str {
        match self {
            Screen::MainMenu => "main",
            Screen::GameMode => "mode",
            Screen::Difficulty => "difficulty",
            Screen::Settings => "settings",
            Screen::Statistics => "statistics",
            Screen::Game => "game",
        }
    }
}

/// Explicit screen history. The main menu is always at the bottom.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            stack: vec![Screen::MainMenu],
        }
    }

    pub fn current(&self) -> Screen {
        self.stack.last().copied().unwrap_or(Screen::MainMenu)
    }

    /// Show `screen`. If it is already in the history, unwind back to it
    /// instead of stacking a second copy.
    pub fn open(&mut self, screen: Screen) -> Screen {
        if let Some(pos) = self.stack.iter().position(|&s| s == screen) {
            self.stack.truncate(pos + 1);
        } else {
            self.stack.push(screen);
        }
        self.current()
    }

    /// Swap the top screen for `screen` (e.g. finished game → statistics).
    pub fn replace(&mut self, screen: Screen) -> Screen {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
        self.open(screen)
    }

    /// Go to the previous screen. The main menu stays put.
    pub fn back(&mut self) -> Screen {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
        self.current()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_from_root_stays_on_main_menu() {
        let mut nav = Navigator::new();
        assert_eq!(nav.back(), Screen::MainMenu);
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn play_against_computer_and_back_out() {
        let mut nav = Navigator::new();
        nav.open(Screen::GameMode);
        nav.open(Screen::Difficulty);
        assert_eq!(nav.open(Screen::Game), Screen::Game);
        assert_eq!(nav.back(), Screen::Difficulty);
        assert_eq!(nav.back(), Screen::GameMode);
        assert_eq!(nav.back(), Screen::MainMenu);
    }

    #[test]
    fn finished_game_is_replaced_by_statistics() {
        let mut nav = Navigator::new();
        nav.open(Screen::GameMode);
        nav.open(Screen::Game);
        assert_eq!(nav.replace(Screen::Statistics), Screen::Statistics);
        assert_eq!(nav.back(), Screen::GameMode);
    }

    #[test]
    fn repeated_navigation_does_not_grow_history() {
        let mut nav = Navigator::new();
        for _ in 0..100 {
            nav.open(Screen::Settings);
            nav.open(Screen::MainMenu);
        }
        assert_eq!(nav.depth(), 1);

        nav.open(Screen::GameMode);
        nav.open(Screen::Difficulty);
        nav.open(Screen::GameMode);
        assert_eq!(nav.depth(), 2);
    }

    #[test]
    fn page_names_are_unique() {
        let screens = [
            Screen::MainMenu,
            Screen::GameMode,
            Screen::Difficulty,
            Screen::Settings,
            Screen::Statistics,
            Screen::Game,
        ];
        let mut names: Vec<_> = screens.iter().map(|s| s.page_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), screens.len());
    }
}
