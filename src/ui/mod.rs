pub mod app;
pub mod board;
pub mod dialogs;
pub mod menu;
pub mod navigation;
pub mod rendering;
pub mod state;
