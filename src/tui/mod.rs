//! Terminal UI module using ratatui

pub mod app;
pub mod event;
pub mod theme;

pub use app::App;
pub use event::{AppEvent, EventLoop, InputEvent};
pub use theme::{ColorMode, Theme};
