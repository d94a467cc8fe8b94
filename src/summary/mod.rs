//! The summary panel core
//!
//! Turns a repository snapshot into an ordered list of heterogeneous,
//! independently-renderable lines, keeps that list consistent under
//! concurrent change notifications, and maps a scrollable viewport with a
//! movable selection cursor onto it.

pub mod actions;
pub mod line;
pub mod nav;
pub mod rows;
pub mod view;
pub mod viewport;
pub mod window;

pub use actions::{Action, ActionKind};
pub use line::SummaryLine;
pub use nav::{ListNavigator, RowSource, SearchState};
pub use view::SummaryView;
pub use viewport::{ViewDimension, ViewportState};
pub use window::{BufferWindow, RenderWindow};
