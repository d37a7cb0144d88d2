pub mod app;
pub mod components;
pub mod keymap;
pub mod theme;

pub use app::{EventLoop, EventSender, run_browser, run_cleanup};
pub use theme::{Role, Theme};
