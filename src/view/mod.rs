//! Views and navigation for the terminal client.

mod render;
mod route;
mod shell;
mod theme;

pub use render::{APP_TITLE, DataFormat, Renderer};
pub use route::Route;
pub use shell::{App, Console, Flow};
pub use theme::{THEME_KEY, Theme};
