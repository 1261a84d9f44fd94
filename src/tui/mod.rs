//! Terminal front end over [`crate::logic::Console`].

pub mod app;
pub mod keymap;
pub mod ui;

pub use app::App;
