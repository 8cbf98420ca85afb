//! Ratatui front-end: a numbered menu over the in-memory tune snapshot.
//!
//! `app` owns the state machine and rendering, `forms` the query prompt,
//! `screens` the results table state, and `terminal` the crossterm event loop.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
