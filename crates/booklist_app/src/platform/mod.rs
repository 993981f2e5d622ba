//! Terminal shell around the booklist core: input, rendering and effect execution.
mod app;
mod config;
mod effects;
mod persistence;
mod ui;

pub use app::run_app;
