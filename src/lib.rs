pub mod config;
pub mod lookup;
pub mod models;
pub mod tmdb;
pub mod tui;
pub mod widgets;
