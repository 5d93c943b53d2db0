pub mod advice;
pub mod analysis;
pub mod app;
pub mod config;
pub mod error;
pub mod food;
pub mod macro_tracker;
pub mod profile;
pub mod progress;
pub mod state;
pub mod tabs;
pub mod views;
