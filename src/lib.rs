pub mod api;
pub mod app;
pub mod assets;
pub mod config;
pub mod error;
pub mod pages;
pub mod render;
pub mod state;
pub mod static_files;
