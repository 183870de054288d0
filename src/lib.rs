pub mod api;
pub mod config;
pub mod error;
pub mod session;
pub mod state;
pub mod storage;
pub mod theme;
pub mod types;
pub mod ui;
pub mod views;
