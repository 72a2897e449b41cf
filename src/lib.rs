pub mod app;
pub mod commands;
pub mod config;
pub mod directory;
pub mod error;
pub mod models;
pub mod query;
pub mod render;
pub mod storage;
pub mod store;
pub mod theme;
pub mod view;

pub use app::TodoApp;
pub use error::{Result, TodoError};
