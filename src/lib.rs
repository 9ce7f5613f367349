pub mod analytics;
pub mod app;
pub mod chat;
pub mod config;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use analytics::{MoodCategory, MoodSample, categorize, predict_next, summarize, window_stats};
pub use app::router;
pub use config::Config;
pub use state::AppState;
