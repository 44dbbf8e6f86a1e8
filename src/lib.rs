pub mod app;
pub mod cli;
pub mod document;
pub mod error;
pub mod format;
pub mod i18n;
pub mod models;
pub mod pagination;
pub mod render;
pub mod source;
pub mod types;
pub mod view_model;

pub use error::{LoadFailure, Result, ViewerError};
pub use view_model::{LeaderboardViewModel, ViewerConfig};
