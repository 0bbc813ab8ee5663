pub mod analysis;
pub mod api;
pub mod coaching;
pub mod config;
pub mod display;
pub mod error;
pub mod lookup;
pub mod server;

pub use config::Config;
pub use error::AppError;
