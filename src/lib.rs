pub mod config;
pub mod enums;
pub mod error;
pub mod validate;
pub mod db;
pub mod evaluator;
pub mod channels;
pub mod services;
pub mod notifier;
pub mod sweeper;
pub mod api;

pub use config::Config;
pub use enums::{ NotificationType, PriceChangeType };
pub use error::{ AppError, Result };
