pub mod config;
pub mod error;
pub mod health;
pub mod item;

pub use config::Config;
pub use error::*;
pub use health::*;
pub use item::*;
