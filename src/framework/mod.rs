pub mod config;
pub use config::Config;

pub mod data;

pub mod logging;
pub mod poise;

pub mod secrets;
pub use secrets::Secrets;
