pub mod config;
pub mod device;
pub mod error;

pub use config::Config;
pub use device::*;
pub use error::*;
