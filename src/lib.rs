pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::http::ApiClient;
pub use config::PosConfig;
pub use self::core::{cart::Cart, receipt::Receipt, session::CheckoutSession, session::Step};
pub use utils::error::{PosError, Result};
