pub mod cart;
pub mod pricing;
pub mod receipt;
pub mod selection;
pub mod session;
pub mod submission;

pub use crate::domain::model::{CartLine, MenuItem, TransactionRecord};
pub use crate::domain::ports::{CatalogSource, ConfigProvider, TransactionSink};
pub use crate::utils::error::Result;
