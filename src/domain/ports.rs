use crate::domain::model::{MenuItem, TransactionRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Read-only catalog provider (`GET /items`).
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_items(&self) -> Result<Vec<MenuItem>>;
}

/// External persistence collaborator for sales (`POST /transactions`).
///
/// Receives an unsaved record and returns the stored one, identifier included.
#[async_trait]
pub trait TransactionSink: Send + Sync {
    async fn create_transaction(&self, transaction: &TransactionRecord)
        -> Result<TransactionRecord>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
}
