use crate::domain::model::{MenuItem, TransactionRecord};
use crate::domain::ports::{CatalogSource, ConfigProvider, TransactionSink};
use crate::utils::error::{PosError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// `reqwest` client for the POS backend (`/items`, `/transactions`).
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            base_url: config.api_base_url().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl CatalogSource for ApiClient {
    async fn fetch_items(&self) -> Result<Vec<MenuItem>> {
        let url = self.endpoint("items");
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PosError::FetchFailed {
                message: e.to_string(),
            })?;

        tracing::debug!("API response status: {}", response.status());
        if !response.status().is_success() {
            return Err(PosError::FetchFailed {
                message: format!("GET {} returned {}", url, response.status()),
            });
        }

        response
            .json::<Vec<MenuItem>>()
            .await
            .map_err(|e| PosError::FetchFailed {
                message: format!("invalid menu payload: {}", e),
            })
    }
}

#[async_trait]
impl TransactionSink for ApiClient {
    async fn create_transaction(
        &self,
        transaction: &TransactionRecord,
    ) -> Result<TransactionRecord> {
        let url = self.endpoint("transactions");
        tracing::debug!("Posting transaction to: {}", url);

        let response = self
            .client
            .post(&url)
            .json(transaction)
            .send()
            .await
            .map_err(|e| PosError::SubmissionFailed {
                message: e.to_string(),
            })?;

        tracing::debug!("API response status: {}", response.status());
        if !response.status().is_success() {
            return Err(PosError::SubmissionFailed {
                message: format!("POST {} returned {}", url, response.status()),
            });
        }

        response
            .json::<TransactionRecord>()
            .await
            .map_err(|e| PosError::SubmissionFailed {
                message: format!("invalid transaction payload: {}", e),
            })
    }
}
