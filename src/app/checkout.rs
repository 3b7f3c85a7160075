//! Headless checkout: replays an order script through a [`CheckoutSession`].

use crate::core::selection::needs_configuration;
use crate::core::session::{CheckoutSession, ItemPick};
use crate::domain::model::TransactionRecord;
use crate::domain::ports::TransactionSink;
use crate::utils::error::{PosError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderScript {
    #[serde(default)]
    pub customer: CustomerSpec,
    #[serde(default)]
    pub items: Vec<ScriptedItem>,
}

/// Guest unless `member_id` is given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerSpec {
    pub member_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedItem {
    pub id: String,
    pub size: Option<String>,
    /// group id -> option id
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl OrderScript {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| PosError::ConfigError {
            message: format!("Order script parsing error: {}", e),
        })
    }
}

fn add_scripted_item(session: &mut CheckoutSession, entry: &ScriptedItem) -> Result<()> {
    let configurable = session
        .catalog()
        .iter()
        .find(|i| i.id == entry.id)
        .map_or(true, needs_configuration);
    if !configurable {
        if let Some(size) = &entry.size {
            return Err(PosError::UnknownOption {
                item_id: entry.id.clone(),
                option: format!("size {}", size),
            });
        }
        if let Some((group_id, option_id)) = entry.options.iter().next() {
            return Err(PosError::UnknownOption {
                item_id: entry.id.clone(),
                option: format!("{}/{}", group_id, option_id),
            });
        }
    }

    match session.select_item(&entry.id)? {
        ItemPick::Configure(mut selection) => {
            if let Some(size) = &entry.size {
                selection.choose_size(size)?;
            }
            for (group_id, option_id) in &entry.options {
                selection.choose_option(group_id, option_id)?;
            }
            session.add_configured(selection)
        }
        ItemPick::Added => Ok(()),
    }
}

/// Fills the session's cart from `script` and leaves it on the review step.
pub fn fill_order(session: &mut CheckoutSession, script: &OrderScript) -> Result<()> {
    match &script.customer.member_id {
        Some(member_id) => {
            session.select_member()?;
            session.set_member_id(member_id)?;
        }
        None => session.select_guest()?,
    }
    session.continue_to_order()?;

    for entry in &script.items {
        for _ in 0..entry.quantity {
            add_scripted_item(session, entry)?;
        }
    }

    session.review()
}

/// Runs the whole wizard for `script` and returns the stored transaction.
pub async fn run_checkout<S>(
    session: &mut CheckoutSession,
    script: &OrderScript,
    sink: &S,
) -> Result<TransactionRecord>
where
    S: TransactionSink + ?Sized,
{
    fill_order(session, script)?;
    tracing::info!(
        "Order ready for review: {} lines, {} items",
        session.cart().len(),
        session.cart().item_count()
    );
    session.complete_transaction(sink).await
}
