//! Cashier checkout flow: customer type -> order -> review -> complete.
//!
//! The session owns the catalog snapshot, the cart and the current step.
//! Every transition is an explicit method; calling one from the wrong step
//! returns `InvalidTransition` and leaves the session untouched.

use crate::core::cart::Cart;
use crate::core::pricing;
use crate::core::receipt::{Receipt, StoreProfile};
use crate::core::selection::{needs_configuration, Selection};
use crate::core::submission;
use crate::domain::model::{MemberId, MenuItem, TransactionRecord};
use crate::domain::ports::{CatalogSource, TransactionSink};
use crate::utils::error::{PosError, Result};
use rust_decimal::Decimal;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    CustomerType,
    Order,
    Review,
    Complete(TransactionRecord),
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::CustomerType => "Select Customer Type",
            Step::Order => "Order Items",
            Step::Review => "Review Order",
            Step::Complete(_) => "Complete Transaction",
        }
    }

}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of picking an item from the menu.
#[derive(Debug, Clone)]
pub enum ItemPick {
    /// Added straight to the cart.
    Added,
    /// Size/add-ons must be chosen first; finish with [`CheckoutSession::add_configured`].
    Configure(Selection),
}

#[derive(Debug, Clone)]
pub struct CheckoutSession {
    step: Step,
    catalog: Vec<MenuItem>,
    cart: Cart,
    is_member: bool,
    member_id_input: String,
    member_id: Option<MemberId>,
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutSession {
    pub fn new() -> Self {
        Self {
            step: Step::CustomerType,
            catalog: Vec::new(),
            cart: Cart::new(),
            is_member: false,
            member_id_input: String::new(),
            member_id: None,
        }
    }

    pub fn with_catalog(catalog: Vec<MenuItem>) -> Self {
        Self {
            catalog,
            ..Self::new()
        }
    }

    pub fn step(&self) -> &Step {
        &self.step
    }

    pub fn catalog(&self) -> &[MenuItem] {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn is_member(&self) -> bool {
        self.is_member
    }

    pub fn member_id(&self) -> Option<&MemberId> {
        self.member_id.as_ref()
    }

    pub fn transaction(&self) -> Option<&TransactionRecord> {
        match &self.step {
            Step::Complete(record) => Some(record),
            _ => None,
        }
    }

    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    /// Amount the customer pays: the member discount applies here only.
    pub fn amount_due(&self) -> Decimal {
        match &self.step {
            Step::Complete(record) => pricing::amount_due(record.total, record.is_member),
            _ => pricing::amount_due(self.cart.total(), self.is_member),
        }
    }

    /// Receipt of the stored transaction once complete, otherwise of the open cart.
    pub fn receipt<'a>(&'a self, profile: &'a StoreProfile) -> Receipt<'a> {
        match &self.step {
            Step::Complete(record) => Receipt::for_transaction(profile, record),
            _ => Receipt::for_cart(
                profile,
                self.cart.lines(),
                self.is_member,
                self.member_id.as_ref().map(MemberId::as_str),
            ),
        }
    }

    fn require(&self, expected: &Step, action: &str) -> Result<()> {
        if std::mem::discriminant(&self.step) != std::mem::discriminant(expected) {
            return Err(PosError::InvalidTransition {
                step: self.step.name().to_string(),
                action: action.to_string(),
            });
        }
        Ok(())
    }

    fn move_to(&mut self, next: Step) {
        tracing::info!("Checkout step: {} -> {}", self.step, next);
        self.step = next;
    }

    /// Replaces the catalog with the backend's menu. On failure the catalog is left empty.
    pub async fn load_catalog<C>(&mut self, source: &C) -> Result<usize>
    where
        C: CatalogSource + ?Sized,
    {
        match source.fetch_items().await {
            Ok(items) => {
                tracing::info!("Loaded {} menu items", items.len());
                self.catalog = items;
                Ok(self.catalog.len())
            }
            Err(e) => {
                tracing::warn!("Menu could not be loaded: {}", e);
                self.catalog.clear();
                Err(match e {
                    PosError::FetchFailed { .. } => e,
                    other => PosError::FetchFailed {
                        message: other.to_string(),
                    },
                })
            }
        }
    }

    pub fn select_guest(&mut self) -> Result<()> {
        self.require(&Step::CustomerType, "choose the customer type")?;
        self.is_member = false;
        Ok(())
    }

    pub fn select_member(&mut self) -> Result<()> {
        self.require(&Step::CustomerType, "choose the customer type")?;
        self.is_member = true;
        Ok(())
    }

    /// Stores the raw membership ID input (upper-cased). Validation happens on continue.
    pub fn set_member_id(&mut self, input: &str) -> Result<()> {
        self.require(&Step::CustomerType, "enter a membership ID")?;
        self.member_id_input = input.trim().to_ascii_uppercase();
        Ok(())
    }

    pub fn continue_to_order(&mut self) -> Result<()> {
        self.require(&Step::CustomerType, "continue to order")?;

        self.member_id = if self.is_member {
            Some(MemberId::parse(&self.member_id_input)?)
        } else {
            None
        };

        self.move_to(Step::Order);
        Ok(())
    }

    pub fn back(&mut self) -> Result<()> {
        match self.step {
            Step::Order => self.move_to(Step::CustomerType),
            Step::Review => self.move_to(Step::Order),
            _ => {
                return Err(PosError::InvalidTransition {
                    step: self.step.name().to_string(),
                    action: "go back".to_string(),
                })
            }
        }
        Ok(())
    }

    pub fn select_item(&mut self, item_id: &str) -> Result<ItemPick> {
        self.require(&Step::Order, "add items")?;

        let item = self
            .catalog
            .iter()
            .find(|i| i.id == item_id)
            .ok_or_else(|| PosError::UnknownItem {
                item_id: item_id.to_string(),
            })?;

        if needs_configuration(item) {
            return Ok(ItemPick::Configure(Selection::new(item)));
        }

        self.cart = self.cart.add_or_merge(item, Vec::new(), None);
        Ok(ItemPick::Added)
    }

    pub fn add_configured(&mut self, selection: Selection) -> Result<()> {
        self.require(&Step::Order, "add items")?;
        let (item, customizations, size) = selection.into_parts();
        self.cart = self.cart.add_or_merge(&item, customizations, size);
        Ok(())
    }

    pub fn review(&mut self) -> Result<()> {
        self.require(&Step::Order, "review the order")?;
        if self.cart.is_empty() {
            return Err(PosError::EmptyCart);
        }
        self.move_to(Step::Review);
        Ok(())
    }

    /// Submits the cart. Only a stored record moves the session to `Complete`;
    /// on failure the session stays on review with its cart intact.
    pub async fn complete_transaction<S>(&mut self, sink: &S) -> Result<TransactionRecord>
    where
        S: TransactionSink + ?Sized,
    {
        self.require(&Step::Review, "complete the transaction")?;

        let record = match submission::submit(
            sink,
            self.cart.lines(),
            self.is_member,
            self.member_id.clone(),
        )
        .await
        {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Transaction not saved, staying on review: {}", e);
                return Err(e);
            }
        };

        tracing::info!(
            "Transaction {} completed: total {}, amount due {}",
            record.id.as_deref().unwrap_or_default(),
            record.total,
            pricing::amount_due(record.total, record.is_member)
        );
        self.move_to(Step::Complete(record.clone()));
        Ok(record)
    }

    /// Clears the cart and returns to the first step. The customer choice is kept.
    pub fn start_new_transaction(&mut self) -> Result<()> {
        if !matches!(self.step, Step::Complete(_)) {
            return Err(PosError::InvalidTransition {
                step: self.step.name().to_string(),
                action: "start a new transaction".to_string(),
            });
        }
        self.cart = self.cart.reset();
        self.move_to(Step::CustomerType);
        Ok(())
    }

    /// Abandons the open order.
    pub fn cancel(&mut self) -> Result<()> {
        if matches!(self.step, Step::Complete(_)) {
            return Err(PosError::InvalidTransition {
                step: self.step.name().to_string(),
                action: "cancel".to_string(),
            });
        }
        self.cart = self.cart.reset();
        self.move_to(Step::CustomerType);
        Ok(())
    }
}
