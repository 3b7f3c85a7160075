use crate::domain::model::{CustomizationOption, MenuItem, SizeOption};
use crate::utils::error::{PosError, Result};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// True when the cashier has to pick a size or add-ons before the item goes into the cart.
pub fn needs_configuration(item: &MenuItem) -> bool {
    !item.sizes.is_empty() || !item.customizations.is_empty()
}

/// In-progress configuration of one menu item: at most one size, at most
/// one option per customization group.
#[derive(Debug, Clone)]
pub struct Selection {
    item: MenuItem,
    size: Option<SizeOption>,
    // group id -> option id
    chosen: HashMap<String, String>,
}

impl Selection {
    pub fn new(item: &MenuItem) -> Self {
        Self {
            item: item.clone(),
            size: None,
            chosen: HashMap::new(),
        }
    }

    pub fn item(&self) -> &MenuItem {
        &self.item
    }

    pub fn size(&self) -> Option<&SizeOption> {
        self.size.as_ref()
    }

    pub fn choose_size(&mut self, name: &str) -> Result<()> {
        let size = self
            .item
            .size(name)
            .cloned()
            .ok_or_else(|| PosError::UnknownOption {
                item_id: self.item.id.clone(),
                option: format!("size {}", name),
            })?;
        self.size = Some(size);
        Ok(())
    }

    /// Picks `option_id` in `group_id`, replacing any earlier pick in that group.
    pub fn choose_option(&mut self, group_id: &str, option_id: &str) -> Result<()> {
        let known = self
            .item
            .group(group_id)
            .and_then(|g| g.option(option_id))
            .is_some();
        if !known {
            return Err(PosError::UnknownOption {
                item_id: self.item.id.clone(),
                option: format!("{}/{}", group_id, option_id),
            });
        }

        self.chosen
            .insert(group_id.to_string(), option_id.to_string());
        Ok(())
    }

    /// Chosen options, ordered as their groups appear on the item.
    pub fn customizations(&self) -> Vec<CustomizationOption> {
        self.item
            .customizations
            .iter()
            .filter_map(|group| {
                self.chosen
                    .get(&group.id)
                    .and_then(|option_id| group.option(option_id))
                    .cloned()
            })
            .collect()
    }

    /// Price of one unit with the current picks.
    pub fn unit_price(&self) -> Decimal {
        let size = self
            .size
            .as_ref()
            .map(|s| s.price_modifier)
            .unwrap_or(Decimal::ZERO);
        let options: Decimal = self.customizations().iter().map(|o| o.price).sum();
        self.item.base_price + size + options
    }

    pub fn into_parts(self) -> (MenuItem, Vec<CustomizationOption>, Option<SizeOption>) {
        let customizations = self.customizations();
        (self.item, customizations, self.size)
    }
}
