use crate::core::pricing;
use crate::domain::model::{CartLine, ConfigurationKey, CustomizationOption, MenuItem, SizeOption};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;

/// Ordered cart lines. Every operation returns a new cart and leaves `self` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the line with the same item, size and option-id set, or appends a new one.
    pub fn add_or_merge(
        &self,
        item: &MenuItem,
        customizations: Vec<CustomizationOption>,
        size: Option<SizeOption>,
    ) -> Cart {
        let key = ConfigurationKey {
            item_id: item.id.clone(),
            size: size.as_ref().map(|s| s.name.clone()),
            customization_ids: customizations
                .iter()
                .map(|o| o.id.clone())
                .collect::<BTreeSet<_>>(),
        };

        let mut lines = self.lines.clone();
        match lines.iter_mut().find(|l| l.configuration_key() == key) {
            Some(existing) => {
                existing.quantity += 1;
                tracing::debug!(
                    "Merged {} into existing line (qty {})",
                    item.name,
                    existing.quantity
                );
            }
            None => {
                tracing::debug!("Added new line for {}", item.name);
                lines.push(CartLine {
                    item: item.clone(),
                    quantity: 1,
                    selected_size: size,
                    selected_customizations: customizations,
                });
            }
        }

        Cart { lines }
    }

    pub fn reset(&self) -> Cart {
        Cart::new()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn total(&self) -> Decimal {
        pricing::cart_total(&self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CustomizationGroup, ItemType};
    use rust_decimal_macros::dec;

    fn option(id: &str, name: &str, price: Decimal) -> CustomizationOption {
        CustomizationOption {
            id: id.to_string(),
            name: name.to_string(),
            price,
        }
    }

    fn large() -> SizeOption {
        SizeOption {
            name: "Large".to_string(),
            price_modifier: dec!(20),
        }
    }

    fn latte() -> MenuItem {
        MenuItem {
            id: "latte".to_string(),
            code: "D-001".to_string(),
            name: "Cafe Latte".to_string(),
            base_price: dec!(100),
            category: "Espresso".to_string(),
            item_type: ItemType::Drink,
            sizes: vec![large()],
            customizations: vec![
                CustomizationGroup {
                    id: "milk".to_string(),
                    name: "Milk".to_string(),
                    options: vec![
                        option("oat", "Oat Milk", dec!(15)),
                        option("soy", "Soy Milk", dec!(10)),
                    ],
                },
                CustomizationGroup {
                    id: "shot".to_string(),
                    name: "Extra Shot".to_string(),
                    options: vec![option("single", "Single", dec!(30))],
                },
            ],
        }
    }

    fn croissant() -> MenuItem {
        MenuItem {
            id: "croissant".to_string(),
            code: "F-001".to_string(),
            name: "Butter Croissant".to_string(),
            base_price: dec!(50),
            category: "Pastry".to_string(),
            item_type: ItemType::Food,
            sizes: vec![],
            customizations: vec![],
        }
    }

    #[test]
    fn test_identical_adds_merge_into_one_line() {
        let item = latte();
        let oat = option("oat", "Oat Milk", dec!(15));

        let cart = Cart::new()
            .add_or_merge(&item, vec![oat.clone()], Some(large()))
            .add_or_merge(&item, vec![oat], Some(large()));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total(), dec!(270));
    }

    #[test]
    fn test_different_customization_appends_line() {
        let item = latte();
        let cart = Cart::new()
            .add_or_merge(&item, vec![option("oat", "Oat Milk", dec!(15))], Some(large()))
            .add_or_merge(&item, vec![option("soy", "Soy Milk", dec!(10))], Some(large()));

        assert_eq!(cart.len(), 2);
        assert!(cart.lines().iter().all(|l| l.quantity == 1));
    }

    #[test]
    fn test_different_size_appends_line() {
        let item = latte();
        let cart = Cart::new()
            .add_or_merge(&item, vec![], Some(large()))
            .add_or_merge(&item, vec![], None);

        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_option_order_does_not_prevent_merge() {
        let item = latte();
        let oat = option("oat", "Oat Milk", dec!(15));
        let shot = option("single", "Single", dec!(30));

        let cart = Cart::new()
            .add_or_merge(&item, vec![oat.clone(), shot.clone()], None)
            .add_or_merge(&item, vec![shot, oat], None);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_same_name_different_id_does_not_merge() {
        let item = latte();
        let cart = Cart::new()
            .add_or_merge(&item, vec![option("oat", "Oat Milk", dec!(15))], None)
            .add_or_merge(&item, vec![option("oat-barista", "Oat Milk", dec!(25))], None);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), dec!(240));
    }

    #[test]
    fn test_merge_keeps_line_order() {
        let drink = latte();
        let food = croissant();

        let cart = Cart::new()
            .add_or_merge(&drink, vec![], None)
            .add_or_merge(&food, vec![], None)
            .add_or_merge(&drink, vec![], None);

        assert_eq!(cart.lines()[0].item.id, "latte");
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.lines()[1].item.id, "croissant");
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_does_not_mutate_previous_snapshot() {
        let item = croissant();
        let first = Cart::new().add_or_merge(&item, vec![], None);
        let second = first.add_or_merge(&item, vec![], None);

        assert_eq!(first.lines()[0].quantity, 1);
        assert_eq!(second.lines()[0].quantity, 2);
    }

    #[test]
    fn test_reset_empties_cart() {
        let cart = Cart::new().add_or_merge(&croissant(), vec![], None);
        let empty = cart.reset();

        assert!(empty.is_empty());
        assert_eq!(empty.total(), Decimal::ZERO);
        assert_eq!(cart.len(), 1);
    }
}
