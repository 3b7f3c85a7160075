use coffee_pos::core::pricing::{amount_due, cart_total, line_total};
use coffee_pos::domain::model::{CustomizationOption, ItemType, MenuItem, SizeOption};
use coffee_pos::Cart;
use proptest::prelude::*;
use proptest::test_runner::Config;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn item(id: &str, base: Decimal) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        code: String::new(),
        name: id.to_string(),
        base_price: base,
        category: "Test".to_string(),
        item_type: ItemType::Drink,
        sizes: vec![],
        customizations: vec![],
    }
}

fn options(ids: &[u8]) -> Vec<CustomizationOption> {
    ids.iter()
        .map(|i| CustomizationOption {
            id: format!("opt-{}", i),
            name: "Same Name".to_string(),
            price: Decimal::from(*i),
        })
        .collect()
}

#[test]
fn test_worked_example_two_lines() {
    let latte = item("latte", dec!(100));
    let cookie = item("cookie", dec!(50));
    let large = SizeOption {
        name: "Large".to_string(),
        price_modifier: dec!(20),
    };
    let oat = CustomizationOption {
        id: "oat".to_string(),
        name: "Oat Milk".to_string(),
        price: dec!(15),
    };

    let cart = Cart::new()
        .add_or_merge(&latte, vec![oat.clone()], Some(large.clone()))
        .add_or_merge(&cookie, vec![], None)
        .add_or_merge(&latte, vec![oat], Some(large));

    assert_eq!(line_total(&cart.lines()[0]), dec!(270));
    assert_eq!(line_total(&cart.lines()[1]), dec!(50));
    assert_eq!(cart_total(cart.lines()), dec!(320));
    assert_eq!(amount_due(cart.total(), true), dec!(288.00));
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn repeated_identical_adds_make_one_line(
        base in 0i64..100_000,
        picks in proptest::collection::vec(0u8..6, 0..4),
        times in 1u32..10,
    ) {
        let menu_item = item("brew", Decimal::new(base, 2));
        let mut cart = Cart::new();
        for n in 0..times {
            // rotate the option order on every add
            let mut chosen = options(&picks);
            let len = chosen.len().max(1);
            chosen.rotate_left(n as usize % len);
            cart = cart.add_or_merge(&menu_item, chosen, None);
        }

        prop_assert_eq!(cart.len(), 1);
        prop_assert_eq!(cart.lines()[0].quantity, times);
        prop_assert_eq!(cart.item_count(), times);
    }

    #[test]
    fn distinct_option_sets_make_distinct_lines(
        a in proptest::collection::btree_set(0u8..8, 0..4),
        b in proptest::collection::btree_set(0u8..8, 0..4),
    ) {
        prop_assume!(a != b);
        let menu_item = item("brew", dec!(90));
        let a: Vec<u8> = a.into_iter().collect();
        let b: Vec<u8> = b.into_iter().collect();

        let cart = Cart::new()
            .add_or_merge(&menu_item, options(&a), None)
            .add_or_merge(&menu_item, options(&b), None);

        prop_assert_eq!(cart.len(), 2);
    }

    #[test]
    fn cart_total_is_sum_of_lines(bases in proptest::collection::vec(0i64..50_000, 0..10)) {
        let mut cart = Cart::new();
        for (i, base) in bases.iter().enumerate() {
            cart = cart.add_or_merge(&item(&format!("item-{}", i), Decimal::new(*base, 2)), vec![], None);
        }
        let expected: Decimal = bases.iter().map(|b| Decimal::new(*b, 2)).sum();
        prop_assert_eq!(cart.total(), expected);
    }
}
