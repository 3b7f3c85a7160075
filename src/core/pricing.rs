//! Cart arithmetic. Everything is accumulated in `Decimal`; rounding only
//! happens when an amount is formatted for display.

use crate::domain::model::CartLine;
use rust_decimal::{Decimal, RoundingStrategy};

/// Loyalty discount (10%), applied to the amount due only.
pub const MEMBER_DISCOUNT_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Price of one unit of a configured line.
pub fn unit_price(line: &CartLine) -> Decimal {
    let size_modifier = line
        .selected_size
        .as_ref()
        .map(|s| s.price_modifier)
        .unwrap_or(Decimal::ZERO);
    let customizations: Decimal = line.selected_customizations.iter().map(|o| o.price).sum();

    line.item.base_price + size_modifier + customizations
}

/// `unit_price * quantity`. A negative result is returned as-is.
pub fn line_total(line: &CartLine) -> Decimal {
    unit_price(line) * Decimal::from(line.quantity)
}

pub fn cart_total<'a, I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = &'a CartLine>,
{
    lines.into_iter().map(line_total).sum()
}

pub fn member_discount(total: Decimal, is_member: bool) -> Decimal {
    if is_member {
        total * MEMBER_DISCOUNT_RATE
    } else {
        Decimal::ZERO
    }
}

pub fn amount_due(total: Decimal, is_member: bool) -> Decimal {
    total - member_discount(total, is_member)
}

/// Two decimal places, half away from zero.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(
        DISPLAY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    );
    format!("{:.2}", rounded)
}
