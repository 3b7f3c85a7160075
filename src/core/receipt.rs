use crate::core::pricing::{self, format_amount};
use crate::domain::model::{CartLine, TransactionRecord};
use chrono::{DateTime, Local, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

const RECEIPT_WIDTH: usize = 40;

/// Header/footer text printed on every receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreProfile {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub currency_symbol: String,
    pub cashier: String,
    pub footer: Vec<String>,
}

impl Default for StoreProfile {
    fn default() -> Self {
        Self {
            name: "HELL WEEK COFFEE".to_string(),
            address: "123 Coffee Street, Manila".to_string(),
            phone: "(123) 456-7890".to_string(),
            currency_symbol: "₱".to_string(),
            cashier: "Jane Doe".to_string(),
            footer: vec![
                "Thank you for your purchase!".to_string(),
                "Earn points with our rewards program".to_string(),
            ],
        }
    }
}

impl StoreProfile {
    pub fn money(&self, amount: Decimal) -> String {
        if amount.is_sign_negative() && !amount.is_zero() {
            format!("-{}{}", self.currency_symbol, format_amount(amount.abs()))
        } else {
            format!("{}{}", self.currency_symbol, format_amount(amount))
        }
    }

    /// `+₱20.00` / `-₱10.00`, used for size and add-on surcharges.
    fn surcharge(&self, amount: Decimal) -> String {
        if amount.is_sign_negative() && !amount.is_zero() {
            self.money(amount)
        } else {
            format!("+{}", self.money(amount))
        }
    }
}

/// Printable summary of a cart under review or of a stored transaction.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    profile: &'a StoreProfile,
    transaction_id: Option<&'a str>,
    date: DateTime<Utc>,
    lines: &'a [CartLine],
    is_member: bool,
    member_id: Option<&'a str>,
    total: Decimal,
}

impl<'a> Receipt<'a> {
    pub fn for_cart(
        profile: &'a StoreProfile,
        lines: &'a [CartLine],
        is_member: bool,
        member_id: Option<&'a str>,
    ) -> Self {
        Self {
            profile,
            transaction_id: None,
            date: Utc::now(),
            lines,
            is_member,
            member_id,
            total: pricing::cart_total(lines),
        }
    }

    pub fn for_transaction(profile: &'a StoreProfile, record: &'a TransactionRecord) -> Self {
        Self {
            profile,
            transaction_id: record.id.as_deref(),
            date: record.date,
            lines: &record.items,
            is_member: record.is_member,
            member_id: record.member_id.as_deref(),
            total: record.total,
        }
    }

    pub fn amount_due(&self) -> Decimal {
        pricing::amount_due(self.total, self.is_member)
    }
}

fn centered(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let len = text.chars().count();
    let pad = RECEIPT_WIDTH.saturating_sub(len) / 2;
    writeln!(f, "{}{}", " ".repeat(pad), text)
}

fn row(f: &mut fmt::Formatter<'_>, left: &str, right: &str) -> fmt::Result {
    let used = left.chars().count() + right.chars().count();
    let gap = RECEIPT_WIDTH.saturating_sub(used).max(1);
    writeln!(f, "{}{}{}", left, " ".repeat(gap), right)
}

impl fmt::Display for Receipt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.profile;
        let dashed = "- ".repeat(RECEIPT_WIDTH / 2);
        let solid = "-".repeat(RECEIPT_WIDTH);
        let local = self.date.with_timezone(&Local);

        centered(f, &p.name)?;
        centered(f, &p.address)?;
        centered(f, &p.phone)?;
        writeln!(f, "{}", dashed.trim_end())?;

        writeln!(f, "Date: {}", local.format("%Y-%m-%d"))?;
        writeln!(f, "Time: {}", local.format("%H:%M"))?;
        writeln!(f, "Cashier: {}", p.cashier)?;
        writeln!(
            f,
            "Transaction ID: {}",
            self.transaction_id.unwrap_or("(pending)")
        )?;
        if self.is_member {
            if let Some(member_id) = self.member_id {
                writeln!(f, "Member ID: {}", member_id)?;
            }
        }
        writeln!(f, "{}", solid)?;

        for line in self.lines {
            row(
                f,
                &format!("{} x {}", line.quantity, line.item.name),
                &p.money(pricing::line_total(line)),
            )?;
            if let Some(size) = &line.selected_size {
                writeln!(
                    f,
                    "    Size: {} ({})",
                    size.name,
                    p.surcharge(size.price_modifier)
                )?;
            }
            for option in &line.selected_customizations {
                writeln!(f, "    + {} ({})", option.name, p.surcharge(option.price))?;
            }
        }
        writeln!(f, "{}", solid)?;

        row(f, "TOTAL:", &p.money(self.total))?;
        if self.is_member {
            row(
                f,
                "Member Discount (10%):",
                &p.money(-pricing::member_discount(self.total, true)),
            )?;
            row(f, "AMOUNT DUE:", &p.money(self.amount_due()))?;
        }

        writeln!(f, "{}", dashed.trim_end())?;
        for text in &p.footer {
            centered(f, text)?;
        }
        Ok(())
    }
}
