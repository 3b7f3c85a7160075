use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::utils::error::Result;
use crate::utils::validation::validate_member_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    Drink,
    Food,
    Merchandise,
}

/// A purchasable catalog entry. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub code: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
    pub category: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<SizeOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub customizations: Vec<CustomizationGroup>,
}

impl MenuItem {
    pub fn size(&self, name: &str) -> Option<&SizeOption> {
        self.sizes.iter().find(|s| s.name == name)
    }

    pub fn group(&self, group_id: &str) -> Option<&CustomizationGroup> {
        self.customizations.iter().find(|g| g.id == group_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeOption {
    pub name: String,
    /// Signed; added to the base price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price_modifier: Decimal,
}

/// Catalog ids arrive as strings or as numeric database keys.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Signed(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    })
}

/// Blank member ids (guest records) read as absent. No shape check: the
/// backend's copy is taken as stored.
fn blank_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Mutually exclusive add-on choices, e.g. milk type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizationGroup {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub options: Vec<CustomizationOption>,
}

impl CustomizationGroup {
    pub fn option(&self, option_id: &str) -> Option<&CustomizationOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizationOption {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Identity of a configured purchase. Two adds with equal keys merge into one line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigurationKey {
    pub item_id: String,
    pub size: Option<String>,
    pub customization_ids: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<SizeOption>,
    #[serde(default)]
    pub selected_customizations: Vec<CustomizationOption>,
}

impl CartLine {
    pub fn configuration_key(&self) -> ConfigurationKey {
        ConfigurationKey {
            item_id: self.item.id.clone(),
            size: self.selected_size.as_ref().map(|s| s.name.clone()),
            customization_ids: self
                .selected_customizations
                .iter()
                .map(|o| o.id.clone())
                .collect(),
        }
    }
}

/// Loyalty-program identifier as typed at the counter, always five
/// characters from `A-Z0-9`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberId(String);

impl MemberId {
    /// Upper-cases the raw input before validating it, like the counter keypad does.
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_ascii_uppercase();
        validate_member_id(&normalized)?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A completed (or about to be submitted) sale. `id` is assigned by the backend.
///
/// `total` is always the pre-discount cart total; the amount due for members
/// is derived from it on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: DateTime<Utc>,
    pub items: Vec<CartLine>,
    pub is_member: bool,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub member_id: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}
