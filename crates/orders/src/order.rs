//! Order documents as held by the content store (`_type == "orderSummary"`).
//!
//! The store owns these documents; this side only reads them whole, creates
//! new ones and deletes them by id. Every field except the id is optional on
//! read because older documents predate parts of the schema.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, de};

use shopdash_core::{Document, DocumentId, DomainError, DomainResult};

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10,15}$").expect("phone pattern is a valid regex"));

static POSTAL_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4,10}$").expect("postal code pattern is a valid regex"));

/// One entry of an order's `orderItems` array.
///
/// All three fields are nullable in the store. Aggregation treats a missing
/// number as zero; nothing here rejects it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "whole_number")]
    pub quantity: Option<i64>,
}

impl LineItem {
    pub fn new(product_name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            product_name: Some(product_name.into()),
            price: Some(price),
            quantity: Some(quantity),
        }
    }
}

/// Quantities are JSON numbers in the store; `2.0` is accepted as `2`.
fn whole_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(v) = number.as_i64() {
        return Ok(Some(v));
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
            Ok(Some(f as i64))
        }
        _ => Err(de::Error::custom(format!(
            "quantity must be a whole number, got {number}"
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    pub value: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub length: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    #[serde(default)]
    pub weight: Option<Weight>,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
}

/// Shipping details attached to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub name: String,
    pub phone: String,
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city_locality: String,
    pub state_province: String,
    pub postal_code: String,
    pub country_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_residential_indicator: Option<bool>,
}

impl ShippingAddress {
    /// Check the address against the order schema's field rules.
    pub fn validate(&self) -> DomainResult<()> {
        let name_len = self.name.chars().count();
        if !(2..=50).contains(&name_len) {
            return Err(DomainError::validation(
                "name must be between 2 and 50 characters",
            ));
        }
        if !PHONE_PATTERN.is_match(&self.phone) {
            return Err(DomainError::validation("Enter a valid phone number"));
        }
        for (field, value) in [
            ("addressLine1", &self.address_line1),
            ("cityLocality", &self.city_locality),
            ("stateProvince", &self.state_province),
            ("countryCode", &self.country_code),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{field} is required")));
            }
        }
        if !POSTAL_CODE_PATTERN.is_match(&self.postal_code) {
            return Err(DomainError::validation("Enter a valid postal code"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentDetails {
    #[serde(default)]
    pub shipment_id: Option<String>,
    #[serde(default)]
    pub ship_date: Option<DateTime<Utc>>,
}

/// A stored order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDocument {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(default)]
    pub order_items: Option<Vec<LineItem>>,
    #[serde(rename = "totalprice", default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<Package>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_to_address: Option<ShippingAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipment_details: Option<ShipmentDetails>,
}

impl OrderDocument {
    pub fn new(id: DocumentId, order_items: Option<Vec<LineItem>>) -> Self {
        Self {
            id,
            order_items,
            total_price: None,
            packages: None,
            ship_to_address: None,
            shipment_details: None,
        }
    }
}

impl Document for OrderDocument {
    const DOC_TYPE: &'static str = "orderSummary";

    type Draft = OrderDraft;

    fn list_query() -> String {
        format!(
            "*[_type == \"{}\"]{{ _id, orderItems[]{{productName, price, quantity}} }}",
            Self::DOC_TYPE
        )
    }
}

/// An order about to be created.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub order_items: Vec<LineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship_to_address: Option<ShippingAddress>,
}

impl OrderDraft {
    /// The dashboard creates orders holding exactly one line item.
    pub fn single_item(item: LineItem) -> Self {
        Self {
            order_items: vec![item],
            ship_to_address: None,
        }
    }

    pub fn with_shipping(mut self, address: ShippingAddress) -> Self {
        self.ship_to_address = Some(address);
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if let Some(address) = &self.ship_to_address {
            address.validate()?;
        }
        Ok(())
    }
}
