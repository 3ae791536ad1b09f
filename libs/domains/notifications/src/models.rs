//! Data models for the notifications domain.
//!
//! Field names follow the storefront's JSON so orders can be deserialized
//! straight from request bodies or database documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A placed order. Read-only input to the sender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Opaque order identifier (document `_id` in the store).
    #[serde(alias = "_id")]
    pub id: String,
    /// Ordered line items. May be empty.
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub total_price: f64,
    /// When absent the email shows the time of sending.
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
}

impl Order {
    pub fn new(id: impl Into<String>, items: Vec<OrderItem>, total_price: f64) -> Self {
        Self {
            id: id.into(),
            items,
            total_price,
            order_date: None,
        }
    }

    pub fn with_order_date(mut self, order_date: DateTime<Utc>) -> Self {
        self.order_date = Some(order_date);
        self
    }
}

/// A single line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub size: String,
    #[serde(rename = "qty", alias = "quantity")]
    pub quantity: u32,
    /// Unit price.
    pub price: f64,
}

impl OrderItem {
    pub fn new(name: impl Into<String>, size: impl Into<String>, quantity: u32, price: f64) -> Self {
        Self {
            name: name.into(),
            size: size.into(),
            quantity,
            price,
        }
    }
}

/// The purchasing user, as far as the sender cares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
        }
    }

    /// The user's address, if one is set and not blank.
    pub fn email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}
