use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Owned;
use crate::domain::product::{Category, Product};

/// Accepted payment methods for an order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Cash on delivery.
    Cash,
    /// Debit card.
    Debit,
    /// Credit card.
    Credit,
}

/// Raised when a payment value is outside the fixed set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment method `{0}`")]
pub struct UnknownPaymentMethod(pub String);

impl PaymentMethod {
    /// Canonical string stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Debit => "Debit",
            PaymentMethod::Credit => "Credit",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Cash" => Ok(PaymentMethod::Cash),
            "Debit" => Ok(PaymentMethod::Debit),
            "Credit" => Ok(PaymentMethod::Credit),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

impl From<&str> for PaymentMethod {
    // Infallible conversion for values read back from storage; the schema
    // CHECK constraint keeps unknown methods out of the column.
    fn from(value: &str) -> Self {
        value.parse().unwrap_or(PaymentMethod::Cash)
    }
}

/// A product snapshot embedded in an order.
///
/// Copied from the catalog at add-time; later edits to the catalog product
/// never reach an already-embedded snapshot.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OrderItem {
    /// Unique identifier of the snapshot within the store.
    pub id: i32,
    /// Identifier of the catalog product the snapshot was taken from.
    pub product_id: i32,
    /// Product title at add-time.
    pub title: String,
    /// Product description at add-time.
    pub description: String,
    /// Product category at add-time.
    pub category: Category,
    /// Product price at add-time, in the smallest currency unit.
    pub price_cents: i64,
    /// Timestamp for when the snapshot was taken.
    pub created_at: NaiveDateTime,
}

/// Payload for appending a snapshot to an order.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    /// Identifier of the catalog product being copied.
    pub product_id: i32,
    /// Product title at add-time.
    pub title: String,
    /// Product description at add-time.
    pub description: String,
    /// Product category at add-time.
    pub category: Category,
    /// Product price at add-time.
    pub price_cents: i64,
}

impl NewOrderItem {
    /// Freeze the given catalog product into a snapshot payload.
    pub fn snapshot(product: &Product) -> Self {
        Self {
            product_id: product.id,
            title: product.title.clone(),
            description: product.description.clone(),
            category: product.category,
            price_cents: product.price_cents,
        }
    }
}

/// Domain representation of an order, the per-user cart aggregate.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Order {
    /// Unique identifier of the order.
    pub id: i32,
    /// Identifier of the user who exclusively controls the order.
    pub owner: String,
    /// Optional delivery address.
    pub address: Option<String>,
    /// Optional message attached by the buyer.
    pub message: Option<String>,
    /// Optional payment method.
    pub payment: Option<PaymentMethod>,
    /// Optional receipt or decoration asset.
    pub image_url: Option<String>,
    /// Contact phone number; unique across orders.
    pub phone: i64,
    /// Caller-maintained total; never recomputed by the aggregate.
    pub total_cents: i64,
    /// Whether the order has been placed, as opposed to an in-progress cart.
    pub active: bool,
    /// Embedded snapshots in insertion order.
    pub items: Vec<OrderItem>,
    /// Timestamp for when the order record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the order record.
    pub updated_at: NaiveDateTime,
}

impl Owned for Order {
    fn owner(&self) -> Option<&str> {
        Some(&self.owner)
    }
}

/// Payload required to insert a new order. The cart starts empty; snapshots
/// only ever enter through the append operation.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Identifier of the owning user.
    pub owner: String,
    /// Contact phone number.
    pub phone: i64,
    /// Optional delivery address.
    pub address: Option<String>,
    /// Optional message attached by the buyer.
    pub message: Option<String>,
    /// Optional payment method.
    pub payment: Option<PaymentMethod>,
    /// Optional receipt or decoration asset.
    pub image_url: Option<String>,
    /// Initial caller-maintained total.
    pub total_cents: i64,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewOrder {
    /// Build a new order payload with the supplied details and current timestamp.
    pub fn new(owner: impl Into<String>, phone: i64) -> Self {
        Self {
            owner: owner.into(),
            phone,
            address: None,
            message: None,
            payment: None,
            image_url: None,
            total_cents: 0,
            updated_at: Local::now().naive_utc(),
        }
    }

    /// Attach a delivery address to the order payload.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Attach a buyer message to the order payload.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach a payment method to the order payload.
    pub fn with_payment(mut self, payment: PaymentMethod) -> Self {
        self.payment = Some(payment);
        self
    }

    /// Attach an image URL to the order payload.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Override the initial total.
    pub fn with_total_cents(mut self, total_cents: i64) -> Self {
        self.total_cents = total_cents;
        self
    }
}

/// Patch data applied when updating an existing order.
///
/// Only the whitelisted fields are patchable; items are mutated exclusively
/// through the append/remove operations, and the owner is immutable.
#[derive(Debug, Clone)]
pub struct UpdateOrder {
    /// Optional address update.
    pub address: Option<String>,
    /// Optional message update.
    pub message: Option<String>,
    /// Optional payment method update.
    pub payment: Option<PaymentMethod>,
    /// Optional total update.
    pub total_cents: Option<i64>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateOrder {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self {
            address: None,
            message: None,
            payment: None,
            total_cents: None,
            updated_at: Local::now().naive_utc(),
        }
    }

    /// Update the delivery address.
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Update the buyer message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Update the payment method.
    pub fn payment(mut self, payment: PaymentMethod) -> Self {
        self.payment = Some(payment);
        self
    }

    /// Update the caller-maintained total.
    pub fn total_cents(mut self, total_cents: i64) -> Self {
        self.total_cents = Some(total_cents);
        self
    }

    /// Whether the patch carries any change at all.
    pub fn is_empty(&self) -> bool {
        self.address.is_none()
            && self.message.is_none()
            && self.payment.is_none()
            && self.total_cents.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        let now = Local::now().naive_utc();
        Product {
            id: 7,
            title: "Lemon cupcake".to_string(),
            description: "With candied zest".to_string(),
            category: Category::CakesAndCupcakes,
            price_cents: 450,
            owner: "baker".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn snapshot_copies_product_fields() {
        let product = sample_product();
        let snapshot = NewOrderItem::snapshot(&product);

        assert_eq!(snapshot.product_id, 7);
        assert_eq!(snapshot.title, "Lemon cupcake");
        assert_eq!(snapshot.description, "With candied zest");
        assert_eq!(snapshot.category, Category::CakesAndCupcakes);
        assert_eq!(snapshot.price_cents, 450);
    }

    #[test]
    fn payment_method_round_trips_through_canonical_strings() {
        for method in [PaymentMethod::Cash, PaymentMethod::Debit, PaymentMethod::Credit] {
            assert_eq!(method.as_str().parse::<PaymentMethod>(), Ok(method));
        }
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }
}
