use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::order::{NewOrder, UnknownPaymentMethod, UpdateOrder};
use crate::forms::non_blank;

/// Result type returned by the order form helpers.
pub type OrderFormResult<T> = Result<T, OrderFormError>;

/// Errors that can occur while processing order forms.
#[derive(Debug, Error)]
pub enum OrderFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided payment method is outside the fixed set.
    #[error(transparent)]
    UnknownPaymentMethod(#[from] UnknownPaymentMethod),
    /// The provided total is negative.
    #[error("order total cannot be negative")]
    NegativeTotal,
}

/// Payload accepted when creating an order (the cart).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderForm {
    /// Contact phone number; must be present and unique across orders.
    #[validate(range(min = 1))]
    pub phone: i64,
    /// Optional delivery address.
    pub address: Option<String>,
    /// Optional buyer message.
    pub message: Option<String>,
    /// Optional payment method name.
    pub payment: Option<String>,
    /// Optional receipt or decoration asset.
    pub image_url: Option<String>,
    /// Optional initial total.
    pub total_cents: Option<i64>,
}

impl CreateOrderForm {
    /// Validates and sanitizes the payload into a domain `NewOrder` owned by
    /// `owner`.
    pub fn into_new_order(self, owner: &str) -> OrderFormResult<NewOrder> {
        self.validate()?;

        let mut new_order = NewOrder::new(owner, self.phone);

        if let Some(address) = non_blank(self.address) {
            new_order = new_order.with_address(address);
        }

        if let Some(message) = non_blank(self.message) {
            new_order = new_order.with_message(message);
        }

        if let Some(payment) = non_blank(self.payment) {
            new_order = new_order.with_payment(payment.parse()?);
        }

        if let Some(image_url) = non_blank(self.image_url) {
            new_order = new_order.with_image_url(image_url);
        }

        if let Some(total_cents) = self.total_cents {
            if total_cents < 0 {
                return Err(OrderFormError::NegativeTotal);
            }
            new_order = new_order.with_total_cents(total_cents);
        }

        Ok(new_order)
    }
}

/// Payload accepted when patching an order.
///
/// Only the whitelisted fields appear here; items can only be mutated
/// through the add/remove operations. Blank fields are dropped so they never
/// overwrite stored values.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateOrderForm {
    /// Optional address update.
    pub address: Option<String>,
    /// Optional message update.
    pub message: Option<String>,
    /// Optional payment method update.
    pub payment: Option<String>,
    /// Optional total update.
    pub total_cents: Option<i64>,
}

impl UpdateOrderForm {
    /// Sanitizes the payload into a domain `UpdateOrder`, dropping blank
    /// fields from the patch.
    pub fn into_update_order(self) -> OrderFormResult<UpdateOrder> {
        let mut updates = UpdateOrder::new();

        if let Some(address) = non_blank(self.address) {
            updates = updates.address(address);
        }

        if let Some(message) = non_blank(self.message) {
            updates = updates.message(message);
        }

        if let Some(payment) = non_blank(self.payment) {
            updates = updates.payment(payment.parse()?);
        }

        if let Some(total_cents) = self.total_cents {
            if total_cents < 0 {
                return Err(OrderFormError::NegativeTotal);
            }
            updates = updates.total_cents(total_cents);
        }

        Ok(updates)
    }
}
