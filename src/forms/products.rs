use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{Category, NewProduct, UnknownCategory, UpdateProduct};
use crate::forms::non_blank;

/// Maximum allowed length for a product title.
const TITLE_MAX_LEN: u64 = 128;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided title is empty after sanitization.
    #[error("product title cannot be blank")]
    BlankTitle,
    /// The provided description is empty after sanitization.
    #[error("product description cannot be blank")]
    BlankDescription,
    /// The provided category is outside the fixed set.
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),
    /// The provided price is negative.
    #[error("product price cannot be negative")]
    NegativePrice,
}

/// Payload accepted when creating a product.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductForm {
    /// Display title.
    #[validate(length(min = 1, max = TITLE_MAX_LEN))]
    pub title: String,
    /// Longer description.
    #[validate(length(min = 1))]
    pub description: String,
    /// Category name; must belong to the fixed set.
    pub category: String,
    /// Optional price in the smallest currency unit.
    pub price_cents: Option<i64>,
}

impl CreateProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct` owned
    /// by `owner`.
    pub fn into_new_product(self, owner: &str) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ProductFormError::BlankTitle);
        }

        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(ProductFormError::BlankDescription);
        }

        let category: Category = self.category.trim().parse()?;

        let price_cents = self.price_cents.unwrap_or(0);
        if price_cents < 0 {
            return Err(ProductFormError::NegativePrice);
        }

        Ok(NewProduct::new(owner, title, description, category).with_price_cents(price_cents))
    }
}

/// Payload accepted when patching a product. Absent and blank fields are
/// left untouched; the owner can never be changed through a patch.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductForm {
    /// Optional title update.
    pub title: Option<String>,
    /// Optional description update.
    pub description: Option<String>,
    /// Optional category update.
    pub category: Option<String>,
    /// Optional price update.
    pub price_cents: Option<i64>,
}

impl UpdateProductForm {
    /// Sanitizes the payload into a domain `UpdateProduct`, dropping blank
    /// fields from the patch.
    pub fn into_update_product(self) -> ProductFormResult<UpdateProduct> {
        let mut updates = UpdateProduct::new();

        if let Some(title) = non_blank(self.title) {
            updates = updates.title(title);
        }

        if let Some(description) = non_blank(self.description) {
            updates = updates.description(description);
        }

        if let Some(category) = non_blank(self.category) {
            updates = updates.category(category.parse()?);
        }

        if let Some(price_cents) = self.price_cents {
            if price_cents < 0 {
                return Err(ProductFormError::NegativePrice);
            }
            updates = updates.price_cents(price_cents);
        }

        Ok(updates)
    }
}
