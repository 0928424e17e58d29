use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Owned;
use crate::pagination::Pagination;

/// Fixed set of catalog categories.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Baked goods: cakes and cupcakes.
    #[serde(rename = "cakes and cupcakes")]
    CakesAndCupcakes,
    /// Handmade crafts.
    #[serde(rename = "crafts")]
    Crafts,
    /// Smaller sweets and treats.
    #[serde(rename = "treats")]
    Treats,
}

/// Raised when a category value is outside the fixed set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

impl Category {
    /// Canonical string stored in the database and returned in responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CakesAndCupcakes => "cakes and cupcakes",
            Category::Crafts => "crafts",
            Category::Treats => "treats",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "cakes and cupcakes" => Ok(Category::CakesAndCupcakes),
            "crafts" => Ok(Category::Crafts),
            "treats" => Ok(Category::Treats),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

impl From<&str> for Category {
    // Infallible conversion for values read back from storage; the schema
    // CHECK constraint keeps unknown categories out of the column.
    fn from(value: &str) -> Self {
        value.parse().unwrap_or(Category::Crafts)
    }
}

/// Domain representation of a catalog product.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Display title.
    pub title: String,
    /// Longer description shown on the product page.
    pub description: String,
    /// Category from the fixed set.
    pub category: Category,
    /// Price in the smallest currency unit.
    pub price_cents: i64,
    /// Identifier of the user who created the product.
    pub owner: String,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

impl Owned for Product {
    fn owner(&self) -> Option<&str> {
        Some(&self.owner)
    }
}

/// Payload required to insert a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Display title.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Category from the fixed set.
    pub category: Category,
    /// Price in the smallest currency unit.
    pub price_cents: i64,
    /// Identifier of the creating user.
    pub owner: String,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    /// Build a new product payload with the supplied details and current timestamp.
    pub fn new(
        owner: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category,
            price_cents: 0,
            owner: owner.into(),
            updated_at: Local::now().naive_utc(),
        }
    }

    /// Attach a price to the product payload.
    pub fn with_price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = price_cents;
        self
    }
}

/// Patch data applied when updating an existing product.
///
/// `None` fields are left untouched; the owner is never patchable.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    /// Optional title update.
    pub title: Option<String>,
    /// Optional description update.
    pub description: Option<String>,
    /// Optional category update.
    pub category: Option<Category>,
    /// Optional price update.
    pub price_cents: Option<i64>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProduct {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProduct {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self {
            title: None,
            description: None,
            category: None,
            price_cents: None,
            updated_at: Local::now().naive_utc(),
        }
    }

    /// Update the product title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Update the product description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Update the product category.
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Update the product price.
    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }
}

/// Query definition used to list catalog products.
#[derive(Debug, Clone)]
pub struct ProductListQuery {
    /// Optional category filter.
    pub category: Option<Category>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl Default for ProductListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductListQuery {
    /// Construct a query that targets the whole catalog.
    pub fn new() -> Self {
        Self {
            category: None,
            pagination: None,
        }
    }

    /// Filter the results by category.
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_canonical_strings() {
        for category in [Category::CakesAndCupcakes, Category::Crafts, Category::Treats] {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = "pottery".parse::<Category>().unwrap_err();
        assert_eq!(err, UnknownCategory("pottery".to_string()));
    }
}
