use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price_cents: i64,
    pub owner: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub price_cents: i64,
    pub owner: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub category: Option<&'a str>,
    pub price_cents: Option<i64>,
    pub updated_at: NaiveDateTime,
}

impl Product {
    pub fn into_domain(self) -> DomainProduct {
        DomainProduct {
            id: self.id,
            title: self.title,
            description: self.description,
            category: self.category.as_str().into(),
            price_cents: self.price_cents,
            owner: self.owner,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        value.into_domain()
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            title: value.title.as_str(),
            description: value.description.as_str(),
            category: value.category.as_str(),
            price_cents: value.price_cents,
            owner: value.owner.as_str(),
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            title: value.title.as_deref(),
            description: value.description.as_deref(),
            category: value.category.map(|category| category.as_str()),
            price_cents: value.price_cents,
            updated_at: value.updated_at,
        }
    }
}
