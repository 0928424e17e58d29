use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::{
    NewOrder as DomainNewOrder, NewOrderItem as DomainNewOrderItem, Order as DomainOrder,
    OrderItem as DomainOrderItem, UpdateOrder as DomainUpdateOrder,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
pub struct Order {
    pub id: i32,
    pub owner: String,
    pub address: Option<String>,
    pub message: Option<String>,
    pub payment: Option<String>,
    pub image_url: Option<String>,
    pub phone: i64,
    pub total_cents: i64,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::order_items)]
#[diesel(belongs_to(Order, foreign_key = order_id))]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price_cents: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder<'a> {
    pub owner: &'a str,
    pub address: Option<&'a str>,
    pub message: Option<&'a str>,
    pub payment: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub phone: i64,
    pub total_cents: i64,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::order_items)]
pub struct NewOrderItem<'a> {
    pub order_id: i32,
    pub product_id: i32,
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub price_cents: i64,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::orders)]
pub struct UpdateOrder<'a> {
    pub address: Option<&'a str>,
    pub message: Option<&'a str>,
    pub payment: Option<&'a str>,
    pub total_cents: Option<i64>,
    pub updated_at: NaiveDateTime,
}

impl Order {
    pub fn into_domain(self, items: Vec<OrderItem>) -> DomainOrder {
        DomainOrder {
            id: self.id,
            owner: self.owner,
            address: self.address,
            message: self.message,
            payment: self.payment.as_deref().map(Into::into),
            image_url: self.image_url,
            phone: self.phone,
            total_cents: self.total_cents,
            active: self.active,
            items: items.into_iter().map(OrderItem::into_domain).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl OrderItem {
    pub fn into_domain(self) -> DomainOrderItem {
        DomainOrderItem {
            id: self.id,
            product_id: self.product_id,
            title: self.title,
            description: self.description,
            category: self.category.as_str().into(),
            price_cents: self.price_cents,
            created_at: self.created_at,
        }
    }
}

impl From<(Order, Vec<OrderItem>)> for DomainOrder {
    fn from(value: (Order, Vec<OrderItem>)) -> Self {
        value.0.into_domain(value.1)
    }
}

impl<'a> From<&'a DomainNewOrder> for NewOrder<'a> {
    fn from(value: &'a DomainNewOrder) -> Self {
        Self {
            owner: value.owner.as_str(),
            address: value.address.as_deref(),
            message: value.message.as_deref(),
            payment: value.payment.map(|payment| payment.as_str()),
            image_url: value.image_url.as_deref(),
            phone: value.phone,
            total_cents: value.total_cents,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> NewOrderItem<'a> {
    pub fn from_domain(order_id: i32, value: &'a DomainNewOrderItem) -> Self {
        Self {
            order_id,
            product_id: value.product_id,
            title: value.title.as_str(),
            description: value.description.as_str(),
            category: value.category.as_str(),
            price_cents: value.price_cents,
        }
    }
}

impl<'a> From<&'a DomainUpdateOrder> for UpdateOrder<'a> {
    fn from(value: &'a DomainUpdateOrder) -> Self {
        Self {
            address: value.address.as_deref(),
            message: value.message.as_deref(),
            payment: value.payment.map(|payment| payment.as_str()),
            total_cents: value.total_cents,
            updated_at: value.updated_at,
        }
    }
}
