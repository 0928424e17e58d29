use chrono::Local;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::order::{
        NewOrder as DomainNewOrder, NewOrderItem as DomainNewOrderItem, Order as DomainOrder,
        UpdateOrder as DomainUpdateOrder,
    },
    models::order::{
        NewOrder as DbNewOrder, NewOrderItem as DbNewOrderItem, Order as DbOrder,
        OrderItem as DbOrderItem, UpdateOrder as DbUpdateOrder,
    },
    repository::{DieselRepository, OrderReader, OrderWriter, RepositoryError, RepositoryResult},
};

/// Load an order and its snapshots in insertion order.
fn load_order(conn: &mut SqliteConnection, order_id: i32) -> Result<DomainOrder, RepositoryError> {
    use crate::schema::{order_items, orders};

    let order = orders::table
        .filter(orders::id.eq(order_id))
        .first::<DbOrder>(conn)?;

    let items = order_items::table
        .filter(order_items::order_id.eq(order_id))
        .order(order_items::id.asc())
        .load::<DbOrderItem>(conn)?;

    Ok(DomainOrder::from((order, items)))
}

/// Resolve the current cart id for `owner` inside an open transaction.
fn cart_id_for_owner(conn: &mut SqliteConnection, owner: &str) -> Result<i32, RepositoryError> {
    use crate::schema::orders;

    orders::table
        .filter(orders::owner.eq(owner))
        .order(orders::id.asc())
        .select(orders::id)
        .first::<i32>(conn)
        .optional()?
        .ok_or(RepositoryError::NotFound)
}

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<DomainOrder>> {
        use crate::schema::{order_items, orders};

        let mut conn = self.conn()?;
        let order = orders::table
            .filter(orders::id.eq(id))
            .first::<DbOrder>(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let order_id = order.id;
        let items = order_items::table
            .filter(order_items::order_id.eq(order_id))
            .order(order_items::id.asc())
            .load::<DbOrderItem>(&mut conn)?;

        Ok(Some(DomainOrder::from((order, items))))
    }

    fn get_cart_by_owner(&self, owner: &str) -> RepositoryResult<Option<DomainOrder>> {
        use crate::schema::orders;

        let mut conn = self.conn()?;
        let order_id = orders::table
            .filter(orders::owner.eq(owner))
            .order(orders::id.asc())
            .select(orders::id)
            .first::<i32>(&mut conn)
            .optional()?;

        match order_id {
            Some(order_id) => Ok(Some(load_order(&mut conn, order_id)?)),
            None => Ok(None),
        }
    }
}

impl OrderWriter for DieselRepository {
    fn create_order(&self, new_order: &DomainNewOrder) -> RepositoryResult<DomainOrder> {
        use crate::schema::orders;

        let mut conn = self.conn()?;
        let db_new = DbNewOrder::from(new_order);

        let created = diesel::insert_into(orders::table)
            .values(&db_new)
            .get_result::<DbOrder>(&mut conn)?;

        Ok(created.into_domain(Vec::new()))
    }

    fn update_order(
        &self,
        order_id: i32,
        updates: &DomainUpdateOrder,
    ) -> RepositoryResult<DomainOrder> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainOrder, RepositoryError, _>(|conn| {
            let db_updates = DbUpdateOrder::from(updates);

            diesel::update(orders::table.filter(orders::id.eq(order_id)))
                .set(&db_updates)
                .get_result::<DbOrder>(conn)?;

            load_order(conn, order_id)
        })
    }

    fn delete_order(&self, order_id: i32) -> RepositoryResult<()> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        // Snapshots go with the order through the ON DELETE CASCADE clause.
        let deleted = diesel::delete(orders::table.filter(orders::id.eq(order_id)))
            .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn append_cart_item(
        &self,
        owner: &str,
        item: &DomainNewOrderItem,
    ) -> RepositoryResult<DomainOrder> {
        use crate::schema::{order_items, orders};

        let mut conn = self.conn()?;

        // A single-row INSERT inside one transaction: two concurrent appends
        // for the same owner serialize on the write lock and both land, which
        // a fetch-mutate-save of the whole items sequence would not guarantee.
        conn.immediate_transaction::<DomainOrder, RepositoryError, _>(|conn| {
            let order_id = cart_id_for_owner(conn, owner)?;

            diesel::insert_into(order_items::table)
                .values(&DbNewOrderItem::from_domain(order_id, item))
                .execute(conn)?;

            diesel::update(orders::table.filter(orders::id.eq(order_id)))
                .set(orders::updated_at.eq(Local::now().naive_utc()))
                .execute(conn)?;

            load_order(conn, order_id)
        })
    }

    fn remove_cart_item(&self, owner: &str, product_id: i32) -> RepositoryResult<DomainOrder> {
        use crate::schema::{order_items, orders};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainOrder, RepositoryError, _>(|conn| {
            let order_id = cart_id_for_owner(conn, owner)?;

            // First match by position; duplicates of the same product stay.
            let item_id = order_items::table
                .filter(order_items::order_id.eq(order_id))
                .filter(order_items::product_id.eq(product_id))
                .order(order_items::id.asc())
                .select(order_items::id)
                .first::<i32>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            diesel::delete(order_items::table.filter(order_items::id.eq(item_id)))
                .execute(conn)?;

            diesel::update(orders::table.filter(orders::id.eq(order_id)))
                .set(orders::updated_at.eq(Local::now().naive_utc()))
                .execute(conn)?;

            load_order(conn, order_id)
        })
    }
}
