use crate::db::{DbConnection, DbPool};
use crate::domain::order::{NewOrder, NewOrderItem, Order, UpdateOrder};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};

pub mod errors;
pub mod order;
pub mod product;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

/// Diesel-backed repository implementation that wraps an r2d2 pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over catalog products.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

/// Write operations over catalog products.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, product_id: i32, updates: &UpdateProduct)
    -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over orders.
pub trait OrderReader {
    /// Look up an order by its own identifier.
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
    /// Locate the current cart for `owner`; owner-keyed, not id-keyed.
    fn get_cart_by_owner(&self, owner: &str) -> RepositoryResult<Option<Order>>;
}

/// Write operations over orders and their embedded snapshots.
pub trait OrderWriter {
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    fn update_order(&self, order_id: i32, updates: &UpdateOrder) -> RepositoryResult<Order>;
    fn delete_order(&self, order_id: i32) -> RepositoryResult<()>;

    /// Atomically locate the cart owned by `owner` and append `item` at the
    /// end of its sequence. Fails with `NotFound` when the owner has no cart.
    fn append_cart_item(&self, owner: &str, item: &NewOrderItem) -> RepositoryResult<Order>;

    /// Atomically locate the cart owned by `owner` and remove the first
    /// snapshot taken from `product_id`, preserving the relative order of the
    /// remainder. Fails with `NotFound` when the cart or the snapshot is
    /// absent.
    fn remove_cart_item(&self, owner: &str, product_id: i32) -> RepositoryResult<Order>;
}
