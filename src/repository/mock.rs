use mockall::mock;

use super::{OrderReader, OrderWriter, ProductReader, ProductWriter};
use crate::domain::{
    order::{NewOrder, NewOrderItem, Order, UpdateOrder},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
};
use crate::repository::errors::RepositoryResult;

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub OrderReader {}

    impl OrderReader for OrderReader {
        fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
        fn get_cart_by_owner(&self, owner: &str) -> RepositoryResult<Option<Order>>;
    }
}

mock! {
    pub OrderWriter {}

    impl OrderWriter for OrderWriter {
        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn update_order(&self, order_id: i32, updates: &UpdateOrder) -> RepositoryResult<Order>;
        fn delete_order(&self, order_id: i32) -> RepositoryResult<()>;
        fn append_cart_item(&self, owner: &str, item: &NewOrderItem) -> RepositoryResult<Order>;
        fn remove_cart_item(&self, owner: &str, product_id: i32) -> RepositoryResult<Order>;
    }
}
