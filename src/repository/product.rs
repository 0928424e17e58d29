use diesel::prelude::*;

use crate::{
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
        UpdateProduct as DomainUpdateProduct,
    },
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    repository::{DieselRepository, ProductReader, ProductWriter, RepositoryResult},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(DbProduct::into_domain))
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let ProductListQuery {
            category,
            pagination,
        } = query;

        let category_filter = category.map(|category| category.as_str());

        let mut count_query = products::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(category_value) = category_filter {
            count_query = count_query.filter(products::category.eq(category_value));
        }
        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = products::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(category_value) = category_filter {
            items = items.filter(products::category.eq(category_value));
        }

        items = items.order(products::id.asc());

        if let Some(pagination) = pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;
        let products = db_products
            .into_iter()
            .map(DbProduct::into_domain)
            .collect();

        Ok((total, products))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_new = DbNewProduct::from(new_product);

        let created = diesel::insert_into(products::table)
            .values(&db_new)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into_domain())
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::from(updates);

        let updated = diesel::update(products::table.filter(products::id.eq(product_id)))
            .set(&db_updates)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(updated.into_domain())
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(products::table.filter(products::id.eq(product_id)))
            .execute(&mut conn)?;

        if deleted == 0 {
            return Err(crate::repository::RepositoryError::NotFound);
        }

        Ok(())
    }
}
