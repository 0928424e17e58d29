use serde::Deserialize;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::product::{Category, Product, ProductListQuery};
use crate::forms::products::{CreateProductForm, UpdateProductForm};
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult, ensure_ownership};

/// Query parameters accepted by the catalog listing.
#[derive(Debug, Default, Deserialize)]
pub struct ItemsQuery {
    /// Page requested by the client (1-based). Absent means everything.
    pub page: Option<usize>,
}

/// List the whole catalog, optionally paginated.
pub fn list_products<R>(repo: &R, query: ItemsQuery) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    let mut list_query = ProductListQuery::new();

    if let Some(page) = query.page {
        list_query = list_query.paginate(page.max(1), DEFAULT_ITEMS_PER_PAGE);
    }

    let (_, products) = repo.list_products(list_query).map_err(ServiceError::from)?;
    Ok(products)
}

/// Fetch one product by id.
pub fn get_product<R>(repo: &R, product_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// List the products in one category; an empty category reads as NotFound
/// because the boundary promises a non-empty result.
pub fn products_in_category<R>(repo: &R, category: Category) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    let (_, products) = repo
        .list_products(ProductListQuery::new().category(category))
        .map_err(ServiceError::from)?;

    if products.is_empty() {
        return Err(ServiceError::NotFound);
    }

    Ok(products)
}

/// Create a catalog product owned by the caller.
pub fn create_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let payload = form
        .into_new_product(&user.sub)
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    repo.create_product(&payload).map_err(ServiceError::from)
}

/// Patch a product after the ownership guard passes.
pub fn update_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: UpdateProductForm,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let product = repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    ensure_ownership(user, &product)?;

    let updates = form
        .into_update_product()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    repo.update_product(product_id, &updates)
        .map_err(ServiceError::from)
}

/// Delete a product after the ownership guard passes.
pub fn delete_product<R>(repo: &R, user: &AuthenticatedUser, product_id: i32) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let product = repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    ensure_ownership(user, &product)?;

    repo.delete_product(product_id).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::product::{NewProduct, UpdateProduct};
    use crate::repository::RepositoryResult;
    use crate::repository::mock::{MockProductReader, MockProductWriter};

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn sample_product(id: i32, owner: &str, category: Category) -> Product {
        Product {
            id,
            title: format!("Product {id}"),
            description: "Freshly made".to_string(),
            category,
            price_cents: 500,
            owner: owner.to_string(),
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    fn user(sub: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: sub.to_string(),
            exp: 0,
        }
    }

    struct FakeRepo {
        reader: MockProductReader,
        writer: MockProductWriter,
    }

    impl FakeRepo {
        fn new() -> Self {
            Self {
                reader: MockProductReader::new(),
                writer: MockProductWriter::new(),
            }
        }
    }

    impl ProductReader for FakeRepo {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>> {
            self.reader.get_product_by_id(id)
        }

        fn list_products(
            &self,
            query: ProductListQuery,
        ) -> RepositoryResult<(usize, Vec<Product>)> {
            self.reader.list_products(query)
        }
    }

    impl ProductWriter for FakeRepo {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
            self.writer.create_product(new_product)
        }

        fn update_product(
            &self,
            product_id: i32,
            updates: &UpdateProduct,
        ) -> RepositoryResult<Product> {
            self.writer.update_product(product_id, updates)
        }

        fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
            self.writer.delete_product(product_id)
        }
    }

    #[test]
    fn list_products_paginates_when_a_page_is_requested() {
        let mut repo = FakeRepo::new();

        repo.reader
            .expect_list_products()
            .times(1)
            .withf(|query| {
                let pagination = query.pagination.expect("expected pagination to be set");
                assert_eq!(pagination.page, 2);
                assert_eq!(pagination.per_page, DEFAULT_ITEMS_PER_PAGE);
                query.category.is_none()
            })
            .returning(|_| Ok((0, Vec::new())));

        let products = list_products(&repo, ItemsQuery { page: Some(2) }).expect("expected success");
        assert!(products.is_empty());
    }

    #[test]
    fn get_product_missing_is_not_found() {
        let mut repo = FakeRepo::new();
        repo.reader
            .expect_get_product_by_id()
            .returning(|_| Ok(None));

        assert!(matches!(
            get_product(&repo, 4),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn empty_category_reads_as_not_found() {
        let mut repo = FakeRepo::new();
        repo.reader
            .expect_list_products()
            .withf(|query| query.category == Some(Category::Treats))
            .returning(|_| Ok((0, Vec::new())));

        assert!(matches!(
            products_in_category(&repo, Category::Treats),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn category_filter_returns_matching_products() {
        let mut repo = FakeRepo::new();
        repo.reader
            .expect_list_products()
            .returning(|_| Ok((1, vec![sample_product(1, "u1", Category::Crafts)])));

        let products = products_in_category(&repo, Category::Crafts).expect("expected success");
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].category, Category::Crafts);
    }

    #[test]
    fn create_product_sets_the_caller_as_owner() {
        let mut repo = FakeRepo::new();

        repo.writer
            .expect_create_product()
            .times(1)
            .withf(|payload| {
                assert_eq!(payload.owner, "u1");
                assert_eq!(payload.title, "Gingerbread");
                payload.category == Category::Treats
            })
            .returning(|payload| {
                let mut created = sample_product(9, payload.owner.as_str(), payload.category);
                created.title = payload.title.clone();
                Ok(created)
            });

        let form = CreateProductForm {
            title: "Gingerbread".to_string(),
            description: "Spiced".to_string(),
            category: "treats".to_string(),
            price_cents: Some(300),
        };

        let created = create_product(&repo, &user("u1"), form).expect("expected success");
        assert_eq!(created.owner, "u1");
        assert_eq!(created.title, "Gingerbread");
    }

    #[test]
    fn create_product_rejects_unknown_category() {
        let repo = FakeRepo::new();

        let form = CreateProductForm {
            title: "Vase".to_string(),
            description: "Clay".to_string(),
            category: "pottery".to_string(),
            price_cents: None,
        };

        assert!(matches!(
            create_product(&repo, &user("u1"), form),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn update_product_requires_ownership() {
        let mut repo = FakeRepo::new();
        repo.reader
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id, "alice", Category::Crafts))));

        let result = update_product(&repo, &user("bob"), 3, UpdateProductForm::default());

        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }

    #[test]
    fn update_product_applies_the_patch_for_the_owner() {
        let mut repo = FakeRepo::new();
        repo.reader
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id, "alice", Category::Crafts))));

        repo.writer
            .expect_update_product()
            .times(1)
            .withf(|product_id, updates| {
                assert_eq!(*product_id, 3);
                updates.title.as_deref() == Some("Knit scarf")
            })
            .returning(|id, _| Ok(sample_product(id, "alice", Category::Crafts)));

        let form = UpdateProductForm {
            title: Some("Knit scarf".to_string()),
            ..UpdateProductForm::default()
        };

        assert!(update_product(&repo, &user("alice"), 3, form).is_ok());
    }

    #[test]
    fn delete_product_requires_ownership() {
        let mut repo = FakeRepo::new();
        repo.reader
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id, "alice", Category::Treats))));

        assert!(matches!(
            delete_product(&repo, &user("bob"), 5),
            Err(ServiceError::Forbidden)
        ));
    }
}
