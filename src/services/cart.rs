//! The cart mutation service.
//!
//! Cart operations are owner-keyed: every mutation resolves "the current
//! order for this caller" rather than addressing an order by id. Item
//! mutations go through the repository's atomic append/remove primitives so
//! concurrent requests for one owner cannot lose updates.

use crate::domain::auth::AuthenticatedUser;
use crate::domain::order::{NewOrderItem, Order};
use crate::forms::orders::{CreateOrderForm, UpdateOrderForm};
use crate::repository::{OrderReader, OrderWriter, ProductReader};
use crate::services::{ServiceError, ServiceResult, ensure_ownership};

/// Locate the caller's current order. The service never creates one
/// implicitly.
pub fn current_order<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Order>
where
    R: OrderReader + ?Sized,
{
    repo.get_cart_by_owner(&user.sub)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Copy the product into the caller's cart as a snapshot, appended at the
/// end of the items sequence.
pub fn add_item<R>(repo: &R, user: &AuthenticatedUser, product_id: i32) -> ServiceResult<Order>
where
    R: ProductReader + OrderWriter + ?Sized,
{
    let product = repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let snapshot = NewOrderItem::snapshot(&product);

    repo.append_cart_item(&user.sub, &snapshot)
        .map_err(ServiceError::from)
}

/// Remove the first snapshot of `product_id` from the caller's cart.
///
/// A missing snapshot is an error, not a silent success; masking it would
/// hide client bugs.
pub fn remove_item<R>(repo: &R, user: &AuthenticatedUser, product_id: i32) -> ServiceResult<Order>
where
    R: OrderWriter + ?Sized,
{
    repo.remove_cart_item(&user.sub, product_id)
        .map_err(ServiceError::from)
}

/// The explicit order-creation path. At most one current order per owner.
pub fn create_order<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateOrderForm,
) -> ServiceResult<Order>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    if repo
        .get_cart_by_owner(&user.sub)
        .map_err(ServiceError::from)?
        .is_some()
    {
        return Err(ServiceError::Validation(
            "an order already exists for this user".to_string(),
        ));
    }

    let payload = form
        .into_new_order(&user.sub)
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    repo.create_order(&payload).map_err(ServiceError::from)
}

/// Patch the whitelisted order fields after the ownership guard passes.
/// Items never change through this path.
pub fn update_order<R>(
    repo: &R,
    user: &AuthenticatedUser,
    order_id: i32,
    form: UpdateOrderForm,
) -> ServiceResult<Order>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    let order = repo
        .get_order_by_id(order_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    ensure_ownership(user, &order)?;

    let updates = form
        .into_update_order()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    repo.update_order(order_id, &updates)
        .map_err(ServiceError::from)
}

/// Delete the order and all embedded snapshots after the ownership guard
/// passes.
pub fn delete_order<R>(repo: &R, user: &AuthenticatedUser, order_id: i32) -> ServiceResult<()>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    let order = repo
        .get_order_by_id(order_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    ensure_ownership(user, &order)?;

    repo.delete_order(order_id).map_err(ServiceError::from)
}
