use sweetshop::domain::auth::AuthenticatedUser;
use sweetshop::domain::product::{Category, NewProduct};
use sweetshop::forms::orders::{CreateOrderForm, UpdateOrderForm};
use sweetshop::repository::{DieselRepository, ProductWriter};
use sweetshop::services::cart;
use sweetshop::services::ServiceError;

mod common;

fn user(sub: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: sub.to_string(),
        exp: 0,
    }
}

fn create_order_form(phone: i64) -> CreateOrderForm {
    CreateOrderForm {
        phone,
        address: Some("12 Main St".to_string()),
        message: None,
        payment: Some("Cash".to_string()),
        image_url: None,
        total_cents: None,
    }
}

#[test]
fn cart_lifecycle_through_the_service_layer() {
    let test_db = common::TestDb::new("service_cart_lifecycle.db");
    let repo = DieselRepository::new(test_db.pool());
    let buyer = user("buyer");

    assert!(matches!(
        cart::current_order(&repo, &buyer),
        Err(ServiceError::NotFound)
    ));

    let product = repo
        .create_product(
            &NewProduct::new("baker", "Gingerbread", "Spiced", Category::Treats)
                .with_price_cents(300),
        )
        .expect("create product");

    let order = cart::create_order(&repo, &buyer, create_order_form(5551234))
        .expect("create order");
    assert_eq!(order.owner, "buyer");
    assert!(order.items.is_empty());

    let order = cart::add_item(&repo, &buyer, product.id).expect("add item");
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].title, "Gingerbread");
    assert_eq!(order.items[0].price_cents, 300);

    let current = cart::current_order(&repo, &buyer).expect("current order");
    assert_eq!(current.items.len(), 1);

    let order = cart::remove_item(&repo, &buyer, product.id).expect("remove item");
    assert!(order.items.is_empty());

    assert!(matches!(
        cart::remove_item(&repo, &buyer, product.id),
        Err(ServiceError::NotFound)
    ));
}

#[test]
fn create_order_is_rejected_while_a_cart_exists() {
    let test_db = common::TestDb::new("service_create_order_rejected.db");
    let repo = DieselRepository::new(test_db.pool());
    let buyer = user("buyer");

    cart::create_order(&repo, &buyer, create_order_form(5551234)).expect("create order");

    let result = cart::create_order(&repo, &buyer, create_order_form(5559999));
    assert!(matches!(result, Err(ServiceError::Validation(_))));
}

#[test]
fn order_updates_are_guarded_by_ownership() {
    let test_db = common::TestDb::new("service_order_updates_guarded.db");
    let repo = DieselRepository::new(test_db.pool());
    let alice = user("alice");
    let bob = user("bob");

    let order = cart::create_order(&repo, &alice, create_order_form(5551234))
        .expect("create order");

    let patch = UpdateOrderForm {
        message: Some("Ring the bell".to_string()),
        ..UpdateOrderForm::default()
    };
    let result = cart::update_order(&repo, &bob, order.id, patch);
    assert!(matches!(result, Err(ServiceError::Forbidden)));

    let result = cart::delete_order(&repo, &bob, order.id);
    assert!(matches!(result, Err(ServiceError::Forbidden)));

    let patch = UpdateOrderForm {
        message: Some("Ring the bell".to_string()),
        ..UpdateOrderForm::default()
    };
    let updated = cart::update_order(&repo, &alice, order.id, patch).expect("owner update");
    assert_eq!(updated.message.as_deref(), Some("Ring the bell"));

    cart::delete_order(&repo, &alice, order.id).expect("owner delete");
    assert!(matches!(
        cart::current_order(&repo, &alice),
        Err(ServiceError::NotFound)
    ));
}

#[test]
fn carts_are_isolated_per_owner() {
    let test_db = common::TestDb::new("service_carts_isolated_per_owner.db");
    let repo = DieselRepository::new(test_db.pool());
    let alice = user("alice");
    let bob = user("bob");

    let product = repo
        .create_product(
            &NewProduct::new("baker", "Fudge", "Chocolate", Category::Treats)
                .with_price_cents(450),
        )
        .expect("create product");

    cart::create_order(&repo, &alice, create_order_form(5551111)).expect("alice order");
    cart::create_order(&repo, &bob, create_order_form(5552222)).expect("bob order");

    cart::add_item(&repo, &alice, product.id).expect("alice add");

    let alice_cart = cart::current_order(&repo, &alice).expect("alice cart");
    let bob_cart = cart::current_order(&repo, &bob).expect("bob cart");
    assert_eq!(alice_cart.items.len(), 1);
    assert!(bob_cart.items.is_empty());
}
