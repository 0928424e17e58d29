use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};
use serde_json::json;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::orders::{CreateOrderForm, UpdateOrderForm};
use crate::repository::DieselRepository;
use crate::routes::{error_response, parse_id};
use crate::services::cart::{
    add_item, create_order, current_order, delete_order, remove_item, update_order,
};

#[get("/products/{id}/order")]
/// Copy the product into the caller's current order and return the updated
/// order.
pub async fn add_item_to_order(
    path: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Some(product_id) = parse_id(&path) else {
        return HttpResponse::NotFound().finish();
    };

    match add_item(repo.get_ref(), &user, product_id) {
        Ok(order) => HttpResponse::Created().json(json!({ "order": order })),
        Err(err) => error_response(err),
    }
}

#[delete("/products/{id}/order")]
/// Drop the first snapshot of the product from the caller's current order.
pub async fn remove_item_from_order(
    path: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Some(product_id) = parse_id(&path) else {
        return HttpResponse::NotFound().finish();
    };

    match remove_item(repo.get_ref(), &user, product_id) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

#[get("/orders/current")]
pub async fn show_current_order(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match current_order(repo.get_ref(), &user) {
        Ok(order) => HttpResponse::Ok().json(json!({ "order": order })),
        Err(err) => error_response(err),
    }
}

#[post("/orders")]
pub async fn add_order(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<CreateOrderForm>,
) -> impl Responder {
    match create_order(repo.get_ref(), &user, form.into_inner()) {
        Ok(order) => HttpResponse::Created().json(json!({ "order": order })),
        Err(err) => error_response(err),
    }
}

#[patch("/orders/{id}")]
pub async fn modify_order(
    path: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateOrderForm>,
) -> impl Responder {
    let Some(order_id) = parse_id(&path) else {
        return HttpResponse::NotFound().finish();
    };

    match update_order(repo.get_ref(), &user, order_id, form.into_inner()) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

#[delete("/orders/{id}")]
pub async fn remove_order(
    path: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Some(order_id) = parse_id(&path) else {
        return HttpResponse::NotFound().finish();
    };

    match delete_order(repo.get_ref(), &user, order_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}
