use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};
use serde_json::json;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::product::Category;
use crate::forms::products::{CreateProductForm, UpdateProductForm};
use crate::repository::DieselRepository;
use crate::routes::{error_response, parse_id};
use crate::services::products::{
    self as product_service, ItemsQuery, create_product, delete_product, update_product,
};

#[get("/items")]
/// Return the whole catalog as JSON, optionally paginated with `?page=`.
pub async fn list_items(
    params: web::Query<ItemsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match product_service::list_products(repo.get_ref(), params.into_inner()) {
        Ok(products) => HttpResponse::Ok().json(json!({ "products": products })),
        Err(err) => error_response(err),
    }
}

#[get("/items/bakery")]
pub async fn list_bakery_items(repo: web::Data<DieselRepository>) -> impl Responder {
    category_items(repo.get_ref(), Category::CakesAndCupcakes)
}

#[get("/items/crafts")]
pub async fn list_crafts_items(repo: web::Data<DieselRepository>) -> impl Responder {
    category_items(repo.get_ref(), Category::Crafts)
}

#[get("/items/treats")]
pub async fn list_treats_items(repo: web::Data<DieselRepository>) -> impl Responder {
    category_items(repo.get_ref(), Category::Treats)
}

fn category_items(repo: &DieselRepository, category: Category) -> HttpResponse {
    match product_service::products_in_category(repo, category) {
        Ok(products) => HttpResponse::Ok().json(json!({ "products": products })),
        Err(err) => error_response(err),
    }
}

#[get("/items/{id}")]
/// Return one product. Registered after the literal category paths so the
/// category names never get parsed as ids.
pub async fn get_item(path: web::Path<String>, repo: web::Data<DieselRepository>) -> impl Responder {
    let Some(product_id) = parse_id(&path) else {
        return HttpResponse::NotFound().finish();
    };

    match product_service::get_product(repo.get_ref(), product_id) {
        Ok(product) => HttpResponse::Ok().json(json!({ "product": product })),
        Err(err) => error_response(err),
    }
}

#[post("/products")]
pub async fn add_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<CreateProductForm>,
) -> impl Responder {
    match create_product(repo.get_ref(), &user, form.into_inner()) {
        Ok(product) => HttpResponse::Created().json(json!({ "product": product })),
        Err(err) => error_response(err),
    }
}

#[patch("/products/{id}")]
pub async fn modify_product(
    path: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateProductForm>,
) -> impl Responder {
    let Some(product_id) = parse_id(&path) else {
        return HttpResponse::NotFound().finish();
    };

    match update_product(repo.get_ref(), &user, product_id, form.into_inner()) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

#[delete("/products/{id}")]
pub async fn remove_product(
    path: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Some(product_id) = parse_id(&path) else {
        return HttpResponse::NotFound().finish();
    };

    match delete_product(repo.get_ref(), &user, product_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}
