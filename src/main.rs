use std::env;

use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use sweetshop::db::establish_connection_pool;
use sweetshop::models::config::ServerConfig;
use sweetshop::repository::DieselRepository;
use sweetshop::routes::orders::{
    add_item_to_order, add_order, modify_order, remove_item_from_order, remove_order,
    show_current_order,
};
use sweetshop::routes::products::{
    add_product, get_item, list_bakery_items, list_crafts_items, list_items, list_treats_items,
    modify_product, remove_product,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("shop.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let secret = match env::var("SECRET_KEY") {
        Ok(secret) => secret,
        Err(_) => {
            log::error!("SECRET_KEY environment variable not set");
            std::process::exit(1);
        }
    };

    let server_config = ServerConfig { secret };

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            // Literal category paths go before the id path so "bakery" and
            // friends are never parsed as product ids.
            .service(list_items)
            .service(list_bakery_items)
            .service(list_crafts_items)
            .service(list_treats_items)
            .service(get_item)
            .service(add_product)
            .service(modify_product)
            .service(remove_product)
            .service(add_item_to_order)
            .service(remove_item_from_order)
            .service(show_current_order)
            .service(add_order)
            .service(modify_order)
            .service(remove_order)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
