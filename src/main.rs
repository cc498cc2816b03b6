use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use std::io;
use std::sync::Arc;

use tasklist::config::Config;
use tasklist::routes::{self, health};
use tasklist::store::PgStore;
use tasklist::AppState;

fn startup_error(context: &str, error: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, error))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| startup_error("invalid configuration", e))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| startup_error("failed to connect to database", e))?;
    log::info!("database connected");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| startup_error("failed to run migrations", e))?;
    log::info!("migrations applied");

    let store = Arc::new(PgStore::new(pool));
    let state = web::Data::new(AppState::new(
        store.clone(),
        store,
        &config.jwt_secret,
        config.bcrypt_cost,
    ));

    log::info!("starting server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health_check)
            .service(web::scope("/api").configure(routes::config))
            .default_service(web::to(routes::not_found))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
