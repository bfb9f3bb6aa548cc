use std::env;
use std::sync::Arc;

use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;
use tera::Tera;

use parfumerie::db::establish_connection_pool;
use parfumerie::repository::DieselRepository;
use parfumerie::routes::main::show_index;
use parfumerie::routes::products::{add_product, edit_product, list_products, remove_product};
use parfumerie::storage::{ArtifactStore, LocalArtifactStore, RemoteArtifactStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());
    let public_dir = env::var("PUBLIC_DIR").unwrap_or("./public".to_string());

    let store: Arc<dyn ArtifactStore> = match env::var("STORAGE_BACKEND").as_deref() {
        Ok("remote") => {
            let base_url = match env::var("REMOTE_STORAGE_URL") {
                Ok(base_url) => base_url,
                Err(_) => {
                    log::error!("REMOTE_STORAGE_URL must be set when STORAGE_BACKEND=remote");
                    std::process::exit(1);
                }
            };
            Arc::new(RemoteArtifactStore::new(base_url))
        }
        _ => Arc::new(LocalArtifactStore::new(&public_dir)),
    };

    let images_dir = format!("{public_dir}/images");
    if let Err(e) = std::fs::create_dir_all(&images_dir) {
        log::error!("Failed to create image directory {images_dir}: {e}");
        std::process::exit(1);
    }

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/images", &images_dir))
            .service(show_index)
            .service(list_products)
            .service(add_product)
            .service(edit_product)
            .service(remove_product)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::from(store.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
