//! Public storefront page.

use actix_web::{HttpResponse, Responder, get, web};
use tera::Tera;

use crate::repository::DieselRepository;
use crate::services::products::{self, ProductsQuery};

#[get("/")]
pub async fn show_index(
    params: web::Query<ProductsQuery>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match products::load_storefront_page(repo.get_ref(), params.into_inner()) {
        Ok(data) => {
            let mut context = tera::Context::new();
            context.insert("products", &data.products);
            context.insert("search", &data.search);

            match tera.render("index.html", &context) {
                Ok(body) => HttpResponse::Ok().content_type("text/html").body(body),
                Err(err) => {
                    log::error!("Failed to render storefront: {err}");
                    HttpResponse::InternalServerError().finish()
                }
            }
        }
        Err(err) => {
            log::error!("Failed to load storefront: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
