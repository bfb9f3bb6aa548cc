//! JSON product API consumed by the admin UI.

use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde_json::json;

use crate::forms::products::{ProductForm, ProductFormError};
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::products::{self, ProductView, ProductsQuery};
use crate::storage::ArtifactStore;

fn form_error_response(err: ProductFormError) -> HttpResponse {
    match err {
        ProductFormError::Io(err) => {
            log::error!("Failed to read uploaded image: {err}");
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Failed to read uploaded image" }))
        }
        err => HttpResponse::BadRequest().json(json!({ "error": err.to_string() })),
    }
}

#[get("/products")]
pub async fn list_products(
    params: web::Query<ProductsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::list_products(repo.get_ref(), params.search.as_deref()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => service_error_response("Failed to list products", err),
    }
}

#[post("/products")]
pub async fn add_product(
    MultipartForm(form): MultipartForm<ProductForm>,
    repo: web::Data<DieselRepository>,
    store: web::Data<dyn ArtifactStore>,
) -> impl Responder {
    let payload = match form.into_payload() {
        Ok(payload) => payload,
        Err(err) => return form_error_response(err),
    };

    match products::create_product(repo.get_ref(), store.get_ref(), payload) {
        Ok(product) => HttpResponse::Created().json(ProductView::from(product)),
        Err(err) => service_error_response("Failed to create product", err),
    }
}

#[put("/products/{product_id}")]
pub async fn edit_product(
    path: web::Path<i32>,
    MultipartForm(form): MultipartForm<ProductForm>,
    repo: web::Data<DieselRepository>,
    store: web::Data<dyn ArtifactStore>,
) -> impl Responder {
    let product_id = path.into_inner();

    let payload = match form.into_payload() {
        Ok(payload) => payload,
        Err(err) => return form_error_response(err),
    };

    match products::update_product(repo.get_ref(), store.get_ref(), product_id, payload) {
        Ok(product) => HttpResponse::Ok().json(json!({
            "message": "Product updated",
            "product": ProductView::from(product),
        })),
        Err(err) => service_error_response("Failed to update product", err),
    }
}

#[delete("/products/{product_id}")]
pub async fn remove_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    store: web::Data<dyn ArtifactStore>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::delete_product(repo.get_ref(), store.get_ref(), product_id) {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "Product deleted" })),
        Err(err) => service_error_response("Failed to delete product", err),
    }
}
