//! Product ingestion service: the orchestration between the repository, the
//! image optimizer and the artifact store.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};
use crate::forms::products::ProductPayload;
use crate::imaging;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::storage::{self, ArtifactStore};

/// Query parameters accepted by the storefront and the JSON listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Optional search string entered by the user.
    pub search: Option<String>,
    /// Page requested by the UI (1-based).
    pub page: Option<usize>,
}

/// View model exposed over JSON and to the storefront template.
#[derive(Debug, Serialize)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Price in currency units, two-decimal display.
    pub price: f64,
    pub on_promotion: bool,
    pub image: String,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price_cents as f64 / 100.0,
            on_promotion: product.on_promotion,
            image: product.image,
            updated_at: product.updated_at,
        }
    }
}

/// Data required to render the storefront index template.
pub struct StorefrontPageData {
    /// Paginated product grid.
    pub products: Paginated<ProductView>,
    /// Search query echoed back to the view when present.
    pub search: Option<String>,
}

/// Lists the whole catalog, optionally filtered by a search term.
pub fn list_products<R>(repo: &R, search: Option<&str>) -> ServiceResult<Vec<ProductView>>
where
    R: ProductReader + ?Sized,
{
    let mut query = ProductListQuery::new();
    if let Some(term) = search.map(str::trim).filter(|term| !term.is_empty()) {
        query = query.search(term);
    }

    let (_, items) = repo.list_products(query).map_err(ServiceError::from)?;

    Ok(items.into_iter().map(ProductView::from).collect())
}

/// Loads one page of the public storefront.
pub fn load_storefront_page<R>(repo: &R, query: ProductsQuery) -> ServiceResult<StorefrontPageData>
where
    R: ProductReader + ?Sized,
{
    let ProductsQuery { search, page } = query;

    let page = page.unwrap_or(1);
    let mut list_query = ProductListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(term) = search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        list_query = list_query.search(term);
    }

    let (total, items) = repo.list_products(list_query).map_err(ServiceError::from)?;

    let view_items: Vec<ProductView> = items.into_iter().map(ProductView::from).collect();
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    let products = Paginated::new(view_items, page, total_pages);

    Ok(StorefrontPageData { products, search })
}

/// Creates a product, attaching the optimized image artifact when one was
/// uploaded.
///
/// The record is inserted first so the artifact name can embed its
/// identifier. If optimization, storage or the locator update fails
/// afterwards, the record is deliberately left behind with an empty locator
/// rather than rolled back; the admin can attach an image by editing it.
pub fn create_product<R>(
    repo: &R,
    store: &dyn ArtifactStore,
    payload: ProductPayload,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let ProductPayload {
        name,
        description,
        price_cents,
        on_promotion,
        image,
    } = payload;

    let new_product = NewProduct::new(name, description, price_cents).on_promotion(on_promotion);
    let created = repo
        .create_product(&new_product)
        .map_err(ServiceError::from)?;

    let Some(upload) = image else {
        return Ok(created);
    };

    let optimized = imaging::optimize(&upload.bytes)?;
    let file_name = storage::artifact_file_name(created.id, &upload.file_name);
    let locator = store.save(&optimized, &file_name)?;

    repo.set_product_image(created.id, &locator)
        .map_err(ServiceError::from)
}

/// Updates a product, optionally replacing its image artifact.
///
/// The new artifact is stored before the old one is deleted, so a storage
/// failure never leaves the product without a valid artifact. Failing to
/// remove the superseded artifact only orphans a file and is not retried.
pub fn update_product<R>(
    repo: &R,
    store: &dyn ArtifactStore,
    product_id: i32,
    payload: ProductPayload,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let existing = repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let ProductPayload {
        name,
        description,
        price_cents,
        on_promotion,
        image,
    } = payload;

    let mut updates = UpdateProduct::new(name, description, price_cents, on_promotion);

    if let Some(upload) = image {
        let optimized = imaging::optimize(&upload.bytes)?;
        let file_name = storage::artifact_file_name(product_id, &upload.file_name);
        let locator = store.save(&optimized, &file_name)?;

        if existing.has_local_image() && existing.image != locator {
            if let Err(err) = store.delete(&existing.image) {
                log::error!(
                    "Failed to delete replaced artifact {} for product {product_id}: {err}",
                    existing.image
                );
            }
        }

        updates = updates.image(locator);
    }

    repo.update_product(product_id, &updates)
        .map_err(ServiceError::from)
}

/// Deletes a product and, best-effort, its local image artifact.
pub fn delete_product<R>(repo: &R, store: &dyn ArtifactStore, product_id: i32) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let existing = repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if existing.has_local_image() {
        if let Err(err) = store.delete(&existing.image) {
            log::error!(
                "Failed to delete artifact {} for product {product_id}: {err}",
                existing.image
            );
        }
    }

    repo.delete_product(product_id).map_err(ServiceError::from)
}
