use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Domain representation of a catalog product.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Longer description shown on the storefront.
    pub description: String,
    /// Price in the smallest currency unit (cents).
    pub price_cents: i64,
    /// Whether the product is currently promoted.
    pub on_promotion: bool,
    /// Artifact locator: a path relative to the public directory
    /// (`images/<file>`), an absolute URL, or `""` for "no image yet".
    pub image: String,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Whether the stored locator points into the local artifact store.
    pub fn has_local_image(&self) -> bool {
        !self.image.is_empty() && crate::storage::is_store_local(&self.image)
    }
}

/// Payload required to insert a new product.
///
/// New records always start with an empty image locator; the ingestion
/// service attaches the artifact after the identifier is known.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub on_promotion: bool,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price_cents: i64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price_cents,
            on_promotion: false,
        }
    }

    /// Mark the product as promoted.
    pub fn on_promotion(mut self, on_promotion: bool) -> Self {
        self.on_promotion = on_promotion;
        self
    }
}

/// Full-field patch applied when updating an existing product.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub on_promotion: bool,
    /// Replacement artifact locator; `None` keeps the stored one.
    pub image: Option<String>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateProduct {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price_cents: i64,
        on_promotion: bool,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price_cents,
            on_promotion,
            image: None,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }

    /// Replace the artifact locator.
    pub fn image(mut self, locator: impl Into<String>) -> Self {
        self.image = Some(locator.into());
        self
    }
}

/// Query definition used to list products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Optional name or description search term.
    pub search: Option<String>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    /// Construct a query that targets the whole catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results by a search term applied to the name or description.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
