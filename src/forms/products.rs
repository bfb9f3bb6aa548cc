use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum accepted length for the raw price string.
const PRICE_MAX_LEN: usize = 32;
const PRICE_MAX_LEN_VALIDATOR: u64 = PRICE_MAX_LEN as u64;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
    /// The provided description is empty after sanitization.
    #[error("product description cannot be empty")]
    EmptyDescription,
    /// The price does not parse to a non-negative number.
    #[error("invalid price `{value}`")]
    InvalidPrice { value: String },
    /// The uploaded image could not be read back from the spool file.
    #[error("failed to read uploaded image: {0}")]
    Io(#[from] std::io::Error),
}

/// Multipart payload accepted by the product create and update endpoints.
#[derive(Debug, MultipartForm)]
pub struct ProductForm {
    pub name: Text<String>,
    pub description: Text<String>,
    /// Price as entered by the user; a comma decimal separator is accepted.
    pub price: Text<String>,
    /// `"true"` marks the product as promoted; anything else does not.
    pub on_promotion: Option<Text<String>>,
    /// Optional product photo. An absent or zero-length file means
    /// "no image provided".
    pub image: Option<TempFile>,
}

#[derive(Debug, Validate)]
struct ProductTextFields {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    name: String,
    #[validate(length(min = 1))]
    description: String,
    #[validate(length(min = 1, max = PRICE_MAX_LEN_VALIDATOR))]
    price: String,
}

/// Sanitized product fields ready for the ingestion service.
#[derive(Debug, Clone)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub on_promotion: bool,
    pub image: Option<UploadedImage>,
}

/// Raw bytes and original file name of an uploaded image.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ProductForm {
    /// Validates and sanitizes the multipart payload.
    pub fn into_payload(self) -> ProductFormResult<ProductPayload> {
        let fields = ProductTextFields {
            name: self.name.into_inner(),
            description: self.description.into_inner(),
            price: self.price.into_inner(),
        };
        fields.validate()?;

        let name = sanitize_inline_text(&fields.name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let description = sanitize_multiline_text(&fields.description);
        if description.is_empty() {
            return Err(ProductFormError::EmptyDescription);
        }

        let price_cents = parse_price(&fields.price)?;

        let on_promotion = self
            .on_promotion
            .map(|flag| flag.into_inner() == "true")
            .unwrap_or(false);

        let image = match self.image {
            Some(file) if file.size > 0 => {
                let bytes = std::fs::read(file.file.path())?;
                Some(UploadedImage {
                    file_name: file.file_name.unwrap_or_default(),
                    bytes,
                })
            }
            _ => None,
        };

        Ok(ProductPayload {
            name,
            description,
            price_cents,
            on_promotion,
            image,
        })
    }
}

/// Parse a user-entered price into cents, normalizing a comma decimal
/// separator to a dot.
fn parse_price(raw: &str) -> ProductFormResult<i64> {
    let normalized = raw.trim().replace(',', ".");

    let value: f64 = normalized
        .parse()
        .map_err(|_| ProductFormError::InvalidPrice {
            value: raw.to_string(),
        })?;

    if !value.is_finite() || value < 0.0 {
        return Err(ProductFormError::InvalidPrice {
            value: raw.to_string(),
        });
    }

    Ok((value * 100.0).round() as i64)
}

fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

fn sanitize_multiline_text(input: &str) -> String {
    let mut lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    while matches!(lines.first(), Some(line) if line.is_empty()) {
        lines.remove(0);
    }

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        return String::new();
    }

    let mut result = Vec::with_capacity(lines.len());
    let mut previous_empty = false;
    for line in lines {
        let is_empty = line.is_empty();
        if is_empty {
            if previous_empty {
                continue;
            }
            previous_empty = true;
            result.push(String::new());
        } else {
            previous_empty = false;
            result.push(line);
        }
    }

    result.join("\n")
}
