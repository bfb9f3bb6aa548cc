//! End-to-end ingestion flows against a real database and a real local
//! artifact store.

use std::io::Cursor;

use parfumerie::forms::products::{ProductPayload, UploadedImage};
use parfumerie::repository::DieselRepository;
use parfumerie::repository::{ProductReader, ProductWriter};
use parfumerie::services::ServiceError;
use parfumerie::services::products;
use parfumerie::storage::{ArtifactStore, LocalArtifactStore};

mod common;

fn payload(name: &str, price_cents: i64, image: Option<UploadedImage>) -> ProductPayload {
    ProductPayload {
        name: name.to_string(),
        description: "A fragrance".to_string(),
        price_cents,
        on_promotion: false,
        image,
    }
}

fn png_upload(file_name: &str, width: u32, height: u32) -> UploadedImage {
    let buffer = image::RgbImage::from_pixel(width, height, image::Rgb([180, 90, 45]));
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(buffer)
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("encode fixture png");
    UploadedImage {
        file_name: file_name.to_string(),
        bytes: out.into_inner(),
    }
}

#[test]
fn create_without_image_persists_record_with_empty_locator() {
    let test_db = common::TestDb::new("service_create_without_image.db");
    let repo = DieselRepository::new(test_db.pool());
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalArtifactStore::new(dir.path());

    let created = products::create_product(&repo, &store, payload("Chanel No.5", 19990, None))
        .expect("create");

    assert_eq!(created.image, "");
    assert_eq!(created.price_cents, 19990);

    let fetched = repo
        .get_product_by_id(created.id)
        .expect("lookup")
        .expect("product exists");
    assert_eq!(fetched.image, "");
}

#[test]
fn create_with_image_persists_artifact_and_locator() {
    let test_db = common::TestDb::new("service_create_with_image.db");
    let repo = DieselRepository::new(test_db.pool());
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalArtifactStore::new(dir.path());

    let created = products::create_product(
        &repo,
        &store,
        payload("Dior Sauvage", 12900, Some(png_upload("bottle.png", 1600, 800))),
    )
    .expect("create");

    let expected_locator = format!("images/{}-bottle.jpg", created.id);
    assert_eq!(created.image, expected_locator);

    let artifact_path = dir.path().join(&expected_locator);
    assert!(artifact_path.exists());

    // Artifact was downscaled to the configured maximum width.
    let stored = image::open(&artifact_path).expect("decode stored artifact");
    assert_eq!(stored.width(), 1200);
}

#[test]
fn create_with_undecodable_image_keeps_record_without_locator() {
    let test_db = common::TestDb::new("service_create_bad_image.db");
    let repo = DieselRepository::new(test_db.pool());
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalArtifactStore::new(dir.path());

    let upload = UploadedImage {
        file_name: "broken.png".to_string(),
        bytes: b"not an image at all".to_vec(),
    };
    let result = products::create_product(&repo, &store, payload("Gucci", 8900, Some(upload)));

    assert!(matches!(result, Err(ServiceError::Image(_))));

    // The record survives the failed ingestion with an empty locator.
    let (total, items) = repo
        .list_products(Default::default())
        .expect("list products");
    assert_eq!(total, 1);
    assert_eq!(items[0].name, "Gucci");
    assert_eq!(items[0].image, "");
}

#[test]
fn update_with_new_image_replaces_artifact_on_disk() {
    let test_db = common::TestDb::new("service_update_replaces_artifact.db");
    let repo = DieselRepository::new(test_db.pool());
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalArtifactStore::new(dir.path());

    let created = products::create_product(
        &repo,
        &store,
        payload("Dior", 12900, Some(png_upload("old.png", 100, 100))),
    )
    .expect("create");
    let old_path = dir.path().join(&created.image);
    assert!(old_path.exists());

    let updated = products::update_product(
        &repo,
        &store,
        created.id,
        payload("Dior", 13900, Some(png_upload("new.png", 100, 100))),
    )
    .expect("update");

    assert_eq!(updated.image, format!("images/{}-new.jpg", created.id));
    assert!(!old_path.exists());
    assert!(dir.path().join(&updated.image).exists());
    assert_eq!(updated.price_cents, 13900);
}

#[test]
fn update_without_image_preserves_locator() {
    let test_db = common::TestDb::new("service_update_preserves_locator.db");
    let repo = DieselRepository::new(test_db.pool());
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalArtifactStore::new(dir.path());

    let created = products::create_product(
        &repo,
        &store,
        payload("Dior", 12900, Some(png_upload("bottle.png", 100, 100))),
    )
    .expect("create");

    let updated = products::update_product(
        &repo,
        &store,
        created.id,
        payload("Dior Intense", 15900, None),
    )
    .expect("update");

    assert_eq!(updated.name, "Dior Intense");
    assert_eq!(updated.image, created.image);
    assert!(dir.path().join(&updated.image).exists());
}

#[test]
fn update_unknown_product_returns_not_found() {
    let test_db = common::TestDb::new("service_update_not_found.db");
    let repo = DieselRepository::new(test_db.pool());
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalArtifactStore::new(dir.path());

    let result = products::update_product(&repo, &store, 404, payload("Ghost", 100, None));

    assert!(matches!(result, Err(ServiceError::NotFound)));
}

#[test]
fn delete_removes_artifact_and_record() {
    let test_db = common::TestDb::new("service_delete_removes_all.db");
    let repo = DieselRepository::new(test_db.pool());
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalArtifactStore::new(dir.path());

    let created = products::create_product(
        &repo,
        &store,
        payload("Dior", 12900, Some(png_upload("bottle.png", 100, 100))),
    )
    .expect("create");
    let artifact_path = dir.path().join(&created.image);
    assert!(artifact_path.exists());

    products::delete_product(&repo, &store, created.id).expect("delete");

    assert!(!artifact_path.exists());
    assert!(repo.get_product_by_id(created.id).expect("lookup").is_none());
}

#[test]
fn delete_survives_already_missing_artifact() {
    let test_db = common::TestDb::new("service_delete_missing_artifact.db");
    let repo = DieselRepository::new(test_db.pool());
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalArtifactStore::new(dir.path());

    let created = products::create_product(
        &repo,
        &store,
        payload("Dior", 12900, Some(png_upload("bottle.png", 100, 100))),
    )
    .expect("create");

    store.delete(&created.image).expect("remove artifact early");

    products::delete_product(&repo, &store, created.id).expect("delete");
    assert!(repo.get_product_by_id(created.id).expect("lookup").is_none());
}
