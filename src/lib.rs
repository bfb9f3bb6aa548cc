pub mod db;
pub mod domain;
pub mod forms;
pub mod imaging;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
pub mod storage;
