//! Humans API Library
//!
//! CRUD over human records whose age, gender and country are guessed from the
//! first name by external name-inference services.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `db`: Database connection and pool management.
//! - `db_storage`: Record store trait and its Postgres implementation.
//! - `errors`: Error kinds and their HTTP mapping.
//! - `handlers`: HTTP request handlers.
//! - `human_service`: Validation, enrichment and persistence of humans.
//! - `models`: Data models.
//! - `routes`: Router assembly and OpenAPI document.
//! - `services`: Enrichment client (agify, genderize, nationalize).

pub mod config;
pub mod db;
pub mod db_storage;
pub mod errors;
pub mod handlers;
pub mod human_service;
pub mod models;
pub mod routes;
pub mod services;
