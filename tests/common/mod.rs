//! Shared fixtures: an in-memory record store and wiremock upstreams.
#![allow(dead_code)]

use humans_api::config::EnrichmentEndpoints;
use humans_api::db_storage::{HumanStore, StoreError};
use humans_api::human_service::HumanService;
use humans_api::models::{Human, NewHuman};
use humans_api::services::EnrichmentClient;
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Vec-backed store that records how often each mutation was attempted.
#[derive(Default)]
pub struct MemoryHumanStore {
    humans: Mutex<Vec<Human>>,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryHumanStore {
    /// Makes every following call fail with a database error.
    pub fn fail_with_database_error(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Vec<Human> {
        self.humans.lock().unwrap().clone()
    }

    pub fn creates(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

impl HumanStore for MemoryHumanStore {
    async fn create(&self, human: &NewHuman) -> Result<Human, StoreError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let created = human.clone().into_human(Uuid::new_v4());
        self.humans.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn get(&self, id: Uuid) -> Result<Human, StoreError> {
        self.check()?;
        self.humans
            .lock()
            .unwrap()
            .iter()
            .find(|h| h.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Human>, StoreError> {
        self.check()?;
        Ok(self.snapshot())
    }

    async fn update(&self, id: Uuid, human: &NewHuman) -> Result<Human, StoreError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut humans = self.humans.lock().unwrap();
        let slot = humans
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(StoreError::NotFound)?;
        *slot = human.clone().into_human(id);
        Ok(slot.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<Human, StoreError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut humans = self.humans.lock().unwrap();
        let index = humans
            .iter()
            .position(|h| h.id == id)
            .ok_or(StoreError::NotFound)?;
        Ok(humans.remove(index))
    }
}

/// Mounts agify/genderize/nationalize answers for `name` on the mock server.
pub async fn mount_enrichment(
    server: &MockServer,
    name: &str,
    age: i32,
    gender: &str,
    countries: &[(&str, f64)],
) {
    Mock::given(method("GET"))
        .and(path("/agify"))
        .and(query_param("name", name))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"count": 1000, "name": name, "age": age})),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/genderize"))
        .and(query_param("name", name))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"count": 1000, "name": name, "gender": gender, "probability": 0.99}),
        ))
        .mount(server)
        .await;

    let country: Vec<_> = countries
        .iter()
        .map(|(code, probability)| json!({"country_id": code, "probability": probability}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/nationalize"))
        .and(query_param("name", name))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"count": 1000, "name": name, "country": country})),
        )
        .mount(server)
        .await;
}

pub fn enrichment_client(server: &MockServer) -> EnrichmentClient {
    EnrichmentClient::new(
        EnrichmentEndpoints::single_host(&server.uri()),
        Duration::from_secs(5),
    )
    .expect("enrichment client")
}

pub fn human_service(server: &MockServer) -> HumanService<MemoryHumanStore> {
    HumanService::new(MemoryHumanStore::default(), enrichment_client(server))
}
