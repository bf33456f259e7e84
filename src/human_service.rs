//! Human CRUD operations with enrichment on create and update.
//!
//! Every operation yields either the entity together with the HTTP status to
//! answer with, or an [`AppError`] carrying its own status.

use crate::db_storage::{HumanStore, StoreError};
use crate::errors::AppError;
use crate::models::{Human, HumanRequest, NewHuman};
use crate::services::EnrichmentClient;
use axum::http::StatusCode;
use uuid::Uuid;

pub struct HumanService<S> {
    store: S,
    enrichment: EnrichmentClient,
}

impl<S: HumanStore> HumanService<S> {
    pub fn new(store: S, enrichment: EnrichmentClient) -> Self {
        Self { store, enrichment }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Enriches and persists a new human. Answers 201 on success.
    pub async fn create(&self, req: &HumanRequest) -> Result<(StatusCode, Human), AppError> {
        validate_request(req)?;

        let enrichment = self.enrichment.lookup(&req.name).await?;
        let new_human = NewHuman::from_request(req, enrichment);

        let human = self
            .store
            .create(&new_human)
            .await
            .map_err(|e| AppError::StorageError(format!("error saving human: {}", e)))?;

        tracing::info!("saved human: {}", human.id);
        Ok((StatusCode::CREATED, human))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<(StatusCode, Human), AppError> {
        let uid = parse_id(id)?;

        let human = self
            .store
            .get(uid)
            .await
            .map_err(|e| store_error(e, "failed to get human"))?;

        tracing::debug!("request for get human: {}", human.id);
        Ok((StatusCode::OK, human))
    }

    /// Lists every human. An empty store is answered with 404.
    pub async fn list(&self) -> Result<(StatusCode, Vec<Human>), AppError> {
        let humans = self
            .store
            .list()
            .await
            .map_err(|e| store_error(e, "failed to get humans"))?;

        if humans.is_empty() {
            return Err(AppError::NotFound("humans does not exist".to_string()));
        }

        tracing::debug!("request for get humans: {} found", humans.len());
        Ok((StatusCode::OK, humans))
    }

    /// Replaces the names of an existing human and recomputes all guesses
    /// from the new given name.
    pub async fn update(
        &self,
        req: &HumanRequest,
        id: &str,
    ) -> Result<(StatusCode, Human), AppError> {
        let uid = parse_id(id)?;
        validate_request(req)?;

        let enrichment = self.enrichment.lookup(&req.name).await?;
        let new_human = NewHuman::from_request(req, enrichment);

        let human = self
            .store
            .update(uid, &new_human)
            .await
            .map_err(|e| store_error(e, "error updating human"))?;

        tracing::info!("updated human: {}", human.id);
        Ok((StatusCode::OK, human))
    }

    /// Deletes a human and returns the record as it was before removal.
    pub async fn delete(&self, id: &str) -> Result<(StatusCode, Human), AppError> {
        let uid = parse_id(id)?;

        let human = self
            .store
            .delete(uid)
            .await
            .map_err(|e| store_error(e, "failed to delete human"))?;

        tracing::info!("deleted human: {}", human.id);
        Ok((StatusCode::OK, human))
    }
}

fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|e| AppError::InvalidInput(format!("bad uuid: {}", e)))
}

fn validate_request(req: &HumanRequest) -> Result<(), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::InvalidInput("name cant be empty".to_string()));
    }
    if req.surname.trim().is_empty() {
        return Err(AppError::InvalidInput("surname cant be empty".to_string()));
    }
    Ok(())
}

fn store_error(err: StoreError, context: &str) -> AppError {
    match err {
        StoreError::NotFound => AppError::NotFound("human does not exist".to_string()),
        StoreError::Database(e) => AppError::StorageError(format!("{}: {}", context, e)),
    }
}
