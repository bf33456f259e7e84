use crate::models::{Human, NewHuman};
use sqlx::PgPool;
use std::fmt;
use std::future::Future;
use uuid::Uuid;

/// Failure reported by a [`HumanStore`].
#[derive(Debug)]
pub enum StoreError {
    /// No record with the requested id.
    NotFound,
    /// Any other database failure.
    Database(sqlx::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "record not found"),
            StoreError::Database(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::NotFound => None,
            StoreError::Database(e) => Some(e),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Database(other),
        }
    }
}

/// Persistence for human records, keyed by id.
///
/// Each call is one independent statement; concurrent updates are last-write-wins.
pub trait HumanStore: Send + Sync + 'static {
    /// Inserts a new record under a freshly generated id.
    fn create(&self, human: &NewHuman) -> impl Future<Output = Result<Human, StoreError>> + Send;

    fn get(&self, id: Uuid) -> impl Future<Output = Result<Human, StoreError>> + Send;

    /// All records, oldest first.
    fn list(&self) -> impl Future<Output = Result<Vec<Human>, StoreError>> + Send;

    /// Overwrites every column except the id. Returns the new state.
    fn update(
        &self,
        id: Uuid,
        human: &NewHuman,
    ) -> impl Future<Output = Result<Human, StoreError>> + Send;

    /// Removes the record and returns its last state.
    fn delete(&self, id: Uuid) -> impl Future<Output = Result<Human, StoreError>> + Send;
}

const HUMAN_COLUMNS: &str = "id, name, surname, patronymic, age, gender, country";

/// Postgres storage for human records.
#[derive(Clone)]
pub struct PgHumanStore {
    pool: PgPool,
}

impl PgHumanStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl HumanStore for PgHumanStore {
    async fn create(&self, human: &NewHuman) -> Result<Human, StoreError> {
        let created = sqlx::query_as::<_, Human>(&format!(
            "INSERT INTO humans (id, name, surname, patronymic, age, gender, country)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {HUMAN_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&human.name)
        .bind(&human.surname)
        .bind(&human.patronymic)
        .bind(human.age)
        .bind(&human.gender)
        .bind(&human.country)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Database error in create for '{}': {:?}", human.name, e);
            StoreError::Database(e)
        })?;

        Ok(created)
    }

    async fn get(&self, id: Uuid) -> Result<Human, StoreError> {
        sqlx::query_as::<_, Human>(&format!(
            "SELECT {HUMAN_COLUMNS} FROM humans WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Human>, StoreError> {
        let humans = sqlx::query_as::<_, Human>(&format!(
            "SELECT {HUMAN_COLUMNS} FROM humans ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(humans)
    }

    async fn update(&self, id: Uuid, human: &NewHuman) -> Result<Human, StoreError> {
        sqlx::query_as::<_, Human>(&format!(
            "UPDATE humans
             SET name = $2, surname = $3, patronymic = $4, age = $5,
                 gender = $6, country = $7, updated_at = now()
             WHERE id = $1
             RETURNING {HUMAN_COLUMNS}"
        ))
        .bind(id)
        .bind(&human.name)
        .bind(&human.surname)
        .bind(&human.patronymic)
        .bind(human.age)
        .bind(&human.gender)
        .bind(&human.country)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<Human, StoreError> {
        sqlx::query_as::<_, Human>(&format!(
            "DELETE FROM humans WHERE id = $1 RETURNING {HUMAN_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }
}
