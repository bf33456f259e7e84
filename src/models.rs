use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// ============ Database Models ============

/// A persisted person together with the demographic guesses made for them.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Human {
    /// Unique identifier, assigned on creation and never changed.
    pub id: Uuid,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Middle name, omitted when not supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patronymic: Option<String>,
    /// Guessed age.
    pub age: i32,
    /// Guessed gender.
    pub gender: String,
    /// Guessed country code (ISO 3166-1 alpha-2, or empty).
    pub country: String,
}

/// Column values written by the store on create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHuman {
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub age: i32,
    pub gender: String,
    pub country: String,
}

impl NewHuman {
    /// Combines user supplied names with the enrichment guesses.
    ///
    /// An empty patronymic is treated the same as a missing one.
    pub fn from_request(req: &HumanRequest, enrichment: EnrichmentResult) -> Self {
        Self {
            name: req.name.clone(),
            surname: req.surname.clone(),
            patronymic: req.patronymic.clone().filter(|p| !p.is_empty()),
            age: enrichment.age,
            gender: enrichment.gender,
            country: enrichment.country,
        }
    }

    pub fn into_human(self, id: Uuid) -> Human {
        Human {
            id,
            name: self.name,
            surname: self.surname,
            patronymic: self.patronymic,
            age: self.age,
            gender: self.gender,
            country: self.country,
        }
    }
}

// ============ API Request Models ============

/// Body of `POST /api/humans` and `PUT /api/humans/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct HumanRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patronymic: Option<String>,
}

// ============ Enrichment Models ============

/// agify.io response.
#[derive(Debug, Clone, Deserialize)]
pub struct AgeResponse {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub name: String,
    /// `null` when the name is unknown to the service.
    pub age: Option<i32>,
}

/// genderize.io response.
#[derive(Debug, Clone, Deserialize)]
pub struct GenderResponse {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub name: String,
    pub gender: Option<String>,
    #[serde(default)]
    pub probability: f64,
}

/// nationalize.io response.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryResponse {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub name: String,
    pub country: Vec<CountryCandidate>,
}

/// One entry of the nationality distribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryCandidate {
    pub country_id: String,
    pub probability: f64,
}

/// Guesses derived from a given name. Never persisted on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentResult {
    pub age: i32,
    pub gender: String,
    pub country: String,
}
