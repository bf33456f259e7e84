use crate::config::EnrichmentEndpoints;
use crate::errors::AppError;
use crate::models::{AgeResponse, CountryCandidate, CountryResponse, EnrichmentResult, GenderResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the agify / genderize / nationalize name-inference services.
#[derive(Clone)]
pub struct EnrichmentClient {
    client: Client,
    endpoints: EnrichmentEndpoints,
}

impl EnrichmentClient {
    /// Creates a new `EnrichmentClient`.
    ///
    /// # Arguments
    ///
    /// * `endpoints` - Base URLs of the three lookup services.
    /// * `timeout` - Per-request timeout applied to every outbound call.
    pub fn new(endpoints: EnrichmentEndpoints, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to create enrichment client: {}", e))?;

        Ok(Self { client, endpoints })
    }

    /// Guesses age, gender and country for a given name.
    ///
    /// The three lookups run concurrently. Any failure aborts the whole lookup;
    /// there is no partial result and no retry.
    pub async fn lookup(&self, name: &str) -> Result<EnrichmentResult, AppError> {
        if name.is_empty() {
            return Err(AppError::InvalidInput("name cant be empty".to_string()));
        }

        tracing::debug!("Enriching name: {}", name);

        let (age, gender, country) = tokio::try_join!(
            self.fetch::<AgeResponse>(&self.endpoints.agify_url, name, "age"),
            self.fetch::<GenderResponse>(&self.endpoints.genderize_url, name, "gender"),
            self.fetch::<CountryResponse>(&self.endpoints.nationalize_url, name, "country"),
        )?;

        let best = most_probable_country(&country.country);

        Ok(EnrichmentResult {
            age: age.age.unwrap_or_default(),
            gender: gender.gender.unwrap_or_default(),
            country: best.country_id,
        })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        base_url: &str,
        name: &str,
        what: &str,
    ) -> Result<T, AppError> {
        // Build URL with proper parameter encoding
        let url = reqwest::Url::parse_with_params(base_url, &[("name", name)]).map_err(|e| {
            AppError::UpstreamUnavailable(format!("failed to build {} url: {}", what, e))
        })?;

        tracing::debug!("Fetching human {} from {}", what, url);

        let response = self.client.get(url).send().await.map_err(|e| {
            AppError::UpstreamUnavailable(format!("failed to get human {}: {}", what, e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("{} lookup returned {}: {}", what, status, error_text);
            return Err(AppError::UpstreamUnavailable(format!(
                "failed to get human {}: upstream returned {}",
                what, status
            )));
        }

        response.json::<T>().await.map_err(|e| {
            AppError::UpstreamUnavailable(format!("failed to decode human {}: {}", what, e))
        })
    }
}

/// Picks the candidate with the strictly greatest probability.
///
/// Scans in order and only replaces the current best on a strictly greater
/// value, so the earliest of several equal maxima wins. An empty slice yields
/// an empty country code with probability zero.
pub fn most_probable_country(candidates: &[CountryCandidate]) -> CountryCandidate {
    candidates
        .iter()
        .fold(CountryCandidate::default(), |best, candidate| {
            if candidate.probability > best.probability {
                candidate.clone()
            } else {
                best
            }
        })
}
