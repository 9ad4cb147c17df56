//! GDC repository client
//!
//! This module implements [`ClinicalRepository`] against a GDC-compatible
//! REST API. The catalog comes from the `/projects` endpoint filtered by
//! program name; clinical records come from `/cases` filtered by project id
//! with the demographic and diagnosis expansions, flattened into one record
//! per case.

use super::models::{flatten_case, ApiResponse, ProjectHit};
use crate::adapters::repository::ClinicalRepository;
use crate::config::{RepositoryConfig, SecretString};
use crate::domain::ids::CohortId;
use crate::domain::table::RecordTable;
use crate::domain::{RepositoryError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// GDC REST API client
///
/// # Example
///
/// ```no_run
/// use tabula::adapters::gdc::GdcRepository;
/// use tabula::adapters::repository::ClinicalRepository;
/// use tabula::config::RepositoryConfig;
///
/// # async fn example() -> tabula::domain::Result<()> {
/// let repository = GdcRepository::new(&RepositoryConfig::default())?;
/// let cohorts = repository.list_cohorts("TCGA").await?;
/// # Ok(())
/// # }
/// ```
pub struct GdcRepository {
    /// Base URL of the GDC API, without trailing slash
    base_url: String,

    /// HTTP client for making requests
    client: Client,

    /// Access token for controlled-access archives
    token: Option<SecretString>,

    /// Page size for catalog and case queries
    page_size: usize,
}

impl GdcRepository {
    /// Create a new GDC repository client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &RepositoryConfig) -> Result<Self> {
        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30));

        if !config.tls_verify {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder
            .build()
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            token: config.token.clone(),
            page_size: config.query.page_size,
        })
    }

    /// Issue a GET request and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> std::result::Result<T, RepositoryError> {
        let mut request = self.client.get(url).query(query);

        if let Some(ref token) = self.token {
            request = request.header("X-Auth-Token", token.expose_secret().trim());
        }

        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RepositoryError::InvalidResponse(e.to_string()))
    }

    /// Fetch all pages of a query endpoint, draining `hits` until the
    /// pagination total is reached or a page comes back empty.
    async fn drain_pages<T: DeserializeOwned>(
        &self,
        url: &str,
        base_query: &[(&str, String)],
    ) -> std::result::Result<Vec<T>, RepositoryError> {
        let mut hits = Vec::new();
        let mut from = 0usize;

        loop {
            let mut query = base_query.to_vec();
            query.push(("from", from.to_string()));
            query.push(("size", self.page_size.to_string()));

            let response: ApiResponse<T> = self.get_json(url, &query).await?;

            let page_len = response.data.hits.len();
            hits.extend(response.data.hits);
            from += page_len;

            let total = response.data.pagination.as_ref().map(|p| p.total);
            let exhausted = page_len == 0 || total.is_none_or(|t| from >= t);
            if exhausted {
                break;
            }
        }

        Ok(hits)
    }
}

#[async_trait]
impl ClinicalRepository for GdcRepository {
    async fn list_cohorts(&self, filter: &str) -> Result<Vec<CohortId>> {
        let url = format!("{}/projects", self.base_url);
        let filters = serde_json::json!({
            "op": "=",
            "content": { "field": "program.name", "value": filter }
        })
        .to_string();

        tracing::info!(filter = %filter, "Listing cohorts from catalog");

        let query = [
            ("filters", filters),
            ("fields", "project_id".to_string()),
            ("sort", "project_id:asc".to_string()),
        ];

        // Any failure before the first fetch means there is nothing to run
        let hits: Vec<ProjectHit> = self
            .drain_pages(&url, &query)
            .await
            .map_err(|e| RepositoryError::CatalogUnavailable(e.to_string()))?;

        let mut cohorts = Vec::new();
        for hit in hits {
            match CohortId::new(hit.project_id) {
                Ok(id) => cohorts.push(id),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping invalid project id in catalog");
                }
            }
        }

        tracing::info!(count = cohorts.len(), "Catalog listed");

        Ok(cohorts)
    }

    async fn fetch_clinical(&self, id: &CohortId) -> Result<RecordTable> {
        let url = format!("{}/cases", self.base_url);
        let filters = serde_json::json!({
            "op": "=",
            "content": { "field": "cases.project.project_id", "value": id.as_str() }
        })
        .to_string();

        tracing::debug!(cohort = %id, "Fetching clinical records");

        let query = [
            ("filters", filters),
            ("expand", "demographic,diagnoses".to_string()),
        ];

        let hits: Vec<Value> = self.drain_pages(&url, &query).await?;

        let mut table = RecordTable::new();
        for case in &hits {
            table.push_record(flatten_case(case));
        }

        tracing::debug!(
            cohort = %id,
            records = table.row_count(),
            columns = table.column_count(),
            "Fetched clinical records"
        );

        Ok(table)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Map a transport-level failure onto the domain taxonomy
fn transport_error(e: reqwest::Error) -> RepositoryError {
    if e.is_timeout() {
        RepositoryError::Timeout(e.to_string())
    } else {
        RepositoryError::ConnectionFailed(e.to_string())
    }
}

/// Map a non-2xx response onto the domain taxonomy
fn status_error(status: StatusCode, body: String) -> RepositoryError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            RepositoryError::AuthenticationFailed(format!("status {status}: {body}"))
        }
        s if s.is_client_error() => RepositoryError::ClientError {
            status: s.as_u16(),
            message: body,
        },
        s => RepositoryError::ServerError {
            status: s.as_u16(),
            message: body,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QueryConfig;

    fn config_for(base_url: &str) -> RepositoryConfig {
        RepositoryConfig {
            base_url: base_url.to_string(),
            query: QueryConfig {
                program: "TCGA".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let repository = GdcRepository::new(&config_for("https://api.gdc.cancer.gov/")).unwrap();
        assert_eq!(repository.base_url(), "https://api.gdc.cancer.gov");
    }

    #[test]
    fn test_status_error_classification() {
        let err = status_error(StatusCode::UNAUTHORIZED, "denied".to_string());
        assert!(matches!(err, RepositoryError::AuthenticationFailed(_)));

        let err = status_error(StatusCode::NOT_FOUND, "missing".to_string());
        assert!(matches!(err, RepositoryError::ClientError { status: 404, .. }));

        let err = status_error(StatusCode::BAD_GATEWAY, "oops".to_string());
        assert!(matches!(err, RepositoryError::ServerError { status: 502, .. }));
    }
}
