//! Integration tests for the GDC repository client, served by mockito

use mockito::Matcher;
use serde_json::json;
use tabula::adapters::gdc::GdcRepository;
use tabula::adapters::repository::ClinicalRepository;
use tabula::config::{secret_string, QueryConfig, RepositoryConfig};
use tabula::domain::{CohortId, RepositoryError, TabulaError};

fn repo_config(base_url: &str, page_size: usize) -> RepositoryConfig {
    RepositoryConfig {
        base_url: base_url.to_string(),
        query: QueryConfig {
            program: "TCGA".to_string(),
            page_size,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn project_page(ids: &[&str], total: usize, from: usize) -> String {
    json!({
        "data": {
            "hits": ids.iter().map(|id| json!({ "project_id": id })).collect::<Vec<_>>(),
            "pagination": {
                "count": ids.len(),
                "total": total,
                "from": from,
                "size": ids.len(),
                "page": 1,
                "pages": 1
            }
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_list_cohorts_single_page() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/projects")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("fields".into(), "project_id".into()),
            Matcher::UrlEncoded("from".into(), "0".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(project_page(&["TCGA-LGG", "TCGA-STAD"], 2, 0))
        .create_async()
        .await;

    let repository = GdcRepository::new(&repo_config(&server.url(), 500)).unwrap();
    let cohorts = repository.list_cohorts("TCGA").await.unwrap();

    mock.assert_async().await;
    assert_eq!(
        cohorts,
        vec![
            CohortId::new("TCGA-LGG").unwrap(),
            CohortId::new("TCGA-STAD").unwrap()
        ]
    );
}

#[tokio::test]
async fn test_list_cohorts_drains_all_pages() {
    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("GET", "/projects")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("from".into(), "0".into()),
            Matcher::UrlEncoded("size".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body(project_page(&["TCGA-BRCA", "TCGA-LGG"], 3, 0))
        .create_async()
        .await;
    let second = server
        .mock("GET", "/projects")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("from".into(), "2".into()),
            Matcher::UrlEncoded("size".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body(project_page(&["TCGA-STAD"], 3, 2))
        .create_async()
        .await;

    let repository = GdcRepository::new(&repo_config(&server.url(), 2)).unwrap();
    let cohorts = repository.list_cohorts("TCGA").await.unwrap();

    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(cohorts.len(), 3);
    assert_eq!(cohorts[2], CohortId::new("TCGA-STAD").unwrap());
}

#[tokio::test]
async fn test_list_cohorts_failure_is_catalog_unavailable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/projects")
        .with_status(503)
        .with_body("maintenance window")
        .create_async()
        .await;

    let repository = GdcRepository::new(&repo_config(&server.url(), 500)).unwrap();
    let result = repository.list_cohorts("TCGA").await;

    let err = result.unwrap_err();
    assert!(err.is_catalog_unavailable(), "got: {err}");
}

#[tokio::test]
async fn test_fetch_clinical_flattens_cases() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/cases")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": {
                    "hits": [
                        {
                            "submitter_id": "TCGA-AA-0001",
                            "demographic": { "gender": "female" },
                            "diagnoses": [ { "tumor_stage": "stage iii" } ]
                        },
                        {
                            "submitter_id": "TCGA-AA-0002",
                            "days_to_death": null
                        }
                    ],
                    "pagination": { "count": 2, "total": 2, "from": 0, "size": 500, "page": 1, "pages": 1 }
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let repository = GdcRepository::new(&repo_config(&server.url(), 500)).unwrap();
    let cohort = CohortId::new("TCGA-STAD").unwrap();
    let table = repository.fetch_clinical(&cohort).await.unwrap();

    assert_eq!(table.row_count(), 2);
    assert_eq!(table.get(0, "submitter_id"), Some("TCGA-AA-0001"));
    assert_eq!(table.get(0, "demographic_gender"), Some("female"));
    assert_eq!(table.get(0, "diagnoses_tumor_stage"), Some("stage iii"));
    // Second case lacks the expansions entirely; cells are padded
    assert_eq!(table.get(1, "demographic_gender"), None);
    // Null-valued field still observed as a column
    assert!(table.columns().contains(&"days_to_death".to_string()));
    assert_eq!(table.get(1, "days_to_death"), None);
}

#[tokio::test]
async fn test_fetch_clinical_empty_cohort_is_not_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/cases")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "data": {
                    "hits": [],
                    "pagination": { "count": 0, "total": 0, "from": 0, "size": 500, "page": 1, "pages": 0 }
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let repository = GdcRepository::new(&repo_config(&server.url(), 500)).unwrap();
    let cohort = CohortId::new("TCGA-STAD").unwrap();
    let table = repository.fetch_clinical(&cohort).await.unwrap();

    assert_eq!(table.row_count(), 0);
    assert_eq!(table.column_count(), 0);
}

#[tokio::test]
async fn test_fetch_clinical_server_error_is_recoverable_fetch_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/cases")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let repository = GdcRepository::new(&repo_config(&server.url(), 500)).unwrap();
    let cohort = CohortId::new("TCGA-STAD").unwrap();
    let err = repository.fetch_clinical(&cohort).await.unwrap_err();

    match err {
        TabulaError::Repository(RepositoryError::ServerError { status, .. }) => {
            assert_eq!(status, 500);
        }
        other => panic!("expected server error, got: {other}"),
    }
    // A per-cohort failure must never look like a catalog outage
    let err: TabulaError = RepositoryError::ServerError {
        status: 500,
        message: "boom".to_string(),
    }
    .into();
    assert!(!err.is_catalog_unavailable());
}

#[tokio::test]
async fn test_fetch_clinical_unauthorized_classified() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/cases")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body("controlled access")
        .create_async()
        .await;

    let repository = GdcRepository::new(&repo_config(&server.url(), 500)).unwrap();
    let cohort = CohortId::new("TCGA-STAD").unwrap();
    let err = repository.fetch_clinical(&cohort).await.unwrap_err();

    assert!(matches!(
        err,
        TabulaError::Repository(RepositoryError::AuthenticationFailed(_))
    ));
}

#[tokio::test]
async fn test_fetch_clinical_malformed_body_is_invalid_response() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/cases")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("this is not json")
        .create_async()
        .await;

    let repository = GdcRepository::new(&repo_config(&server.url(), 500)).unwrap();
    let cohort = CohortId::new("TCGA-STAD").unwrap();
    let err = repository.fetch_clinical(&cohort).await.unwrap_err();

    assert!(matches!(
        err,
        TabulaError::Repository(RepositoryError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_token_sent_as_auth_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/cases")
        .match_query(Matcher::Any)
        .match_header("x-auth-token", "user-token")
        .with_status(200)
        .with_body(
            json!({
                "data": {
                    "hits": [],
                    "pagination": { "count": 0, "total": 0, "from": 0, "size": 500, "page": 1, "pages": 0 }
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut config = repo_config(&server.url(), 500);
    config.token = Some(secret_string("user-token"));

    let repository = GdcRepository::new(&config).unwrap();
    let cohort = CohortId::new("TCGA-STAD").unwrap();
    repository.fetch_clinical(&cohort).await.unwrap();

    mock.assert_async().await;
}
