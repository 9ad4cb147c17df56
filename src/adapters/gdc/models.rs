//! Wire models for the GDC REST API
//!
//! The GDC API wraps every query response in a `data` envelope holding the
//! result `hits` plus pagination metadata. Project hits have a fixed shape;
//! case hits are free-form JSON whose schema varies by cohort, so they are
//! kept as raw values and flattened into flat column names.

use serde::Deserialize;
use serde_json::Value;

/// Response envelope for GDC query endpoints
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub data: ApiData<T>,
}

/// The `data` payload: result page plus pagination
#[derive(Debug, Deserialize)]
pub struct ApiData<T> {
    pub hits: Vec<T>,

    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Pagination metadata accompanying every hits page
#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub count: usize,

    #[serde(default)]
    pub total: usize,

    #[serde(default)]
    pub page: usize,

    #[serde(default)]
    pub pages: usize,

    #[serde(default)]
    pub from: usize,

    #[serde(default)]
    pub size: usize,
}

/// One hit of the `/projects` catalog endpoint
#[derive(Debug, Deserialize)]
pub struct ProjectHit {
    pub project_id: String,
}

/// Flattens one case hit into `(column, value)` pairs.
///
/// Nested objects contribute `_`-joined column names
/// (`demographic.gender` becomes `demographic_gender`); list-valued
/// expansions contribute their first element, which is how per-case
/// singletons like `diagnoses` arrive from the API. Scalars become their
/// string rendering and JSON `null` becomes a present column with a missing
/// value, so a column is observed even when no case in the page carries a
/// value for it.
pub fn flatten_case(case: &Value) -> Vec<(String, Option<String>)> {
    let mut record = Vec::new();
    flatten_into("", case, &mut record);
    record
}

fn flatten_into(prefix: &str, value: &Value, record: &mut Vec<(String, Option<String>)>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                let column = join_path(prefix, key);
                flatten_into(&column, nested, record);
            }
        }
        Value::Array(items) => match items.first() {
            Some(first) => flatten_into(prefix, first, record),
            None => record.push((prefix.to_string(), None)),
        },
        Value::Null => record.push((prefix.to_string(), None)),
        Value::String(s) => record.push((prefix.to_string(), Some(s.clone()))),
        other => record.push((prefix.to_string(), Some(other.to_string()))),
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}_{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lookup<'a>(record: &'a [(String, Option<String>)], column: &str) -> Option<&'a Option<String>> {
        record
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    #[test]
    fn test_flatten_scalars() {
        let case = json!({
            "case_id": "c-1",
            "age_at_index": 50,
            "alive": true
        });

        let record = flatten_case(&case);

        assert_eq!(lookup(&record, "case_id"), Some(&Some("c-1".to_string())));
        assert_eq!(lookup(&record, "age_at_index"), Some(&Some("50".to_string())));
        assert_eq!(lookup(&record, "alive"), Some(&Some("true".to_string())));
    }

    #[test]
    fn test_flatten_nested_objects() {
        let case = json!({
            "demographic": { "gender": "female", "race": "white" }
        });

        let record = flatten_case(&case);

        assert_eq!(
            lookup(&record, "demographic_gender"),
            Some(&Some("female".to_string()))
        );
        assert_eq!(
            lookup(&record, "demographic_race"),
            Some(&Some("white".to_string()))
        );
    }

    #[test]
    fn test_flatten_takes_first_list_element() {
        let case = json!({
            "diagnoses": [
                { "tumor_stage": "stage iii" },
                { "tumor_stage": "stage iv" }
            ]
        });

        let record = flatten_case(&case);

        assert_eq!(
            lookup(&record, "diagnoses_tumor_stage"),
            Some(&Some("stage iii".to_string()))
        );
    }

    #[test]
    fn test_flatten_null_keeps_column() {
        let case = json!({ "days_to_death": null });

        let record = flatten_case(&case);

        assert_eq!(lookup(&record, "days_to_death"), Some(&None));
    }

    #[test]
    fn test_flatten_empty_list_keeps_column() {
        let case = json!({ "diagnoses": [] });

        let record = flatten_case(&case);

        assert_eq!(lookup(&record, "diagnoses"), Some(&None));
    }

    #[test]
    fn test_project_response_deserializes() {
        let body = json!({
            "data": {
                "hits": [
                    { "project_id": "TCGA-STAD" },
                    { "project_id": "TCGA-LGG" }
                ],
                "pagination": { "count": 2, "total": 2, "page": 1, "pages": 1, "from": 0, "size": 500 }
            }
        });

        let response: ApiResponse<ProjectHit> = serde_json::from_value(body).unwrap();
        assert_eq!(response.data.hits.len(), 2);
        assert_eq!(response.data.hits[0].project_id, "TCGA-STAD");
        assert_eq!(response.data.pagination.unwrap().total, 2);
    }
}
