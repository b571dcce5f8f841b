use anyhow::Result;
use httpmock::prelude::*;
use serde_json::json;
use sonar_portfolio::{HttpClient, MeasureValue, SonarqubeInstance};

fn client(server: &MockServer) -> HttpClient {
    HttpClient::new(&server.url("/api/"), None).unwrap()
}

fn project_keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("project-{:03}", i)).collect()
}

const DEFAULT_METRIC_KEYS: &str = "alert_status,bugs,reliability_rating,vulnerabilities,\
security_rating,code_smells,sqale_rating,duplicated_lines_density,coverage,ncloc,\
ncloc_language_distribution,reliability_remediation_effort,security_remediation_effort";

#[tokio::test]
async fn test_measures_normalize_by_metric_name() -> Result<()> {
    let server = MockServer::start();

    let search = server.mock(|when, then| {
        when.method(GET)
            .path("/api/measures/search")
            .query_param("projectKeys", "svc-a,svc-b")
            .query_param("metricKeys", DEFAULT_METRIC_KEYS);
        then.status(200).json_body(json!({
            "measures": [
                { "metric": "alert_status", "value": "OK", "component": "svc-a" },
                { "metric": "reliability_rating", "value": "2.0", "component": "svc-a" },
                { "metric": "coverage", "value": "84.3", "component": "svc-a" },
                { "metric": "bugs", "value": "17", "component": "svc-b" },
                { "metric": "ncloc_language_distribution", "value": "rust=900;toml=20", "component": "svc-b" }
            ]
        }));
    });

    let instance = SonarqubeInstance::new(client(&server));
    let keys = vec!["svc-a".to_string(), "svc-b".to_string()];
    let measures = instance.measures(&keys, None).await?;

    assert_eq!(measures.len(), 2);
    assert_eq!(measures["svc-a"]["alert_status"], MeasureValue::Text("OK".to_string()));
    assert_eq!(measures["svc-a"]["reliability_rating"], MeasureValue::Integer(2));
    assert_eq!(measures["svc-a"]["coverage"], MeasureValue::Decimal(84.3));
    assert_eq!(measures["svc-b"]["bugs"], MeasureValue::Integer(17));
    assert_eq!(
        measures["svc-b"]["ncloc_language_distribution"],
        MeasureValue::Text("rust=900;toml=20".to_string())
    );

    search.assert();
    Ok(())
}

#[tokio::test]
async fn test_oversized_key_list_is_batched_transparently() -> Result<()> {
    let server = MockServer::start();
    let keys = project_keys(150);

    let first_batch = server.mock(|when, then| {
        when.method(GET)
            .path("/api/measures/search")
            .query_param("projectKeys", keys[..100].join(","));
        then.status(200).json_body(json!({
            "measures": [
                { "metric": "bugs", "value": "1", "component": "project-000" }
            ]
        }));
    });
    let second_batch = server.mock(|when, then| {
        when.method(GET)
            .path("/api/measures/search")
            .query_param("projectKeys", keys[100..].join(","));
        then.status(200).json_body(json!({
            "measures": [
                { "metric": "bugs", "value": "4", "component": "project-149" }
            ]
        }));
    });

    let instance = SonarqubeInstance::new(client(&server));
    let measures = instance.measures(&keys, Some(&["bugs"])).await?;

    // both batch responses land in one logical result
    assert_eq!(measures.len(), 2);
    assert_eq!(measures["project-000"]["bugs"], MeasureValue::Integer(1));
    assert_eq!(measures["project-149"]["bugs"], MeasureValue::Integer(4));

    first_batch.assert();
    second_batch.assert();
    Ok(())
}

#[tokio::test]
async fn test_caller_metrics_override_the_default_set() -> Result<()> {
    let server = MockServer::start();

    let search = server.mock(|when, then| {
        when.method(GET)
            .path("/api/measures/search")
            .query_param("metricKeys", "bugs,coverage");
        then.status(200).json_body(json!({
            "measures": [
                { "metric": "bugs", "value": "0", "component": "svc-a" }
            ]
        }));
    });

    let instance = SonarqubeInstance::new(client(&server));
    let keys = vec!["svc-a".to_string()];
    let measures = instance.measures(&keys, Some(&["bugs", "coverage"])).await?;

    assert_eq!(measures["svc-a"]["bugs"], MeasureValue::Integer(0));
    search.assert();
    Ok(())
}

#[tokio::test]
async fn test_unmeasured_projects_are_absent_from_the_result() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/measures/search");
        then.status(200).json_body(json!({
            "measures": [
                { "metric": "bugs", "value": "2", "component": "svc-a" }
            ]
        }));
    });

    let instance = SonarqubeInstance::new(client(&server));
    let keys = vec!["svc-a".to_string(), "never-analyzed".to_string()];
    let measures = instance.measures(&keys, Some(&["bugs"])).await?;

    assert_eq!(measures.len(), 1);
    assert!(!measures.contains_key("never-analyzed"));
    Ok(())
}

#[tokio::test]
async fn test_duplicate_entries_keep_the_later_value() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/measures/search");
        then.status(200).json_body(json!({
            "measures": [
                { "metric": "bugs", "value": "2", "component": "svc-a" },
                { "metric": "bugs", "value": "9", "component": "svc-a" }
            ]
        }));
    });

    let instance = SonarqubeInstance::new(client(&server));
    let keys = vec!["svc-a".to_string()];
    let measures = instance.measures(&keys, Some(&["bugs"])).await?;

    assert_eq!(measures["svc-a"]["bugs"], MeasureValue::Integer(9));
    Ok(())
}
