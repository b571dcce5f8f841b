use anyhow::Result;
use httpmock::prelude::*;
use serde_json::json;
use sonar_portfolio::{HttpClient, SonarqubeInstance};

fn client(server: &MockServer) -> HttpClient {
    HttpClient::new(&server.url("/api/"), None).unwrap()
}

#[tokio::test]
async fn test_aggregate_reduces_a_portfolio() -> Result<()> {
    let server = MockServer::start();

    // aggregation always asks for exactly the gate and rating metrics
    let search = server.mock(|when, then| {
        when.method(GET)
            .path("/api/measures/search")
            .query_param("projectKeys", "svc-a,svc-b")
            .query_param(
                "metricKeys",
                "alert_status,reliability_rating,sqale_rating,security_rating",
            );
        then.status(200).json_body(json!({
            "measures": [
                { "metric": "alert_status", "value": "OK", "component": "svc-a" },
                { "metric": "reliability_rating", "value": "2.0", "component": "svc-a" },
                { "metric": "sqale_rating", "value": "4.0", "component": "svc-a" },
                { "metric": "security_rating", "value": "3.0", "component": "svc-a" },
                { "metric": "alert_status", "value": "ERROR", "component": "svc-b" },
                { "metric": "reliability_rating", "value": "3.0", "component": "svc-b" },
                { "metric": "sqale_rating", "value": "3.0", "component": "svc-b" },
                { "metric": "security_rating", "value": "3.0", "component": "svc-b" }
            ]
        }));
    });

    let instance = SonarqubeInstance::new(client(&server));
    let keys = vec!["svc-a".to_string(), "svc-b".to_string()];
    let summary = instance.aggregate_measures(&keys).await?;

    assert_eq!(summary.projects_count_request, 2);
    assert_eq!(summary.projects_count_with_measures, 2);
    assert_eq!(summary.projects_failed_quality_gate, 1);
    assert_eq!(summary.ratings["reliability_rating"], 3); // 2.5 rounds up
    assert_eq!(summary.ratings["sqale_rating"], 4); // 3.5 rounds up
    assert_eq!(summary.ratings["security_rating"], 3);
    assert!(!summary.ratings.contains_key("alert_status"));
    assert_eq!(summary.releasability_rating, 3); // half the portfolio passes
    assert_eq!(summary.worst_security_rating.value, 3);
    assert_eq!(summary.worst_security_rating.projects_count, 2);
    assert_eq!(summary.worst_reliability_rating.value, 3);
    assert_eq!(summary.worst_reliability_rating.projects_count, 1);

    search.assert();
    Ok(())
}

#[tokio::test]
async fn test_aggregate_with_no_measures_is_empty_not_an_error() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/measures/search");
        then.status(200).json_body(json!({ "measures": [] }));
    });

    let instance = SonarqubeInstance::new(client(&server));
    let keys = vec!["ghost-project".to_string()];
    let summary = instance.aggregate_measures(&keys).await?;

    assert!(summary.is_empty());
    assert_eq!(summary.projects_count_request, 1);
    assert_eq!(summary.projects_count_with_measures, 0);
    assert!(summary.ratings.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_aggregate_spans_batches() -> Result<()> {
    let server = MockServer::start();
    let keys: Vec<String> = (0..101).map(|i| format!("p{:03}", i)).collect();

    let first_batch = server.mock(|when, then| {
        when.method(GET)
            .path("/api/measures/search")
            .query_param("projectKeys", keys[..100].join(","));
        then.status(200).json_body(json!({
            "measures": [
                { "metric": "alert_status", "value": "OK", "component": "p000" },
                { "metric": "security_rating", "value": "1.0", "component": "p000" }
            ]
        }));
    });
    let second_batch = server.mock(|when, then| {
        when.method(GET)
            .path("/api/measures/search")
            .query_param("projectKeys", "p100");
        then.status(200).json_body(json!({
            "measures": [
                { "metric": "alert_status", "value": "ERROR", "component": "p100" },
                { "metric": "security_rating", "value": "4.0", "component": "p100" }
            ]
        }));
    });

    let instance = SonarqubeInstance::new(client(&server));
    let summary = instance.aggregate_measures(&keys).await?;

    assert_eq!(summary.projects_count_request, 101);
    assert_eq!(summary.projects_count_with_measures, 2);
    assert_eq!(summary.projects_failed_quality_gate, 1);
    assert_eq!(summary.worst_security_rating.value, 4);
    assert_eq!(summary.worst_security_rating.projects_count, 1);

    first_batch.assert();
    second_batch.assert();
    Ok(())
}
