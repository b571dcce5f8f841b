use crate::adapters::HttpClient;
use crate::core::measures;
use crate::domain::model::{HistoryPoint, MeasureHistory, MeasureValue, DEFAULT_METRICS};
use crate::utils::error::{ClientError, Result};
use crate::utils::validation;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Group permissions the server accepts for a project.
const GROUP_PERMISSIONS: [&str; 6] = [
    "admin",
    "codeviewer",
    "issueadmin",
    "securityhotspotadmin",
    "scan",
    "user",
];

/// Single-project API surface, bound to one component key. The key may refer
/// to an existing project or one about to be created.
pub struct SonarqubeProject {
    http: HttpClient,
    key: String,
    organization: Option<String>,
}

impl SonarqubeProject {
    pub fn new(http: HttpClient, key: impl Into<String>) -> Self {
        Self {
            http,
            key: key.into(),
            organization: None,
        }
    }

    pub fn with_organization(
        http: HttpClient,
        key: impl Into<String>,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            http,
            key: key.into(),
            organization: Some(organization.into()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn component_query(&self) -> Vec<(String, String)> {
        vec![("component".to_string(), self.key.clone())]
    }

    /// Whether the project exists on the server. A 404 means "no"; any other
    /// failure is a real error and propagates unchanged.
    pub async fn exists(&self) -> Result<bool> {
        match self
            .http
            .get_json("components/show", &self.component_query())
            .await
        {
            Ok(body) => {
                let key = body.pointer("/component/key").and_then(Value::as_str);
                Ok(key == Some(self.key.as_str()))
            }
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Registers the project on the server and returns its created form.
    pub async fn create(&self, name: &str, visibility: &str) -> Result<Value> {
        let mut form = vec![
            ("name".to_string(), name.to_string()),
            ("project".to_string(), self.key.clone()),
            ("visibility".to_string(), visibility.to_string()),
        ];
        if let Some(organization) = &self.organization {
            form.push(("organization".to_string(), organization.clone()));
        }

        let body = self.http.post_form("projects/create", &form).await?;
        body.get("project")
            .cloned()
            .ok_or(ClientError::MissingField { field: "project" })
    }

    /// Project metadata as the server reports it.
    pub async fn properties(&self) -> Result<Value> {
        let body = self
            .http
            .get_json("components/show", &self.component_query())
            .await?;
        body.get("component")
            .cloned()
            .ok_or(ClientError::MissingField { field: "component" })
    }

    /// Current measures for this project alone, typed per metric name.
    pub async fn measures(&self, metrics: Option<&[&str]>) -> Result<HashMap<String, MeasureValue>> {
        let metric_keys = metrics.unwrap_or(&DEFAULT_METRICS).join(",");
        let mut query = self.component_query();
        query.push(("metricKeys".to_string(), metric_keys));

        let body = self.http.get_json("measures/component", &query).await?;
        let raw = body
            .pointer("/component/measures")
            .and_then(Value::as_array)
            .cloned()
            .ok_or(ClientError::MissingField { field: "measures" })?;

        let mut result = HashMap::new();
        for measure in &raw {
            let metric = measure.get("metric").and_then(Value::as_str);
            let value = measure.get("value").and_then(Value::as_str);
            if let (Some(metric), Some(value)) = (metric, value) {
                result.insert(metric.to_string(), measures::parse_value(metric, value));
            }
        }
        Ok(result)
    }

    /// Measure history since `from` (YYYY-MM-DD). The date is validated
    /// before any request leaves the client.
    pub async fn measures_history(&self, from: &str) -> Result<MeasureHistory> {
        validation::validate_date("from", from)?;

        #[derive(Deserialize)]
        struct HistoryMeasure {
            metric: String,
            #[serde(default)]
            history: Vec<HistoryPoint>,
        }

        #[derive(Deserialize)]
        struct HistoryResponse {
            measures: Vec<HistoryMeasure>,
        }

        let mut query = self.component_query();
        query.push(("metrics".to_string(), DEFAULT_METRICS.join(",")));
        query.push(("from".to_string(), from.to_string()));

        let body = self.http.get_json("measures/search_history", &query).await?;
        let response: HistoryResponse = serde_json::from_value(body)?;

        Ok(response
            .measures
            .into_iter()
            .map(|measure| (measure.metric, measure.history))
            .collect())
    }

    /// Grants `permission` on this project to a group. `permission` must be
    /// one of the server's accepted values.
    pub async fn add_group_permission(&self, group: &str, permission: &str) -> Result<bool> {
        self.change_group_permission("permissions/add_group", group, permission)
            .await
    }

    /// Revokes `permission` on this project from a group.
    pub async fn remove_group_permission(&self, group: &str, permission: &str) -> Result<bool> {
        self.change_group_permission("permissions/remove_group", group, permission)
            .await
    }

    async fn change_group_permission(
        &self,
        endpoint: &str,
        group: &str,
        permission: &str,
    ) -> Result<bool> {
        validation::validate_one_of("permission", permission, &GROUP_PERMISSIONS)?;

        let mut form = vec![
            ("groupName".to_string(), group.to_string()),
            ("projectKey".to_string(), self.key.clone()),
            ("permission".to_string(), permission.to_string()),
        ];
        if let Some(organization) = &self.organization {
            form.push(("organization".to_string(), organization.clone()));
        }

        self.http.post_form(endpoint, &form).await?;
        Ok(true)
    }
}
