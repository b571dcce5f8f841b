use crate::adapters::HttpClient;
use crate::core::paginator::Paginator;
use crate::core::{batcher, measures, portfolio};
use crate::domain::model::{
    Group, PortfolioSummary, Project, ProjectMeasureSet, AGGREGATED_METRICS, DEFAULT_METRICS,
};
use crate::utils::error::{ClientError, Result};

/// Instance-wide API surface: catalog listing, multi-project measures,
/// portfolio aggregation and group administration. The optional
/// `organization` scopes every call on multi-tenant servers; self-hosted
/// instances leave it unset.
pub struct SonarqubeInstance {
    http: HttpClient,
    organization: Option<String>,
}

impl SonarqubeInstance {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            organization: None,
        }
    }

    pub fn with_organization(http: HttpClient, organization: impl Into<String>) -> Self {
        Self {
            http,
            organization: Some(organization.into()),
        }
    }

    fn scoped_params(&self, mut params: Vec<(String, String)>) -> Vec<(String, String)> {
        if let Some(organization) = &self.organization {
            params.push(("organization".to_string(), organization.clone()));
        }
        params
    }

    /// Every project the configured token can see, across all catalog pages.
    pub async fn projects(&self) -> Result<Vec<Project>> {
        let params = self.scoped_params(vec![("qualifiers".to_string(), "TRK".to_string())]);
        let items = Paginator::new(&self.http, "components/search", params)
            .collect_all()
            .await?;

        tracing::debug!("catalog listing returned {} projects", items.len());
        items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(ClientError::from))
            .collect()
    }

    /// Current measures for `keys`, batched under the server's per-request
    /// limit. `metrics` defaults to the standard quality set when `None`.
    /// Projects the server never analyzed are absent from the result.
    pub async fn measures(
        &self,
        keys: &[String],
        metrics: Option<&[&str]>,
    ) -> Result<ProjectMeasureSet> {
        let metrics: Vec<String> = metrics
            .unwrap_or(&DEFAULT_METRICS)
            .iter()
            .map(|metric| metric.to_string())
            .collect();

        let entries = batcher::fetch_measures_batched(&self.http, keys, &metrics).await?;
        Ok(measures::normalize(&entries))
    }

    /// Portfolio statistics over `keys`. Always restricted to the gate and
    /// rating metrics; caller-configured metric sets do not apply here.
    pub async fn aggregate_measures(&self, keys: &[String]) -> Result<PortfolioSummary> {
        let metrics: Vec<String> = AGGREGATED_METRICS
            .iter()
            .map(|metric| metric.to_string())
            .collect();

        let entries = batcher::fetch_measures_batched(&self.http, keys, &metrics).await?;
        if entries.is_empty() {
            tracing::warn!("no measures returned for {} requested projects", keys.len());
        }

        Ok(portfolio::aggregate(&entries, keys.len()))
    }

    pub async fn create_group(&self, name: &str) -> Result<Group> {
        let form = self.scoped_params(vec![("name".to_string(), name.to_string())]);
        let body = self.http.post_form("user_groups/create", &form).await?;

        let group = body
            .get("group")
            .cloned()
            .ok_or(ClientError::MissingField { field: "group" })?;
        Ok(serde_json::from_value(group)?)
    }

    /// Deletes a user group. `Ok(false)` when the server has no such group;
    /// any other failure propagates.
    pub async fn delete_group(&self, name: &str) -> Result<bool> {
        let form = self.scoped_params(vec![("name".to_string(), name.to_string())]);

        match self.http.post_form("user_groups/delete", &form).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}
