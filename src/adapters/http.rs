use crate::domain::model::{MeasureEntry, Page, Paging};
use crate::domain::ports::MeasureSource;
use crate::utils::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use url::Url;

/// Thin reqwest wrapper over the server's `api/` root. The token rides as the
/// HTTP Basic username with an empty password, which is how the server
/// expects user tokens.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        // Url::join drops the last path segment without a trailing slash
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized).map_err(|e| ClientError::InvalidConfigValue {
            field: "server.url".to_string(),
            value: normalized.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client: Client::new(),
            base_url,
            token,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidConfigValue {
                field: "endpoint".to_string(),
                value: path.to_string(),
                reason: e.to_string(),
            })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.basic_auth(token, Some("")),
            None => request,
        }
    }

    async fn read_json(response: Response) -> Result<Value> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Transport {
                status: status.as_u16(),
                body,
            });
        }

        // administration endpoints answer 204 with no body
        if body.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn get_json(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);

        let response = self
            .authorize(self.client.get(url))
            .query(query)
            .send()
            .await?;
        tracing::debug!("API response status: {}", response.status());

        Self::read_json(response).await
    }

    pub async fn post_form(&self, path: &str, form: &[(String, String)]) -> Result<Value> {
        let url = self.endpoint(path)?;
        tracing::debug!("POST {}", url);

        let response = self
            .authorize(self.client.post(url))
            .form(form)
            .send()
            .await?;
        tracing::debug!("API response status: {}", response.status());

        Self::read_json(response).await
    }
}

#[async_trait]
impl MeasureSource for HttpClient {
    async fn fetch_page(
        &self,
        endpoint: &str,
        params: &[(String, String)],
        page: u64,
    ) -> Result<Page> {
        let mut query = params.to_vec();
        query.push(("p".to_string(), page.to_string()));

        let body = self.get_json(endpoint, &query).await?;

        let paging: Paging = serde_json::from_value(
            body.get("paging")
                .cloned()
                .ok_or(ClientError::MissingField { field: "paging" })?,
        )?;

        // listing responses carry the item array under an endpoint-specific
        // key ("components", "groups", ...) next to "paging"
        let items = body
            .as_object()
            .and_then(|obj| {
                obj.iter()
                    .find(|(key, value)| key.as_str() != "paging" && value.is_array())
                    .and_then(|(_, value)| value.as_array().cloned())
            })
            .ok_or(ClientError::MissingField { field: "items" })?;

        Ok(Page { items, paging })
    }

    async fn fetch_measures(
        &self,
        keys: &[String],
        metrics: &[String],
    ) -> Result<Vec<MeasureEntry>> {
        let query = vec![
            ("projectKeys".to_string(), keys.join(",")),
            ("metricKeys".to_string(), metrics.join(",")),
        ];

        let body = self.get_json("measures/search", &query).await?;
        let measures = body
            .get("measures")
            .cloned()
            .ok_or(ClientError::MissingField { field: "measures" })?;

        Ok(serde_json::from_value(measures)?)
    }
}
