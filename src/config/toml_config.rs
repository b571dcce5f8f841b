use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioConfig {
    pub server: ServerConfig,
    pub portfolio: PortfolioSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub url: String,
    pub token: Option<String>,
    pub organization: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSection {
    pub name: String,
    #[serde(default)]
    pub project_keys: Vec<String>,
    pub metrics: Option<Vec<String>>,
}

impl PortfolioConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ClientError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ClientError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` placeholders with environment values. Unset
    /// variables are left intact so validation can point at them.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("server.url", &self.server.url)?;
        validation::validate_non_empty_string("portfolio.name", &self.portfolio.name)?;

        if let Some(token) = &self.server.token {
            if token.starts_with("${") {
                return Err(ClientError::InvalidConfigValue {
                    field: "server.token".to_string(),
                    value: token.clone(),
                    reason: "environment variable is not set".to_string(),
                });
            }
        }

        for key in &self.portfolio.project_keys {
            validation::validate_non_empty_string("portfolio.project_keys", key)?;
        }

        Ok(())
    }
}

impl Validate for PortfolioConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
