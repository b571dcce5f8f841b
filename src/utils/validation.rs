use crate::utils::error::{ClientError, Result};
use chrono::NaiveDate;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ClientError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ClientError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ClientError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Caller-supplied dates must be zero-padded YYYY-MM-DD calendar dates,
/// checked before any request leaves the client. chrono alone accepts
/// unpadded fields, so the shape is pinned separately.
pub fn validate_date(field_name: &str, value: &str) -> Result<()> {
    use regex::Regex;
    let shape = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();

    if !shape.is_match(value) || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err(ClientError::Validation {
            field: field_name.to_string(),
            reason: format!("'{}' is not a valid YYYY-MM-DD date", value),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ClientError::Validation {
            field: field_name.to_string(),
            reason: format!(
                "'{}' is not one of the accepted values: {}",
                value,
                allowed.join(", ")
            ),
        })
    }
}
